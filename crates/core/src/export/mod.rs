//! Export of a meeting snapshot to downloadable files.
//!
//! [`ExportData::snapshot`] freezes the current insight and chat history.
//! Each [`ExportFormat`] maps to one [`Serializer`]; PDF, DOCX and text walk
//! the shared [`outline`] so they agree on section order, JSON wraps the
//! snapshot in a versioned envelope.

pub mod docx;
pub mod json;
pub mod outline;
pub mod pdf;
pub mod text;

use std::{
    fmt,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::{
    error::{MeetlensError, Result},
    format::format_chat_line,
    types::{ChatMessage, MeetingInsight},
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportData {
    pub title: String,
    pub date: String,
    pub summary: String,
    pub decisions: Vec<String>,
    pub action_items: Vec<String>,
    pub chapters: Vec<ExportChapter>,
    pub transcript: Vec<String>,
    pub chat_history: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportChapter {
    pub title: String,
    pub timestamp: String,
    pub content: String,
}

impl ExportData {
    pub fn snapshot(insight: &MeetingInsight, chat: &[ChatMessage]) -> Self {
        Self {
            title: insight.title.clone(),
            date: insight.date.clone(),
            summary: insight.summary.clone(),
            decisions: insight.key_decisions.clone(),
            action_items: insight.action_items.clone(),
            chapters: insight
                .chapters
                .iter()
                .map(|chapter| ExportChapter {
                    title: chapter.title.clone(),
                    timestamp: chapter.start_time.clone(),
                    content: chapter.content.clone(),
                })
                .collect(),
            transcript: insight.transcript_lines.clone(),
            chat_history: chat.iter().map(format_chat_line).collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    Pdf,
    Docx,
    Text,
    Json,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 4] = [
        ExportFormat::Pdf,
        ExportFormat::Docx,
        ExportFormat::Text,
        ExportFormat::Json,
    ];

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Pdf => "pdf",
            ExportFormat::Docx => "docx",
            ExportFormat::Text => "txt",
            ExportFormat::Json => "json",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ExportFormat::Pdf => "PDF",
            ExportFormat::Docx => "DOCX",
            ExportFormat::Text => "Text",
            ExportFormat::Json => "JSON",
        }
    }

    pub fn serializer(&self) -> Box<dyn Serializer> {
        match self {
            ExportFormat::Pdf => Box::new(pdf::PdfSerializer::default()),
            ExportFormat::Docx => Box::new(docx::DocxSerializer),
            ExportFormat::Text => Box::new(text::TextSerializer),
            ExportFormat::Json => Box::new(json::JsonSerializer::now()),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Turns a snapshot into the bytes of one file format.
pub trait Serializer {
    fn render(&self, data: &ExportData) -> Result<Vec<u8>>;
}

/// `<title>-insights.<ext>` with the title reduced to a safe file stem.
pub fn file_name(title: &str, format: ExportFormat) -> String {
    let stem: String = title
        .trim()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '-'
            }
        })
        .collect();
    let stem = stem.trim_matches(|c| c == '-' || c == '.');
    let stem = if stem.is_empty() { "meeting" } else { stem };
    format!("{}-insights.{}", stem, format.extension())
}

/// Render `data` as `format` and write it into `dir`.
pub async fn export_file(data: &ExportData, format: ExportFormat, dir: &Path) -> Result<PathBuf> {
    let bytes = format
        .serializer()
        .render(data)
        .map_err(|e| MeetlensError::ExportFailed {
            format,
            reason: e.to_string(),
        })?;

    fs::create_dir_all(dir).await?;
    let path = dir.join(file_name(&data.title, format));
    fs::write(&path, bytes).await?;

    tracing::info!(format = %format, path = %path.display(), "export written");
    Ok(path)
}

/// Export every requested format; one failing format does not stop the rest.
pub async fn export_all(
    data: &ExportData,
    formats: &[ExportFormat],
    dir: &Path,
) -> Vec<(ExportFormat, Result<PathBuf>)> {
    let mut results = Vec::with_capacity(formats.len());
    for &format in formats {
        let result = export_file(data, format, dir).await;
        if let Err(e) = &result {
            tracing::error!(format = %format, error = %e, "export failed");
        }
        results.push((format, result));
    }
    results
}
