use serde::{Deserialize, Serialize};

/// Envelope returned by `GET /media/{id}/analysis`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub status: String,
    #[serde(default)]
    pub data: AnalysisRecord,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisRecord {
    pub status: String,
    pub meta: AnalysisMeta,
    pub transcription: String,
    pub media_url: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisMeta {
    pub summary: String,
    pub description: String,
    pub video_title: String,
    pub chapters: Vec<Chapter>,
    pub action_items: Vec<String>,
    pub final_decision: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Chapter {
    pub chapter_title: String,
    pub timestamp: String,
    pub content: String,
    pub thumbnail_url: Option<String>,
}

/// Page-level projection of an analysis record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeetingInsight {
    pub id: String,
    pub title: String,
    pub date: String,
    pub description: String,
    pub summary: String,
    pub media_url: String,
    pub topics: Vec<String>,
    pub action_items: Vec<String>,
    pub key_decisions: Vec<String>,
    pub chapters: Vec<InsightChapter>,
    pub transcript: String,
    pub transcript_lines: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightChapter {
    pub title: String,
    pub start_time: String,
    /// Always empty: the backend does not report chapter ends.
    pub end_time: String,
    pub content: String,
    pub thumbnail_url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Bot,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: u64,
    #[serde(rename = "type")]
    pub role: ChatRole,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest<'a> {
    pub user_id: &'a str,
    pub media_id: &'a str,
    pub message: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    pub status: String,
    #[serde(default)]
    pub response: String,
}
