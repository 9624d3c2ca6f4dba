use std::io::{Cursor, Read};

use meetlens_core::{
    ExportData, ExportFormat, Serializer,
    export::{ExportChapter, json::ExportEnvelope},
};

fn fixture() -> ExportData {
    ExportData {
        title: "Roadmap sync".to_string(),
        date: "2024-05-02T09:00:00Z".to_string(),
        summary: "Roadmap for the next two quarters.".to_string(),
        decisions: vec!["Freeze scope for v2".to_string()],
        action_items: vec![
            "Draft migration guide".to_string(),
            "Schedule beta interviews".to_string(),
        ],
        chapters: vec![
            ExportChapter {
                title: "Status round".to_string(),
                timestamp: "00:00".to_string(),
                content: "Each team reports progress.".to_string(),
            },
            ExportChapter {
                title: "Scope discussion".to_string(),
                timestamp: "18:20".to_string(),
                content: "What makes it into v2.".to_string(),
            },
        ],
        transcript: vec!["Morning all.".to_string(), "Let's begin.".to_string()],
        chat_history: vec!["You: Any blockers?".to_string()],
    }
}

fn ordered_terms(data: &ExportData) -> Vec<String> {
    data.decisions
        .iter()
        .chain(&data.action_items)
        .cloned()
        .chain(data.chapters.iter().map(|c| c.title.clone()))
        .collect()
}

fn assert_in_order(rendered: &str, terms: &[String], format: ExportFormat) {
    let mut cursor = 0;
    for term in terms {
        let found = rendered[cursor..]
            .find(term.as_str())
            .unwrap_or_else(|| panic!("{format}: {term:?} missing or out of order"));
        cursor += found + term.len();
    }
}

fn rendered_text(format: ExportFormat, bytes: &[u8]) -> String {
    match format {
        ExportFormat::Docx => {
            let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
            let mut part = archive.by_name("word/document.xml").unwrap();
            let mut document = String::new();
            part.read_to_string(&mut document).unwrap();
            document
        }
        _ => String::from_utf8_lossy(bytes).into_owned(),
    }
}

#[test]
fn every_format_keeps_the_same_section_order() {
    let data = fixture();
    let terms = ordered_terms(&data);

    for format in ExportFormat::ALL {
        let bytes = format.serializer().render(&data).unwrap();
        assert_in_order(&rendered_text(format, &bytes), &terms, format);
    }
}

#[test]
fn json_export_round_trips() {
    let data = fixture();
    let bytes = ExportFormat::Json.serializer().render(&data).unwrap();

    let envelope: ExportEnvelope = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(envelope.version, "1.0");
    assert!(chrono::DateTime::parse_from_rfc3339(&envelope.exported_at).is_ok());
    assert_eq!(envelope.meeting_data, data);
}

#[test]
fn json_meeting_data_uses_camel_case_keys() {
    let bytes = ExportFormat::Json.serializer().render(&fixture()).unwrap();
    let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    let meeting = value["meeting_data"].as_object().unwrap();

    let mut keys: Vec<&str> = meeting.keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(
        keys,
        vec![
            "actionItems",
            "chapters",
            "chatHistory",
            "date",
            "decisions",
            "summary",
            "title",
            "transcript"
        ]
    );
    assert_eq!(meeting["actionItems"][1], "Schedule beta interviews");
    assert_eq!(meeting["chatHistory"][0], "You: Any blockers?");
    assert_eq!(meeting["chapters"][1]["timestamp"], "18:20");
}
