use crate::{
    timestamp::parse_timestamp,
    types::{ChatMessage, ChatRole, MeetingInsight},
};

/// Format seconds as MM:SS, or H:MM:SS past the first hour
pub fn format_timestamp(seconds: f64) -> String {
    let total = seconds.max(0.0) as u64;
    let (hours, mins, secs) = (total / 3600, (total % 3600) / 60, total % 60);
    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, mins, secs)
    } else {
        format!("{:02}:{:02}", mins, secs)
    }
}

pub fn format_chat_line(message: &ChatMessage) -> String {
    let speaker = match message.role {
        ChatRole::User => "You",
        ChatRole::Bot => "Assistant",
    };
    format!("{}: {}", speaker, message.message)
}

pub fn format_insight_readable(insight: &MeetingInsight) -> String {
    let mut output = String::new();
    output.push_str(&format!("# {}\n\n", insight.title));
    if !insight.date.is_empty() {
        output.push_str(&format!("**Date:** {}\n\n", insight.date));
    }

    if !insight.summary.is_empty() {
        output.push_str("## Summary\n\n");
        output.push_str(&insight.summary);
        output.push_str("\n\n");
    }

    output.push_str("## Key decisions\n\n");
    for decision in &insight.key_decisions {
        output.push_str(&format!("• {}\n", decision));
    }
    output.push('\n');

    output.push_str("## Action items\n\n");
    for item in &insight.action_items {
        output.push_str(&format!("• {}\n", item));
    }
    output.push('\n');

    output.push_str("## Chapters\n\n");
    for (idx, chapter) in insight.chapters.iter().enumerate() {
        // Unparseable timestamps are shown as the backend sent them.
        let start = parse_timestamp(&chapter.start_time)
            .offset()
            .map(format_timestamp)
            .unwrap_or_else(|| chapter.start_time.clone());
        output.push_str(&format!("### {}. [{}] {}\n\n", idx + 1, start, chapter.title));
        output.push_str(&format!("{}\n\n", chapter.content));
    }

    if !insight.transcript_lines.is_empty() {
        output.push_str("## Transcript\n\n");
        for (idx, line) in insight.transcript_lines.iter().enumerate() {
            output.push_str(&format!("{:>4}. {}\n", idx + 1, line));
        }
        output.push('\n');
    }

    output
}
