use crate::{
    backend::InsightsBackend,
    error::{MeetlensError, Result},
    types::{AnalysisResponse, Chapter, InsightChapter, MeetingInsight},
};

pub const UNTITLED_MEETING: &str = "Untitled Meeting";

/// Fetch one analysis record and turn it into a [`MeetingInsight`].
///
/// A single request is made; failures are returned as-is and never retried.
pub async fn fetch_insight(backend: &dyn InsightsBackend, media_id: &str) -> Result<MeetingInsight> {
    let response = backend.fetch_analysis(media_id).await.inspect_err(|e| {
        tracing::error!(media_id, error = %e, "failed to fetch meeting insights");
    })?;

    normalize(media_id, response).inspect_err(|e| {
        tracing::warn!(media_id, error = %e, "analysis is not ready");
    })
}

/// Reshape a backend response. Only `success` envelopes carrying a `done`
/// record are accepted; anything else is [`MeetlensError::NotReady`].
pub fn normalize(media_id: &str, response: AnalysisResponse) -> Result<MeetingInsight> {
    if response.status != "success" || response.data.status != "done" {
        let status = if response.status != "success" {
            response.status
        } else {
            response.data.status
        };
        return Err(MeetlensError::NotReady { status });
    }

    let record = response.data;
    let meta = record.meta;

    let title = if meta.video_title.trim().is_empty() {
        UNTITLED_MEETING.to_string()
    } else {
        meta.video_title
    };

    let topics = meta
        .chapters
        .iter()
        .map(|chapter| chapter.chapter_title.clone())
        .collect();

    let key_decisions = if meta.final_decision.trim().is_empty() {
        Vec::new()
    } else {
        vec![meta.final_decision]
    };

    let chapters = meta.chapters.into_iter().map(project_chapter).collect();
    let transcript_lines = segment_transcript(&record.transcription);

    Ok(MeetingInsight {
        id: media_id.to_string(),
        title,
        date: record.created_at,
        description: meta.description,
        summary: meta.summary,
        media_url: record.media_url,
        topics,
        action_items: meta.action_items,
        key_decisions,
        chapters,
        transcript: record.transcription,
        transcript_lines,
    })
}

fn project_chapter(chapter: Chapter) -> InsightChapter {
    InsightChapter {
        title: chapter.chapter_title,
        start_time: chapter.timestamp,
        end_time: String::new(),
        content: chapter.content,
        thumbnail_url: chapter.thumbnail_url,
    }
}

/// Split a transcript into sentences.
///
/// A break happens after `.`, `!` or `?` when whitespace follows. Segments are
/// trimmed and empty ones dropped; the result depends only on `text`.
pub fn segment_transcript(text: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((_, ch)) = chars.next() {
        if !matches!(ch, '.' | '!' | '?') {
            continue;
        }
        let Some(&(next_idx, next)) = chars.peek() else {
            break;
        };
        if next.is_whitespace() {
            push_segment(&mut lines, &text[start..next_idx]);
            start = next_idx;
        }
    }
    push_segment(&mut lines, &text[start..]);

    lines
}

fn push_segment(lines: &mut Vec<String>, segment: &str) {
    let segment = segment.trim();
    if !segment.is_empty() {
        lines.push(segment.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AnalysisMeta, AnalysisRecord};

    fn chapter(title: &str, timestamp: &str) -> Chapter {
        Chapter {
            chapter_title: title.to_string(),
            timestamp: timestamp.to_string(),
            content: format!("{title} content"),
            thumbnail_url: None,
        }
    }

    fn done_response(meta: AnalysisMeta, transcription: &str) -> AnalysisResponse {
        AnalysisResponse {
            status: "success".to_string(),
            data: AnalysisRecord {
                status: "done".to_string(),
                meta,
                transcription: transcription.to_string(),
                media_url: "https://cdn.example.com/a.mp4".to_string(),
                created_at: "2024-03-01T10:00:00Z".to_string(),
                updated_at: "2024-03-01T10:05:00Z".to_string(),
            },
        }
    }

    #[test]
    fn done_record_becomes_insight() {
        let meta = AnalysisMeta {
            summary: "Quarterly planning".to_string(),
            description: "Planning call".to_string(),
            video_title: "Q2 planning".to_string(),
            chapters: vec![chapter("Intro", "00:00"), chapter("Budget", "05:10")],
            action_items: vec!["Send deck".to_string(), "Book venue".to_string()],
            final_decision: "Launch in Q2".to_string(),
        };

        let insight = normalize("m-1", done_response(meta, "Hi all. Let's start!")).unwrap();

        assert_eq!(insight.id, "m-1");
        assert_eq!(insight.title, "Q2 planning");
        assert_eq!(insight.date, "2024-03-01T10:00:00Z");
        assert_eq!(insight.topics, vec!["Intro", "Budget"]);
        assert_eq!(insight.key_decisions, vec!["Launch in Q2"]);
        assert_eq!(insight.action_items, vec!["Send deck", "Book venue"]);
        assert_eq!(insight.chapters[1].start_time, "05:10");
        assert!(insight.chapters.iter().all(|c| c.end_time.is_empty()));
        assert_eq!(insight.transcript_lines, vec!["Hi all.", "Let's start!"]);
    }

    #[test]
    fn topics_track_chapters_and_keep_duplicates() {
        let meta = AnalysisMeta {
            video_title: "Sync".to_string(),
            chapters: vec![chapter("Q&A", "1"), chapter("Q&A", "2"), chapter("Wrap", "3")],
            ..Default::default()
        };

        let insight = normalize("m-2", done_response(meta, "")).unwrap();

        assert_eq!(insight.topics.len(), insight.chapters.len());
        assert_eq!(insight.topics, vec!["Q&A", "Q&A", "Wrap"]);
        assert!(insight.key_decisions.is_empty());
        assert!(insight.transcript_lines.is_empty());
    }

    #[test]
    fn empty_title_falls_back_to_placeholder() {
        let meta = AnalysisMeta {
            video_title: "   ".to_string(),
            ..Default::default()
        };
        let insight = normalize("m-3", done_response(meta, "")).unwrap();
        assert_eq!(insight.title, UNTITLED_MEETING);
    }

    #[test]
    fn pending_record_is_not_ready() {
        let mut response = done_response(AnalysisMeta::default(), "");
        response.data.status = "processing".to_string();

        let err = normalize("m-4", response).unwrap_err();
        assert!(matches!(err, MeetlensError::NotReady { ref status } if status == "processing"));
    }

    #[test]
    fn failed_envelope_is_not_ready() {
        let mut response = done_response(AnalysisMeta::default(), "");
        response.status = "error".to_string();

        let err = normalize("m-5", response).unwrap_err();
        assert!(matches!(err, MeetlensError::NotReady { ref status } if status == "error"));
    }

    #[test]
    fn segmentation_splits_on_terminal_punctuation() {
        let lines = segment_transcript("  Good morning. Are we live?Yes!  Great...  ok ");
        assert_eq!(
            lines,
            vec!["Good morning.", "Are we live?Yes!", "Great...", "ok"]
        );
    }

    #[test]
    fn segmentation_keeps_decimals_and_urls_together() {
        let lines = segment_transcript("Revenue grew 3.5 percent. See example.com for details.");
        assert_eq!(
            lines,
            vec!["Revenue grew 3.5 percent.", "See example.com for details."]
        );
    }

    #[test]
    fn segmentation_is_idempotent() {
        let text = "First point.\nSecond point!\n\nThird?   Fourth";
        let once = segment_transcript(text);
        let twice = segment_transcript(text);
        assert_eq!(once, twice);
        assert_eq!(segment_transcript(&once.join(" ")), once);
    }
}
