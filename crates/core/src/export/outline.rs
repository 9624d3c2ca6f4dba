use crate::export::ExportData;

pub const SUMMARY: &str = "Summary";
pub const DECISIONS: &str = "Key Decisions";
pub const ACTION_ITEMS: &str = "Action Items";
pub const CHAPTERS: &str = "Chapters";
pub const CHAT_HISTORY: &str = "Chat History";
pub const TRANSCRIPT: &str = "Transcript";

/// One layout element of a document export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Title(String),
    Meta(String),
    Heading(&'static str),
    Subheading(String),
    Paragraph(String),
    Bullet(String),
    Numbered(usize, String),
}

/// The section sequence every document format renders.
pub fn outline(data: &ExportData) -> Vec<Block> {
    let mut blocks = vec![
        Block::Title(data.title.clone()),
        Block::Meta(format!("Date: {}", data.date)),
        Block::Heading(SUMMARY),
        Block::Paragraph(data.summary.clone()),
        Block::Heading(DECISIONS),
    ];

    blocks.extend(data.decisions.iter().cloned().map(Block::Bullet));

    blocks.push(Block::Heading(ACTION_ITEMS));
    blocks.extend(data.action_items.iter().cloned().map(Block::Bullet));

    blocks.push(Block::Heading(CHAPTERS));
    for chapter in &data.chapters {
        blocks.push(Block::Subheading(chapter.title.clone()));
        blocks.push(Block::Meta(format!("Timestamp: {}", chapter.timestamp)));
        blocks.push(Block::Paragraph(chapter.content.clone()));
    }

    blocks.push(Block::Heading(CHAT_HISTORY));
    blocks.extend(data.chat_history.iter().cloned().map(Block::Paragraph));

    blocks.push(Block::Heading(TRANSCRIPT));
    blocks.extend(
        data.transcript
            .iter()
            .enumerate()
            .map(|(idx, line)| Block::Numbered(idx + 1, line.clone())),
    );

    blocks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::fixtures;

    #[test]
    fn sections_follow_fixed_order() {
        let headings: Vec<&str> = outline(&fixtures::sample())
            .into_iter()
            .filter_map(|block| match block {
                Block::Heading(h) => Some(h),
                _ => None,
            })
            .collect();

        assert_eq!(
            headings,
            vec![SUMMARY, DECISIONS, ACTION_ITEMS, CHAPTERS, CHAT_HISTORY, TRANSCRIPT]
        );
    }

    #[test]
    fn empty_sections_keep_their_heading() {
        let mut data = fixtures::sample();
        data.decisions.clear();
        data.chat_history.clear();

        let blocks = outline(&data);
        let decisions = blocks.iter().position(|b| *b == Block::Heading(DECISIONS)).unwrap();
        assert_eq!(blocks[decisions + 1], Block::Heading(ACTION_ITEMS));
    }

    #[test]
    fn transcript_lines_are_numbered_from_one() {
        let blocks = outline(&fixtures::sample());
        assert_eq!(
            blocks.last(),
            Some(&Block::Numbered(3, "Agreed, launch on April 15.".to_string()))
        );
    }
}
