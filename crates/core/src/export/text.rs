use crate::{
    error::Result,
    export::{
        ExportData, Serializer,
        outline::{Block, outline},
    },
};

pub struct TextSerializer;

impl TextSerializer {
    pub fn render_string(&self, data: &ExportData) -> String {
        let mut lines: Vec<String> = Vec::new();

        for block in outline(data) {
            match block {
                Block::Title(title) => lines.push(title),
                Block::Meta(meta) => lines.push(meta),
                Block::Heading(heading) => {
                    lines.push(String::new());
                    lines.push(heading.to_uppercase());
                }
                Block::Subheading(title) => {
                    lines.push(String::new());
                    lines.push(format!("## {}", title));
                }
                Block::Paragraph(text) => lines.push(text),
                Block::Bullet(text) => lines.push(format!("- {}", text)),
                Block::Numbered(n, text) => lines.push(format!("{}. {}", n, text)),
            }
        }

        let mut output = lines.join("\n");
        output.push('\n');
        output
    }
}

impl Serializer for TextSerializer {
    fn render(&self, data: &ExportData) -> Result<Vec<u8>> {
        Ok(self.render_string(data).into_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::fixtures;

    #[test]
    fn chapters_use_markdown_heading_marker() {
        let text = TextSerializer.render_string(&fixtures::sample());

        assert!(text.starts_with("Q2 Launch Review\nDate: 2024-03-01T10:00:00Z\n"));
        assert!(text.contains("\n## Kickoff\nTimestamp: 00:00\nAgenda and goals for the session.\n"));
        assert!(text.contains("\nKEY DECISIONS\n- Launch on April 15\n"));
        assert!(text.ends_with("3. Agreed, launch on April 15.\n"));
    }
}
