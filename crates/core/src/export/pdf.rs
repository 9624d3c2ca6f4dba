//! Minimal PDF 1.4 writer.
//!
//! Uses the standard Helvetica fonts so nothing has to be embedded. Lines are
//! measured with the Helvetica AFM advance widths before wrapping, and a new
//! page starts whenever the cursor would cross the bottom margin.

use std::fmt::Write as _;

use crate::{
    error::Result,
    export::{
        ExportData, Serializer,
        outline::{Block, outline},
    },
};

const LINE_SPACING: f64 = 1.4;

/// Helvetica advance widths for `' '..='~'`, in 1/1000 em.
#[rustfmt::skip]
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

/// Helvetica-Bold advance widths for `' '..='~'`, in 1/1000 em.
#[rustfmt::skip]
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

#[derive(Debug, Clone, Copy)]
pub struct PageLayout {
    pub width: f64,
    pub height: f64,
    pub margin: f64,
    pub body_size: f64,
}

impl Default for PageLayout {
    /// A4 portrait.
    fn default() -> Self {
        Self {
            width: 595.0,
            height: 842.0,
            margin: 50.0,
            body_size: 10.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Font {
    Regular,
    Bold,
}

impl Font {
    fn resource(self) -> &'static str {
        match self {
            Font::Regular => "F1",
            Font::Bold => "F2",
        }
    }

    fn glyph_width(self, c: char) -> u16 {
        let table = match self {
            Font::Regular => &HELVETICA_WIDTHS,
            Font::Bold => &HELVETICA_BOLD_WIDTHS,
        };
        match c {
            ' '..='~' => table[c as usize - ' ' as usize],
            '•' => 350,
            // Wider than any Latin-1 letter in either face.
            _ => 1000,
        }
    }

    /// Advance width of `text` in points.
    fn text_width(self, size: f64, text: &str) -> f64 {
        let units: u32 = text.chars().map(|c| u32::from(self.glyph_width(c))).sum();
        f64::from(units) * size / 1000.0
    }
}

#[derive(Default)]
pub struct PdfSerializer {
    layout: PageLayout,
}

impl PdfSerializer {
    pub fn with_layout(layout: PageLayout) -> Self {
        Self { layout }
    }
}

impl Serializer for PdfSerializer {
    fn render(&self, data: &ExportData) -> Result<Vec<u8>> {
        let body = self.layout.body_size;
        let mut pages = PageWriter::new(self.layout);

        for block in outline(data) {
            match block {
                Block::Title(title) => {
                    pages.write(Font::Bold, body * 1.8, 0.0, &title);
                    pages.gap(4.0);
                }
                Block::Meta(meta) => pages.write(Font::Regular, body - 1.0, 0.0, &meta),
                Block::Heading(heading) => {
                    pages.gap(10.0);
                    pages.write(Font::Bold, body * 1.4, 0.0, heading);
                    pages.gap(2.0);
                }
                Block::Subheading(title) => {
                    pages.gap(6.0);
                    pages.write(Font::Bold, body * 1.2, 0.0, &title);
                }
                Block::Paragraph(text) => pages.write(Font::Regular, body, 0.0, &text),
                Block::Bullet(text) => {
                    pages.write(Font::Regular, body, 10.0, &format!("• {}", text))
                }
                Block::Numbered(n, text) => {
                    pages.write(Font::Regular, body, 0.0, &format!("{}. {}", n, text))
                }
            }
        }

        Ok(assemble(&self.layout, pages.finish()))
    }
}

/// Accumulates content streams, one per page.
struct PageWriter {
    layout: PageLayout,
    pages: Vec<Vec<u8>>,
    current: Vec<u8>,
    y: f64,
}

impl PageWriter {
    fn new(layout: PageLayout) -> Self {
        Self {
            layout,
            pages: Vec::new(),
            current: Vec::new(),
            y: layout.height - layout.margin,
        }
    }

    fn gap(&mut self, points: f64) {
        self.y -= points;
    }

    fn write(&mut self, font: Font, size: f64, indent: f64, text: &str) {
        let usable = self.layout.width - 2.0 * self.layout.margin - indent;
        let line_height = size * LINE_SPACING;

        for line in wrap_text(text, usable, |line| font.text_width(size, line)) {
            if self.y - line_height < self.layout.margin {
                self.break_page();
            }
            self.y -= line_height;

            let mut op = String::new();
            let _ = write!(
                op,
                "BT /{} {:.1} Tf {:.2} {:.2} Td (",
                font.resource(),
                size,
                self.layout.margin + indent,
                self.y
            );
            self.current.extend_from_slice(op.as_bytes());
            self.current.extend_from_slice(&encode_pdf_text(&line));
            self.current.extend_from_slice(b") Tj ET\n");
        }
    }

    fn break_page(&mut self) {
        self.pages.push(std::mem::take(&mut self.current));
        self.y = self.layout.height - self.layout.margin;
    }

    fn finish(mut self) -> Vec<Vec<u8>> {
        if !self.current.is_empty() || self.pages.is_empty() {
            self.pages.push(self.current);
        }
        self.pages
    }
}

/// Greedy word wrap on whitespace; words wider than a line are split.
pub fn wrap_text(text: &str, max_width: f64, width_of: impl Fn(&str) -> f64) -> Vec<String> {
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut line = String::new();

        for word in paragraph.split_whitespace() {
            let candidate = if line.is_empty() {
                word.to_string()
            } else {
                format!("{} {}", line, word)
            };
            if width_of(&candidate) <= max_width {
                line = candidate;
                continue;
            }

            if !line.is_empty() {
                lines.push(std::mem::take(&mut line));
            }
            if width_of(word) <= max_width {
                line = word.to_string();
                continue;
            }

            // Split by character, keeping at least one per line.
            for c in word.chars() {
                line.push(c);
                if line.chars().count() > 1 && width_of(&line) > max_width {
                    line.pop();
                    lines.push(std::mem::replace(&mut line, c.to_string()));
                }
            }
        }

        lines.push(line);
    }

    lines
}

/// Encode for a WinAnsi-encoded literal string, escaping delimiters.
fn encode_pdf_text(text: &str) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(text.len());
    for c in text.chars() {
        let byte = match c {
            '\\' | '(' | ')' => {
                bytes.push(b'\\');
                c as u8
            }
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            '‘' => 0x91,
            '’' => 0x92,
            '“' => 0x93,
            '”' => 0x94,
            '€' => 0x80,
            c if (' '..='~').contains(&c) => c as u8,
            c if ('\u{a0}'..='\u{ff}').contains(&c) => c as u32 as u8,
            '\t' => b' ',
            _ => b'?',
        };
        bytes.push(byte);
    }
    bytes
}

fn assemble(layout: &PageLayout, pages: Vec<Vec<u8>>) -> Vec<u8> {
    // 1 catalog, 2 page tree, 3-4 fonts, then a page/content pair per page.
    let page_ids: Vec<usize> = (0..pages.len()).map(|i| 5 + i * 2).collect();
    let mut objects: Vec<Vec<u8>> = Vec::with_capacity(4 + pages.len() * 2);

    objects.push(b"<< /Type /Catalog /Pages 2 0 R >>".to_vec());

    let kids = page_ids
        .iter()
        .map(|id| format!("{} 0 R", id))
        .collect::<Vec<_>>()
        .join(" ");
    objects.push(format!("<< /Type /Pages /Kids [{}] /Count {} >>", kids, pages.len()).into_bytes());

    for base in ["Helvetica", "Helvetica-Bold"] {
        objects.push(
            format!(
                "<< /Type /Font /Subtype /Type1 /BaseFont /{} /Encoding /WinAnsiEncoding >>",
                base
            )
            .into_bytes(),
        );
    }

    for (page_id, content) in page_ids.iter().zip(pages) {
        objects.push(
            format!(
                "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {} {}] \
                 /Resources << /Font << /F1 3 0 R /F2 4 0 R >> >> /Contents {} 0 R >>",
                layout.width,
                layout.height,
                page_id + 1
            )
            .into_bytes(),
        );

        let mut stream = format!("<< /Length {} >>\nstream\n", content.len()).into_bytes();
        stream.extend_from_slice(&content);
        stream.extend_from_slice(b"\nendstream");
        objects.push(stream);
    }

    let mut out = b"%PDF-1.4\n%\xe2\xe3\xcf\xd3\n".to_vec();
    let mut offsets = Vec::with_capacity(objects.len());
    for (idx, object) in objects.iter().enumerate() {
        offsets.push(out.len());
        out.extend_from_slice(format!("{} 0 obj\n", idx + 1).as_bytes());
        out.extend_from_slice(object);
        out.extend_from_slice(b"\nendobj\n");
    }

    let xref_at = out.len();
    let mut xref = format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1);
    for offset in offsets {
        let _ = writeln!(xref, "{:010} 00000 n ", offset);
    }
    let _ = write!(
        xref,
        "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
        objects.len() + 1,
        xref_at
    );
    out.extend_from_slice(xref.as_bytes());

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::fixtures;

    fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
        haystack.windows(needle.len()).position(|w| w == needle)
    }

    fn page_count(pdf: &[u8]) -> usize {
        let text = String::from_utf8_lossy(pdf);
        let start = text.find("/Count ").unwrap() + "/Count ".len();
        text[start..]
            .split_whitespace()
            .next()
            .unwrap()
            .parse()
            .unwrap()
    }

    fn char_count(line: &str) -> f64 {
        line.chars().count() as f64
    }

    #[test]
    fn wrap_respects_width_and_keeps_words() {
        let lines = wrap_text("the quick brown fox jumps over the lazy dog", 10.0, char_count);
        assert_eq!(lines, vec!["the quick", "brown fox", "jumps over", "the lazy", "dog"]);
        assert!(lines.iter().all(|l| l.chars().count() <= 10));
    }

    #[test]
    fn wrap_splits_long_words() {
        let lines = wrap_text("ab abcdefghij", 4.0, char_count);
        assert_eq!(lines, vec!["ab", "abcd", "efgh", "ij"]);
    }

    #[test]
    fn wrap_keeps_empty_paragraphs() {
        assert_eq!(wrap_text("", 20.0, char_count), vec![""]);
        assert_eq!(wrap_text("a\n\nb", 20.0, char_count), vec!["a", "", "b"]);
    }

    #[test]
    fn document_is_well_framed() {
        let pdf = PdfSerializer::default().render(&fixtures::sample()).unwrap();

        assert!(pdf.starts_with(b"%PDF-1.4\n"));
        assert!(pdf.ends_with(b"%%EOF\n"));
        assert_eq!(page_count(&pdf), 1);
        assert!(find(&pdf, b"(Kickoff) Tj").is_some());
        assert!(find(&pdf, b"(3. Agreed, launch on April 15.) Tj").is_some());
    }

    #[test]
    fn xref_offsets_point_at_objects() {
        let pdf = PdfSerializer::default().render(&fixtures::sample()).unwrap();
        let text = String::from_utf8_lossy(&pdf).into_owned();

        let xref = text.rfind("\nxref\n").unwrap() + 1;
        let entries: Vec<usize> = text[xref..]
            .lines()
            .skip(3)
            .take_while(|line| line.ends_with(" n "))
            .map(|line| line[..10].parse().unwrap())
            .collect();

        assert!(!entries.is_empty());
        for (idx, offset) in entries.into_iter().enumerate() {
            let header = format!("{} 0 obj", idx + 1);
            assert_eq!(&pdf[offset..offset + header.len()], header.as_bytes());
        }
    }

    #[test]
    fn glyph_widths_follow_helvetica_metrics() {
        assert!((Font::Regular.text_width(10.0, "Hello") - 22.78).abs() < 1e-9);
        assert!((Font::Bold.text_width(10.0, "Hello") - 24.45).abs() < 1e-9);
        assert!(Font::Bold.text_width(18.0, "Owners") > Font::Regular.text_width(18.0, "Owners"));
    }

    #[test]
    fn bold_title_wraps_inside_the_margins() {
        let layout = PageLayout::default();
        let size = layout.body_size * 1.8;
        let usable = layout.width - 2.0 * layout.margin;
        let title = "Quarterly Planning Review With Product Marketing Owners";
        assert!(Font::Bold.text_width(size, title) > usable);

        let lines = wrap_text(title, usable, |line| Font::Bold.text_width(size, line));

        assert_eq!(
            lines,
            vec!["Quarterly Planning Review With Product Marketing", "Owners"]
        );

        let mut data = fixtures::sample();
        data.title = title.to_string();
        let pdf = PdfSerializer::default().render(&data).unwrap();
        assert!(find(&pdf, b"(Owners) Tj").is_some());
    }

    #[test]
    fn wrapped_lines_never_exceed_the_usable_width() {
        let layout = PageLayout::default();
        let text = "WWW MMMM mmmmmm Wide Words Make Measuring Matter ".repeat(12)
            + "Supercalifragilisticexpialidociously-long-hyphenated-identifier-without-spaces-at-all";

        for (font, size, indent) in [
            (Font::Bold, layout.body_size * 1.8, 0.0),
            (Font::Bold, layout.body_size * 1.4, 0.0),
            (Font::Regular, layout.body_size, 10.0),
        ] {
            let usable = layout.width - 2.0 * layout.margin - indent;
            let lines = wrap_text(&text, usable, |line| font.text_width(size, line));

            assert!(lines.len() > 1);
            for line in &lines {
                assert!(
                    font.text_width(size, line) <= usable,
                    "{line:?} is wider than {usable}"
                );
            }
        }
    }

    #[test]
    fn long_transcript_breaks_pages() {
        let mut data = fixtures::sample();
        data.transcript = (0..300).map(|i| format!("Line number {i}.")).collect();

        let pdf = PdfSerializer::default().render(&data).unwrap();

        assert!(page_count(&pdf) >= 4);
        assert!(find(&pdf, b"(300. Line number 299.) Tj").is_some());
    }

    #[test]
    fn delimiters_and_bullets_are_encoded() {
        assert_eq!(encode_pdf_text("a(b)\\"), b"a\\(b\\)\\\\".to_vec());
        assert_eq!(encode_pdf_text("• café"), vec![0x95, b' ', b'c', b'a', b'f', 0xe9]);
        assert_eq!(encode_pdf_text("日"), b"?".to_vec());
    }
}
