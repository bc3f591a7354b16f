//! Paragraph segmentation
//!
//! Paragraphs are separated by one or more blank (whitespace-only) lines.
//! Segment text is kept exactly as written so whitespace-only edits remain
//! visible to the comparison.

use lazy_static::lazy_static;
use regex::Regex;
use shared_types::TextSegment;

lazy_static! {
    /// A line break followed by at least one whitespace-only line
    static ref PARAGRAPH_BREAK: Regex = Regex::new(r"\r?\n(?:[^\S\n]*\n)+").unwrap();
}

/// Which document a segment belongs to; decides the id prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentSide {
    Original,
    Revised,
}

impl DocumentSide {
    fn prefix(&self) -> &'static str {
        match self {
            DocumentSide::Original => "orig",
            DocumentSide::Revised => "rev",
        }
    }
}

/// Split `text` into ordered paragraph segments
pub fn segment(text: &str, side: DocumentSide) -> Vec<TextSegment> {
    let mut spans = Vec::new();
    let mut last = 0;
    for m in PARAGRAPH_BREAK.find_iter(text) {
        spans.push((last, m.start()));
        last = m.end();
    }
    spans.push((last, text.len()));

    let mut segments = Vec::new();
    let mut byte_cursor = 0;
    let mut char_cursor = 0;
    let mut line = 1;

    for (start, end) in spans {
        let gap = &text[byte_cursor..start];
        char_cursor += gap.chars().count();
        line += gap.matches('\n').count();

        let body = &text[start..end];
        let body_chars = body.chars().count();

        if !body.trim().is_empty() {
            let paragraph_index = segments.len() + 1;
            segments.push(TextSegment {
                id: format!("{}-{}", side.prefix(), paragraph_index),
                text: body.to_string(),
                start_offset: char_cursor,
                end_offset: char_cursor + body_chars,
                line_number: line,
                paragraph_index,
            });
        }

        char_cursor += body_chars;
        line += body.matches('\n').count();
        byte_cursor = end;
    }

    segments
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_splits_on_blank_lines() {
        let text = "Madde 1: Taraflar\n\nMadde 2: Konu\nikinci satır\n\n\nMadde 3: Süre";
        let segments = segment(text, DocumentSide::Original);

        let texts: Vec<_> = segments.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(
            texts,
            vec!["Madde 1: Taraflar", "Madde 2: Konu\nikinci satır", "Madde 3: Süre"]
        );
        assert_eq!(segments[0].id, "orig-1");
        assert_eq!(segments[2].paragraph_index, 3);
    }

    #[test]
    fn test_tracks_lines_and_char_offsets() {
        let text = "Ödeme\n\nİkinci\nparagraf\n\nÜçüncü";
        let segments = segment(text, DocumentSide::Revised);

        assert_eq!(segments[0].start_offset, 0);
        assert_eq!(segments[0].end_offset, 5);
        assert_eq!(segments[0].line_number, 1);

        assert_eq!(segments[1].start_offset, 7);
        assert_eq!(segments[1].line_number, 3);
        assert_eq!(segments[1].id, "rev-2");

        assert_eq!(segments[2].line_number, 6);
        let chars: Vec<char> = text.chars().collect();
        let extracted: String = chars[segments[2].start_offset..segments[2].end_offset]
            .iter()
            .collect();
        assert_eq!(extracted, "Üçüncü");
    }

    #[test]
    fn test_blank_lines_with_whitespace() {
        let text = "A\n   \t\nB\r\n\r\nC";
        let segments = segment(text, DocumentSide::Original);
        let texts: Vec<_> = segments.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(texts, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_discards_whitespace_only_paragraphs() {
        let text = "\n\n  \n\nA\n\n   \n\n";
        let segments = segment(text, DocumentSide::Original);
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].text, "A");
        assert_eq!(segments[0].paragraph_index, 1);
    }

    #[test]
    fn test_keeps_trailing_whitespace() {
        let segments = segment("Madde 1.   \n\nMadde 2.", DocumentSide::Original);
        assert_eq!(segments[0].text, "Madde 1.   ");
    }

    #[test]
    fn test_empty_text() {
        assert!(segment("", DocumentSide::Original).is_empty());
        assert!(segment("   \n\n \t", DocumentSide::Original).is_empty());
    }
}
