//! Markdown to Google Docs paragraph styles.
//!
//! Generated documents use a small Markdown subset. Headings become named
//! paragraph styles, emphasis markers are dropped, and every other non-empty
//! line is tagged as normal text. Offsets are Docs body indexes: UTF-16 code
//! units, starting at 1.

use crate::google::types::{DocsRequest, Location, ParagraphStyle, Range};
use regex::Regex;
use std::sync::LazyLock;

static HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(#{1,6})\s+(.+?)(?:\s+#+)?\s*$").expect("Invalid heading regex")
});

static EMPHASIS: LazyLock<[(Regex, &'static str); 4]> = LazyLock::new(|| {
    let re = |pattern: &str| Regex::new(pattern).expect("Invalid emphasis regex");
    [
        (re(r"\*\*(.+?)\*\*"), "$1"),
        (re(r"__(.+?)__"), "$1"),
        (re(r"\*([^*\s][^*]*?)\*"), "$1"),
        (re(r"\b_([^_\s][^_]*?)_\b"), "$1"),
    ]
});

/// Named paragraph style applied to a range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParagraphKind {
    Title,
    Heading1,
    Heading2,
    Heading3,
    NormalText,
}

impl ParagraphKind {
    /// The Docs API `namedStyleType` value.
    pub fn named_style(&self) -> &'static str {
        match self {
            ParagraphKind::Title => "TITLE",
            ParagraphKind::Heading1 => "HEADING_1",
            ParagraphKind::Heading2 => "HEADING_2",
            ParagraphKind::Heading3 => "HEADING_3",
            ParagraphKind::NormalText => "NORMAL_TEXT",
        }
    }

    fn for_heading(level: usize, line_index: usize) -> Self {
        if level == 1 || line_index == 0 {
            return ParagraphKind::Title;
        }
        match level {
            2 => ParagraphKind::Heading1,
            3 => ParagraphKind::Heading2,
            _ => ParagraphKind::Heading3,
        }
    }
}

/// A styled span of the inserted text, end exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyledRange {
    pub start: usize,
    pub end: usize,
    pub style: ParagraphKind,
}

/// Cleaned document text plus the styles to apply after inserting it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedDocument {
    pub text: String,
    pub ranges: Vec<StyledRange>,
}

impl FormattedDocument {
    /// One `insertText` at index 1 followed by one style update per range.
    pub fn to_requests(&self) -> Vec<DocsRequest> {
        let mut requests = Vec::with_capacity(self.ranges.len() + 1);
        requests.push(DocsRequest::InsertText {
            location: Location { index: 1 },
            text: self.text.clone(),
        });
        requests.extend(self.ranges.iter().map(|range| DocsRequest::UpdateParagraphStyle {
            range: Range {
                start_index: range.start,
                end_index: range.end,
            },
            paragraph_style: ParagraphStyle {
                named_style_type: range.style.named_style().to_string(),
            },
            fields: "namedStyleType".to_string(),
        }));
        requests
    }

    /// The text covered by `range`, for inspection and tests.
    pub fn text_in(&self, range: &StyledRange) -> String {
        let units: Vec<u16> = self.text.encode_utf16().collect();
        let start = range.start.saturating_sub(1).min(units.len());
        let end = range.end.saturating_sub(1).min(units.len());
        String::from_utf16_lossy(&units[start..end])
    }
}

/// Convert generated Markdown into insertable text and paragraph styles.
pub fn format_markdown(content: &str) -> FormattedDocument {
    let mut lines = Vec::new();
    let mut ranges = Vec::new();
    let mut index = 1;

    for (line_index, line) in content.lines().enumerate() {
        let (cleaned, style) = match HEADING.captures(line) {
            Some(caps) => {
                let level = caps[1].len();
                (caps[2].to_string(), Some(ParagraphKind::for_heading(level, line_index)))
            }
            None => {
                let cleaned = strip_emphasis(line);
                let style = (!cleaned.trim().is_empty()).then_some(ParagraphKind::NormalText);
                (cleaned, style)
            }
        };

        let len = cleaned.encode_utf16().count();
        if let Some(style) = style {
            ranges.push(StyledRange {
                start: index,
                end: index + len,
                style,
            });
        }

        index += len + 1;
        lines.push(cleaned);
    }

    FormattedDocument {
        text: lines.join("\n"),
        ranges,
    }
}

fn strip_emphasis(line: &str) -> String {
    EMPHASIS
        .iter()
        .fold(line.to_string(), |acc, (re, rep)| re.replace_all(&acc, *rep).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_and_section_offsets() {
        let doc = format_markdown("# Title\nBody text.\n## Section\nMore text.");

        assert_eq!(doc.text, "Title\nBody text.\nSection\nMore text.");
        assert!(!doc.text.contains('#'));
        assert_eq!(
            doc.ranges,
            vec![
                StyledRange { start: 1, end: 6, style: ParagraphKind::Title },
                StyledRange { start: 7, end: 17, style: ParagraphKind::NormalText },
                StyledRange { start: 18, end: 25, style: ParagraphKind::Heading1 },
                StyledRange { start: 26, end: 36, style: ParagraphKind::NormalText },
            ]
        );
        assert_eq!(doc.text_in(&doc.ranges[2]), "Section");
    }

    #[test]
    fn test_heading_levels() {
        let doc = format_markdown("Intro\n# Main\n## A\n### B\n#### C\n###### D");
        let styles: Vec<_> = doc.ranges.iter().map(|r| r.style).collect();
        assert_eq!(
            styles,
            vec![
                ParagraphKind::NormalText,
                ParagraphKind::Title,
                ParagraphKind::Heading1,
                ParagraphKind::Heading2,
                ParagraphKind::Heading3,
                ParagraphKind::Heading3,
            ]
        );
    }

    #[test]
    fn test_first_line_heading_is_title() {
        let doc = format_markdown("## Opening\ntext");
        assert_eq!(doc.ranges[0].style, ParagraphKind::Title);
        assert_eq!(doc.text_in(&doc.ranges[0]), "Opening");
    }

    #[test]
    fn test_empty_lines_advance_without_style() {
        let doc = format_markdown("# T\n\nBody");
        assert_eq!(doc.ranges.len(), 2);
        // "T" [1,2), "\n" at 2, empty line "\n" at 3, "Body" from 4
        assert_eq!(doc.ranges[1].start, 4);
        assert_eq!(doc.text_in(&doc.ranges[1]), "Body");
    }

    #[test]
    fn test_emphasis_removed() {
        let doc = format_markdown("This is **bold**, __strong__, *soft* and _quiet_.");
        assert_eq!(doc.text, "This is bold, strong, soft and quiet.");
    }

    #[test]
    fn test_identifiers_and_bullets_survive() {
        let doc = format_markdown("- call snake_case_name\n* item");
        assert_eq!(doc.text, "- call snake_case_name\n* item");
    }

    #[test]
    fn test_utf16_offsets() {
        let doc = format_markdown("# Café 🚀\nok");
        // "Café 🚀" is 7 UTF-16 units
        assert_eq!(doc.ranges[0], StyledRange { start: 1, end: 8, style: ParagraphKind::Title });
        assert_eq!(doc.ranges[1].start, 9);
        assert_eq!(doc.text_in(&doc.ranges[0]), "Café 🚀");
    }

    #[test]
    fn test_trailing_hashes_trimmed() {
        let doc = format_markdown("# Closed heading ##");
        assert_eq!(doc.text, "Closed heading");
    }

    #[test]
    fn test_requests_shape() {
        let doc = format_markdown("# T\nx");
        let requests = serde_json::to_value(doc.to_requests()).unwrap();

        assert_eq!(requests[0]["insertText"]["location"]["index"], 1);
        assert_eq!(requests[0]["insertText"]["text"], "T\nx");
        assert_eq!(
            requests[1]["updateParagraphStyle"]["paragraphStyle"]["namedStyleType"],
            "TITLE"
        );
        assert_eq!(requests[1]["updateParagraphStyle"]["range"]["startIndex"], 1);
        assert_eq!(requests[1]["updateParagraphStyle"]["range"]["endIndex"], 2);
        assert_eq!(requests[1]["updateParagraphStyle"]["fields"], "namedStyleType");
        assert_eq!(requests.as_array().unwrap().len(), 3);
    }
}
