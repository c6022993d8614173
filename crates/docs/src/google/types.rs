//! Wire types for the Docs v1 and Drive v3 APIs.
//!
//! Only the fields the adapter reads are modeled.

use serde::{Deserialize, Serialize};

/// A Docs document as returned by `documents.get` and `documents.create`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub document_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: Option<Body>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Body {
    #[serde(default)]
    pub content: Vec<StructuralElement>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StructuralElement {
    pub paragraph: Option<Paragraph>,
    pub table: Option<Table>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Paragraph {
    #[serde(default)]
    pub elements: Vec<ParagraphElement>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParagraphElement {
    pub text_run: Option<TextRun>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TextRun {
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    #[serde(default)]
    pub table_rows: Vec<TableRow>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableRow {
    #[serde(default)]
    pub table_cells: Vec<TableCell>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TableCell {
    #[serde(default)]
    pub content: Vec<StructuralElement>,
}

impl Document {
    /// All text runs in body order, table cells included.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        if let Some(body) = &self.body {
            collect_text(&body.content, &mut out);
        }
        out
    }
}

fn collect_text(elements: &[StructuralElement], out: &mut String) {
    for element in elements {
        if let Some(paragraph) = &element.paragraph {
            for run in paragraph.elements.iter().filter_map(|e| e.text_run.as_ref()) {
                out.push_str(&run.content);
            }
        }
        if let Some(table) = &element.table {
            for cell in table.table_rows.iter().flat_map(|row| &row.table_cells) {
                collect_text(&cell.content, out);
            }
        }
    }
}

/// One entry of a `documents.batchUpdate` request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DocsRequest {
    InsertText {
        location: Location,
        text: String,
    },
    UpdateParagraphStyle {
        range: Range,
        #[serde(rename = "paragraphStyle")]
        paragraph_style: ParagraphStyle,
        fields: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Location {
    pub index: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Range {
    pub start_index: usize,
    pub end_index: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParagraphStyle {
    pub named_style_type: String,
}

/// Body of `documents.batchUpdate`.
#[derive(Debug, Serialize)]
pub struct BatchUpdateRequest<'a> {
    pub requests: &'a [DocsRequest],
}

/// Drive file metadata, as selected by the `fields` parameter.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileMetadata {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub mime_type: Option<String>,
    #[serde(default)]
    pub parents: Vec<String>,
    #[serde(default)]
    pub web_view_link: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_walks_tables() {
        let doc: Document = serde_json::from_value(serde_json::json!({
            "documentId": "d1",
            "title": "Notes",
            "body": {
                "content": [
                    { "sectionBreak": {} },
                    { "paragraph": { "elements": [
                        { "textRun": { "content": "Hello " } },
                        { "inlineObjectElement": {} },
                        { "textRun": { "content": "world\n" } }
                    ] } },
                    { "table": { "tableRows": [ { "tableCells": [
                        { "content": [ { "paragraph": { "elements": [
                            { "textRun": { "content": "cell\n" } }
                        ] } } ] }
                    ] } ] } },
                    { "paragraph": { "elements": [ { "textRun": { "content": "end\n" } } ] } }
                ]
            }
        }))
        .unwrap();

        assert_eq!(doc.plain_text(), "Hello world\ncell\nend\n");
    }

    #[test]
    fn test_empty_document() {
        let doc: Document = serde_json::from_str(r#"{"documentId":"d2"}"#).unwrap();
        assert_eq!(doc.plain_text(), "");
    }

    #[test]
    fn test_request_serialization() {
        let request = DocsRequest::UpdateParagraphStyle {
            range: Range {
                start_index: 3,
                end_index: 9,
            },
            paragraph_style: ParagraphStyle {
                named_style_type: "HEADING_1".into(),
            },
            fields: "namedStyleType".into(),
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            serde_json::json!({
                "updateParagraphStyle": {
                    "range": { "startIndex": 3, "endIndex": 9 },
                    "paragraphStyle": { "namedStyleType": "HEADING_1" },
                    "fields": "namedStyleType"
                }
            })
        );
    }
}
