//! Docs API document JSON.
//!
//! Only the fields needed for Markdown conversion are modelled; everything
//! else in the response is ignored.

use crate::model::{
    Block, Document, InlineContent, Paragraph, ParagraphStyle, Table, TableCell, TableRow, TextRun,
};
use serde::Deserialize;

/// Top-level document resource.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentWire {
    #[serde(default)]
    pub document_id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub body: BodyWire,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BodyWire {
    #[serde(default)]
    pub content: Vec<StructuralElementWire>,
}

/// One body element. Exactly one of the fields is set in practice.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuralElementWire {
    #[serde(default)]
    pub paragraph: Option<ParagraphWire>,
    #[serde(default)]
    pub table: Option<TableWire>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParagraphWire {
    #[serde(default)]
    pub elements: Vec<ParagraphElementWire>,
    #[serde(default)]
    pub paragraph_style: Option<ParagraphStyleWire>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParagraphStyleWire {
    #[serde(default)]
    pub named_style_type: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParagraphElementWire {
    #[serde(default)]
    pub text_run: Option<TextRunWire>,
    #[serde(default)]
    pub inline_object_element: Option<InlineObjectElementWire>,
    #[serde(default)]
    pub page_break: Option<serde_json::Value>,
    #[serde(default)]
    pub horizontal_rule: Option<serde_json::Value>,
    #[serde(default)]
    pub footnote_reference: Option<FootnoteReferenceWire>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TextRunWire {
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineObjectElementWire {
    #[serde(default)]
    pub inline_object_id: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FootnoteReferenceWire {
    #[serde(default)]
    pub footnote_id: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableWire {
    #[serde(default)]
    pub table_rows: Vec<TableRowWire>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableRowWire {
    #[serde(default)]
    pub table_cells: Vec<TableCellWire>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TableCellWire {
    #[serde(default)]
    pub content: Vec<StructuralElementWire>,
}

impl DocumentWire {
    /// Converts the response into the document model.
    ///
    /// Section breaks, tables of contents and other unsupported elements are
    /// skipped. Tables nested inside table cells are dropped.
    pub fn into_document(self) -> Document {
        let mut document = Document {
            document_id: self.document_id,
            title: self.title,
            body: Vec::new(),
        };

        for element in self.body.content {
            if let Some(para) = element.paragraph {
                document.body.push(Block::Paragraph(para.into_paragraph()));
            } else if let Some(table) = element.table {
                document.body.push(Block::Table(table.into_table()));
            }
        }

        log::debug!(
            "Converted {:?}: {} paragraphs, {} tables",
            document.title,
            document.paragraph_count(),
            document.table_count()
        );

        document
    }
}

impl ParagraphWire {
    fn into_paragraph(self) -> Paragraph {
        let style = self
            .paragraph_style
            .and_then(|s| s.named_style_type)
            .map(|name| ParagraphStyle::from_named_style(&name))
            .unwrap_or_default();

        let mut paragraph = Paragraph::with_style(style);
        paragraph.content = self
            .elements
            .into_iter()
            .map(ParagraphElementWire::into_inline)
            .collect();
        paragraph
    }
}

impl ParagraphElementWire {
    fn into_inline(self) -> InlineContent {
        if let Some(run) = self.text_run {
            InlineContent::Text(TextRun::new(run.content))
        } else if let Some(object) = self.inline_object_element {
            InlineContent::InlineObject(object.inline_object_id)
        } else if self.page_break.is_some() {
            InlineContent::PageBreak
        } else if self.horizontal_rule.is_some() {
            InlineContent::HorizontalRule
        } else if let Some(footnote) = self.footnote_reference {
            InlineContent::FootnoteReference(footnote.footnote_id)
        } else {
            InlineContent::Other("unsupported".to_string())
        }
    }
}

impl TableWire {
    fn into_table(self) -> Table {
        let rows = self
            .table_rows
            .into_iter()
            .map(|row| TableRow {
                cells: row
                    .table_cells
                    .into_iter()
                    .map(TableCellWire::into_cell)
                    .collect(),
            })
            .collect();

        Table { rows }
    }
}

impl TableCellWire {
    fn into_cell(self) -> TableCell {
        let mut cell = TableCell::new();

        for element in self.content {
            if let Some(para) = element.paragraph {
                cell.content.push(para.into_paragraph());
            } else if element.table.is_some() {
                log::debug!("Dropping table nested inside a table cell");
            }
        }

        cell
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::MarkdownRenderer;

    const SAMPLE: &str = r#"{
        "documentId": "doc-1",
        "title": "Call Script",
        "body": {
            "content": [
                { "sectionBreak": {} },
                {
                    "paragraph": {
                        "elements": [{ "textRun": { "content": "Greeting\n" } }],
                        "paragraphStyle": { "namedStyleType": "HEADING_1" }
                    }
                },
                {
                    "paragraph": {
                        "elements": [
                            { "textRun": { "content": "Hello " } },
                            { "inlineObjectElement": { "inlineObjectId": "kix.1" } },
                            { "textRun": { "content": "there" } }
                        ],
                        "paragraphStyle": { "namedStyleType": "NORMAL_TEXT" }
                    }
                },
                {
                    "table": {
                        "rows": 2,
                        "columns": 2,
                        "tableRows": [
                            { "tableCells": [
                                { "content": [{ "paragraph": { "elements": [{ "textRun": { "content": "Q\n" } }] } }] },
                                { "content": [{ "paragraph": { "elements": [{ "textRun": { "content": "A\n" } }] } }] }
                            ] },
                            { "tableCells": [
                                { "content": [{ "paragraph": { "elements": [{ "textRun": { "content": "Price?\n" } }] } }] },
                                { "content": [
                                    { "paragraph": { "elements": [{ "textRun": { "content": "10\n" } }] } },
                                    { "table": { "tableRows": [] } }
                                ] }
                            ] }
                        ]
                    }
                }
            ]
        }
    }"#;

    #[test]
    fn test_parse_document() {
        let wire: DocumentWire = serde_json::from_str(SAMPLE).unwrap();
        let document = wire.into_document();

        assert_eq!(document.document_id.as_deref(), Some("doc-1"));
        assert_eq!(document.title.as_deref(), Some("Call Script"));
        assert_eq!(document.paragraph_count(), 2);
        assert_eq!(document.table_count(), 1);
    }

    #[test]
    fn test_heading_style_mapped() {
        let wire: DocumentWire = serde_json::from_str(SAMPLE).unwrap();
        let document = wire.into_document();

        let Block::Paragraph(first) = &document.body[0] else {
            panic!("expected paragraph");
        };
        assert_eq!(first.style, ParagraphStyle::Heading(1));
    }

    #[test]
    fn test_converted_document_renders() {
        let wire: DocumentWire = serde_json::from_str(SAMPLE).unwrap();
        let rendered = MarkdownRenderer::default().render_document(&wire.into_document());

        assert_eq!(
            rendered.body,
            "## Greeting\n\n\nHello there\n\n| Q | A |\n| --- | --- |\n| Price? | 10 |\n\n\n"
        );
    }

    #[test]
    fn test_missing_fields() {
        let wire: DocumentWire = serde_json::from_str("{}").unwrap();
        let document = wire.into_document();
        assert!(document.title.is_none());
        assert!(document.body.is_empty());
    }
}
