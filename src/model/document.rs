//! Document structure.

use super::{Paragraph, Table};
use serde::Serialize;

/// A structured document fetched from a document source.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Document {
    /// Identifier in the source service
    pub document_id: Option<String>,
    /// Declared document title
    pub title: Option<String>,
    /// Top-level content blocks, in document order
    pub body: Vec<Block>,
}

impl Document {
    /// Creates a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty document with the given title.
    pub fn with_title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Default::default()
        }
    }

    /// Adds a paragraph to the body.
    pub fn push_paragraph(&mut self, paragraph: Paragraph) {
        self.body.push(Block::Paragraph(paragraph));
    }

    /// Adds a table to the body.
    pub fn push_table(&mut self, table: Table) {
        self.body.push(Block::Table(table));
    }

    /// Returns the number of top-level paragraphs.
    pub fn paragraph_count(&self) -> usize {
        self.body
            .iter()
            .filter(|b| matches!(b, Block::Paragraph(_)))
            .count()
    }

    /// Returns the number of top-level tables.
    pub fn table_count(&self) -> usize {
        self.body
            .iter()
            .filter(|b| matches!(b, Block::Table(_)))
            .count()
    }
}

/// A block-level content element.
#[derive(Debug, Clone, Serialize)]
pub enum Block {
    /// A paragraph
    Paragraph(Paragraph),
    /// A table
    Table(Table),
}
