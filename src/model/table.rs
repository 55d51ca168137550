//! Table structures for document model.

use super::Paragraph;
use serde::Serialize;

/// A table in the document.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Table {
    /// Table rows
    pub rows: Vec<TableRow>,
}

impl Table {
    /// Creates a table of single-paragraph text cells.
    pub fn from_text_rows<R, C>(rows: R) -> Self
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        Self {
            rows: rows
                .into_iter()
                .map(|cells| TableRow {
                    cells: cells.into_iter().map(TableCell::text).collect(),
                })
                .collect(),
        }
    }

    /// Returns the number of columns (based on first row).
    pub fn column_count(&self) -> usize {
        self.rows.first().map(|r| r.cells.len()).unwrap_or(0)
    }
}

/// A row in a table.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TableRow {
    /// Cells in this row
    pub cells: Vec<TableCell>,
}

/// A cell in a table.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TableCell {
    /// Content paragraphs within this cell
    pub content: Vec<Paragraph>,
}

impl TableCell {
    /// Creates a new empty cell.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a cell with text content.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![Paragraph::text(text)],
        }
    }

    /// Returns the text of all paragraphs, concatenated without separators.
    pub fn plain_text(&self) -> String {
        self.content.iter().map(|p| p.plain_text()).collect()
    }
}
