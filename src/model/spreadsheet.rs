//! Spreadsheet structures.

use serde::Serialize;

/// A spreadsheet with one or more named sheets.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Spreadsheet {
    /// Identifier in the source service
    pub spreadsheet_id: Option<String>,
    /// Spreadsheet title
    pub title: String,
    /// Sheets in tab order
    pub sheets: Vec<Sheet>,
}

impl Spreadsheet {
    /// Creates an empty spreadsheet with the given title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            spreadsheet_id: None,
            title: title.into(),
            sheets: Vec::new(),
        }
    }

    /// Adds a sheet.
    pub fn push_sheet(&mut self, sheet: Sheet) {
        self.sheets.push(sheet);
    }
}

/// A single sheet: a name and its cell values, row by row.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Sheet {
    /// Sheet (tab) name
    pub name: String,
    /// Cell values; the first row is treated as the header
    pub rows: Vec<Vec<String>>,
}

impl Sheet {
    /// Creates a sheet from rows of values.
    pub fn new<R, C>(name: impl Into<String>, rows: R) -> Self
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        Self {
            name: name.into(),
            rows: rows
                .into_iter()
                .map(|row| row.into_iter().map(Into::into).collect())
                .collect(),
        }
    }

    /// Returns true if the sheet has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Pads every row with empty strings to the widest row's length.
    pub fn pad_rows(&mut self) {
        let width = self.rows.iter().map(Vec::len).max().unwrap_or(0);
        for row in &mut self.rows {
            row.resize(width, String::new());
        }
    }
}
