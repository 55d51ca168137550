//! Document and spreadsheet sources.
//!
//! A source turns an identifier into a structured [`Document`] or
//! [`Spreadsheet`]. Network clients live outside this crate; [`JsonDirSource`]
//! reads cached API responses from a directory.

pub mod docs;
mod json_dir;
pub mod sheets;

pub use json_dir::JsonDirSource;

use crate::error::Result;
use crate::model::{Document, Spreadsheet};

/// Supplies structured documents by identifier.
pub trait DocumentSource {
    /// Fetches one document.
    ///
    /// Fails with [`Error::NotFound`](crate::Error::NotFound) or
    /// [`Error::Fetch`](crate::Error::Fetch).
    fn fetch_document(&self, id: &str) -> Result<Document>;
}

/// Supplies spreadsheets by identifier.
pub trait SpreadsheetSource {
    /// Fetches one spreadsheet with the values of all its sheets.
    fn fetch_spreadsheet(&self, id: &str) -> Result<Spreadsheet>;
}

impl<T: DocumentSource + ?Sized> DocumentSource for &T {
    fn fetch_document(&self, id: &str) -> Result<Document> {
        (**self).fetch_document(id)
    }
}

impl<T: SpreadsheetSource + ?Sized> SpreadsheetSource for &T {
    fn fetch_spreadsheet(&self, id: &str) -> Result<Spreadsheet> {
        (**self).fetch_spreadsheet(id)
    }
}
