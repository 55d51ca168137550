//! Source backed by a directory of cached API responses.

use super::docs::DocumentWire;
use super::sheets::SpreadsheetWire;
use super::{DocumentSource, SpreadsheetSource};
use crate::error::{Error, Result};
use crate::model::{Document, Spreadsheet};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};

/// Reads `<root>/<id>.json` for every requested identifier.
#[derive(Debug, Clone)]
pub struct JsonDirSource {
    root: PathBuf,
}

impl JsonDirSource {
    /// Creates a source over the given directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Returns the directory this source reads from.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the file path for an identifier.
    pub fn path_for(&self, id: &str) -> PathBuf {
        self.root.join(format!("{}.json", id))
    }

    fn read<T: DeserializeOwned>(&self, id: &str) -> Result<T> {
        if id.is_empty() || id.contains(['/', '\\']) || id.contains("..") {
            return Err(Error::fetch(id, "invalid identifier"));
        }

        let path = self.path_for(id);
        if !path.is_file() {
            return Err(Error::NotFound(id.to_string()));
        }

        log::debug!("Reading {}", path.display());
        let content = fs::read_to_string(&path).map_err(|e| Error::fetch(id, e))?;
        serde_json::from_str(&content).map_err(|e| Error::fetch(id, e))
    }
}

impl DocumentSource for JsonDirSource {
    fn fetch_document(&self, id: &str) -> Result<Document> {
        let wire: DocumentWire = self.read(id)?;
        let mut document = wire.into_document();
        document.document_id.get_or_insert_with(|| id.to_string());
        Ok(document)
    }
}

impl SpreadsheetSource for JsonDirSource {
    fn fetch_spreadsheet(&self, id: &str) -> Result<Spreadsheet> {
        let wire: SpreadsheetWire = self.read(id)?;
        let mut spreadsheet = wire.into_spreadsheet();
        spreadsheet.spreadsheet_id.get_or_insert_with(|| id.to_string());
        Ok(spreadsheet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_fetch_document() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("abc.json"),
            r#"{ "title": "Doc", "body": { "content": [] } }"#,
        )
        .unwrap();

        let source = JsonDirSource::new(temp.path());
        let document = source.fetch_document("abc").unwrap();
        assert_eq!(document.title.as_deref(), Some("Doc"));
        assert_eq!(document.document_id.as_deref(), Some("abc"));
    }

    #[test]
    fn test_fetch_spreadsheet() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("s1.json"),
            r#"{ "properties": { "title": "Book" }, "sheets": [] }"#,
        )
        .unwrap();

        let source = JsonDirSource::new(temp.path());
        let spreadsheet = source.fetch_spreadsheet("s1").unwrap();
        assert_eq!(spreadsheet.title, "Book");
        assert_eq!(spreadsheet.spreadsheet_id.as_deref(), Some("s1"));
    }

    #[test]
    fn test_missing_file() {
        let temp = TempDir::new().unwrap();
        let source = JsonDirSource::new(temp.path());
        assert!(matches!(
            source.fetch_document("nope"),
            Err(Error::NotFound(id)) if id == "nope"
        ));
    }

    #[test]
    fn test_malformed_file() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("bad.json"), "{ oops").unwrap();

        let source = JsonDirSource::new(temp.path());
        let err = source.fetch_spreadsheet("bad").unwrap_err();
        assert!(matches!(err, Error::Fetch { ref id, .. } if id == "bad"));
    }

    #[test]
    fn test_path_traversal_rejected() {
        let temp = TempDir::new().unwrap();
        let source = JsonDirSource::new(temp.path());
        assert!(source.fetch_document("../secret").unwrap_err().is_fetch_error());
    }
}
