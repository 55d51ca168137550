//! Error types for docscrub library.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for docscrub operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for docscrub library.
///
/// Cleaning and Markdown conversion never fail; errors come from sources,
/// persistence, and configuration.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The requested document or spreadsheet does not exist in the source.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The source failed to deliver a document or spreadsheet.
    #[error("Failed to fetch {id}: {message}")]
    Fetch { id: String, message: String },

    /// Writing an output file failed.
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A cleaning rule pattern does not compile.
    #[error("Invalid pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// A rule configuration names a category that does not exist.
    #[error("Unknown cleaning category: {0}")]
    UnknownCategory(String),

    /// Invalid configuration value.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Creates a fetch error for the given identifier.
    pub fn fetch(id: impl Into<String>, message: impl ToString) -> Self {
        Error::Fetch {
            id: id.into(),
            message: message.to_string(),
        }
    }

    /// Returns true if this error was raised by a document source.
    pub fn is_fetch_error(&self) -> bool {
        matches!(self, Error::Fetch { .. } | Error::NotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_display() {
        let err = Error::fetch("abc123", "connection reset");
        assert_eq!(err.to_string(), "Failed to fetch abc123: connection reset");
        assert!(err.is_fetch_error());
    }

    #[test]
    fn test_write_error_display() {
        let err = Error::Write {
            path: PathBuf::from("out/doc.md"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.to_string().contains("out/doc.md"));
        assert!(!err.is_fetch_error());
    }
}
