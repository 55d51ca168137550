//! Document model (Intermediate Representation).
//!
//! This module defines the structures that sources produce and the Markdown
//! renderer consumes: word-processor documents made of paragraphs and tables,
//! and spreadsheets made of named sheets of string cells.

mod document;
mod paragraph;
mod spreadsheet;
mod table;

pub use document::*;
pub use paragraph::*;
pub use spreadsheet::*;
pub use table::*;
