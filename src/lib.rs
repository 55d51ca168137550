//! # docscrub
//!
//! Converts structured documents and spreadsheets into Markdown and strips
//! organizational metadata, internal annotations and boilerplate from the
//! result with an ordered, level-selected set of cleaning rules.
//!
//! ## Pipeline
//!
//! 1. A [`source`] supplies a [`Document`] or [`Spreadsheet`]
//! 2. The [`render`] module turns it into Markdown
//! 3. The [`cleanup`] pipeline removes unwanted content
//! 4. [`stats`] compares both versions
//! 5. [`persist`] writes the original and cleaned copies
//!
//! ## Quick Start
//!
//! ```
//! use docscrub::{clean, render_document, Document, Paragraph, RenderOptions};
//!
//! let mut doc = Document::with_title("Call Script");
//! doc.push_paragraph(Paragraph::text("Автор: Иванов"));
//! doc.push_paragraph(Paragraph::heading(1, "Greeting"));
//! doc.push_paragraph(Paragraph::text("Hello, [ВСТАВКА: client]!"));
//!
//! let markdown = render_document(&doc, &RenderOptions::default()).to_markdown();
//! let cleaned = clean(&markdown, "low");
//! assert_eq!(cleaned, "# Call Script\n\n## Greeting\n\nHello, {{{client}}}!");
//! ```
//!
//! ## Batches
//!
//! ```no_run
//! use docscrub::{Config, JsonDirSource, Processor};
//!
//! fn main() -> docscrub::Result<()> {
//!     let config = Config::load("docscrub.json")?;
//!     let source = JsonDirSource::new(&config.source_dir);
//!     let processor = Processor::from_config(&config)?;
//!
//!     let ids = vec!["1AbC".to_string(), "2DeF".to_string()];
//!     let report = processor.process_documents(&source, &ids)?;
//!     println!("{}/{} processed", report.succeeded(), report.requested);
//!     Ok(())
//! }
//! ```

pub mod cleanup;
pub mod config;
pub mod error;
pub mod links;
pub mod model;
pub mod persist;
pub mod pipeline;
pub mod render;
pub mod source;
pub mod stats;

// Re-exports
pub use cleanup::{clean, Category, Cleaner, CleaningLevel, PatternRegistry, RulesConfig};
pub use config::Config;
pub use error::{Error, Result};
pub use links::{extract_links, LinkSet, ResourceKind};
pub use model::{Document, Paragraph, Sheet, Spreadsheet, Table};
pub use persist::{slugify_title, OutputLayout};
pub use pipeline::{BatchReport, ItemFailure, LinkReport, ProcessedItem, Processor, SourceInput};
pub use render::{
    compose_markdown, render_document, render_spreadsheet, MarkdownRenderer, RenderOptions,
};
pub use source::{DocumentSource, JsonDirSource, SpreadsheetSource};
pub use stats::CleaningStats;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
