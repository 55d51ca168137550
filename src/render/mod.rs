//! Markdown rendering for documents and spreadsheets.

mod markdown;
mod options;

pub use markdown::{MarkdownRenderer, RenderedMarkdown};
pub use options::{RenderOptions, DEFAULT_EMPTY_SHEET_PLACEHOLDER, DEFAULT_UNTITLED_TITLE};

use crate::model::{Document, Spreadsheet};

/// Renders a document to its title and Markdown body.
pub fn render_document(document: &Document, options: &RenderOptions) -> RenderedMarkdown {
    MarkdownRenderer::new(options.clone()).render_document(document)
}

/// Renders a spreadsheet to its title and Markdown body.
pub fn render_spreadsheet(spreadsheet: &Spreadsheet, options: &RenderOptions) -> RenderedMarkdown {
    MarkdownRenderer::new(options.clone()).render_spreadsheet(spreadsheet)
}

/// Prepends the title as a top-level heading to a rendered body.
///
/// This is the "original" copy that gets persisted and cleaned.
pub fn compose_markdown(title: &str, body: &str) -> String {
    format!("# {}\n\n{}", title, body)
}
