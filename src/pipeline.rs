//! Fetch, convert, clean and persist: single items and sequential batches.

use crate::cleanup::Cleaner;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::links::{extract_links, LinkSet, ResourceKind};
use crate::model::{Document, Spreadsheet};
use crate::persist::{slugify_title, OutputLayout};
use crate::render::{MarkdownRenderer, RenderOptions};
use crate::source::{DocumentSource, SpreadsheetSource};
use crate::stats::CleaningStats;
use serde::Serialize;
use std::path::PathBuf;

/// A fetched item ready for conversion.
#[derive(Debug, Clone)]
pub enum SourceInput {
    Document(Document),
    Spreadsheet(Spreadsheet),
}

impl SourceInput {
    /// Returns the kind of resource.
    pub fn kind(&self) -> ResourceKind {
        match self {
            SourceInput::Document(_) => ResourceKind::Document,
            SourceInput::Spreadsheet(_) => ResourceKind::Spreadsheet,
        }
    }

    fn source_id(&self) -> Option<&str> {
        match self {
            SourceInput::Document(doc) => doc.document_id.as_deref(),
            SourceInput::Spreadsheet(sheet) => sheet.spreadsheet_id.as_deref(),
        }
    }
}

/// Result of processing one item.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessedItem {
    /// Source identifier (title slug if the item has none)
    pub id: String,
    pub kind: ResourceKind,
    pub title: String,
    /// Unmodified Markdown, if saved
    pub original_path: Option<PathBuf>,
    pub cleaned_path: PathBuf,
    pub stats: CleaningStats,
}

/// An item that was skipped.
#[derive(Debug)]
pub struct ItemFailure {
    pub id: String,
    pub kind: ResourceKind,
    pub error: Error,
}

/// Outcome of a batch.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Number of identifiers requested
    pub requested: usize,
    /// Successful items, in request order
    pub items: Vec<ProcessedItem>,
    /// Skipped items, in request order
    pub failures: Vec<ItemFailure>,
}

impl BatchReport {
    /// Number of successful items.
    pub fn succeeded(&self) -> usize {
        self.items.len()
    }

    /// Returns true if every requested item succeeded.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty() && self.items.len() == self.requested
    }

    /// Adds another report's counts and items to this one.
    pub fn merge(&mut self, other: BatchReport) {
        self.requested += other.requested;
        self.items.extend(other.items);
        self.failures.extend(other.failures);
    }
}

/// Outcome of processing every link found in a text.
#[derive(Debug, Default)]
pub struct LinkReport {
    pub links: LinkSet,
    pub documents: BatchReport,
    pub spreadsheets: BatchReport,
}

impl LinkReport {
    /// Total number of successful items.
    pub fn succeeded(&self) -> usize {
        self.documents.succeeded() + self.spreadsheets.succeeded()
    }

    /// Total number of requested items.
    pub fn requested(&self) -> usize {
        self.documents.requested + self.spreadsheets.requested
    }
}

/// Runs items through rendering, cleaning and persistence.
#[derive(Debug, Clone)]
pub struct Processor {
    renderer: MarkdownRenderer,
    cleaner: Cleaner,
    layout: OutputLayout,
    level: String,
}

impl Processor {
    /// Creates a processor at the `medium` level with default render options.
    pub fn new(cleaner: Cleaner, layout: OutputLayout) -> Self {
        Self {
            renderer: MarkdownRenderer::default(),
            cleaner,
            layout,
            level: "medium".to_string(),
        }
    }

    /// Builds a processor from application configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        let cleaner = Cleaner::new(config.registry()?);
        Ok(Self::new(cleaner, config.layout()).with_level(&config.cleaning.level))
    }

    /// Sets the cleaning level used by the batch operations.
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    /// Sets the render options.
    pub fn with_render_options(mut self, options: RenderOptions) -> Self {
        self.renderer = MarkdownRenderer::new(options);
        self
    }

    /// Returns the cleaner.
    pub fn cleaner(&self) -> &Cleaner {
        &self.cleaner
    }

    /// Returns the output layout.
    pub fn layout(&self) -> &OutputLayout {
        &self.layout
    }

    /// Returns the batch cleaning level.
    pub fn level(&self) -> &str {
        &self.level
    }

    /// Converts one item to Markdown, cleans it and writes both copies.
    ///
    /// Nothing is written unless conversion and cleaning both complete.
    pub fn convert_and_clean(&self, input: &SourceInput, level: &str) -> Result<ProcessedItem> {
        let rendered = match input {
            SourceInput::Document(doc) => self.renderer.render_document(doc),
            SourceInput::Spreadsheet(sheet) => self.renderer.render_spreadsheet(sheet),
        };

        let original = rendered.to_markdown();
        let cleaned = self.cleaner.clean(&original, level);
        let stats = CleaningStats::compute(&original, &cleaned);

        self.layout.ensure_dirs()?;
        let saved = self.layout.save(&rendered.title, &original, &cleaned)?;

        let id = input
            .source_id()
            .map(str::to_string)
            .unwrap_or_else(|| slugify_title(&rendered.title));

        log::info!("Processed {} {:?}: {}", id, rendered.title, stats);

        Ok(ProcessedItem {
            id,
            kind: input.kind(),
            title: rendered.title,
            original_path: saved.original,
            cleaned_path: saved.cleaned,
            stats,
        })
    }

    /// Processes documents one after another, skipping those that fail.
    ///
    /// Fails only if the output directories cannot be created.
    pub fn process_documents(
        &self,
        source: &impl DocumentSource,
        ids: &[String],
    ) -> Result<BatchReport> {
        self.run_batch(ResourceKind::Document, ids, |id| {
            source.fetch_document(id).map(SourceInput::Document)
        })
    }

    /// Processes spreadsheets one after another, skipping those that fail.
    pub fn process_spreadsheets(
        &self,
        source: &impl SpreadsheetSource,
        ids: &[String],
    ) -> Result<BatchReport> {
        self.run_batch(ResourceKind::Spreadsheet, ids, |id| {
            source.fetch_spreadsheet(id).map(SourceInput::Spreadsheet)
        })
    }

    /// Extracts document and spreadsheet links from `text` and processes them.
    pub fn process_links(
        &self,
        text: &str,
        docs: &impl DocumentSource,
        sheets: &impl SpreadsheetSource,
    ) -> Result<LinkReport> {
        let links = extract_links(text);
        log::info!(
            "Found {} document and {} spreadsheet links",
            links.documents.len(),
            links.spreadsheets.len()
        );

        let documents = self.process_documents(docs, &links.documents)?;
        let spreadsheets = self.process_spreadsheets(sheets, &links.spreadsheets)?;

        Ok(LinkReport {
            links,
            documents,
            spreadsheets,
        })
    }

    fn run_batch<F>(&self, kind: ResourceKind, ids: &[String], fetch: F) -> Result<BatchReport>
    where
        F: Fn(&str) -> Result<SourceInput>,
    {
        let mut report = BatchReport {
            requested: ids.len(),
            ..Default::default()
        };

        if ids.is_empty() {
            return Ok(report);
        }

        self.layout.ensure_dirs()?;

        for id in ids {
            let result = fetch(id.as_str())
                .and_then(|input| self.convert_and_clean(&input, &self.level));

            match result {
                Ok(mut item) => {
                    item.id = id.clone();
                    report.items.push(item);
                }
                Err(error) => {
                    log::warn!("Skipping {:?} {}: {}", kind, id, error);
                    report.failures.push(ItemFailure {
                        id: id.clone(),
                        kind,
                        error,
                    });
                }
            }
        }

        log::info!(
            "Processed {}/{} {:?} items",
            report.succeeded(),
            report.requested,
            kind
        );

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Paragraph, Sheet};
    use std::fs;
    use tempfile::TempDir;

    fn processor(temp: &TempDir) -> Processor {
        Processor::new(Cleaner::default(), OutputLayout::under(temp.path()))
    }

    #[test]
    fn test_convert_and_clean_document() {
        let temp = TempDir::new().unwrap();
        let mut doc = Document::with_title("Скрипт [v1]");
        doc.push_paragraph(Paragraph::text("Автор: Иванов"));
        doc.push_paragraph(Paragraph::text("Здравствуйте, __имя__!"));

        let item = processor(&temp)
            .convert_and_clean(&SourceInput::Document(doc), "low")
            .unwrap();

        assert_eq!(item.id, "skript");
        assert_eq!(item.title, "Скрипт [v1]");
        assert_eq!(item.cleaned_path, temp.path().join("docs/leadgen_skript.md"));

        let original = fs::read_to_string(item.original_path.unwrap()).unwrap();
        assert_eq!(
            original,
            "# Скрипт [v1]\n\nАвтор: Иванов\n\nЗдравствуйте, __имя__!\n\n"
        );

        let cleaned = fs::read_to_string(&item.cleaned_path).unwrap();
        assert_eq!(cleaned, "# Скрипт [v1]\n\nЗдравствуйте, {{{имя}}}!");
        assert_eq!(item.stats, CleaningStats::compute(&original, &cleaned));
    }

    #[test]
    fn test_convert_and_clean_spreadsheet() {
        let temp = TempDir::new().unwrap();
        let mut book = Spreadsheet::new("Prices");
        book.spreadsheet_id = Some("sheet-1".into());
        book.push_sheet(Sheet::new("Q1", [vec!["Item"], vec!["pen"]]));

        let item = processor(&temp)
            .convert_and_clean(&SourceInput::Spreadsheet(book), "medium")
            .unwrap();

        assert_eq!(item.id, "sheet-1");
        assert_eq!(item.kind, ResourceKind::Spreadsheet);
        let cleaned = fs::read_to_string(&item.cleaned_path).unwrap();
        assert_eq!(cleaned, "# Prices\n\n## Q1\n\n| Item |\n| --- |\n| pen |");
    }

    #[test]
    fn test_failed_write_leaves_no_original() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("docs/leadgen_doc.md")).unwrap();

        let result = processor(&temp)
            .convert_and_clean(&SourceInput::Document(Document::with_title("Doc")), "low");

        assert!(matches!(result, Err(Error::Write { .. })));
        assert!(temp.path().join("original").is_dir());
        assert!(!temp.path().join("original/leadgen_doc.md").exists());
    }

    #[test]
    fn test_original_copy_optional() {
        let temp = TempDir::new().unwrap();
        let layout = OutputLayout::under(temp.path()).with_save_original(false);
        let item = Processor::new(Cleaner::default(), layout)
            .convert_and_clean(&SourceInput::Document(Document::with_title("Doc")), "low")
            .unwrap();

        assert!(item.original_path.is_none());
        assert!(!temp.path().join("original").exists());
    }

    #[test]
    fn test_empty_batch_writes_nothing() {
        let temp = TempDir::new().unwrap();
        let layout = OutputLayout::under(temp.path().join("out"));
        let report = Processor::new(Cleaner::default(), layout)
            .run_batch(ResourceKind::Document, &[], |_| unreachable!())
            .unwrap();

        assert_eq!(report.requested, 0);
        assert!(report.is_complete());
        assert!(!temp.path().join("out").exists());
    }

    #[test]
    fn test_batch_report_merge() {
        let mut report = BatchReport {
            requested: 2,
            ..Default::default()
        };
        report.merge(BatchReport {
            requested: 1,
            ..Default::default()
        });
        assert_eq!(report.requested, 3);
        assert!(!report.is_complete());
    }
}
