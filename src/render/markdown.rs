//! Markdown renderer implementation.

use super::RenderOptions;
use crate::model::{Block, Document, Paragraph, Sheet, Spreadsheet, Table};

/// Separator cell emitted under the header row of every table.
const SEPARATOR_CELL: &str = "---";

/// Title and body produced by the renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedMarkdown {
    /// Document title (declared or fallback)
    pub title: String,
    /// Markdown body without the title heading
    pub body: String,
}

impl RenderedMarkdown {
    /// Returns the full Markdown with the title as a top-level heading.
    pub fn to_markdown(&self) -> String {
        super::compose_markdown(&self.title, &self.body)
    }
}

/// Markdown renderer.
#[derive(Debug, Clone, Default)]
pub struct MarkdownRenderer {
    options: RenderOptions,
}

impl MarkdownRenderer {
    /// Creates a new renderer with the given options.
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Renders a document body block by block.
    pub fn render_document(&self, document: &Document) -> RenderedMarkdown {
        let title = document
            .title
            .clone()
            .unwrap_or_else(|| self.options.untitled_title.clone());

        let mut output = String::new();

        for block in &document.body {
            match block {
                Block::Paragraph(para) => self.render_paragraph(para, &mut output),
                Block::Table(table) => {
                    output.push_str(&self.render_table(table));
                    output.push_str("\n\n");
                }
            }
        }

        RenderedMarkdown {
            title,
            body: output,
        }
    }

    /// Renders every sheet as a level-2 heading followed by its table.
    pub fn render_spreadsheet(&self, spreadsheet: &Spreadsheet) -> RenderedMarkdown {
        let mut output = String::new();

        for sheet in &spreadsheet.sheets {
            output.push_str(&format!("## {}\n\n", sheet.name));

            if sheet.is_empty() {
                output.push_str(&self.options.empty_sheet_placeholder);
                output.push_str("\n\n");
                continue;
            }

            output.push_str(&self.render_sheet_table(sheet));
            output.push_str("\n\n");
        }

        RenderedMarkdown {
            title: spreadsheet.title.clone(),
            body: output,
        }
    }

    /// Renders a paragraph.
    ///
    /// Heading levels are shifted down by one (`HEADING_1` becomes `##`) so
    /// that the document title owns the only `#` heading. Levels beyond 3 are
    /// rendered as body text.
    fn render_paragraph(&self, para: &Paragraph, output: &mut String) {
        let prefix = match para.style.heading_level() {
            Some(1) => "## ",
            Some(2) => "### ",
            Some(3) => "#### ",
            _ => "",
        };

        output.push_str(prefix);
        output.push_str(&para.plain_text());
        output.push_str("\n\n");
    }

    /// Renders a document table. Cell text is trimmed.
    pub fn render_table(&self, table: &Table) -> String {
        let mut output = String::new();

        for (row_idx, row) in table.rows.iter().enumerate() {
            let cells: Vec<String> = row
                .cells
                .iter()
                .map(|cell| cell.plain_text().trim().to_string())
                .collect();

            push_row(&mut output, &cells);

            if row_idx == 0 {
                push_separator(&mut output, table.column_count());
            }
        }

        output
    }

    /// Renders a sheet table. Cell values are emitted verbatim.
    pub fn render_sheet_table(&self, sheet: &Sheet) -> String {
        let mut output = String::new();

        let Some((header, rows)) = sheet.rows.split_first() else {
            return output;
        };

        push_row(&mut output, header);
        push_separator(&mut output, header.len());

        for row in rows {
            push_row(&mut output, row);
        }

        output
    }
}

fn push_row<S: AsRef<str>>(output: &mut String, cells: &[S]) {
    let joined = cells
        .iter()
        .map(|c| c.as_ref())
        .collect::<Vec<&str>>()
        .join(" | ");
    output.push_str("| ");
    output.push_str(&joined);
    output.push_str(" |\n");
}

fn push_separator(output: &mut String, columns: usize) {
    push_row(output, &vec![SEPARATOR_CELL; columns]);
}
