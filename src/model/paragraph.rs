//! Paragraph and text run definitions.

use serde::Serialize;

/// A contiguous text fragment within a paragraph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextRun {
    /// The text content
    pub text: String,
}

impl TextRun {
    /// Creates a new text run.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Returns true if this run is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Content that can appear within a paragraph.
///
/// Only [`InlineContent::Text`] contributes to rendered output; the other
/// kinds are kept so that paragraph structure survives conversion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum InlineContent {
    /// Plain text
    Text(TextRun),
    /// Embedded object (image, drawing) by identifier
    InlineObject(String),
    /// Page break
    PageBreak,
    /// Horizontal rule
    HorizontalRule,
    /// Footnote reference by identifier
    FootnoteReference(String),
    /// Any other element kind the source reported
    Other(String),
}

/// Paragraph-level style.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum ParagraphStyle {
    /// Normal body text
    #[default]
    Body,
    /// Heading with level 1-6
    Heading(u8),
}

impl ParagraphStyle {
    /// Creates a heading style, clamping the level to 1-6.
    ///
    /// A level of 0 yields [`ParagraphStyle::Body`].
    pub fn heading(level: u8) -> Self {
        match level {
            0 => ParagraphStyle::Body,
            l => ParagraphStyle::Heading(l.min(6)),
        }
    }

    /// Maps a named style such as `HEADING_2` or `NORMAL_TEXT`.
    pub fn from_named_style(name: &str) -> Self {
        name.strip_prefix("HEADING_")
            .and_then(|level| level.parse::<u8>().ok())
            .map(Self::heading)
            .unwrap_or_default()
    }

    /// Returns the heading level, or None for body text.
    pub fn heading_level(&self) -> Option<u8> {
        match self {
            ParagraphStyle::Body => None,
            ParagraphStyle::Heading(level) => Some(*level),
        }
    }
}

/// A paragraph containing inline content.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Paragraph {
    /// Paragraph style
    pub style: ParagraphStyle,
    /// Content elements within this paragraph
    pub content: Vec<InlineContent>,
}

impl Paragraph {
    /// Creates a new empty paragraph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a paragraph with the specified style.
    pub fn with_style(style: ParagraphStyle) -> Self {
        Self {
            style,
            content: Vec::new(),
        }
    }

    /// Creates a simple body paragraph with plain text.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            style: ParagraphStyle::Body,
            content: vec![InlineContent::Text(TextRun::new(text))],
        }
    }

    /// Creates a heading paragraph with plain text.
    pub fn heading(level: u8, text: impl Into<String>) -> Self {
        Self {
            style: ParagraphStyle::heading(level),
            content: vec![InlineContent::Text(TextRun::new(text))],
        }
    }

    /// Adds a text run to this paragraph.
    pub fn push_text(&mut self, run: TextRun) {
        self.content.push(InlineContent::Text(run));
    }

    /// Returns the concatenated text of all text runs, in order.
    pub fn plain_text(&self) -> String {
        let mut result = String::new();
        for item in &self.content {
            if let InlineContent::Text(run) = item {
                result.push_str(&run.text);
            }
        }
        result
    }

    /// Returns true if this paragraph has no text.
    pub fn is_empty(&self) -> bool {
        self.content.iter().all(|c| match c {
            InlineContent::Text(run) => run.is_empty(),
            _ => true,
        })
    }
}
