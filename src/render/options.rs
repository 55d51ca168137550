//! Rendering options for Markdown output.

/// Title used when a document does not declare one.
pub const DEFAULT_UNTITLED_TITLE: &str = "Untitled Document";

/// Line emitted in place of a table for a sheet without rows.
pub const DEFAULT_EMPTY_SHEET_PLACEHOLDER: &str = "*Empty sheet*";

/// Options for Markdown rendering.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Title used when the document has none.
    /// Default: "Untitled Document"
    pub untitled_title: String,

    /// Placeholder line for sheets with zero rows.
    /// Default: "*Empty sheet*"
    pub empty_sheet_placeholder: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            untitled_title: DEFAULT_UNTITLED_TITLE.to_string(),
            empty_sheet_placeholder: DEFAULT_EMPTY_SHEET_PLACEHOLDER.to_string(),
        }
    }
}

impl RenderOptions {
    /// Creates new options with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the fallback title for untitled documents.
    pub fn with_untitled_title(mut self, title: impl Into<String>) -> Self {
        self.untitled_title = title.into();
        self
    }

    /// Sets the placeholder line for empty sheets.
    pub fn with_empty_sheet_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.empty_sheet_placeholder = placeholder.into();
        self
    }
}
