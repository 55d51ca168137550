//! Output file layout: slugged file names in the original and cleaned directories.

use crate::error::{Error, Result};
use deunicode::deunicode;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;

/// Default output file name; `{}` is replaced by the title slug.
pub const DEFAULT_FILENAME_TEMPLATE: &str = "leadgen_{}.md";

const UNTITLED_SLUG: &str = "untitled";

static RE_BRACKET_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[.*?\]").unwrap());

static RE_NON_ALPHANUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9]+").unwrap());

/// Turns a document title into a file-name slug.
///
/// `[...]` tags are dropped, the rest is NFKC-normalized, transliterated to
/// ASCII and lowercased, and each run of characters outside `a-z0-9` becomes
/// a single `-`.
///
/// # Example
///
/// ```
/// use docscrub::persist::slugify_title;
///
/// assert_eq!(slugify_title("Скрипт звонка [v2]"), "skript-zvonka");
/// assert_eq!(slugify_title("[draft]"), "untitled");
/// ```
pub fn slugify_title(title: &str) -> String {
    let stripped = RE_BRACKET_TAG.replace_all(title, "");
    let normalized: String = stripped.trim().nfkc().collect();
    let ascii = deunicode(&normalized).to_lowercase();
    let slug = RE_NON_ALPHANUMERIC.replace_all(&ascii, "-");
    let slug = slug.trim_matches('-');

    if slug.is_empty() {
        UNTITLED_SLUG.to_string()
    } else {
        slug.to_string()
    }
}

/// Paths written by [`OutputLayout::save`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedPaths {
    /// Original copy, if it was saved
    pub original: Option<PathBuf>,
    /// Cleaned copy
    pub cleaned: PathBuf,
}

/// Where and how output files are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    /// Directory for unmodified Markdown
    pub original_dir: PathBuf,
    /// Directory for cleaned Markdown
    pub cleaned_dir: PathBuf,
    /// File name template containing `{}`
    pub filename_template: String,
    /// Whether the original copy is written
    pub save_original: bool,
}

impl Default for OutputLayout {
    fn default() -> Self {
        Self::new("data/original", "data/docs")
    }
}

impl OutputLayout {
    /// Creates a layout with the default template that saves both copies.
    pub fn new(original_dir: impl Into<PathBuf>, cleaned_dir: impl Into<PathBuf>) -> Self {
        Self {
            original_dir: original_dir.into(),
            cleaned_dir: cleaned_dir.into(),
            filename_template: DEFAULT_FILENAME_TEMPLATE.to_string(),
            save_original: true,
        }
    }

    /// Places both directories under `root` as `root/original` and `root/docs`.
    pub fn under(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        Self::new(root.join("original"), root.join("docs"))
    }

    /// Sets the file name template.
    pub fn with_filename_template(mut self, template: impl Into<String>) -> Self {
        self.filename_template = template.into();
        self
    }

    /// Enables or disables writing the original copy.
    pub fn with_save_original(mut self, save: bool) -> Self {
        self.save_original = save;
        self
    }

    /// Creates the output directories. Safe to call repeatedly.
    pub fn ensure_dirs(&self) -> Result<()> {
        let mut dirs = vec![&self.cleaned_dir];
        if self.save_original {
            dirs.push(&self.original_dir);
        }

        for dir in dirs {
            fs::create_dir_all(dir).map_err(|source| Error::Write {
                path: dir.clone(),
                source,
            })?;
        }
        Ok(())
    }

    /// Returns the output file name for a title.
    pub fn file_name(&self, title: &str) -> String {
        let slug = slugify_title(title);
        if self.filename_template.contains("{}") {
            self.filename_template.replacen("{}", &slug, 1)
        } else {
            format!("{}{}", slug, self.filename_template)
        }
    }

    /// Writes the original and cleaned copies under the same file name.
    ///
    /// If the cleaned copy cannot be written, the original copy written by
    /// this call is removed again before the error is returned.
    pub fn save(&self, title: &str, original: &str, cleaned: &str) -> Result<SavedPaths> {
        let file_name = self.file_name(title);

        let original_path = if self.save_original {
            let path = self.original_dir.join(&file_name);
            write_file(&path, original)?;
            Some(path)
        } else {
            None
        };

        let cleaned_path = self.cleaned_dir.join(&file_name);
        if let Err(error) = write_file(&cleaned_path, cleaned) {
            if let Some(path) = &original_path {
                discard_file(path);
            }
            return Err(error);
        }

        Ok(SavedPaths {
            original: original_path,
            cleaned: cleaned_path,
        })
    }
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    log::debug!("Writing {}", path.display());
    fs::write(path, content).map_err(|source| Error::Write {
        path: path.to_path_buf(),
        source,
    })
}

fn discard_file(path: &Path) {
    log::debug!("Removing {}", path.display());
    if let Err(e) = fs::remove_file(path) {
        log::warn!("Failed to remove {}: {}", path.display(), e);
    }
}
