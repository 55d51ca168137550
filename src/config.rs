//! Application configuration loaded from JSON.
//!
//! Every field has a default, so an empty object (or no file at all) yields a
//! working configuration.

use crate::cleanup::{PatternRegistry, RulesConfig, DEFAULT_EMPTY_TABLE_THRESHOLD};
use crate::error::{Error, Result};
use crate::persist::{OutputLayout, DEFAULT_FILENAME_TEMPLATE};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

// Default value functions for serde
fn default_true() -> bool {
    true
}

fn default_source_dir() -> PathBuf {
    PathBuf::from("data/raw")
}

fn default_original_dir() -> PathBuf {
    PathBuf::from("data/original")
}

fn default_cleaned_dir() -> PathBuf {
    PathBuf::from("data/docs")
}

fn default_filename_template() -> String {
    DEFAULT_FILENAME_TEMPLATE.to_string()
}

fn default_level() -> String {
    "medium".to_string()
}

fn default_empty_table_threshold() -> f64 {
    DEFAULT_EMPTY_TABLE_THRESHOLD
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Directory of cached service responses
    #[serde(default = "default_source_dir")]
    pub source_dir: PathBuf,
    /// Output file layout
    #[serde(default)]
    pub output: OutputConfig,
    /// Cleaning level and rule set
    #[serde(default)]
    pub cleaning: CleaningConfig,
}

/// Where output files go.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_original_dir")]
    pub original_dir: PathBuf,
    #[serde(default = "default_cleaned_dir")]
    pub cleaned_dir: PathBuf,
    /// File name template; `{}` is replaced by the title slug
    #[serde(default = "default_filename_template")]
    pub filename_template: String,
    /// Write the unmodified Markdown next to the cleaned copy
    #[serde(default = "default_true")]
    pub save_original: bool,
}

/// How text is cleaned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleaningConfig {
    /// Level name; unknown names behave like `medium`
    #[serde(default = "default_level")]
    pub level: String,
    /// Empty-cell percentage above which a table is removed
    #[serde(default = "default_empty_table_threshold")]
    pub empty_table_threshold: f64,
    /// Replacement for the built-in rule set
    #[serde(default)]
    pub rules: Option<RulesConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_dir: default_source_dir(),
            output: OutputConfig::default(),
            cleaning: CleaningConfig::default(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            original_dir: default_original_dir(),
            cleaned_dir: default_cleaned_dir(),
            filename_template: default_filename_template(),
            save_original: true,
        }
    }
}

impl Default for CleaningConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            empty_table_threshold: DEFAULT_EMPTY_TABLE_THRESHOLD,
            rules: None,
        }
    }
}

impl Config {
    /// Loads and validates a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        log::debug!("Loading configuration from {}", path.display());

        let content = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads the file if a path is given, otherwise returns the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    /// Checks values that serde cannot.
    pub fn validate(&self) -> Result<()> {
        let threshold = self.cleaning.empty_table_threshold;
        if !(0.0..=100.0).contains(&threshold) {
            return Err(Error::Config(format!(
                "empty_table_threshold must be between 0 and 100, got {}",
                threshold
            )));
        }

        if !self.output.filename_template.contains("{}") {
            return Err(Error::Config(format!(
                "filename_template must contain {{}}, got {:?}",
                self.output.filename_template
            )));
        }

        Ok(())
    }

    /// Compiles the configured rule set.
    pub fn registry(&self) -> Result<PatternRegistry> {
        let registry = match &self.cleaning.rules {
            Some(rules) => PatternRegistry::from_config(rules)?,
            None => PatternRegistry::default(),
        };
        Ok(registry.with_empty_table_threshold(self.cleaning.empty_table_threshold))
    }

    /// Builds the output layout.
    pub fn layout(&self) -> OutputLayout {
        OutputLayout::new(&self.output.original_dir, &self.output.cleaned_dir)
            .with_filename_template(&self.output.filename_template)
            .with_save_original(self.output.save_original)
    }
}
