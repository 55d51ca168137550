//! # Cleaning Pipeline
//!
//! Rule-based removal of organizational metadata, internal annotations and
//! boilerplate from converted Markdown.
//!
//! ## Pipeline Stages
//!
//! 1. **Categories** - the ordered categories of the requested [`CleaningLevel`],
//!    each an ordered list of deletion rules applied cumulatively
//! 2. **Placeholders** - `__name__`, `___name___` and `[ВСТАВКА: name]` become `{{{name}}}`
//! 3. **Formatting artifacts** - blank-line runs, edge whitespace, repeated spaces

mod normalize;
pub mod rules;
pub mod tables;

pub use normalize::{clean_formatting_artifacts, standardize_placeholders};
pub use rules::{
    CleaningRule, PatternRegistry, RuleFlags, RuleSpec, RulesConfig,
    DEFAULT_EMPTY_TABLE_THRESHOLD,
};
pub use tables::{remove_empty_tables, CellCounts};

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

/// A named group of rules targeting one kind of unwanted content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Confidentiality notice, author, audience, publish date, version lines
    Metadata,
    /// The terms (glossary) section
    Terms,
    /// Labeled "reason for creation" and "task" intro blocks
    TechnicalIntro,
    /// URLs, known hosts before the catch-all
    Links,
    /// Internal CRM brand names and deal-process jargon
    CrmReferences,
    /// Bracketed annotations, "see table" directives, warning banners
    InternalInstructions,
    /// Tables whose cells are mostly empty
    EmptyTables,
}

impl Category {
    /// All categories in declaration order.
    pub const ALL: [Category; 7] = [
        Category::Metadata,
        Category::Terms,
        Category::TechnicalIntro,
        Category::Links,
        Category::CrmReferences,
        Category::InternalInstructions,
        Category::EmptyTables,
    ];

    /// Returns the configuration name of this category.
    pub fn name(&self) -> &'static str {
        match self {
            Category::Metadata => "metadata",
            Category::Terms => "terms",
            Category::TechnicalIntro => "technical_intro",
            Category::Links => "links",
            Category::CrmReferences => "crm_references",
            Category::InternalInstructions => "internal_instructions",
            Category::EmptyTables => "empty_tables",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Category::ALL
            .into_iter()
            .find(|c| c.name() == s)
            .ok_or_else(|| Error::UnknownCategory(s.to_string()))
    }
}

/// Named preset selecting which categories apply.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CleaningLevel {
    /// Metadata and terms only
    Low,
    /// Low plus technical intros and links (default)
    #[default]
    Medium,
    /// Medium plus CRM references, internal instructions and empty tables
    High,
}

impl CleaningLevel {
    /// All levels, least to most aggressive.
    pub const ALL: [CleaningLevel; 3] =
        [CleaningLevel::Low, CleaningLevel::Medium, CleaningLevel::High];

    /// Returns the level name.
    pub fn as_str(&self) -> &'static str {
        match self {
            CleaningLevel::Low => "low",
            CleaningLevel::Medium => "medium",
            CleaningLevel::High => "high",
        }
    }

    /// Parses a level name, falling back to [`CleaningLevel::Medium`].
    pub fn from_name(name: &str) -> Self {
        match name {
            "low" => CleaningLevel::Low,
            "medium" => CleaningLevel::Medium,
            "high" => CleaningLevel::High,
            _ => CleaningLevel::Medium,
        }
    }

    /// Returns the canonical ordered categories of this level.
    pub fn categories(&self) -> &'static [Category] {
        const LOW: &[Category] = &[Category::Metadata, Category::Terms];
        const MEDIUM: &[Category] = &[
            Category::Metadata,
            Category::Terms,
            Category::TechnicalIntro,
            Category::Links,
        ];
        const HIGH: &[Category] = &[
            Category::Metadata,
            Category::Terms,
            Category::TechnicalIntro,
            Category::Links,
            Category::CrmReferences,
            Category::InternalInstructions,
            Category::EmptyTables,
        ];

        match self {
            CleaningLevel::Low => LOW,
            CleaningLevel::Medium => MEDIUM,
            CleaningLevel::High => HIGH,
        }
    }
}

impl fmt::Display for CleaningLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Applies a [`PatternRegistry`] to Markdown text.
#[derive(Debug, Clone, Default)]
pub struct Cleaner {
    registry: PatternRegistry,
}

impl Cleaner {
    /// Creates a cleaner over the given rule set.
    pub fn new(registry: PatternRegistry) -> Self {
        Self { registry }
    }

    /// Returns the rule set.
    pub fn registry(&self) -> &PatternRegistry {
        &self.registry
    }

    /// Cleans `input` at the named level.
    ///
    /// Unknown level names are treated as `medium`.
    pub fn clean(&self, input: &str, level: &str) -> String {
        let mut result = input.to_string();

        for category in self.registry.categories_for(level) {
            result = self.apply_category(&result, *category);
        }

        let result = standardize_placeholders(&result);
        clean_formatting_artifacts(&result)
    }

    /// Cleans `input` at a typed level.
    pub fn clean_level(&self, input: &str, level: CleaningLevel) -> String {
        self.clean(input, level.as_str())
    }

    /// Applies one category's rules in order, each over the previous output.
    pub fn apply_category(&self, input: &str, category: Category) -> String {
        if category == Category::EmptyTables {
            return remove_empty_tables(input, self.registry.empty_table_threshold());
        }

        let mut result = input.to_string();
        for rule in self.registry.rules(category) {
            if !rule.is_match(&result) {
                continue;
            }
            log::debug!("Applying {} rule {:?}", category, rule.spec().pattern);
            result = rule.apply(&result);
        }
        result
    }
}

static DEFAULT_CLEANER: LazyLock<Cleaner> = LazyLock::new(Cleaner::default);

/// Cleans `input` at the named level with the built-in rules.
///
/// # Example
///
/// ```
/// use docscrub::cleanup::clean;
///
/// let dirty = "# Скрипт\n\nАвтор: Иванов\n\nЗдравствуйте, __имя__!\n\n\n\n";
/// assert_eq!(clean(dirty, "low"), "# Скрипт\n\nЗдравствуйте, {{{имя}}}!");
/// ```
pub fn clean(input: &str, level: &str) -> String {
    DEFAULT_CLEANER.clean(input, level)
}

/// Removes metadata label lines.
pub fn clean_metadata(input: &str) -> String {
    DEFAULT_CLEANER.apply_category(input, Category::Metadata)
}

/// Removes the terms section.
pub fn remove_terms_section(input: &str) -> String {
    DEFAULT_CLEANER.apply_category(input, Category::Terms)
}

/// Removes technical intro blocks.
pub fn clean_technical_intros(input: &str) -> String {
    DEFAULT_CLEANER.apply_category(input, Category::TechnicalIntro)
}

/// Removes URLs.
pub fn clean_links(input: &str) -> String {
    DEFAULT_CLEANER.apply_category(input, Category::Links)
}

/// Removes CRM system names and deal-process phrases.
pub fn clean_crm_references(input: &str) -> String {
    DEFAULT_CLEANER.apply_category(input, Category::CrmReferences)
}

/// Removes internal annotations and banners.
pub fn clean_internal_instructions(input: &str) -> String {
    DEFAULT_CLEANER.apply_category(input, Category::InternalInstructions)
}

/// Removes mostly-empty tables using the default threshold.
pub fn clean_empty_tables(input: &str) -> String {
    DEFAULT_CLEANER.apply_category(input, Category::EmptyTables)
}
