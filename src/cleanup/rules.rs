//! Pattern registry: cleaning rules grouped by category, and the level map.
//!
//! The built-in rule set is expressed as [`RulesConfig`] data so that it can be
//! printed, edited, and loaded back from JSON. A [`PatternRegistry`] is the
//! compiled, immutable form handed to the [`Cleaner`](super::Cleaner).

use super::{Category, CleaningLevel};
use crate::error::{Error, Result};
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Default empty-cell percentage above which a table is removed.
pub const DEFAULT_EMPTY_TABLE_THRESHOLD: f64 = 70.0;

fn is_false(value: &bool) -> bool {
    !*value
}

/// Regex matching flags for a rule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleFlags {
    /// `^` and `$` match at line boundaries
    #[serde(default, skip_serializing_if = "is_false")]
    pub multi_line: bool,
    /// `.` also matches `\n`
    #[serde(default, skip_serializing_if = "is_false")]
    pub dot_matches_new_line: bool,
    /// Case-insensitive matching
    #[serde(default, skip_serializing_if = "is_false")]
    pub case_insensitive: bool,
}

impl RuleFlags {
    fn compile(&self, pattern: &str) -> Result<Regex> {
        RegexBuilder::new(pattern)
            .multi_line(self.multi_line)
            .dot_matches_new_line(self.dot_matches_new_line)
            .case_insensitive(self.case_insensitive)
            .build()
            .map_err(|source| Error::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            })
    }
}

/// Serializable description of one cleaning rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSpec {
    /// Pattern whose matches are deleted (or where a section starts)
    pub pattern: String,
    /// Matching flags, shared by `pattern` and `until`
    #[serde(flatten)]
    pub flags: RuleFlags,
    /// Section boundary: deletion stops before the next match of this pattern
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub until: Option<String>,
    /// With `until`, delete to the end of text when no boundary follows
    #[serde(default, skip_serializing_if = "is_false")]
    pub to_end_of_text: bool,
}

impl RuleSpec {
    /// Creates a plain deletion rule.
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            flags: RuleFlags::default(),
            until: None,
            to_end_of_text: false,
        }
    }

    /// Enables multi-line mode.
    pub fn multi_line(mut self) -> Self {
        self.flags.multi_line = true;
        self
    }

    /// Lets `.` match newlines.
    pub fn dot_matches_new_line(mut self) -> Self {
        self.flags.dot_matches_new_line = true;
        self
    }

    /// Enables case-insensitive matching.
    pub fn case_insensitive(mut self) -> Self {
        self.flags.case_insensitive = true;
        self
    }

    /// Turns the rule into a section rule ending before `boundary`.
    pub fn until(mut self, boundary: impl Into<String>) -> Self {
        self.until = Some(boundary.into());
        self
    }

    /// Lets a section rule run to the end of text when no boundary follows.
    pub fn or_end_of_text(mut self) -> Self {
        self.to_end_of_text = true;
        self
    }
}

/// How a compiled rule deletes text.
#[derive(Debug, Clone)]
enum RuleKind {
    /// Delete every match.
    Match,
    /// Delete from each start match up to the next boundary match.
    Section { end: Regex, to_end_of_text: bool },
}

/// A compiled cleaning rule.
#[derive(Debug, Clone)]
pub struct CleaningRule {
    spec: RuleSpec,
    pattern: Regex,
    kind: RuleKind,
}

impl CleaningRule {
    /// Compiles a rule from its description.
    pub fn from_spec(spec: RuleSpec) -> Result<Self> {
        let pattern = spec.flags.compile(&spec.pattern)?;
        let kind = match spec.until {
            Some(ref end) => RuleKind::Section {
                end: spec.flags.compile(end)?,
                to_end_of_text: spec.to_end_of_text,
            },
            None => RuleKind::Match,
        };

        Ok(Self {
            spec,
            pattern,
            kind,
        })
    }

    /// Compiles a plain deletion rule.
    pub fn new(pattern: &str, flags: RuleFlags) -> Result<Self> {
        Self::from_spec(RuleSpec {
            flags,
            ..RuleSpec::new(pattern)
        })
    }

    /// Returns the rule description.
    pub fn spec(&self) -> &RuleSpec {
        &self.spec
    }

    /// Returns true if the rule matches anywhere in `text`.
    pub fn is_match(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }

    /// Deletes everything this rule matches.
    pub fn apply(&self, text: &str) -> String {
        match &self.kind {
            RuleKind::Match => self.pattern.replace_all(text, "").into_owned(),
            RuleKind::Section {
                end,
                to_end_of_text,
            } => self.remove_sections(text, end, *to_end_of_text),
        }
    }

    fn remove_sections(&self, text: &str, end: &Regex, to_end_of_text: bool) -> String {
        let mut output = String::with_capacity(text.len());
        let mut copied = 0;
        let mut search = 0;

        while search <= text.len() {
            let Some(start) = self.pattern.find_at(text, search) else {
                break;
            };

            let stop = match end.find_at(text, start.end()) {
                Some(boundary) => boundary.start(),
                None if to_end_of_text => text.len(),
                // No later start can find a boundary either.
                None => break,
            };

            output.push_str(&text[copied..start.start()]);
            copied = stop;

            search = if stop > start.start() {
                stop
            } else {
                next_char_boundary(text, start.start())
            };
        }

        output.push_str(&text[copied..]);
        output
    }
}

fn next_char_boundary(text: &str, pos: usize) -> usize {
    pos + text[pos..].chars().next().map_or(1, char::len_utf8)
}

/// Serializable rule set: rules per category and categories per level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulesConfig {
    /// Ordered rules for each pattern category
    #[serde(default)]
    pub categories: BTreeMap<Category, Vec<RuleSpec>>,
    /// Ordered category names for each level name
    #[serde(default)]
    pub levels: BTreeMap<String, Vec<String>>,
}

impl Default for RulesConfig {
    fn default() -> Self {
        let mut categories = BTreeMap::new();

        categories.insert(
            Category::Metadata,
            vec![
                RuleSpec::new(r"Конфиденциально\s*").multi_line(),
                RuleSpec::new(r"Автор:.*").multi_line(),
                RuleSpec::new(r"Для кого предназначено:.*").multi_line(),
                RuleSpec::new(r"Дата издания:.*").multi_line(),
                RuleSpec::new(r"Версия:.*").multi_line(),
                RuleSpec::new(r"^Confidential[ \t]*$").multi_line(),
                RuleSpec::new(r"^(?:Author|Audience|Published|Version):.*").multi_line(),
            ],
        );

        categories.insert(
            Category::Terms,
            vec![RuleSpec::new(r"Термины:")
                .multi_line()
                .until(r"\n\s*\n\S")
                .or_end_of_text()],
        );

        categories.insert(
            Category::TechnicalIntro,
            vec![
                RuleSpec::new(r"Причина создания:")
                    .multi_line()
                    .dot_matches_new_line()
                    .until(r"\n\n"),
                RuleSpec::new(r"Задача:")
                    .multi_line()
                    .dot_matches_new_line()
                    .until(r"\n\n"),
            ],
        );

        // Known hosts first; the bare URL rules catch whatever they miss.
        categories.insert(
            Category::Links,
            vec![
                RuleSpec::new(r"https?://(?:docs|drive|sheets)\.google\.com[^\s)\]>]*").multi_line(),
                RuleSpec::new(r"https?://[\w.-]*bitrix24\.[a-z]+[^\s)\]>]*").multi_line(),
                RuleSpec::new(r"https?://[\w.-]*amocrm\.[a-z]+[^\s)\]>]*").multi_line(),
                RuleSpec::new(r"https?://[^\s)\]>]+").multi_line(),
                RuleSpec::new(r"\bwww\.[^\s)\]>]+").multi_line(),
            ],
        );

        categories.insert(
            Category::CrmReferences,
            vec![
                RuleSpec::new(r"Битрикс\s?24").multi_line().case_insensitive(),
                RuleSpec::new(r"Bitrix\s?24").multi_line().case_insensitive(),
                RuleSpec::new(r"\bБ24\b").multi_line().case_insensitive(),
                RuleSpec::new(r"amo\s?CRM").multi_line().case_insensitive(),
                RuleSpec::new(r"\bCRM\b").multi_line().case_insensitive(),
                RuleSpec::new(r"карточк[а-яё]*\s+сделк[а-яё]*")
                    .multi_line()
                    .case_insensitive(),
                RuleSpec::new(r#"этап[а-яё]*\s+"[^"\n]*""#)
                    .multi_line()
                    .case_insensitive(),
                RuleSpec::new(r"этап[а-яё]*\s+«[^»\n]*»")
                    .multi_line()
                    .case_insensitive(),
                RuleSpec::new(r"(?:этап|стади)[а-яё]*\s+сделк[а-яё]*")
                    .multi_line()
                    .case_insensitive(),
            ],
        );

        categories.insert(
            Category::InternalInstructions,
            vec![
                RuleSpec::new(r"\[(?:[Сс]м\.|[Ss]ee)\s[^\]]*\]").multi_line(),
                RuleSpec::new(r"\[(?:Пояснение для|Explanation for)[^\]]*\]").multi_line(),
                RuleSpec::new(r"\[(?:ДЕЙСТВИЯ В|ACTIONS IN)[^\]]*\]").multi_line(),
                RuleSpec::new(r"^(?:См\. таблицу|See table)[^\n]*\n?").multi_line(),
                RuleSpec::new(r"(?:ВНИМАНИЕ|ATTENTION)![^\n]*").multi_line(),
            ],
        );

        let levels = CleaningLevel::ALL
            .iter()
            .map(|level| {
                let names = level
                    .categories()
                    .iter()
                    .map(|c| c.name().to_string())
                    .collect();
                (level.as_str().to_string(), names)
            })
            .collect();

        Self { categories, levels }
    }
}

/// Compiled, immutable rule set passed into the cleaner.
#[derive(Debug, Clone)]
pub struct PatternRegistry {
    categories: HashMap<Category, Vec<CleaningRule>>,
    levels: HashMap<String, Vec<Category>>,
    empty_table_threshold: f64,
}

impl Default for PatternRegistry {
    fn default() -> Self {
        Self::from_config(&RulesConfig::default()).expect("built-in cleaning rules compile")
    }
}

impl PatternRegistry {
    /// Compiles a registry from a rule configuration.
    pub fn from_config(config: &RulesConfig) -> Result<Self> {
        let mut categories = HashMap::new();
        for (category, specs) in &config.categories {
            let rules = specs
                .iter()
                .cloned()
                .map(CleaningRule::from_spec)
                .collect::<Result<Vec<_>>>()?;
            categories.insert(*category, rules);
        }

        let mut levels = HashMap::new();
        for (level, names) in &config.levels {
            let resolved = names
                .iter()
                .map(|name| name.parse::<Category>())
                .collect::<Result<Vec<_>>>()?;
            levels.insert(level.clone(), resolved);
        }

        Ok(Self {
            categories,
            levels,
            empty_table_threshold: DEFAULT_EMPTY_TABLE_THRESHOLD,
        })
    }

    /// Sets the empty-cell percentage above which tables are removed.
    pub fn with_empty_table_threshold(mut self, threshold: f64) -> Self {
        self.empty_table_threshold = threshold;
        self
    }

    /// Returns the empty-table threshold in percent.
    pub fn empty_table_threshold(&self) -> f64 {
        self.empty_table_threshold
    }

    /// Returns the ordered rules of a category (empty if it has none).
    pub fn rules(&self, category: Category) -> &[CleaningRule] {
        self.categories
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Returns true if the level name is defined.
    pub fn has_level(&self, level: &str) -> bool {
        self.levels.contains_key(level)
    }

    /// Returns the ordered categories for a level.
    ///
    /// Unknown level names resolve to the `medium` level.
    pub fn categories_for(&self, level: &str) -> &[Category] {
        let resolved = match self.levels.get(level) {
            Some(categories) => Some(categories),
            None => {
                log::debug!(
                    "Unknown cleaning level {:?}, using {:?}",
                    level,
                    CleaningLevel::Medium.as_str()
                );
                self.levels.get(CleaningLevel::Medium.as_str())
            }
        };

        resolved.map(Vec::as_slice).unwrap_or(&[])
    }

    /// Converts the registry back into its serializable form.
    pub fn to_config(&self) -> RulesConfig {
        RulesConfig {
            categories: self
                .categories
                .iter()
                .map(|(category, rules)| {
                    (*category, rules.iter().map(|r| r.spec().clone()).collect())
                })
                .collect(),
            levels: self
                .levels
                .iter()
                .map(|(level, categories)| {
                    (
                        level.clone(),
                        categories.iter().map(|c| c.name().to_string()).collect(),
                    )
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_rule_deletes_all_matches() {
        let rule = CleaningRule::new(r"Версия:.*", RuleFlags::default()).unwrap();
        let result = rule.apply("Версия: 1.0\nТекст\nВерсия: 2.0\n");
        assert_eq!(result, "\nТекст\n\n");
    }

    #[test]
    fn test_section_rule_matches_on_start_pattern() {
        let rule = CleaningRule::from_spec(RuleSpec::new("Задача:").until(r"\n\n")).unwrap();
        assert!(rule.is_match("Текст\nЗадача: позвонить"));
        assert!(!rule.is_match("Текст без задач"));
    }

    #[test]
    fn test_case_insensitive_flag() {
        let flags = RuleFlags {
            case_insensitive: true,
            ..Default::default()
        };
        let rule = CleaningRule::new(r"bitrix\s?24", flags).unwrap();
        assert_eq!(rule.apply("Use BITRIX 24 daily"), "Use  daily");
    }

    #[test]
    fn test_section_rule_stops_before_boundary() {
        let rule = CleaningRule::from_spec(
            RuleSpec::new("Термины:").until(r"\n\s*\n\S").or_end_of_text(),
        )
        .unwrap();

        let text = "Вступление\n\nТермины:\nЛид - клиент\nКП - предложение\n\nОсновной текст";
        assert_eq!(rule.apply(text), "Вступление\n\n\n\nОсновной текст");
    }

    #[test]
    fn test_section_rule_runs_to_end_of_text() {
        let rule = CleaningRule::from_spec(
            RuleSpec::new("Термины:").until(r"\n\s*\n\S").or_end_of_text(),
        )
        .unwrap();
        assert_eq!(rule.apply("Текст\n\nТермины:\nЛид"), "Текст\n\n");
    }

    #[test]
    fn test_section_rule_without_boundary_left_alone() {
        let rule = CleaningRule::from_spec(RuleSpec::new("Задача:").until(r"\n\n")).unwrap();
        assert_eq!(rule.apply("Задача: продать"), "Задача: продать");
    }

    #[test]
    fn test_section_rule_multiple_occurrences() {
        let rule = CleaningRule::from_spec(RuleSpec::new("Задача:").until(r"\n\n")).unwrap();
        let text = "Задача: a\nb\n\nMiddle\n\nЗадача: c\n\nEnd";
        assert_eq!(rule.apply(text), "\n\nMiddle\n\n\n\nEnd");
    }

    #[test]
    fn test_invalid_pattern_rejected() {
        let result = CleaningRule::new(r"(unclosed", RuleFlags::default());
        assert!(matches!(result, Err(Error::InvalidPattern { .. })));
    }

    #[test]
    fn test_default_levels_are_nested() {
        let registry = PatternRegistry::default();
        let low = registry.categories_for("low");
        let medium = registry.categories_for("medium");
        let high = registry.categories_for("high");

        assert!(low.iter().all(|c| medium.contains(c)));
        assert!(medium.iter().all(|c| high.contains(c)));
        assert!(low.len() < medium.len() && medium.len() < high.len());
    }

    #[test]
    fn test_unknown_level_falls_back_to_medium() {
        let registry = PatternRegistry::default();
        assert!(!registry.has_level("extreme"));
        assert_eq!(
            registry.categories_for("extreme"),
            registry.categories_for("medium")
        );
    }

    #[test]
    fn test_unknown_category_in_config() {
        let mut config = RulesConfig::default();
        config
            .levels
            .insert("custom".into(), vec!["metadata".into(), "emoji".into()]);
        let result = PatternRegistry::from_config(&config);
        assert!(matches!(result, Err(Error::UnknownCategory(name)) if name == "emoji"));
    }

    #[test]
    fn test_config_json_roundtrip() {
        let config = RulesConfig::default();
        let json = serde_json::to_string_pretty(&config).unwrap();
        assert!(json.contains("\"technical_intro\""));
        assert!(json.contains("\"until\""));
        let parsed: RulesConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_registry_to_config_preserves_rule_order() {
        let registry = PatternRegistry::default();
        let config = registry.to_config();
        assert_eq!(config, RulesConfig::default());
    }
}
