//! Always-on normalization passes run after every cleaning level.

use regex::{Captures, Regex};
use std::sync::LazyLock;

// Regex patterns (compiled once using LazyLock)
static RE_UNDERSCORE_PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(_{2,})([^\s_](?:[^\n]*?[^\s_])?)(_{2,})").unwrap());

static RE_INSERT_PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[(?:ВСТАВКА|INSERT):\s*([^\]]*?)\s*\]").unwrap());

static RE_MULTIPLE_NEWLINES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{3,}").unwrap());

static RE_MULTIPLE_SPACES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r" {2,}").unwrap());

/// Rewrites divergent placeholder spellings into `{{{name}}}`.
///
/// Three substitutions run once each, in order: `__name__`, `___name___`,
/// then `[ВСТАВКА: name]` / `[INSERT: name]`. Underscore markers must use
/// the same count on both sides. Names stay on one line and may contain
/// spaces, but not at either edge. Insert names are trimmed.
pub fn standardize_placeholders(input: &str) -> String {
    let result = replace_underscore_placeholders(input, 2);
    let result = replace_underscore_placeholders(&result, 3);

    RE_INSERT_PLACEHOLDER
        .replace_all(&result, |caps: &Captures| placeholder(&caps[1]))
        .into_owned()
}

fn replace_underscore_placeholders(input: &str, width: usize) -> String {
    RE_UNDERSCORE_PLACEHOLDER
        .replace_all(input, |caps: &Captures| {
            if caps[1].len() == width && caps[3].len() == width {
                placeholder(&caps[2])
            } else {
                caps[0].to_string()
            }
        })
        .into_owned()
}

fn placeholder(name: &str) -> String {
    format!("{{{{{{{}}}}}}}", name)
}

/// Removes formatting artifacts left behind by conversion and deletion.
///
/// - 3+ consecutive newlines collapse to 2
/// - Leading and trailing whitespace is stripped
/// - Runs of 2+ spaces collapse to 1
///
/// Non-breaking spaces are turned into regular spaces before any of these,
/// so a space next to one collapses with it (`"a\u{a0} b"` gives `"a b"`)
/// and a second call changes nothing.
pub fn clean_formatting_artifacts(input: &str) -> String {
    let result = input.replace('\u{00A0}', " ");
    let result = RE_MULTIPLE_NEWLINES.replace_all(&result, "\n\n");
    RE_MULTIPLE_SPACES
        .replace_all(result.trim(), " ")
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_double_underscore_placeholder() {
        assert_eq!(standardize_placeholders("__client_name__"), "{{{client_name}}}");
        assert_eq!(
            standardize_placeholders("Здравствуйте, __имя__!"),
            "Здравствуйте, {{{имя}}}!"
        );
    }

    #[test]
    fn test_triple_underscore_placeholder() {
        assert_eq!(standardize_placeholders("___company___"), "{{{company}}}");
    }

    #[test]
    fn test_multi_word_underscore_placeholders() {
        assert_eq!(
            standardize_placeholders("Здравствуйте, __имя клиента__! ___название компании___"),
            "Здравствуйте, {{{имя клиента}}}! {{{название компании}}}"
        );
        assert_eq!(
            standardize_placeholders("__имя клиента__ и __должность__"),
            "{{{имя клиента}}} и {{{должность}}}"
        );
    }

    #[test]
    fn test_underscore_placeholder_stays_on_one_line() {
        assert_eq!(standardize_placeholders("__начало\nконец__"), "__начало\nконец__");
        assert_eq!(standardize_placeholders("__ имя __"), "__ имя __");
    }

    #[test]
    fn test_insert_placeholder() {
        assert_eq!(
            standardize_placeholders("[ВСТАВКА: client_name]"),
            "{{{client_name}}}"
        );
        assert_eq!(
            standardize_placeholders("[ВСТАВКА:телефон ]"),
            "{{{телефон}}}"
        );
    }

    #[test]
    fn test_mismatched_underscores_untouched() {
        assert_eq!(standardize_placeholders("___odd__"), "___odd__");
        assert_eq!(standardize_placeholders("Подпись: ________"), "Подпись: ________");
    }

    #[test]
    fn test_multiple_placeholders_in_line() {
        assert_eq!(
            standardize_placeholders("__a__ и ___b___ и [ВСТАВКА: c]"),
            "{{{a}}} и {{{b}}} и {{{c}}}"
        );
    }

    #[test]
    fn test_canonical_form_is_stable() {
        let once = standardize_placeholders("__x__");
        assert_eq!(standardize_placeholders(&once), once);
    }

    #[test]
    fn test_formatting_artifacts() {
        let input = "\n\n  Первый\u{00A0}абзац  текста\n\n\n\n\nВторой   абзац \n\n";
        assert_eq!(
            clean_formatting_artifacts(input),
            "Первый абзац текста\n\nВторой абзац"
        );
    }

    #[test]
    fn test_formatting_artifacts_idempotent() {
        let input = "a\u{00A0} b\n\n\n\nc  ";
        let once = clean_formatting_artifacts(input);
        assert_eq!(clean_formatting_artifacts(&once), once);
        assert_eq!(once, "a b\n\nc");
    }

    #[test]
    fn test_nbsp_collapses_with_adjacent_space() {
        assert_eq!(clean_formatting_artifacts("a\u{00A0} b"), "a b");
        assert_eq!(clean_formatting_artifacts("a\u{00A0}\u{00A0}b"), "a b");
    }
}
