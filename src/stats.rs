//! Size statistics comparing original and cleaned text.

use serde::Serialize;
use std::fmt;

/// Before/after sizes of one cleaning run.
///
/// Sizes are counted in Unicode scalar values, not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CleaningStats {
    /// Characters in the original text
    pub original_size: usize,
    /// Characters in the cleaned text
    pub cleaned_size: usize,
    /// `original_size - cleaned_size`; negative if cleaning grew the text
    pub removed_chars: i64,
    /// Removed share in percent, rounded to 2 decimals
    pub removed_percent: f64,
}

impl CleaningStats {
    /// Computes statistics for an original/cleaned pair.
    pub fn compute(original: &str, cleaned: &str) -> Self {
        let original_size = original.chars().count();
        let cleaned_size = cleaned.chars().count();
        let removed_chars = original_size as i64 - cleaned_size as i64;

        let removed_percent = if original_size == 0 {
            0.0
        } else {
            round2(removed_chars as f64 / original_size as f64 * 100.0)
        };

        Self {
            original_size,
            cleaned_size,
            removed_chars,
            removed_percent,
        }
    }
}

impl fmt::Display for CleaningStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> {} chars (removed {}, {:.2}%)",
            self.original_size, self.cleaned_size, self.removed_chars, self.removed_percent
        )
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
