//! Detection and removal of mostly-empty Markdown tables.

use regex::{Captures, Regex};
use std::sync::LazyLock;

/// Header row, separator row, then one or more data rows.
static RE_TABLE_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?m)^\|[^\n]*\|[ \t]*\n\|[ \t|:-]*-[ \t|:-]*\|[ \t]*\n(?:\|[^\n]*\|[ \t]*(?:\n|\z))+",
    )
    .unwrap()
});

/// Cell counts of one table block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CellCounts {
    /// Header and data cells
    pub total: usize,
    /// Cells with nothing but whitespace between their pipes
    pub empty: usize,
}

impl CellCounts {
    /// Counts the cells of a table block. The separator row is not counted.
    pub fn of_block(block: &str) -> Self {
        let mut counts = Self::default();

        for (idx, line) in block.lines().enumerate() {
            if idx == 1 {
                continue;
            }

            let Some(inner) = line
                .trim()
                .strip_prefix('|')
                .and_then(|l| l.strip_suffix('|'))
            else {
                continue;
            };

            for cell in inner.split('|') {
                counts.total += 1;
                if cell.trim().is_empty() {
                    counts.empty += 1;
                }
            }
        }

        counts
    }

    /// Returns the empty-cell share in percent.
    pub fn empty_percent(&self) -> f64 {
        if self.total == 0 {
            return 100.0;
        }
        self.empty as f64 / self.total as f64 * 100.0
    }

    /// Returns true if the empty share is strictly above `threshold` percent.
    pub fn exceeds(&self, threshold: f64) -> bool {
        if self.total == 0 {
            return true;
        }
        self.empty as f64 * 100.0 > threshold * self.total as f64
    }
}

/// Deletes every table block whose empty-cell share exceeds `threshold` percent.
pub fn remove_empty_tables(input: &str, threshold: f64) -> String {
    RE_TABLE_BLOCK
        .replace_all(input, |caps: &Captures| {
            let block = &caps[0];
            let counts = CellCounts::of_block(block);
            if counts.exceeds(threshold) {
                log::debug!(
                    "Removing table with {}/{} empty cells ({:.1}%)",
                    counts.empty,
                    counts.total,
                    counts.empty_percent()
                );
                String::new()
            } else {
                block.to_string()
            }
        })
        .into_owned()
}
