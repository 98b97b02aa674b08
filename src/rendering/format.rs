//! Price formatting: whole units, locale digit grouping, currency suffix.

use serde::{Deserialize, Serialize};

use crate::quantity::round_half_up;

/// How prices are displayed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrencyFormat {
    /// Appended after the number, including any separating space
    pub suffix: String,
    /// Thousands separator
    pub group_separator: char,
    /// Grouping only applies once the integer part has at least this many
    /// digits beyond the first group (cs-CZ: `999`, but `1 234`)
    pub min_grouping_digits: usize,
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self {
            suffix: " Kč".to_string(),
            group_separator: '\u{a0}',
            min_grouping_digits: 1,
        }
    }
}

impl CurrencyFormat {
    /// Format `amount` rounded to the nearest whole unit, e.g. `12 345 Kč`.
    ///
    /// The stored value keeps its precision; only the display is rounded.
    pub fn format(&self, amount: f64) -> String {
        let mut out = self.format_number(amount);
        out.push_str(&self.suffix);
        out
    }

    /// The grouped number without the suffix
    pub fn format_number(&self, amount: f64) -> String {
        let rounded = if amount.is_finite() { round_half_up(amount) } else { 0.0 };
        let whole = rounded as i128;
        let digits = whole.unsigned_abs().to_string();

        let mut out = String::with_capacity(digits.len() + 4);
        if whole < 0 {
            out.push('-');
        }
        if digits.len() < self.min_grouping_digits + 3 {
            out.push_str(&digits);
            return out;
        }
        let lead = digits.len() % 3;
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (i + 3 - lead) % 3 == 0 {
                out.push(self.group_separator);
            }
            out.push(c);
        }
        out
    }
}
