//! Localized currency formatting for revenue cells.

use serde::{Deserialize, Serialize};

/// Formatting rules of one currency/locale pair.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CurrencyFormat {
    pub symbol: String,
    /// Place the symbol after the amount (`1 234,50 €`) instead of before.
    pub symbol_after: bool,
    pub thousands_separator: String,
    pub decimal_separator: String,
    pub fraction_digits: usize,
}

impl Default for CurrencyFormat {
    /// en-US dollars: `$1,234.50`.
    fn default() -> Self {
        Self {
            symbol: "$".to_string(),
            symbol_after: false,
            thousands_separator: ",".to_string(),
            decimal_separator: ".".to_string(),
            fraction_digits: 2,
        }
    }
}

impl CurrencyFormat {
    /// Formats `value`; non-finite input formats as zero.
    pub fn format(&self, value: f64) -> String {
        let value = if value.is_finite() { value } else { 0.0 };
        let fixed = format!("{:.*}", self.fraction_digits, value.abs());
        let (int_part, frac_part) = match fixed.split_once('.') {
            Some((int_part, frac_part)) => (int_part, Some(frac_part)),
            None => (fixed.as_str(), None),
        };

        let mut amount = group_thousands(int_part, &self.thousands_separator);
        if let Some(frac_part) = frac_part {
            amount.push_str(&self.decimal_separator);
            amount.push_str(frac_part);
        }

        let is_zero = fixed.bytes().all(|b| b == b'0' || b == b'.');
        let sign = if value < 0.0 && !is_zero { "-" } else { "" };

        if self.symbol_after {
            format!("{sign}{amount} {}", self.symbol)
        } else {
            format!("{sign}{}{amount}", self.symbol)
        }
    }
}

fn group_thousands(digits: &str, separator: &str) -> String {
    let len = digits.len();
    let mut grouped = String::with_capacity(len + len / 3 * separator.len());
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push_str(separator);
        }
        grouped.push(ch);
    }
    grouped
}
