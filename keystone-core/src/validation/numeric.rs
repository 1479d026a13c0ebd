//! Range-checked number parsing

use serde::{Deserialize, Serialize};

use crate::narrow::number::is_safe_integer;

/// Inclusive numeric bounds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NumericRange {
    pub min: f64,
    pub max: f64,
}

impl NumericRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Check `min <= value <= max`
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Parse a number, ignoring surrounding whitespace. Accepts decimal and
/// exponent notation plus unsigned `0x`/`0o`/`0b` literals. Blank input is
/// rejected rather than read as zero.
fn parse_number(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }

    let radix = match trimmed.get(..2) {
        Some("0x" | "0X") => 16,
        Some("0o" | "0O") => 8,
        Some("0b" | "0B") => 2,
        _ => return trimmed.parse::<f64>().ok(),
    };
    parse_radix_digits(&trimmed[2..], radix)
}

fn parse_radix_digits(digits: &str, radix: u32) -> Option<f64> {
    if digits.is_empty() {
        return None;
    }
    digits.chars().try_fold(0.0_f64, |acc, c| {
        c.to_digit(radix)
            .map(|digit| acc * f64::from(radix) + f64::from(digit))
    })
}

/// Parse `text` as a finite number within `range`
///
/// # Example
/// ```rust,ignore
/// let range = NumericRange::new(-100.0, 100.0);
/// assert_eq!(parse_string_min_max("50.2", range), Some(50.2));
/// assert_eq!(parse_string_min_max("200", range), None);
/// ```
pub fn parse_string_min_max(text: &str, range: NumericRange) -> Option<f64> {
    parse_number(text).filter(|value| value.is_finite() && range.contains(*value))
}

/// Parse `text` as a safe integer within `range`
pub fn parse_string_min_max_integer(text: &str, range: NumericRange) -> Option<i64> {
    parse_number(text)
        .filter(|value| is_safe_integer(*value) && range.contains(*value))
        .map(|value| value as i64)
}
