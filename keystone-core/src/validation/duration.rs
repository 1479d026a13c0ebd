//! Human-readable duration parsing
//!
//! Accepts the `ms` package notation used in configuration files and
//! environment variables: `"100"`, `"1.5h"`, `"2 days"`, `"-10s"`, `"1y"`.
//! A bare number is a millisecond count. Units are case-insensitive and a
//! year is 365.25 days.

use once_cell::sync::Lazy;
use regex::Regex;
use std::time::Duration;

use crate::narrow::number::is_safe_integer;

const MAX_INPUT_LEN: usize = 100;

const SECOND: f64 = 1_000.0;
const MINUTE: f64 = SECOND * 60.0;
const HOUR: f64 = MINUTE * 60.0;
const DAY: f64 = HOUR * 24.0;
const WEEK: f64 = DAY * 7.0;
const YEAR: f64 = DAY * 365.25;

static DURATION_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^(-?(?:\d+)?\.?\d+) *(milliseconds?|msecs?|ms|seconds?|secs?|s|minutes?|mins?|m|hours?|hrs?|h|days?|d|weeks?|w|years?|yrs?|y)?$",
    )
    .expect("duration pattern is a valid regex")
});

fn unit_multiplier(unit: &str) -> f64 {
    match unit.to_ascii_lowercase().as_str() {
        "years" | "year" | "yrs" | "yr" | "y" => YEAR,
        "weeks" | "week" | "w" => WEEK,
        "days" | "day" | "d" => DAY,
        "hours" | "hour" | "hrs" | "hr" | "h" => HOUR,
        "minutes" | "minute" | "mins" | "min" | "m" => MINUTE,
        "seconds" | "second" | "secs" | "sec" | "s" => SECOND,
        _ => 1.0,
    }
}

/// Parse a duration string into a signed millisecond count.
///
/// Returns `None` for malformed input, input longer than 100 characters, or
/// a result that is not a safe integer (for example `"1.5ms"`).
pub fn parse_string_ms(text: &str) -> Option<i64> {
    if text.is_empty() || text.len() > MAX_INPUT_LEN {
        return None;
    }

    let captures = DURATION_PATTERN.captures(text)?;
    let amount: f64 = captures.get(1)?.as_str().parse().ok()?;
    let multiplier = captures.get(2).map_or(1.0, |unit| unit_multiplier(unit.as_str()));

    let millis = amount * multiplier;
    if is_safe_integer(millis) {
        Some(millis as i64)
    } else {
        None
    }
}

/// Parse a non-negative duration string into a [`Duration`]
pub fn parse_duration(text: &str) -> Option<Duration> {
    parse_string_ms(text)
        .and_then(|millis| u64::try_from(millis).ok())
        .map(Duration::from_millis)
}
