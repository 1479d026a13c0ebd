//! Serde adapters for numbers and durations carried as strings
//!
//! Environment-derived configuration arrives as text. These helpers plug the
//! string parsers into `#[serde(deserialize_with = ...)]` or wrap them in
//! newtypes carrying their bounds as const generics.

use serde::de::{Deserialize, Deserializer, Error as DeError};
use serde::{Serialize, Serializer};
use std::time::Duration;

use super::duration::{parse_duration, parse_string_ms};
use super::numeric::{parse_string_min_max, parse_string_min_max_integer, NumericRange};

/// Deserialize an `ms`-style duration string into a millisecond count
pub mod stringified_ms {
    use super::*;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<i64, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        parse_string_ms(&text).ok_or_else(|| D::Error::custom(format!("Invalid duration: {}", text)))
    }
}

/// Deserialize an `ms`-style duration string into a [`Duration`]
pub mod stringified_duration {
    use super::*;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        parse_duration(&text).ok_or_else(|| D::Error::custom(format!("Invalid duration: {}", text)))
    }
}

/// A number parsed from a string and bounded by `MIN..=MAX`
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct StringifiedNumber<const MIN: i64, const MAX: i64>(pub f64);

/// A safe integer parsed from a string and bounded by `MIN..=MAX`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StringifiedInteger<const MIN: i64, const MAX: i64>(pub i64);

const fn range(min: i64, max: i64) -> NumericRange {
    NumericRange::new(min as f64, max as f64)
}

impl<'de, const MIN: i64, const MAX: i64> Deserialize<'de> for StringifiedNumber<MIN, MAX> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        parse_string_min_max(&text, range(MIN, MAX))
            .map(Self)
            .ok_or_else(|| {
                D::Error::custom(format!("Expected a number between {} and {}, got {:?}", MIN, MAX, text))
            })
    }
}

impl<'de, const MIN: i64, const MAX: i64> Deserialize<'de> for StringifiedInteger<MIN, MAX> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        parse_string_min_max_integer(&text, range(MIN, MAX))
            .map(Self)
            .ok_or_else(|| {
                D::Error::custom(format!("Expected an integer between {} and {}, got {:?}", MIN, MAX, text))
            })
    }
}

impl<const MIN: i64, const MAX: i64> Serialize for StringifiedNumber<MIN, MAX> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&self.0)
    }
}

impl<const MIN: i64, const MAX: i64> Serialize for StringifiedInteger<MIN, MAX> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&self.0)
    }
}
