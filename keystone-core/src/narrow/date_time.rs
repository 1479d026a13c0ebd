//! Validated date and timestamp strings

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors raised when a string is not a valid date or timestamp
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateTimeError {
    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Invalid date time '{0}', expected an RFC 3339 UTC timestamp")]
    InvalidDateTime(String),
}

/// A calendar date in strict `YYYY-MM-DD` form
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ValidDate(String);

impl ValidDate {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn to_naive_date(&self) -> NaiveDate {
        // Checked at construction
        NaiveDate::parse_from_str(&self.0, "%Y-%m-%d").unwrap_or_default()
    }
}

impl FromStr for ValidDate {
    type Err = DateTimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let well_formed = s.len() == 10 && NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok();
        if !well_formed {
            return Err(DateTimeError::InvalidDate(s.to_string()));
        }
        Ok(Self(s.to_string()))
    }
}

/// An RFC 3339 timestamp in UTC (`Z` suffix), e.g. `2021-01-01T00:00:00.000Z`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ValidDateTime(String);

impl ValidDateTime {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn to_date_time(&self) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(&self.0)
            .map(|parsed| parsed.with_timezone(&Utc))
            .unwrap_or_default()
    }
}

impl FromStr for ValidDateTime {
    type Err = DateTimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parsed: Option<DateTime<FixedOffset>> = DateTime::parse_from_rfc3339(s).ok();
        let is_utc = s.ends_with('Z') || s.ends_with('z');

        match parsed {
            Some(_) if is_utc => Ok(Self(s.to_string())),
            _ => Err(DateTimeError::InvalidDateTime(s.to_string())),
        }
    }
}

macro_rules! string_conversions {
    ($($name:ident),+) => {
        $(
            impl TryFrom<String> for $name {
                type Error = DateTimeError;

                fn try_from(value: String) -> Result<Self, Self::Error> {
                    value.parse()
                }
            }

            impl From<$name> for String {
                fn from(value: $name) -> String {
                    value.0
                }
            }

            impl fmt::Display for $name {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(&self.0)
                }
            }
        )+
    };
}

string_conversions!(ValidDate, ValidDateTime);
