//! Refined ("narrow") value types
//!
//! Each type can only be constructed from a value that satisfies its
//! predicate, through `TryFrom`, `FromStr` or serde.

pub mod date_time;
pub mod number;

pub use date_time::{DateTimeError, ValidDate, ValidDateTime};
pub use number::{
    Finite, Negative, NegativeSafeInteger, NonNegative, NonNegativeSafeInteger, NonPositive,
    NonPositiveSafeInteger, NumberError, Positive, PositiveSafeInteger, SafeInteger,
};
