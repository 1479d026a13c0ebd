//! Refined number types

use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use thiserror::Error;

/// Largest integer an IEEE-754 double represents exactly, `2^53 - 1`
pub const MAX_SAFE_INTEGER: i64 = 9_007_199_254_740_991;

/// Check that `value` is an integer with magnitude at most [`MAX_SAFE_INTEGER`]
pub fn is_safe_integer(value: f64) -> bool {
    value.is_finite() && value.fract() == 0.0 && value.abs() <= MAX_SAFE_INTEGER as f64
}

/// A number rejected by a refined type
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("{value} is not a valid {kind}")]
pub struct NumberError {
    pub kind: &'static str,
    pub value: f64,
}

macro_rules! refined_number {
    (@define $(#[$meta:meta])* $name:ident, $label:literal, $check:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Deserialize)]
        #[serde(try_from = "f64")]
        pub struct $name(f64);

        impl $name {
            /// Refine `value`, or `None` when it fails the predicate
            pub fn new(value: f64) -> Option<Self> {
                let check: fn(f64) -> bool = $check;
                check(value).then_some(Self(value))
            }

            pub fn get(self) -> f64 {
                self.0
            }
        }

        impl TryFrom<f64> for $name {
            type Error = NumberError;

            fn try_from(value: f64) -> Result<Self, Self::Error> {
                Self::new(value).ok_or(NumberError { kind: $label, value })
            }
        }

        impl From<$name> for f64 {
            fn from(value: $name) -> f64 {
                value.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };

    // Integer refinements serialize as JSON integers
    (@integer $(#[$meta:meta])* $name:ident, $label:literal, $check:expr) => {
        refined_number!(@define $(#[$meta])* $name, $label, $check);

        impl $name {
            /// The value as an integer; exact for every safe integer
            pub fn as_i64(self) -> i64 {
                self.0 as i64
            }
        }

        impl From<$name> for i64 {
            fn from(value: $name) -> i64 {
                value.as_i64()
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_i64(self.as_i64())
            }
        }
    };

    ($(#[$meta:meta])* $name:ident, $label:literal, $check:expr) => {
        refined_number!(@define $(#[$meta])* $name, $label, $check);

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_f64(self.0)
            }
        }
    };
}

refined_number!(
    /// Any number except NaN and the infinities
    Finite, "finite number", |v| v.is_finite()
);
refined_number!(
    /// Strictly greater than zero (positive infinity allowed)
    Positive, "positive number", |v| v > 0.0
);
refined_number!(
    /// Strictly less than zero (negative infinity allowed)
    Negative, "negative number", |v| v < 0.0
);
refined_number!(NonNegative, "non-negative number", |v| v >= 0.0);
refined_number!(NonPositive, "non-positive number", |v| v <= 0.0);
refined_number!(@integer SafeInteger, "safe integer", is_safe_integer);
refined_number!(@integer PositiveSafeInteger, "positive safe integer", |v| {
    is_safe_integer(v) && v > 0.0
});
refined_number!(@integer NegativeSafeInteger, "negative safe integer", |v| {
    is_safe_integer(v) && v < 0.0
});
refined_number!(@integer NonNegativeSafeInteger, "non-negative safe integer", |v| {
    is_safe_integer(v) && v >= 0.0
});
refined_number!(@integer NonPositiveSafeInteger, "non-positive safe integer", |v| {
    is_safe_integer(v) && v <= 0.0
});

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLES: [f64; 12] = [
        0.0,
        3.25,
        -3.25,
        -7.0,
        7.0,
        0.5,
        -0.5,
        9_007_199_254_740_992.0,
        -9_007_199_254_740_992.0,
        f64::INFINITY,
        f64::NEG_INFINITY,
        f64::NAN,
    ];

    fn check(name: &str, accepts: fn(f64) -> bool, expected: [bool; 12]) {
        for (value, should_pass) in SAMPLES.iter().zip(expected) {
            assert_eq!(
                accepts(*value),
                should_pass,
                "Testing {} against {}, expected {}",
                value,
                name,
                should_pass
            );
        }
    }

    #[test]
    fn test_finite() {
        check(
            "Finite",
            |v| Finite::new(v).is_some(),
            [true, true, true, true, true, true, true, true, true, false, false, false],
        );
    }

    #[test]
    fn test_positive_and_negative() {
        check(
            "Positive",
            |v| Positive::new(v).is_some(),
            [false, true, false, false, true, true, false, true, false, true, false, false],
        );
        check(
            "Negative",
            |v| Negative::new(v).is_some(),
            [false, false, true, true, false, false, true, false, true, false, true, false],
        );
    }

    #[test]
    fn test_non_negative_and_non_positive() {
        check(
            "NonNegative",
            |v| NonNegative::new(v).is_some(),
            [true, true, false, false, true, true, false, true, false, true, false, false],
        );
        check(
            "NonPositive",
            |v| NonPositive::new(v).is_some(),
            [true, false, true, true, false, false, true, false, true, false, true, false],
        );
    }

    #[test]
    fn test_safe_integers() {
        check(
            "SafeInteger",
            |v| SafeInteger::new(v).is_some(),
            [true, false, false, true, true, false, false, false, false, false, false, false],
        );
        check(
            "PositiveSafeInteger",
            |v| PositiveSafeInteger::new(v).is_some(),
            [false, false, false, false, true, false, false, false, false, false, false, false],
        );
        check(
            "NegativeSafeInteger",
            |v| NegativeSafeInteger::new(v).is_some(),
            [false, false, false, true, false, false, false, false, false, false, false, false],
        );
        check(
            "NonNegativeSafeInteger",
            |v| NonNegativeSafeInteger::new(v).is_some(),
            [true, false, false, false, true, false, false, false, false, false, false, false],
        );
        check(
            "NonPositiveSafeInteger",
            |v| NonPositiveSafeInteger::new(v).is_some(),
            [true, false, false, true, false, false, false, false, false, false, false, false],
        );
    }

    #[test]
    fn test_try_from_and_serde() {
        let err = Positive::try_from(-1.0).unwrap_err();
        assert_eq!(err.to_string(), "-1 is not a valid positive number");

        let port: PositiveSafeInteger = serde_json::from_str("8080").unwrap();
        assert_eq!(port.as_i64(), 8080);
        assert!(serde_json::from_str::<PositiveSafeInteger>("0").is_err());
    }

    #[test]
    fn test_integer_types_serialize_as_integers() {
        let port = PositiveSafeInteger::new(8080.0).unwrap();
        assert_eq!(serde_json::to_string(&port).unwrap(), "8080");
        assert_eq!(i64::from(port), 8080);

        let offset = NonPositiveSafeInteger::new(-3.0).unwrap();
        assert_eq!(serde_json::to_value(offset).unwrap(), serde_json::json!(-3));

        let ratio = Positive::new(0.5).unwrap();
        assert_eq!(serde_json::to_string(&ratio).unwrap(), "0.5");
    }
}
