//! Optional value helpers
//!
//! `std::option::Option` is the `Some`/`None` container used across the SDK;
//! `is_some`, `is_none`, `map`, `and_then` and `unwrap_or` come with it. This
//! module adds the pieces std does not cover: a contract-checked unwrap with a
//! fixed panic message, a bridge into `Result` and a JSON rendering used in
//! log lines.

use serde::Serialize;
use std::fmt;

/// Panic message raised when unwrapping an empty option
pub const UNWRAP_NONE_MESSAGE: &str = "Unwrapping None.";

/// Wrap a value in `Some`
pub fn some<T>(value: T) -> Option<T> {
    Some(value)
}

/// Produce the empty variant
pub fn none<T>() -> Option<T> {
    None
}

/// Extension combinators for `Option`
pub trait OptionExt<T> {
    /// Take the contained value, panicking with `"Unwrapping None."` on `None`.
    ///
    /// Only meant for tests and for code paths where `None` has already been
    /// ruled out. It is not `unsafe` in the memory-safety sense; the name marks
    /// a caller-upheld precondition. Prefer `unwrap_or` or `and_then`.
    fn unsafe_unwrap(self) -> T;

    /// Convert into a `Result`, using `error` when the option is `None`
    fn to_result<E>(self, error: E) -> Result<T, E>;

    /// Borrow the option as a value that renders `Some(<json>)` or `None`
    fn display(&self) -> DisplayOption<'_, T>;

    /// Render the option as `Some(<json>)` or `None`
    fn to_display_string(&self) -> String
    where
        T: Serialize;
}

impl<T> OptionExt<T> for Option<T> {
    #[track_caller]
    fn unsafe_unwrap(self) -> T {
        match self {
            Some(value) => value,
            None => panic!("{}", UNWRAP_NONE_MESSAGE),
        }
    }

    fn to_result<E>(self, error: E) -> Result<T, E> {
        match self {
            Some(value) => Ok(value),
            None => Err(error),
        }
    }

    fn display(&self) -> DisplayOption<'_, T> {
        DisplayOption(self.as_ref())
    }

    fn to_display_string(&self) -> String
    where
        T: Serialize,
    {
        self.display().to_string()
    }
}

/// Display adapter returned by [`OptionExt::display`]
///
/// String payloads render quoted (`Some("foobar")`) since the payload goes
/// through `serde_json`.
#[derive(Debug, Clone, Copy)]
pub struct DisplayOption<'a, T>(Option<&'a T>);

impl<T: Serialize> fmt::Display for DisplayOption<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(value) => match serde_json::to_string(value) {
                Ok(json) => write!(f, "Some({})", json),
                Err(_) => write!(f, "Some(<unserializable>)"),
            },
            None => write!(f, "None"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::collections::HashMap;

    #[test]
    fn test_predicates() {
        assert!(some(1).is_some());
        assert!(!some(1).is_none());
        assert!(none::<i32>().is_none());
        assert!(!none::<i32>().is_some());
    }

    #[test]
    fn test_map_invokes_callback_only_on_some() {
        let calls = Cell::new(0);
        let double = |value: i32| {
            calls.set(calls.get() + 1);
            value * 2
        };

        assert_eq!(some(21).map(double), Some(42));
        assert_eq!(calls.get(), 1);

        assert_eq!(none::<i32>().map(double), None);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_and_then() {
        let calls = Cell::new(0);
        let half = |value: i32| {
            calls.set(calls.get() + 1);
            if value % 2 == 0 {
                some(value / 2)
            } else {
                none()
            }
        };

        assert_eq!(some(10).and_then(half), Some(5));
        assert_eq!(some(3).and_then(half), None);
        assert_eq!(calls.get(), 2);

        assert_eq!(none::<i32>().and_then(half), None);
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn test_unwrap_or() {
        assert_eq!(some("foobar").unwrap_or("fallback"), "foobar");
        assert_eq!(none().unwrap_or("fallback"), "fallback");
    }

    #[test]
    fn test_unsafe_unwrap_some() {
        assert_eq!(some("foobar").unsafe_unwrap(), "foobar");
    }

    #[test]
    #[should_panic(expected = "Unwrapping None.")]
    fn test_unsafe_unwrap_none_panics() {
        none::<&str>().unsafe_unwrap();
    }

    #[test]
    fn test_to_result() {
        assert_eq!(some("foobar").to_result("fallback"), Ok("foobar"));
        assert_eq!(none::<&str>().to_result("fallback"), Err("fallback"));
    }

    #[test]
    fn test_display_rendering() {
        assert_eq!(some("foobar").to_display_string(), "Some(\"foobar\")");
        assert_eq!(some(42).to_display_string(), "Some(42)");
        assert_eq!(some(vec![1, 2]).to_display_string(), "Some([1,2])");
        assert_eq!(none::<i32>().to_display_string(), "None");
        assert_eq!(format!("{}", some(true).display()), "Some(true)");
    }

    #[test]
    fn test_display_unserializable_payload() {
        // JSON object keys must be strings
        let mut map = HashMap::new();
        map.insert(vec![1u8], 1);
        assert_eq!(some(map).to_display_string(), "Some(<unserializable>)");
    }
}
