//! Schema validation adapters and string parsers
//!
//! This module bridges JSON-schema validation into `Result` values and
//! provides `Option`-returning parsers for numbers and human-readable
//! durations. Validation failures are data, never panics.

pub mod duration;
pub mod numeric;
pub mod serde_helpers;

// Re-export commonly used items
pub use duration::{parse_duration, parse_string_ms};
pub use numeric::{parse_string_min_max, parse_string_min_max_integer, NumericRange};

use jsonschema::Validator;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value as JsonValue};
use std::fmt;
use thiserror::Error;

use crate::error::{Result as KeystoneResult, ValidationError};

/// A compiled JSON schema
pub struct Schema {
    raw: JsonValue,
    validator: Validator,
}

impl Schema {
    /// Compile a schema document
    ///
    /// # Example
    /// ```rust,ignore
    /// use serde_json::json;
    /// use keystone_core::validation::Schema;
    ///
    /// let schema = Schema::compile(json!({"type": "string"}))?;
    /// assert!(schema.is_valid(&json!("foobar")));
    /// ```
    pub fn compile(schema: JsonValue) -> Result<Self, ValidationError> {
        let validator = jsonschema::validator_for(&schema)
            .map_err(|e| ValidationError::SchemaCompilation(e.to_string()))?;

        Ok(Self {
            raw: schema,
            validator,
        })
    }

    /// The schema document this validator was compiled from
    pub fn as_json(&self) -> &JsonValue {
        &self.raw
    }

    pub fn is_valid(&self, input: &JsonValue) -> bool {
        self.validator.is_valid(input)
    }

    /// Validate `input`, collecting every violation
    pub fn validate(&self, input: &JsonValue) -> Result<(), SchemaError> {
        let issues: Vec<SchemaIssue> = self
            .validator
            .iter_errors(input)
            .map(|e| SchemaIssue {
                path: e.instance_path.to_string(),
                message: e.to_string(),
            })
            .collect();

        if issues.is_empty() {
            Ok(())
        } else {
            Err(SchemaError { issues })
        }
    }
}

impl fmt::Debug for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Schema").field("raw", &self.raw).finish()
    }
}

/// A single schema violation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaIssue {
    /// JSON pointer to the offending value (empty for the root)
    pub path: String,
    pub message: String,
}

impl fmt::Display for SchemaIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

/// Structured validation failure returned by [`parse`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error("Schema validation failed: {}", join_issues(.issues))]
pub struct SchemaError {
    pub issues: Vec<SchemaIssue>,
}

impl SchemaError {
    /// Build an error holding a single root-level issue
    pub fn single(message: impl Into<String>) -> Self {
        Self {
            issues: vec![SchemaIssue {
                path: String::new(),
                message: message.into(),
            }],
        }
    }
}

fn join_issues(issues: &[SchemaIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Validate `input` against `schema` and deserialize the validated output.
///
/// Returns the structured [`SchemaError`] when the schema rejects the input,
/// or when the accepted input does not deserialize into `T`.
pub fn parse<T>(schema: &Schema, input: &JsonValue) -> Result<T, SchemaError>
where
    T: DeserializeOwned,
{
    schema.validate(input)?;
    T::deserialize(input).map_err(|e| SchemaError::single(e.to_string()))
}

/// Compile `schema` and parse `input` against it in one step.
///
/// Both failure modes surface through [`KeystoneError`](crate::KeystoneError):
/// an invalid schema document as `Validation`, rejected input as `Schema`.
pub fn parse_with_schema<T>(schema: JsonValue, input: &JsonValue) -> KeystoneResult<T>
where
    T: DeserializeOwned,
{
    let schema = Schema::compile(schema)?;
    Ok(parse(&schema, input)?)
}

/// Schema accepting arrays with at least one element, each matching
/// `element_schema`
pub fn non_empty_array_schema(element_schema: JsonValue) -> JsonValue {
    json!({
        "type": "array",
        "minItems": 1,
        "items": element_schema,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::KeystoneError;
    use crate::non_empty::NonEmptyArray;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Person {
        name: String,
        age: u32,
    }

    fn person_schema() -> Schema {
        Schema::compile(json!({
            "type": "object",
            "properties": {
                "name": {"type": "string"},
                "age": {"type": "integer", "minimum": 0}
            },
            "required": ["name", "age"]
        }))
        .unwrap()
    }

    #[test]
    fn test_parse_success() {
        let schema = Schema::compile(json!({"type": "string"})).unwrap();
        let result: Result<String, _> = parse(&schema, &json!("foobar"));
        assert_eq!(result.unwrap(), "foobar");
    }

    #[test]
    fn test_parse_failure_is_structured() {
        let schema = Schema::compile(json!({"type": "string"})).unwrap();
        let err = parse::<String>(&schema, &json!(123)).unwrap_err();

        assert_eq!(err.issues.len(), 1);
        assert_eq!(err.issues[0].path, "");
        assert!(err.to_string().starts_with("Schema validation failed"));
    }

    #[test]
    fn test_parse_object() {
        let person: Person = parse(&person_schema(), &json!({"name": "Ada", "age": 36})).unwrap();
        assert_eq!(
            person,
            Person {
                name: "Ada".to_string(),
                age: 36
            }
        );

        let err = parse::<Person>(&person_schema(), &json!({"name": "Ada", "age": -1})).unwrap_err();
        assert_eq!(err.issues[0].path, "/age");
    }

    #[test]
    fn test_parse_reports_deserialize_mismatch() {
        // The schema accepts any object; the target type does not
        let schema = Schema::compile(json!({"type": "object"})).unwrap();
        let err = parse::<Person>(&schema, &json!({})).unwrap_err();
        assert_eq!(err.issues.len(), 1);
    }

    #[test]
    fn test_compile_invalid_schema() {
        let result = Schema::compile(json!({"type": "not-a-type"}));
        assert!(matches!(result, Err(ValidationError::SchemaCompilation(_))));
    }

    #[test]
    fn test_parse_with_schema() {
        let name: String = parse_with_schema(json!({"type": "string"}), &json!("foobar")).unwrap();
        assert_eq!(name, "foobar");

        let rejected = parse_with_schema::<String>(json!({"type": "string"}), &json!(1));
        assert!(matches!(rejected, Err(KeystoneError::Schema(_))));

        let broken = parse_with_schema::<String>(json!({"type": "not-a-type"}), &json!("x"));
        assert!(matches!(
            broken,
            Err(KeystoneError::Validation(ValidationError::SchemaCompilation(_)))
        ));
    }

    #[test]
    fn test_non_empty_array_schema() {
        let schema = Schema::compile(non_empty_array_schema(json!({"type": "integer"}))).unwrap();

        let values: NonEmptyArray<i64> = parse(&schema, &json!([1, 2, 3])).unwrap();
        assert_eq!(values, [1, 2, 3]);

        assert!(!schema.is_valid(&json!([])));
        assert!(!schema.is_valid(&json!([1, "two"])));
        assert!(!schema.is_valid(&json!("not an array")));
    }
}
