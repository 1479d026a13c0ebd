//! Core value types for Keystone
//!
//! This crate contains the small, dependency-light building blocks the rest of
//! the SDK is written against: optional-value helpers, the `NonEmptyArray`
//! collection, refined ("narrow") number and date types, schema validation
//! adapters and the typed dependency registry used as the composition root.

pub mod error;
pub mod narrow;
pub mod non_empty;
pub mod option;
pub mod service;
pub mod validation;

// Re-export commonly used types at the crate root
pub use error::{KeystoneError, Result, ServiceError, ValidationError};
pub use non_empty::{is_non_empty_array, EmptyArrayError, Nested, NonEmptyArray};
pub use option::{none, some, DisplayOption, OptionExt};
pub use service::{DependencyRegistry, RegistryBuilder, ServiceKey};
pub use validation::{parse, parse_with_schema, Schema, SchemaError, SchemaIssue};
