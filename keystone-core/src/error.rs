//! Core error types for Keystone

use thiserror::Error;

use crate::non_empty::EmptyArrayError;
use crate::validation::SchemaError;

/// Core error type aggregating the errors raised by this crate
#[derive(Debug, Error)]
pub enum KeystoneError {
    /// Dependency registry errors
    #[error("Service error: {0}")]
    Service(#[from] ServiceError),

    /// Schema or format errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Input rejected by a schema
    #[error("{0}")]
    Schema(#[from] SchemaError),

    /// An empty sequence was offered where a non-empty one is required
    #[error("{0}")]
    EmptyArray(#[from] EmptyArrayError),
}

/// Result type alias for Keystone
pub type Result<T> = std::result::Result<T, KeystoneError>;

/// Dependency registry errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    #[error("No provider for {0}")]
    NotFound(String),
}

/// Validation errors that are not tied to a particular input
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Failed to compile schema: {0}")]
    SchemaCompilation(String),
}
