//! Domain-driven configuration management for Keystone
//!
//! Configuration is split by functional domain (service identity, logging,
//! shutdown), each with its own defaults and validation. Files are YAML and
//! every domain can be overridden through `KEYSTONE_*` environment variables.

pub mod error;
pub mod loader;
pub mod validation;

// Domain-specific configuration modules
pub mod domains;

// Re-export main types
pub use error::{ConfigError, ConfigResult};
pub use loader::ConfigLoader;
pub use validation::Validatable;

// Re-export domain configurations
pub use domains::{
    logging::{LogFormat, LogLevel, LoggingConfig},
    service::ServiceConfig,
    shutdown::ShutdownConfig,
    KeystoneConfig,
};
