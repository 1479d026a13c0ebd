//! Logging for Keystone services
//!
//! Two layers live here:
//! - subscriber initialisation ([`init_logging_from_config`],
//!   [`init_simple_tracing`]) which decides where and how events are written
//! - the [`LoggerFactory`] collaborator stored in the dependency registry,
//!   which hands out per-service [`Logger`]s that emit `tracing` events

pub mod init;
pub mod logger;

// Re-export main types for convenience
pub use init::{env_filter_directives, init_logging_from_config, init_simple_tracing};
pub use keystone_config::{LogFormat, LogLevel, LoggingConfig};
pub use logger::{create_mock_logger_factory, Logger, LoggerFactory, TracingLoggerFactory};
