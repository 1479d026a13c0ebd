//! Infrastructure wiring for Keystone services
//!
//! This crate provides the default registry keys, the collaborator contracts
//! stored under them (telemetry, date provider, cache, database pool, HTTP
//! server, task scheduler), a bounded-wait helper and the graceful shutdown
//! manager that tears those collaborators down in order.

pub mod composition;
pub mod connect;
pub mod date;
pub mod handles;
pub mod keys;
pub mod shutdown;
pub mod telemetry;
pub mod timeout;

// Re-export commonly used types
pub use composition::create_base_registry;
pub use connect::connect_with_telemetry;
pub use date::{DateProvider, FixedDateProvider, SystemDateProvider};
pub use handles::{CacheClient, DatabasePool, HttpServer, TaskScheduler};
pub use shutdown::{wait_for_termination_signal, ShutdownManager, ShutdownOutcome};
pub use telemetry::{ActiveSpan, SpanKind, SpanOptions, SpanStatus, Telemetry, TracingTelemetry};
pub use timeout::{with_timeout, TimeoutError};
