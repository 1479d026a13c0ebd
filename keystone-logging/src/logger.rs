//! Per-service loggers handed out by the dependency registry

use keystone_config::{LogLevel, LoggingConfig};
use serde_json::Value as JsonValue;
use std::fmt;
use std::io::Write;
use std::sync::Arc;
use tracing::field::display;

/// Creates loggers bound to a service name
pub trait LoggerFactory: Send + Sync + fmt::Debug {
    fn create_logger(&self, service_name: &str) -> Logger;
}

/// A logger that stamps every event with its service name
///
/// Events below `min_level` are dropped before they reach `tracing`, so the
/// subscriber's own filter only ever narrows further.
#[derive(Debug, Clone)]
pub struct Logger {
    service_name: Arc<str>,
    min_level: LogLevel,
}

macro_rules! emit {
    ($macro:ident, $service_name:ident, $severity:ident, $message:ident, $details:ident) => {
        tracing::$macro!(
            service_name = %$service_name,
            severity = $severity,
            details = $details.map(display),
            "{}",
            $message
        )
    };
}

impl Logger {
    pub fn new(service_name: impl Into<Arc<str>>, min_level: LogLevel) -> Self {
        Self {
            service_name: service_name.into(),
            min_level,
        }
    }

    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    pub fn min_level(&self) -> LogLevel {
        self.min_level
    }

    /// Whether an event at `level` would be emitted
    pub fn enabled(&self, level: LogLevel) -> bool {
        level >= self.min_level
    }

    /// Emit `message` at `level` with optional structured details
    pub fn log(&self, level: LogLevel, message: &str, details: Option<&JsonValue>) {
        if !self.enabled(level) {
            return;
        }

        let service_name = &*self.service_name;
        let severity = level.as_str();
        match level {
            LogLevel::Trace => emit!(trace, service_name, severity, message, details),
            LogLevel::Debug => emit!(debug, service_name, severity, message, details),
            LogLevel::Info => emit!(info, service_name, severity, message, details),
            LogLevel::Warn => emit!(warn, service_name, severity, message, details),
            LogLevel::Error | LogLevel::Fatal => emit!(error, service_name, severity, message, details),
        }
    }

    pub fn trace(&self, message: &str) {
        self.log(LogLevel::Trace, message, None);
    }

    pub fn debug(&self, message: &str) {
        self.log(LogLevel::Debug, message, None);
    }

    pub fn info(&self, message: &str) {
        self.log(LogLevel::Info, message, None);
    }

    pub fn warn(&self, message: &str) {
        self.log(LogLevel::Warn, message, None);
    }

    pub fn error(&self, message: &str) {
        self.log(LogLevel::Error, message, None);
    }

    pub fn fatal(&self, message: &str) {
        self.log(LogLevel::Fatal, message, None);
    }

    /// Flush buffered output; called once during shutdown
    pub fn flush(&self) -> std::io::Result<()> {
        std::io::stdout().flush()?;
        std::io::stderr().flush()
    }
}

/// The default factory: loggers that write through the global `tracing` subscriber
#[derive(Debug, Clone)]
pub struct TracingLoggerFactory {
    min_level: LogLevel,
}

impl TracingLoggerFactory {
    pub fn new(min_level: LogLevel) -> Self {
        Self { min_level }
    }

    pub fn from_config(config: &LoggingConfig) -> Self {
        Self::new(config.level)
    }
}

impl Default for TracingLoggerFactory {
    fn default() -> Self {
        Self::new(LogLevel::Info)
    }
}

impl LoggerFactory for TracingLoggerFactory {
    fn create_logger(&self, service_name: &str) -> Logger {
        Logger::new(service_name, self.min_level)
    }
}

/// A factory for tests whose loggers only emit errors
pub fn create_mock_logger_factory() -> Arc<dyn LoggerFactory> {
    Arc::new(TracingLoggerFactory::new(LogLevel::Error))
}
