//! Span-based telemetry on top of `tracing`
//!
//! [`Telemetry`] is the collaborator stored under the `telemetry` key. The
//! provided helpers on `dyn Telemetry` run a callback inside a span, mark the
//! span `OK` or `ERROR` from the callback's `Result` and always end it.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use std::fmt;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};
use tracing::field::{display, Empty};
use tracing::{debug, Instrument};

/// Role of a span in a trace
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpanKind {
    #[default]
    Internal,
    Server,
    Client,
    Producer,
    Consumer,
}

impl SpanKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpanKind::Internal => "internal",
            SpanKind::Server => "server",
            SpanKind::Client => "client",
            SpanKind::Producer => "producer",
            SpanKind::Consumer => "consumer",
        }
    }
}

/// Span kind plus free-form attributes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpanOptions {
    pub kind: SpanKind,
    pub attributes: Map<String, JsonValue>,
}

impl SpanOptions {
    pub fn new(kind: SpanKind) -> Self {
        Self {
            kind,
            attributes: Map::new(),
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }
}

/// Final status of a span
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpanStatus {
    Ok,
    Error(String),
}

impl SpanStatus {
    pub fn from_result<T, E: fmt::Display>(result: &Result<T, E>) -> Self {
        match result {
            Ok(_) => SpanStatus::Ok,
            Err(e) => SpanStatus::Error(e.to_string()),
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, SpanStatus::Ok)
    }
}

/// A span that has been started but not yet ended
#[derive(Debug)]
pub struct ActiveSpan {
    name: String,
    span: tracing::Span,
    started: Instant,
}

impl ActiveSpan {
    pub fn new(name: impl Into<String>, span: tracing::Span) -> Self {
        Self {
            name: name.into(),
            span,
            started: Instant::now(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn span(&self) -> &tracing::Span {
        &self.span
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}

#[async_trait]
pub trait Telemetry: Send + Sync + fmt::Debug {
    fn begin_span(&self, name: &str, options: &SpanOptions) -> ActiveSpan;

    /// Record the final status of `span` and close it
    fn end_span(&self, span: ActiveSpan, status: SpanStatus);

    /// Flush and stop exporting; called last during shutdown
    async fn shutdown(&self) -> anyhow::Result<()>;
}

impl dyn Telemetry {
    /// Run `f` inside a span named `name`
    pub fn start_span<T, E, F>(&self, name: &str, options: &SpanOptions, f: F) -> Result<T, E>
    where
        F: FnOnce(&tracing::Span) -> Result<T, E>,
        E: fmt::Display,
    {
        let active = self.begin_span(name, options);
        let result = active.span().in_scope(|| f(active.span()));
        self.end_span(active, SpanStatus::from_result(&result));
        result
    }

    /// Run the future returned by `f` inside a span named `name`
    pub async fn start_span_async<T, E, F, Fut>(
        &self,
        name: &str,
        options: &SpanOptions,
        f: F,
    ) -> Result<T, E>
    where
        F: FnOnce(tracing::Span) -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: fmt::Display,
    {
        let active = self.begin_span(name, options);
        let span = active.span().clone();
        let result = f(span.clone()).instrument(span).await;
        self.end_span(active, SpanStatus::from_result(&result));
        result
    }
}

/// Telemetry backed by `tracing` spans
///
/// Span fields follow the OpenTelemetry naming used by tracing exporters
/// (`otel.name`, `otel.kind`, `otel.status_code`).
#[derive(Debug)]
pub struct TracingTelemetry {
    service_name: String,
    service_version: String,
    shut_down: AtomicBool,
}

impl TracingTelemetry {
    pub fn new(service_name: impl Into<String>, service_version: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
            service_version: service_version.into(),
            shut_down: AtomicBool::new(false),
        }
    }

    pub fn is_shut_down(&self) -> bool {
        self.shut_down.load(Ordering::Acquire)
    }
}

#[async_trait]
impl Telemetry for TracingTelemetry {
    fn begin_span(&self, name: &str, options: &SpanOptions) -> ActiveSpan {
        let attributes = JsonValue::Object(options.attributes.clone());
        let span = tracing::info_span!(
            "telemetry",
            otel.name = %name,
            otel.kind = options.kind.as_str(),
            otel.status_code = Empty,
            service.name = %self.service_name,
            service.version = %self.service_version,
            attributes = %attributes,
            error.message = Empty
        );
        ActiveSpan::new(name, span)
    }

    fn end_span(&self, active: ActiveSpan, status: SpanStatus) {
        match &status {
            SpanStatus::Ok => {
                active.span().record("otel.status_code", "OK");
            }
            SpanStatus::Error(message) => {
                active.span().record("otel.status_code", "ERROR");
                active.span().record("error.message", display(message));
            }
        }

        debug!(
            span_name = active.name(),
            elapsed_ms = active.elapsed().as_millis() as u64,
            ok = status.is_ok(),
            "Span ended"
        );
    }

    async fn shutdown(&self) -> anyhow::Result<()> {
        if !self.shut_down.swap(true, Ordering::AcqRel) {
            debug!(service = %self.service_name, "Telemetry shut down");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Records every ended span on top of the tracing implementation
    #[derive(Debug)]
    struct RecordingTelemetry {
        inner: TracingTelemetry,
        ended: Mutex<Vec<(String, SpanStatus)>>,
    }

    impl RecordingTelemetry {
        fn new() -> Self {
            Self {
                inner: TracingTelemetry::new("test", "0.0.0"),
                ended: Mutex::new(Vec::new()),
            }
        }

        fn ended(&self) -> Vec<(String, SpanStatus)> {
            self.ended.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Telemetry for RecordingTelemetry {
        fn begin_span(&self, name: &str, options: &SpanOptions) -> ActiveSpan {
            self.inner.begin_span(name, options)
        }

        fn end_span(&self, span: ActiveSpan, status: SpanStatus) {
            self.ended.lock().unwrap().push((span.name().to_string(), status.clone()));
            self.inner.end_span(span, status);
        }

        async fn shutdown(&self) -> anyhow::Result<()> {
            self.inner.shutdown().await
        }
    }

    #[test]
    fn test_start_span_ok() {
        let recording = Arc::new(RecordingTelemetry::new());
        let telemetry: Arc<dyn Telemetry> = recording.clone();

        let result: Result<i32, String> =
            telemetry.start_span("compute", &SpanOptions::default(), |_span| Ok(7));

        assert_eq!(result, Ok(7));
        assert_eq!(recording.ended(), vec![("compute".to_string(), SpanStatus::Ok)]);
    }

    #[test]
    fn test_start_span_error() {
        let recording = Arc::new(RecordingTelemetry::new());
        let telemetry: Arc<dyn Telemetry> = recording.clone();

        let result: Result<(), String> = telemetry.start_span(
            "compute",
            &SpanOptions::new(SpanKind::Client).with_attribute("db.system", "postgresql"),
            |_span| Err("connection refused".to_string()),
        );

        assert!(result.is_err());
        assert_eq!(
            recording.ended(),
            vec![(
                "compute".to_string(),
                SpanStatus::Error("connection refused".to_string())
            )]
        );
    }

    #[tokio::test]
    async fn test_start_span_async() {
        let recording = Arc::new(RecordingTelemetry::new());
        let telemetry: Arc<dyn Telemetry> = recording.clone();

        let ok: Result<&str, String> = telemetry
            .start_span_async("fetch", &SpanOptions::default(), |_span| async { Ok("done") })
            .await;
        let failed: Result<(), String> = telemetry
            .start_span_async("fetch", &SpanOptions::default(), |_span| async {
                Err("boom".to_string())
            })
            .await;

        assert_eq!(ok, Ok("done"));
        assert!(failed.is_err());

        let statuses: Vec<bool> = recording.ended().iter().map(|(_, s)| s.is_ok()).collect();
        assert_eq!(statuses, vec![true, false]);
    }

    #[tokio::test]
    async fn test_shutdown_is_idempotent() {
        let telemetry = TracingTelemetry::new("test", "0.0.0");
        assert!(!telemetry.is_shut_down());

        telemetry.shutdown().await.unwrap();
        telemetry.shutdown().await.unwrap();
        assert!(telemetry.is_shut_down());
    }

    #[test]
    fn test_span_options_deserialize() {
        let options: SpanOptions =
            serde_json::from_str(r#"{"kind": "client", "attributes": {"net.peer.port": 6379}}"#)
                .unwrap();
        assert_eq!(options.kind, SpanKind::Client);
        assert_eq!(options.attributes["net.peer.port"], 6379);
    }
}
