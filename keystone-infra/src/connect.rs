//! Startup connection helper for wrapped clients

use std::future::Future;
use std::time::Duration;

use anyhow::Context;
use keystone_core::DependencyRegistry;
use keystone_logging::LogLevel;
use serde_json::json;

use crate::keys::{LoggerFactoryKey, TelemetryKey};
use crate::telemetry::SpanOptions;
use crate::timeout::with_timeout;

/// Establish a connection to `target` inside a `<target>.connect` span
///
/// `connect` must resolve within `limit`. Progress is logged through a
/// logger named after `target`; failures are logged at error level and
/// returned.
///
/// # Example
/// ```rust,ignore
/// let redis = connect_with_telemetry(&registry, "redis", options, Duration::from_secs(2), || {
///     client.ping()
/// })
/// .await?;
/// ```
pub async fn connect_with_telemetry<T, E, F, Fut>(
    registry: &DependencyRegistry,
    target: &str,
    options: SpanOptions,
    limit: Duration,
    connect: F,
) -> anyhow::Result<T>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Into<anyhow::Error>,
{
    let logger = registry
        .try_get::<LoggerFactoryKey>()
        .context("Logger must be registered before connecting")?
        .create_logger(target);
    let telemetry = registry
        .try_get::<TelemetryKey>()
        .context("Telemetry must be registered before connecting")?;

    let span_name = format!("{}.connect", target);
    telemetry
        .start_span_async(&span_name, &options, |_span| async {
            logger.debug(&format!("Connecting to {}...", target));

            let outcome = match with_timeout(limit, connect()).await {
                Ok(Ok(connection)) => Ok(connection),
                Ok(Err(e)) => Err(e.into()),
                Err(timeout) => Err(anyhow::Error::new(timeout)),
            };

            match outcome {
                Ok(connection) => {
                    logger.info(&format!("Connected to {}", target));
                    Ok(connection)
                }
                Err(e) => {
                    logger.log(
                        LogLevel::Error,
                        &format!("{} connection error", target),
                        Some(&json!({ "error": e.to_string() })),
                    );
                    Err(e.context(format!("Failed to connect to {}", target)))
                }
            }
        })
        .await
}
