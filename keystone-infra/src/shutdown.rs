//! Graceful shutdown of the registered infrastructure
//!
//! Collaborators are closed in reverse order of their dependencies: the task
//! scheduler first (it holds cache connections), then the HTTP server, the
//! database pool, the cache and finally telemetry, so that earlier steps can
//! still emit spans. The whole sequence runs under one time budget.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::Context;
use keystone_config::{KeystoneConfig, ServiceConfig, ShutdownConfig};
use keystone_core::{DependencyRegistry, ServiceError};
use keystone_logging::{LogLevel, Logger};
use serde_json::{json, Value as JsonValue};
use tracing::warn;

use crate::handles::{CacheClient, DatabasePool, HttpServer, TaskScheduler};
use crate::keys::{CacheKey, DatabaseKey, HttpServerKey, LoggerFactoryKey, TaskSchedulerKey, TelemetryKey};
use crate::telemetry::Telemetry;
use crate::timeout::with_timeout;

/// Result of a shutdown request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShutdownOutcome {
    /// Every collaborator closed within the budget
    Completed,
    /// Another shutdown was already running; nothing was done
    AlreadyInProgress,
    /// The budget elapsed before the sequence finished
    TimedOut,
    /// A collaborator failed to close
    Failed(String),
}

impl ShutdownOutcome {
    /// Process exit status for this outcome
    pub fn exit_code(&self) -> i32 {
        match self {
            ShutdownOutcome::Completed | ShutdownOutcome::AlreadyInProgress => 0,
            ShutdownOutcome::TimedOut | ShutdownOutcome::Failed(_) => 1,
        }
    }

    pub fn is_success(&self) -> bool {
        self.exit_code() == 0
    }
}

/// Closes every default collaborator exactly once
pub struct ShutdownManager {
    service: ServiceConfig,
    config: ShutdownConfig,
    logger: Logger,
    telemetry: Arc<dyn Telemetry>,
    cache: Arc<dyn CacheClient>,
    database: Arc<dyn DatabasePool>,
    task_scheduler: Arc<dyn TaskScheduler>,
    http_server: Arc<dyn HttpServer>,
    is_shutting_down: AtomicBool,
}

impl ShutdownManager {
    /// Resolve every default key from `registry`
    ///
    /// Fails with [`ServiceError::NotFound`] naming the first missing key.
    pub fn from_registry(
        config: &KeystoneConfig,
        registry: &DependencyRegistry,
    ) -> Result<Self, ServiceError> {
        let logger = registry.try_get::<LoggerFactoryKey>()?.create_logger("shutdown");

        Ok(Self {
            service: config.service.clone(),
            config: config.shutdown.clone(),
            logger,
            telemetry: registry.try_get::<TelemetryKey>()?.clone(),
            cache: registry.try_get::<CacheKey>()?.clone(),
            database: registry.try_get::<DatabaseKey>()?.clone(),
            task_scheduler: registry.try_get::<TaskSchedulerKey>()?.clone(),
            http_server: registry.try_get::<HttpServerKey>()?.clone(),
            is_shutting_down: AtomicBool::new(false),
        })
    }

    pub fn is_shutting_down(&self) -> bool {
        self.is_shutting_down.load(Ordering::Acquire)
    }

    /// Shut everything down; only the first call does any work
    pub async fn shutdown(&self) -> ShutdownOutcome {
        if self.is_shutting_down.swap(true, Ordering::AcqRel) {
            return ShutdownOutcome::AlreadyInProgress;
        }

        self.logger.info("Received termination event, shutting down...");

        let budget = self.config.graceful_timeout;
        let outcome = match with_timeout(budget, self.close_all()).await {
            Ok(Ok(())) => ShutdownOutcome::Completed,
            Ok(Err(e)) => ShutdownOutcome::Failed(format!("{:#}", e)),
            Err(_) => ShutdownOutcome::TimedOut,
        };

        match &outcome {
            ShutdownOutcome::Completed => self.logger.log(
                LogLevel::Info,
                &format!("Gracefully shut down service {}", self.service.name),
                Some(&self.runtime_details()),
            ),
            ShutdownOutcome::TimedOut => self.logger.log(
                LogLevel::Fatal,
                &format!(
                    "Could not gracefully shut down service {} after {:?}",
                    self.service.name, budget
                ),
                Some(&self.runtime_details()),
            ),
            ShutdownOutcome::Failed(reason) => {
                let mut details = self.runtime_details();
                details["error"] = JsonValue::String(reason.clone());
                self.logger.log(
                    LogLevel::Fatal,
                    &format!("Could not gracefully shut down service {}", self.service.name),
                    Some(&details),
                );
            }
            ShutdownOutcome::AlreadyInProgress => {}
        }

        if let Err(e) = self.logger.flush() {
            warn!("Failed to flush logger output: {}", e);
        }

        outcome
    }

    /// Wait for SIGINT or SIGTERM, then shut down
    pub async fn listen_for_termination(&self) -> ShutdownOutcome {
        if let Err(e) = wait_for_termination_signal().await {
            warn!("Failed to listen for termination signals: {}", e);
        }
        self.shutdown().await
    }

    async fn close_all(&self) -> anyhow::Result<()> {
        self.task_scheduler
            .close_queues()
            .await
            .context("Failed to close task queues")?;
        self.task_scheduler
            .close_workers()
            .await
            .context("Failed to close task workers")?;
        self.task_scheduler
            .close_connections()
            .await
            .context("Failed to close task scheduler connections")?;
        self.logger.debug("Task scheduling shut down");

        self.http_server
            .terminate(self.config.http_termination_timeout)
            .await
            .context("Failed to terminate HTTP server")?;
        self.logger.debug("HTTP server shut down");

        self.database
            .end()
            .await
            .context("Failed to end database pool")?;
        self.logger.debug("Database shut down");

        self.cache.quit().await.context("Failed to quit cache")?;
        self.logger.debug("Cache shut down");

        self.telemetry
            .shutdown()
            .await
            .context("Failed to shut down telemetry")?;
        self.logger.debug("Telemetry shut down");

        Ok(())
    }

    fn runtime_details(&self) -> JsonValue {
        json!({
            "version": self.service.version,
            "arch": std::env::consts::ARCH,
            "platform": std::env::consts::OS,
        })
    }
}

/// Resolve when the process receives SIGINT (Ctrl-C) or SIGTERM
#[cfg(unix)]
pub async fn wait_for_termination_signal() -> std::io::Result<()> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut terminate = signal(SignalKind::terminate())?;
    tokio::select! {
        result = tokio::signal::ctrl_c() => result,
        _ = terminate.recv() => Ok(()),
    }
}

/// Resolve when the process receives Ctrl-C
#[cfg(not(unix))]
pub async fn wait_for_termination_signal() -> std::io::Result<()> {
    tokio::signal::ctrl_c().await
}
