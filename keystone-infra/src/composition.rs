//! Composition root
//!
//! Collaborators are registered in dependency order: the logger factory
//! first, then telemetry (which logs), then the date provider. Data-layer
//! singletons and servers are added by the service on top of this base.

use std::sync::Arc;

use keystone_config::KeystoneConfig;
use keystone_core::DependencyRegistry;
use keystone_logging::{LoggerFactory, TracingLoggerFactory};
use tracing::debug;

use crate::date::{DateProvider, SystemDateProvider};
use crate::keys::{DateProviderKey, LoggerFactoryKey, TelemetryKey};
use crate::telemetry::{Telemetry, TracingTelemetry};

/// Build a registry holding the logger factory, telemetry and date provider
pub fn create_base_registry(config: &KeystoneConfig) -> DependencyRegistry {
    let logger_factory: Arc<dyn LoggerFactory> =
        Arc::new(TracingLoggerFactory::from_config(&config.logging));
    let telemetry: Arc<dyn Telemetry> = Arc::new(TracingTelemetry::new(
        config.service.name.clone(),
        config.service.version.clone(),
    ));
    let date: Arc<dyn DateProvider> = Arc::new(SystemDateProvider);

    let registry = DependencyRegistry::builder()
        .provide::<LoggerFactoryKey>(logger_factory)
        .provide::<TelemetryKey>(telemetry)
        .provide::<DateProviderKey>(date)
        .build();

    debug!(service = %config.service.name, keys = ?registry.registered_keys(), "Base registry created");
    registry
}
