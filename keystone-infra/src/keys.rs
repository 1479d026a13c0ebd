//! Default registry keys
//!
//! Services add their own keys with [`keystone_core::service_key!`]; a new
//! key type can never shadow one of these.

use std::sync::Arc;

use keystone_core::service_key;
use keystone_logging::LoggerFactory;

use crate::date::DateProvider;
use crate::handles::{CacheClient, DatabasePool, HttpServer, TaskScheduler};
use crate::telemetry::Telemetry;

service_key!(pub LoggerFactoryKey => Arc<dyn LoggerFactory>, "logger");
service_key!(pub TelemetryKey => Arc<dyn Telemetry>, "telemetry");
service_key!(pub DateProviderKey => Arc<dyn DateProvider>, "date");
service_key!(pub CacheKey => Arc<dyn CacheClient>, "cache");
service_key!(pub DatabaseKey => Arc<dyn DatabasePool>, "database");
service_key!(pub TaskSchedulerKey => Arc<dyn TaskScheduler>, "task_scheduling");
service_key!(pub HttpServerKey => Arc<dyn HttpServer>, "http_server");
