//! Domain-specific configuration modules

pub mod logging;
pub mod service;
pub mod shutdown;

use crate::error::ConfigResult;
use crate::validation::Validatable;
use serde::{Deserialize, Serialize};

/// Main Keystone configuration combining all domains
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct KeystoneConfig {
    /// Service identity
    pub service: service::ServiceConfig,

    /// Logging configuration
    pub logging: logging::LoggingConfig,

    /// Graceful shutdown budget
    pub shutdown: shutdown::ShutdownConfig,
}

impl KeystoneConfig {
    /// Validate all domain configurations
    pub fn validate_all(&self) -> ConfigResult<()> {
        self.service.validate()?;
        self.logging.validate()?;
        self.shutdown.validate()?;
        Ok(())
    }

    /// Generate a sample configuration file
    pub fn generate_sample() -> String {
        let config = KeystoneConfig::default();
        serde_yaml::to_string(&config)
            .unwrap_or_else(|_| "# Failed to generate sample config".to_string())
    }
}
