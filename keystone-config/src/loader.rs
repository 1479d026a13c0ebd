//! Configuration loading and environment variable handling

use crate::domains::logging::{LogFormat, LogLevel, LoggingConfig};
use crate::domains::service::ServiceConfig;
use crate::domains::shutdown::ShutdownConfig;
use crate::domains::KeystoneConfig;
use crate::error::{ConfigError, ConfigResult};
use keystone_core::validation::parse_duration;
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

/// Configuration loader with environment variable support
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Environment variable prefix
    prefix: String,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// Create a new config loader with the `KEYSTONE` prefix
    pub fn new() -> Self {
        Self {
            prefix: "KEYSTONE".to_string(),
        }
    }

    /// Create a new config loader with custom prefix
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Load configuration from a YAML file with environment overrides
    pub fn from_file(&self, path: impl AsRef<Path>) -> ConfigResult<KeystoneConfig> {
        let path = path.as_ref();
        debug!("Loading configuration from {}", path.display());

        let content = std::fs::read_to_string(path)?;
        let mut config: KeystoneConfig = if content.trim().is_empty() {
            KeystoneConfig::default()
        } else {
            serde_yaml::from_str(&content)?
        };

        self.apply_env_overrides(&mut config)?;
        config.validate_all()?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env(&self) -> ConfigResult<KeystoneConfig> {
        let mut config = KeystoneConfig::default();
        self.apply_env_overrides(&mut config)?;
        config.validate_all()?;
        Ok(config)
    }

    /// Load from `config_path` when given, otherwise from the environment
    pub fn load(&self, config_path: Option<impl AsRef<Path>>) -> ConfigResult<KeystoneConfig> {
        match config_path {
            Some(path) => self.from_file(path),
            None => self.from_env(),
        }
    }

    /// Apply environment variable overrides to configuration
    fn apply_env_overrides(&self, config: &mut KeystoneConfig) -> ConfigResult<()> {
        self.apply_service_overrides(&mut config.service);
        self.apply_logging_overrides(&mut config.logging)?;
        self.apply_shutdown_overrides(&mut config.shutdown)?;
        Ok(())
    }

    fn apply_service_overrides(&self, config: &mut ServiceConfig) {
        if let Some(name) = self.get_env_var("SERVICE_NAME") {
            config.name = name;
        }

        if let Some(version) = self.get_env_var("SERVICE_VERSION") {
            config.version = version;
        }
    }

    fn apply_logging_overrides(&self, config: &mut LoggingConfig) -> ConfigResult<()> {
        if let Some(level) = self.get_env_var("LOG_LEVEL") {
            config.level = LogLevel::from_str(&level)
                .map_err(|_| ConfigError::invalid_env(&self.env_name("LOG_LEVEL"), &level))?;
        }

        if let Some(format) = self.get_env_var("LOG_FORMAT") {
            config.format = LogFormat::from_str(&format)
                .map_err(|_| ConfigError::invalid_env(&self.env_name("LOG_FORMAT"), &format))?;
        }

        Ok(())
    }

    fn apply_shutdown_overrides(&self, config: &mut ShutdownConfig) -> ConfigResult<()> {
        if let Some(timeout) = self.get_env_var("SHUTDOWN_TIMEOUT") {
            config.graceful_timeout = parse_duration(&timeout)
                .ok_or_else(|| ConfigError::invalid_env(&self.env_name("SHUTDOWN_TIMEOUT"), &timeout))?;
        }

        Ok(())
    }

    fn env_name(&self, name: &str) -> String {
        format!("{}_{}", self.prefix, name)
    }

    /// Read `{prefix}_{name}`; unset and non-unicode variables are both absent
    fn get_env_var(&self, name: &str) -> Option<String> {
        std::env::var(self.env_name(name)).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_env_name_uses_prefix() {
        assert_eq!(ConfigLoader::new().env_name("LOG_LEVEL"), "KEYSTONE_LOG_LEVEL");
        assert_eq!(ConfigLoader::with_prefix("APP").env_name("LOG_LEVEL"), "APP_LOG_LEVEL");
    }

    #[test]
    fn test_from_file_with_empty_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        temp_env::with_vars_unset(["KEYSTONE_SHUTDOWN_TIMEOUT", "KEYSTONE_LOG_LEVEL"], || {
            let config = ConfigLoader::new().from_file(file.path()).unwrap();
            assert_eq!(config.shutdown.graceful_timeout, Duration::from_secs(20));
        });
    }

    #[test]
    fn test_missing_file() {
        let result = ConfigLoader::new().from_file("/nonexistent/keystone.yaml");
        assert!(matches!(result, Err(ConfigError::FileReadError(_))));
    }
}
