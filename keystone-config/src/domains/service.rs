//! Service identity configuration

use serde::{Deserialize, Serialize};

use crate::error::ConfigResult;
use crate::validation::{validate_required_string, Validatable};

/// Name and version reported by loggers and telemetry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub name: String,
    pub version: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: "keystone".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

impl Validatable for ServiceConfig {
    fn validate(&self) -> ConfigResult<()> {
        validate_required_string(&self.name, "name", self.domain_name())?;
        validate_required_string(&self.version, "version", self.domain_name())?;
        Ok(())
    }

    fn domain_name(&self) -> &'static str {
        "service"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_validation() {
        let mut config = ServiceConfig::default();
        assert!(config.validate().is_ok());

        config.name.clear();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("in service: name cannot be empty"));
    }
}
