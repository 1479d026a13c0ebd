//! Graceful shutdown configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::ConfigResult;
use crate::validation::{validate_positive_duration, Validatable};

/// Time budgets for stopping the service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShutdownConfig {
    /// Upper bound for the whole shutdown sequence
    #[serde(with = "humantime_serde")]
    pub graceful_timeout: Duration,

    /// Grace period handed to the HTTP server for in-flight requests
    #[serde(with = "humantime_serde")]
    pub http_termination_timeout: Duration,
}

impl Default for ShutdownConfig {
    fn default() -> Self {
        Self {
            graceful_timeout: Duration::from_secs(20),
            http_termination_timeout: Duration::from_secs(10),
        }
    }
}

impl Validatable for ShutdownConfig {
    fn validate(&self) -> ConfigResult<()> {
        validate_positive_duration(self.graceful_timeout, "graceful_timeout", self.domain_name())?;
        validate_positive_duration(
            self.http_termination_timeout,
            "http_termination_timeout",
            self.domain_name(),
        )?;

        if self.http_termination_timeout > self.graceful_timeout {
            return Err(self.validation_error(
                "http_termination_timeout cannot exceed graceful_timeout",
            ));
        }

        Ok(())
    }

    fn domain_name(&self) -> &'static str {
        "shutdown"
    }
}
