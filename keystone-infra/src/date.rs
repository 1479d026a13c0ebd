//! Clock access behind a trait so time can be pinned in tests

use chrono::{DateTime, Utc};
use std::fmt;

pub trait DateProvider: Send + Sync + fmt::Debug {
    /// Milliseconds since the Unix epoch
    fn now_as_millis(&self) -> i64;

    fn now_as_date(&self) -> DateTime<Utc>;
}

/// Reads the system clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemDateProvider;

impl DateProvider for SystemDateProvider {
    fn now_as_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }

    fn now_as_date(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Always reports the same instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedDateProvider(pub DateTime<Utc>);

impl DateProvider for FixedDateProvider {
    fn now_as_millis(&self) -> i64 {
        self.0.timestamp_millis()
    }

    fn now_as_date(&self) -> DateTime<Utc> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_date_provider_is_current() {
        let before = Utc::now().timestamp_millis();
        let now = SystemDateProvider.now_as_millis();
        let after = Utc::now().timestamp_millis();
        assert!(before <= now && now <= after);
    }

    #[test]
    fn test_fixed_date_provider() {
        let instant = DateTime::parse_from_rfc3339("2021-01-01T00:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let provider = FixedDateProvider(instant);

        assert_eq!(provider.now_as_millis(), 1_609_459_200_000);
        assert_eq!(provider.now_as_date(), instant);
    }
}
