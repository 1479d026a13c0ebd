//! Bounded waits

use std::future::Future;
use std::time::Duration;
use thiserror::Error;

/// A wait that exceeded its budget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Operation timed out after {0:?}")]
pub struct TimeoutError(pub Duration);

/// Await `future` for at most `limit`
///
/// The future is dropped (and so cancelled) when the limit elapses.
pub async fn with_timeout<F>(limit: Duration, future: F) -> Result<F::Output, TimeoutError>
where
    F: Future,
{
    tokio::time::timeout(limit, future)
        .await
        .map_err(|_| TimeoutError(limit))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_resolves_in_time() {
        let result = with_timeout(Duration::from_millis(20), async { 42 }).await;
        assert_eq!(result, Ok(42));
    }

    #[tokio::test(start_paused = true)]
    async fn test_times_out() {
        let result = with_timeout(Duration::from_millis(20), async {
            tokio::time::sleep(Duration::from_secs(1)).await;
        })
        .await;

        let err = result.unwrap_err();
        assert_eq!(err, TimeoutError(Duration::from_millis(20)));
        assert_eq!(err.to_string(), "Operation timed out after 20ms");
    }
}
