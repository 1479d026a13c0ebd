//! Shutdown contracts for the wrapped infrastructure systems
//!
//! Keystone never talks to Redis, Postgres or an HTTP listener itself. The
//! services that own those clients register an implementation of the
//! matching trait so the shutdown manager can close them.

use async_trait::async_trait;
use std::time::Duration;

/// Job queue with its workers and their dedicated connections
#[async_trait]
pub trait TaskScheduler: Send + Sync {
    async fn close_queues(&self) -> anyhow::Result<()>;

    async fn close_workers(&self) -> anyhow::Result<()>;

    async fn close_connections(&self) -> anyhow::Result<()>;
}

#[async_trait]
pub trait HttpServer: Send + Sync {
    /// Stop accepting connections and give in-flight requests up to `grace` to finish
    async fn terminate(&self, grace: Duration) -> anyhow::Result<()>;
}

#[async_trait]
pub trait DatabasePool: Send + Sync {
    async fn end(&self) -> anyhow::Result<()>;
}

#[async_trait]
pub trait CacheClient: Send + Sync {
    async fn quit(&self) -> anyhow::Result<()>;
}
