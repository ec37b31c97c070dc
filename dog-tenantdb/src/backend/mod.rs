#[cfg(feature = "memory")]
pub mod memory;

#[cfg(feature = "sqlx")]
pub mod sqlx_any;

use async_trait::async_trait;

use crate::error::TenantDbResult;
use crate::types::ConnectionConfig;

/// Capabilities advertised by a pool backend
#[derive(Debug, Clone, Copy, Default)]
pub struct PoolCapabilities {
    /// Whether `fetch_strings` can answer read queries
    pub supports_queries: bool,
}

/// Pooled-connection table keyed by logical connection name.
///
/// The externally supplied collaborator the registry mutates: named
/// configurations, cached physical connections opened lazily on first use,
/// and statement execution against a named connection.
#[async_trait]
pub trait ConnectionPool: Send + Sync {
    /// Register (or replace) the configuration under `name`.
    ///
    /// Replacing a configuration does not disturb a cached physical
    /// connection; callers that want the next use to hit the new
    /// coordinates must `purge` as well.
    async fn set_config(&self, name: &str, config: ConnectionConfig) -> TenantDbResult<()>;

    /// Remove the configuration under `name`, returning it to an
    /// unconfigured state. No-op when absent.
    async fn remove_config(&self, name: &str) -> TenantDbResult<()>;

    /// Read back the configuration under `name`
    async fn config(&self, name: &str) -> Option<ConnectionConfig>;

    /// Close and drop the cached physical connection under `name`.
    /// No-op when nothing is cached.
    async fn purge(&self, name: &str) -> TenantDbResult<()>;

    /// Execute a statement on `name`, lazily opening the physical
    /// connection on first use. Fails with `ConnectionNotConfigured` when
    /// no configuration is registered under `name`.
    async fn execute(&self, name: &str, sql: &str) -> TenantDbResult<u64>;

    /// Fetch the first column of each result row as text.
    ///
    /// Backends without query support fail with `PoolUnsupported`; check
    /// `capabilities` first.
    async fn fetch_strings(&self, name: &str, sql: &str) -> TenantDbResult<Vec<String>>;

    fn capabilities(&self) -> PoolCapabilities;
}
