use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::backend::{ConnectionPool, PoolCapabilities};
use crate::error::{TenantDbError, TenantDbResult};
use crate::types::ConnectionConfig;

/// A cached "physical" connection: remembers which database it was opened
/// against, independent of later config changes.
#[derive(Debug, Clone)]
struct LiveConnection {
    database: String,
}

/// In-memory pool backend for testing and development.
///
/// Models the behavior that matters for connection switching: a
/// named-config table, lazily opened cached connections, and the
/// stale-handle property of a real pool: a cached connection keeps
/// pointing at the database it was opened against until purged, even if
/// the configuration under its name has been replaced. Statements are
/// recorded per database so tests can assert where writes landed.
#[derive(Debug, Clone, Default)]
pub struct MemoryPool {
    configs: Arc<RwLock<HashMap<String, ConnectionConfig>>>,
    live: Arc<RwLock<HashMap<String, LiveConnection>>>,
    databases: Arc<RwLock<HashMap<String, Vec<String>>>>,
    opened: Arc<AtomicU64>,
}

impl MemoryPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Statements executed against `database`, in order
    pub fn statements(&self, database: &str) -> Vec<String> {
        self.databases
            .read()
            .get(database)
            .cloned()
            .unwrap_or_default()
    }

    /// Total statements executed across all databases
    pub fn total_statements(&self) -> usize {
        self.databases.read().values().map(Vec::len).sum()
    }

    /// How many physical connections have been opened so far
    pub fn open_count(&self) -> u64 {
        self.opened.load(Ordering::SeqCst)
    }

    /// The database the cached connection under `name` currently points
    /// at, if one is open
    pub fn live_database(&self, name: &str) -> Option<String> {
        self.live.read().get(name).map(|conn| conn.database.clone())
    }
}

#[async_trait]
impl ConnectionPool for MemoryPool {
    async fn set_config(&self, name: &str, config: ConnectionConfig) -> TenantDbResult<()> {
        self.configs.write().insert(name.to_string(), config);
        Ok(())
    }

    async fn remove_config(&self, name: &str) -> TenantDbResult<()> {
        self.configs.write().remove(name);
        Ok(())
    }

    async fn config(&self, name: &str) -> Option<ConnectionConfig> {
        self.configs.read().get(name).cloned()
    }

    async fn purge(&self, name: &str) -> TenantDbResult<()> {
        self.live.write().remove(name);
        Ok(())
    }

    async fn execute(&self, name: &str, sql: &str) -> TenantDbResult<u64> {
        let config = self
            .configs
            .read()
            .get(name)
            .cloned()
            .ok_or_else(|| TenantDbError::ConnectionNotConfigured(name.to_string()))?;

        let database = {
            let mut live = self.live.write();
            let cached = live.get(name).map(|conn| conn.database.clone());
            match cached {
                Some(database) => database,
                None => {
                    self.opened.fetch_add(1, Ordering::SeqCst);
                    live.insert(
                        name.to_string(),
                        LiveConnection {
                            database: config.database.clone(),
                        },
                    );
                    config.database
                }
            }
        };

        self.databases
            .write()
            .entry(database)
            .or_default()
            .push(sql.to_string());

        Ok(0)
    }

    async fn fetch_strings(&self, _name: &str, _sql: &str) -> TenantDbResult<Vec<String>> {
        Err(TenantDbError::PoolUnsupported(
            "query execution".to_string(),
        ))
    }

    fn capabilities(&self) -> PoolCapabilities {
        PoolCapabilities {
            supports_queries: false,
        }
    }
}
