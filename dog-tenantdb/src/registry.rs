use std::sync::Arc;

use tracing::debug;

use crate::backend::ConnectionPool;
use crate::error::TenantDbResult;
use crate::types::{ConnectionConfig, TenantDescriptor};

/// Materializes tenant connection configurations in the pool under one
/// logical connection name.
///
/// A registry is a cheap handle over a shared pool; any number of
/// registries with distinct names may be live on the same pool without
/// interfering, so concurrent tenant connections are a matter of using
/// distinct names.
pub struct ConnectionRegistry<P: ConnectionPool + ?Sized> {
    pool: Arc<P>,
    name: String,
}

impl<P: ConnectionPool + ?Sized> ConnectionRegistry<P> {
    pub fn new(pool: Arc<P>, name: impl Into<String>) -> Self {
        Self {
            pool,
            name: name.into(),
        }
    }

    pub fn connection_name(&self) -> &str {
        &self.name
    }

    /// Register the tenant's connection configuration under this
    /// registry's name, replacing any prior configuration, and purge the
    /// cached physical connection so the next use reconnects against the
    /// new coordinates.
    ///
    /// Idempotent: a second call with a different descriptor simply
    /// replaces. A failure here leaves the pool state unchanged.
    pub async fn configure(&self, tenant: &dyn TenantDescriptor) -> TenantDbResult<()> {
        let config = ConnectionConfig::from_descriptor(tenant)?;

        self.pool.set_config(&self.name, config).await?;
        self.pool.purge(&self.name).await?;

        debug!(
            connection = %self.name,
            tenant = %tenant.tenant_key(),
            "configured tenant connection"
        );
        Ok(())
    }

    /// Purge the cached physical connection and remove the configuration
    /// entirely. No-op when nothing is configured.
    pub async fn remove(&self) -> TenantDbResult<()> {
        self.pool.purge(&self.name).await?;
        self.pool.remove_config(&self.name).await?;

        debug!(connection = %self.name, "removed tenant connection");
        Ok(())
    }

    /// Whether a configuration is currently registered under this name
    pub async fn is_configured(&self) -> bool {
        self.pool.config(&self.name).await.is_some()
    }
}

impl<P: ConnectionPool + ?Sized> Clone for ConnectionRegistry<P> {
    fn clone(&self) -> Self {
        Self {
            pool: self.pool.clone(),
            name: self.name.clone(),
        }
    }
}
