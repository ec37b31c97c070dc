use std::sync::Arc;

use tracing::{info, instrument};

use crate::backend::ConnectionPool;
use crate::config::TenantDbConfig;
use crate::context::ContextHolder;
use crate::error::{TenantDbError, TenantDbResult};
use crate::lifecycle;
use crate::naming;
use crate::registry::ConnectionRegistry;
use crate::types::{ActiveTenant, TenantDescriptor};

/// Session façade for tenant database routing.
///
/// Composes a [`ConnectionRegistry`] and a [`ContextHolder`] under the
/// two-step connect/disconnect protocol. Both collaborators are explicit:
/// the pool is injected, the context holder is owned by the adapter (and
/// shareable on request), and there is no ambient lookup anywhere.
///
/// By default every adapter owns a fresh context holder and binds the
/// configured logical connection name; giving each request scope its own
/// adapter is the request-scoped design. Cloning an adapter (or passing a
/// shared holder via [`with_context`](Self::with_context)) shares the slot
/// and the name: the process-wide single-slot design, valid only under
/// one-request-at-a-time execution.
pub struct TenantDbAdapter<P: ConnectionPool + ?Sized> {
    pool: Arc<P>,
    registry: ConnectionRegistry<P>,
    context: ContextHolder,
    config: TenantDbConfig,
}

impl<P: ConnectionPool + ?Sized> TenantDbAdapter<P> {
    pub fn new(pool: Arc<P>, config: TenantDbConfig) -> Self {
        let registry = ConnectionRegistry::new(pool.clone(), config.tenant_connection.clone());

        Self {
            pool,
            registry,
            context: ContextHolder::new(),
            config,
        }
    }

    /// Share a context holder with other adapters (process-wide slot)
    pub fn with_context(mut self, context: ContextHolder) -> Self {
        self.context = context;
        self
    }

    /// Bind a different logical connection name than the configured
    /// default, so several adapters can serve distinct tenants on one pool
    pub fn with_connection_name(mut self, name: impl Into<String>) -> Self {
        self.registry = ConnectionRegistry::new(self.pool.clone(), name);
        self
    }

    pub fn config(&self) -> &TenantDbConfig {
        &self.config
    }

    pub fn connection_name(&self) -> &str {
        self.registry.connection_name()
    }

    pub fn context(&self) -> &ContextHolder {
        &self.context
    }

    /// Connect to a tenant: wire the connection, then record the context.
    ///
    /// The order is load-bearing: a failure while configuring the
    /// connection must leave the context unset, so callers never observe
    /// an active tenant whose connection is broken.
    #[instrument(skip(self, tenant), fields(tenant = %tenant.tenant_key()))]
    pub async fn connect(&self, tenant: &dyn TenantDescriptor) -> TenantDbResult<()> {
        self.registry.configure(tenant).await?;
        self.context.set(ActiveTenant::of(tenant));

        info!(connection = %self.registry.connection_name(), "tenant connected");
        Ok(())
    }

    /// Disconnect from the current tenant. Symmetric teardown; tolerant
    /// of being called when already disconnected.
    #[instrument(skip(self))]
    pub async fn disconnect(&self) -> TenantDbResult<()> {
        self.registry.remove().await?;
        self.context.clear();

        info!(connection = %self.registry.connection_name(), "tenant disconnected");
        Ok(())
    }

    /// The currently active tenant, if any
    pub fn current(&self) -> Option<ActiveTenant> {
        self.context.get()
    }

    pub fn is_connected(&self) -> bool {
        self.context.has()
    }

    /// The active tenant, or `NoActiveTenant` when none is connected.
    /// Request guards wanting to abort tenant-less requests call this.
    pub fn ensure_connected(&self) -> TenantDbResult<ActiveTenant> {
        self.context.get().ok_or(TenantDbError::NoActiveTenant)
    }

    /// Create the tenant's database on the central connection
    #[instrument(skip(self, tenant), fields(tenant = %tenant.tenant_key()))]
    pub async fn create_database(&self, tenant: &dyn TenantDescriptor) -> TenantDbResult<()> {
        lifecycle::create_database(self.pool.as_ref(), &self.config.central_connection, tenant)
            .await
    }

    /// Drop the tenant's database on the central connection
    #[instrument(skip(self, tenant), fields(tenant = %tenant.tenant_key()))]
    pub async fn drop_database(&self, tenant: &dyn TenantDescriptor) -> TenantDbResult<()> {
        lifecycle::drop_database(self.pool.as_ref(), &self.config.central_connection, tenant).await
    }

    /// Generate a database name for a tenant using the configured prefix
    pub fn generate_database_name(&self, tenant_id: &str, display_name: &str) -> String {
        naming::generate_database_name(&self.config.database_prefix, tenant_id, display_name)
    }
}

impl<P: ConnectionPool + ?Sized> Clone for TenantDbAdapter<P> {
    fn clone(&self) -> Self {
        Self {
            pool: self.pool.clone(),
            registry: self.registry.clone(),
            context: self.context.clone(),
            config: self.config.clone(),
        }
    }
}

#[cfg(all(test, feature = "memory"))]
mod tests {
    use super::*;
    use crate::backend::memory::MemoryPool;
    use crate::types::StaticTenant;

    fn adapter() -> (Arc<MemoryPool>, TenantDbAdapter<MemoryPool>) {
        let pool = Arc::new(MemoryPool::new());
        let adapter = TenantDbAdapter::new(pool.clone(), TenantDbConfig::default());
        (pool, adapter)
    }

    #[tokio::test]
    async fn test_ensure_connected() {
        let (_pool, adapter) = adapter();

        assert!(matches!(
            adapter.ensure_connected(),
            Err(TenantDbError::NoActiveTenant)
        ));

        let tenant = StaticTenant::new("1", "mysql", "tenant_1");
        adapter.connect(&tenant).await.unwrap();

        let active = adapter.ensure_connected().unwrap();
        assert_eq!(active.tenant_key, "1");
    }

    #[tokio::test]
    async fn test_generate_database_name_uses_configured_prefix() {
        let pool = Arc::new(MemoryPool::new());
        let config = TenantDbConfig {
            database_prefix: "org_".to_string(),
            ..TenantDbConfig::default()
        };
        let adapter = TenantDbAdapter::new(pool, config);

        let name = adapter.generate_database_name("8", "Acme");
        assert!(name.starts_with("org_8_acme_"));
    }

    #[tokio::test]
    async fn test_with_connection_name_binds_registry() {
        let (pool, adapter) = adapter();
        let adapter = adapter.with_connection_name("tenant_b");
        let tenant = StaticTenant::new("2", "mysql", "tenant_2");

        adapter.connect(&tenant).await.unwrap();

        assert_eq!(adapter.connection_name(), "tenant_b");
        assert!(pool.config("tenant_b").await.is_some());
        assert!(pool.config("tenant").await.is_none());
    }

    #[tokio::test]
    async fn test_clone_shares_context_and_name() {
        let (_pool, adapter) = adapter();
        let clone = adapter.clone();
        let tenant = StaticTenant::new("3", "mysql", "tenant_3");

        adapter.connect(&tenant).await.unwrap();

        assert!(clone.is_connected());
        assert_eq!(clone.current().unwrap().tenant_key, "3");
    }
}
