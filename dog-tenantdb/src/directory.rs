use std::sync::Arc;

use async_trait::async_trait;

use crate::error::{TenantDbError, TenantDbResult};
use crate::types::TenantDescriptor;

/// Host-owned lookup of tenant descriptors.
///
/// How tenants are stored is entirely the host's concern; the bulk
/// migrator only needs to resolve one tenant by id or enumerate them all.
#[async_trait]
pub trait TenantDirectory: Send + Sync {
    /// Resolve one tenant; missing ids fail with `TenantNotFound`
    async fn find_by_id(&self, id: &str) -> TenantDbResult<Arc<dyn TenantDescriptor>>;

    async fn list_all(&self) -> TenantDbResult<Vec<Arc<dyn TenantDescriptor>>>;
}

/// Fixed in-memory directory for tests and simple deployments
#[derive(Default)]
pub struct StaticDirectory {
    tenants: Vec<Arc<dyn TenantDescriptor>>,
}

impl StaticDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, tenant: Arc<dyn TenantDescriptor>) -> Self {
        self.tenants.push(tenant);
        self
    }
}

#[async_trait]
impl TenantDirectory for StaticDirectory {
    async fn find_by_id(&self, id: &str) -> TenantDbResult<Arc<dyn TenantDescriptor>> {
        self.tenants
            .iter()
            .find(|tenant| tenant.tenant_key() == id)
            .cloned()
            .ok_or_else(|| TenantDbError::TenantNotFound(id.to_string()))
    }

    async fn list_all(&self) -> TenantDbResult<Vec<Arc<dyn TenantDescriptor>>> {
        Ok(self.tenants.clone())
    }
}
