use crate::types::descriptor::TenantDescriptor;

/// Snapshot of the currently connected tenant
///
/// Captured from the descriptor at connect time and held by the context
/// holder. Equality is over identity fields; credentials are not captured,
/// since the snapshot is held long-lived and appears in logs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveTenant {
    pub tenant_key: String,
    pub driver: String,
    pub host: String,
    pub port: u16,
    pub database: String,
}

impl ActiveTenant {
    pub fn of(tenant: &dyn TenantDescriptor) -> Self {
        Self {
            tenant_key: tenant.tenant_key(),
            driver: tenant.driver().to_string(),
            host: tenant.host().to_string(),
            port: tenant.port(),
            database: tenant.database().to_string(),
        }
    }
}
