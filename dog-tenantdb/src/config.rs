use std::path::PathBuf;

/// Static configuration for tenant database routing
///
/// Read once at construction; the adapter and migrator treat it as
/// immutable thereafter.
#[derive(Debug, Clone)]
pub struct TenantDbConfig {
    /// Connection name used for administrative work (tenant lookups,
    /// creating and dropping tenant databases)
    pub central_connection: String,
    /// Logical name the active tenant's connection is registered under
    pub tenant_connection: String,
    /// Prefix for generated tenant database names
    pub database_prefix: String,
    /// Directory holding tenant migration scripts
    pub migrations_path: PathBuf,
}

impl Default for TenantDbConfig {
    fn default() -> Self {
        Self {
            central_connection: "central".to_string(),
            tenant_connection: "tenant".to_string(),
            database_prefix: "tenant_".to_string(),
            migrations_path: PathBuf::from("migrations/tenants"),
        }
    }
}
