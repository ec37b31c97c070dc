use thiserror::Error;

/// Result type for tenant database operations
pub type TenantDbResult<T> = Result<T, TenantDbError>;

/// Infrastructure errors for tenant database routing
#[derive(Error, Debug, Clone)]
pub enum TenantDbError {
    #[error("Unsupported database driver: {0}")]
    UnsupportedDriver(String),

    #[error("Tenant not found: {0}")]
    TenantNotFound(String),

    #[error("Invalid tenant selection: specify exactly one of a tenant id or all tenants")]
    InvalidSelection,

    #[error("Migration failed for tenant {tenant}: {cause}")]
    MigrationFailure { tenant: String, cause: String },

    #[error("No tenant is currently connected")]
    NoActiveTenant,

    #[error("No connection configured under name: {0}")]
    ConnectionNotConfigured(String),

    #[error("Pool does not support operation: {0}")]
    PoolUnsupported(String),

    #[error("Pool error: {0}")]
    Pool(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl TenantDbError {
    /// Wrap a per-tenant failure with the offending tenant's identity
    pub fn migration_failure(tenant: impl Into<String>, cause: impl std::fmt::Display) -> Self {
        Self::MigrationFailure {
            tenant: tenant.into(),
            cause: cause.to_string(),
        }
    }
}

impl From<std::io::Error> for TenantDbError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for TenantDbError {
    fn from(err: sqlx::Error) -> Self {
        Self::Pool(err.to_string())
    }
}
