use serde::{Deserialize, Serialize};

use crate::error::TenantDbResult;
use crate::types::descriptor::TenantDescriptor;
use crate::types::driver::DriverKind;

/// Ephemeral connection configuration for one tenant
///
/// Built fresh from a descriptor on every connect call; lives only inside
/// the pool's named-config table until replaced or removed. Never
/// persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionConfig {
    pub driver: DriverKind,
    pub host: String,
    pub port: u16,
    pub database: String,
    pub username: String,
    pub password: String,
    pub charset: Option<String>,
    pub collation: Option<String>,
}

impl ConnectionConfig {
    /// Derive a configuration from a tenant descriptor.
    ///
    /// The descriptor's driver string is parsed against the closed driver
    /// enumeration; charset and collation come from the driver's dialect
    /// defaults.
    pub fn from_descriptor(tenant: &dyn TenantDescriptor) -> TenantDbResult<Self> {
        let driver: DriverKind = tenant.driver().parse()?;
        let dialect = driver.dialect();

        Ok(Self {
            driver,
            host: tenant.host().to_string(),
            port: tenant.port(),
            database: tenant.database().to_string(),
            username: tenant.username().to_string(),
            password: tenant.password().to_string(),
            charset: dialect.default_charset.map(str::to_string),
            collation: dialect.default_collation.map(str::to_string),
        })
    }
}
