//! # dog-tenantdb: Multi-Tenant Database Routing
//!
//! **Route database operations to a different physical database per
//! tenant, selected at runtime.**
//!
//! dog-tenantdb is the DogRS take on tenant-per-database isolation:
//! a pooled-connection table keyed by logical connection name, a
//! connection registry that swaps which database a name points at, and an
//! explicit context slot recording the active tenant for a unit of work.
//!
//! ## Design
//!
//! - **Capability descriptors**: any host type exposing database
//!   coordinates can be routed to; no forced tenant struct
//! - **Purge-and-reconnect switching**: replacing a tenant's connection
//!   configuration discards the cached physical connection, so the next
//!   use can never hit a stale database
//! - **Explicit context, no globals**: request scopes own their adapter
//!   and context slot; sharing one slot process-wide is an explicit,
//!   lock-protected opt-in
//! - **N concurrent tenant connections**: the pool is name-keyed, so
//!   distinct logical names serve distinct tenants side by side
//! - **Partial-failure-tolerant bulk migrations**: one broken tenant
//!   never halts the rest of the fleet
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use dog_tenantdb::{
//!     ConnectionPool, MemoryPool, StaticTenant, TenantDbAdapter, TenantDbConfig,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), dog_tenantdb::TenantDbError> {
//!     let pool = Arc::new(MemoryPool::new());
//!     let adapter = TenantDbAdapter::new(pool.clone(), TenantDbConfig::default());
//!
//!     let tenant = StaticTenant::new("42", "mysql", "tenant_42_acme_2026")
//!         .with_host("db.internal")
//!         .with_credentials("acme", "secret");
//!
//!     adapter.connect(&tenant).await?;
//!
//!     // Statements against the logical "tenant" connection now hit
//!     // tenant 42's database.
//!     pool.execute("tenant", "INSERT INTO orders (item) VALUES ('laptop')").await?;
//!
//!     adapter.disconnect().await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Feature flags
//!
//! - `memory` (default): in-memory pool backend for tests and development
//! - `sqlx`: real pool backend over the sqlx `Any` driver

pub mod adapter;
pub mod backend;
pub mod config;
pub mod context;
pub mod directory;
pub mod error;
pub mod lifecycle;
pub mod migrate;
pub mod naming;
pub mod registry;
pub mod types;

pub use adapter::TenantDbAdapter;
pub use backend::{ConnectionPool, PoolCapabilities};
pub use config::TenantDbConfig;
pub use context::ContextHolder;
pub use directory::{StaticDirectory, TenantDirectory};
pub use error::{TenantDbError, TenantDbResult};
pub use migrate::{
    MigrationBatch, MigrationReport, MigrationRunner, SqlScriptRunner, TenantMigrationOutcome,
    TenantMigrator, TenantSelection,
};
pub use naming::generate_database_name;
pub use registry::ConnectionRegistry;
pub use types::{ActiveTenant, ConnectionConfig, DriverKind, StaticTenant, TenantDescriptor};

// Backend implementations
#[cfg(feature = "memory")]
pub use backend::memory::MemoryPool;

#[cfg(feature = "sqlx")]
pub use backend::sqlx_any::SqlxPool;

/// Prelude for tenant database routing
pub mod prelude {
    pub use crate::{
        ConnectionPool, ConnectionRegistry, ContextHolder, TenantDbAdapter, TenantDbConfig,
    };

    pub use crate::{
        ActiveTenant, ConnectionConfig, DriverKind, StaticTenant, TenantDbError, TenantDbResult,
        TenantDescriptor,
    };

    pub use crate::{
        MigrationRunner, TenantDirectory, TenantMigrator, TenantSelection,
    };

    #[cfg(feature = "memory")]
    pub use crate::MemoryPool;

    // Essential traits
    pub use async_trait::async_trait;
}
