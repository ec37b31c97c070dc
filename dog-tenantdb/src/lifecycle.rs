//! Tenant database creation and teardown.
//!
//! Statements run on the fixed central connection, never the tenant
//! connection: when creating, the tenant's own database does not exist
//! yet. File-backed drivers bypass the pool entirely and touch the
//! filesystem.

use tracing::info;

use crate::backend::ConnectionPool;
use crate::error::TenantDbResult;
use crate::types::{DriverKind, TenantDescriptor};

/// Create the tenant's database.
///
/// Driver dispatch happens before anything else; an unrecognized driver
/// string fails without executing a statement. Single statement, no retry.
pub async fn create_database<P>(
    pool: &P,
    central_connection: &str,
    tenant: &dyn TenantDescriptor,
) -> TenantDbResult<()>
where
    P: ConnectionPool + ?Sized,
{
    let driver: DriverKind = tenant.driver().parse()?;
    let database = tenant.database();

    if driver.is_file_based() {
        touch(database).await?;
    } else if let Some(sql) = driver.dialect().create_database_sql(database) {
        pool.execute(central_connection, &sql).await?;
    }

    info!(
        tenant = %tenant.tenant_key(),
        database = %database,
        driver = %driver,
        "created tenant database"
    );
    Ok(())
}

/// Drop the tenant's database. Single statement, no retry.
pub async fn drop_database<P>(
    pool: &P,
    central_connection: &str,
    tenant: &dyn TenantDescriptor,
) -> TenantDbResult<()>
where
    P: ConnectionPool + ?Sized,
{
    let driver: DriverKind = tenant.driver().parse()?;
    let database = tenant.database();

    if driver.is_file_based() {
        remove_file_if_exists(database).await?;
    } else if let Some(sql) = driver.dialect().drop_database_sql(database) {
        pool.execute(central_connection, &sql).await?;
    }

    info!(
        tenant = %tenant.tenant_key(),
        database = %database,
        driver = %driver,
        "dropped tenant database"
    );
    Ok(())
}

/// Create the file if missing; existing contents are left alone.
async fn touch(path: &str) -> TenantDbResult<()> {
    tokio::fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(false)
        .open(path)
        .await?;
    Ok(())
}

/// Mirror of `DROP DATABASE IF EXISTS`: a missing file is not an error.
async fn remove_file_if_exists(path: &str) -> TenantDbResult<()> {
    match tokio::fs::remove_file(path).await {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(err) => Err(err.into()),
    }
}

#[cfg(all(test, feature = "memory"))]
mod tests {
    use super::*;
    use crate::backend::memory::MemoryPool;
    use crate::error::TenantDbError;
    use crate::types::{ConnectionConfig, StaticTenant};

    async fn pool_with_central() -> MemoryPool {
        let pool = MemoryPool::new();
        let central = StaticTenant::new("central", "mysql", "app");
        pool.set_config("central", ConnectionConfig::from_descriptor(&central).unwrap())
            .await
            .unwrap();
        pool
    }

    #[tokio::test]
    async fn test_create_issues_ddl_on_central() {
        let pool = pool_with_central().await;
        let tenant = StaticTenant::new("1", "mysql", "tenant_1_acme_2024");

        create_database(&pool, "central", &tenant).await.unwrap();

        let statements = pool.statements("app");
        assert_eq!(statements.len(), 1);
        assert!(statements[0].starts_with("CREATE DATABASE IF NOT EXISTS `tenant_1_acme_2024`"));
    }

    #[tokio::test]
    async fn test_drop_issues_ddl_on_central() {
        let pool = pool_with_central().await;
        let tenant = StaticTenant::new("1", "pgsql", "tenant_1_acme_2024");

        drop_database(&pool, "central", &tenant).await.unwrap();

        let statements = pool.statements("app");
        assert_eq!(
            statements,
            vec!["DROP DATABASE IF EXISTS \"tenant_1_acme_2024\"".to_string()]
        );
    }

    #[tokio::test]
    async fn test_unsupported_driver_executes_nothing() {
        let pool = pool_with_central().await;
        let tenant = StaticTenant::new("1", "oracle", "tenant_1");

        let err = create_database(&pool, "central", &tenant).await.unwrap_err();

        assert!(matches!(err, TenantDbError::UnsupportedDriver(ref name) if name == "oracle"));
        assert_eq!(pool.total_statements(), 0);
    }

    #[tokio::test]
    async fn test_sqlite_create_and_drop_touch_the_file() {
        let pool = MemoryPool::new();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tenant_1.db");
        let tenant = StaticTenant::new("1", "sqlite", path.display().to_string());

        create_database(&pool, "central", &tenant).await.unwrap();
        assert!(path.exists());
        // No statement goes through the pool for a file driver.
        assert_eq!(pool.total_statements(), 0);

        drop_database(&pool, "central", &tenant).await.unwrap();
        assert!(!path.exists());

        // Dropping again mirrors IF EXISTS semantics.
        drop_database(&pool, "central", &tenant).await.unwrap();
    }
}
