//! Tenant migration running.
//!
//! The migrator itself is a collaborator behind [`MigrationRunner`]; this
//! module supplies the bulk orchestration over a tenant directory
//! (configure the tenant connection, run the scripts, record the outcome,
//! keep going past individual tenant failures) plus a
//! script-file runner for pools that can answer queries.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info, instrument, warn};

use crate::backend::ConnectionPool;
use crate::config::TenantDbConfig;
use crate::directory::TenantDirectory;
use crate::error::{TenantDbError, TenantDbResult};
use crate::registry::ConnectionRegistry;
use crate::types::TenantDescriptor;

/// Result of running one migration directory against one connection
#[derive(Debug, Clone, Default)]
pub struct MigrationBatch {
    /// Migration names applied in this run, in order
    pub applied: Vec<String>,
    /// Per-file failures as `(migration, cause)`; a failing file does not
    /// stop the files after it
    pub failed: Vec<(String, String)>,
}

/// External migrator collaborator: bookkeeping plus directory runs
#[async_trait]
pub trait MigrationRunner: Send + Sync {
    /// Create the bookkeeping ledger on `connection` if missing
    async fn ensure_repository(&self, connection: &str) -> TenantDbResult<()>;

    /// Run all pending migrations under `path` against `connection`
    async fn run(&self, connection: &str, path: &Path) -> TenantDbResult<MigrationBatch>;
}

/// Which tenants a bulk migration targets
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TenantSelection {
    One(String),
    All,
}

impl TenantSelection {
    /// Build a selection from host inputs; neither or both is invalid
    pub fn from_options(id: Option<String>, all: bool) -> TenantDbResult<Self> {
        match (id, all) {
            (Some(id), false) => Ok(TenantSelection::One(id)),
            (None, true) => Ok(TenantSelection::All),
            _ => Err(TenantDbError::InvalidSelection),
        }
    }
}

/// Outcome of migrating one tenant
#[derive(Debug, Clone)]
pub struct TenantMigrationOutcome {
    pub tenant: String,
    pub database: String,
    pub result: Result<MigrationBatch, TenantDbError>,
}

/// Report for a bulk migration run
#[derive(Debug, Clone, Default)]
pub struct MigrationReport {
    pub outcomes: Vec<TenantMigrationOutcome>,
}

impl MigrationReport {
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_ok()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }

    pub fn is_clean(&self) -> bool {
        self.failed() == 0
    }
}

/// Bulk tenant migration orchestrator.
///
/// Resolves tenants through the directory, cycles the shared tenant
/// connection through each of them, and delegates the actual migration
/// work to the injected runner. A failure for one tenant is reported with
/// that tenant's identity and never halts the remaining tenants.
pub struct TenantMigrator<P: ConnectionPool + ?Sized> {
    pool: Arc<P>,
    directory: Arc<dyn TenantDirectory>,
    runner: Arc<dyn MigrationRunner>,
    config: TenantDbConfig,
}

impl<P: ConnectionPool + ?Sized> TenantMigrator<P> {
    pub fn new(
        pool: Arc<P>,
        directory: Arc<dyn TenantDirectory>,
        runner: Arc<dyn MigrationRunner>,
        config: TenantDbConfig,
    ) -> Self {
        Self {
            pool,
            directory,
            runner,
            config,
        }
    }

    #[instrument(skip(self))]
    pub async fn run(&self, selection: TenantSelection) -> TenantDbResult<MigrationReport> {
        let tenants = match &selection {
            TenantSelection::One(id) => vec![self.directory.find_by_id(id).await?],
            TenantSelection::All => self.directory.list_all().await?,
        };

        if tenants.is_empty() {
            info!("no tenants to migrate");
            return Ok(MigrationReport::default());
        }

        info!(count = tenants.len(), "starting tenant migrations");

        let registry =
            ConnectionRegistry::new(self.pool.clone(), self.config.tenant_connection.clone());
        let mut report = MigrationReport::default();

        for tenant in tenants {
            let key = tenant.tenant_key();
            let database = tenant.database().to_string();

            let result = self
                .migrate_one(&registry, tenant.as_ref())
                .await
                .map_err(|err| TenantDbError::migration_failure(&key, err));

            match &result {
                Ok(batch) => info!(
                    tenant = %key,
                    database = %database,
                    applied = batch.applied.len(),
                    "tenant migrated"
                ),
                Err(err) => error!(tenant = %key, database = %database, error = %err, "tenant migration failed"),
            }

            report.outcomes.push(TenantMigrationOutcome {
                tenant: key,
                database,
                result,
            });
        }

        // The shared tenant connection points at whichever tenant went
        // last; tear it down once the run is over.
        registry.remove().await?;

        info!(
            succeeded = report.succeeded(),
            failed = report.failed(),
            "tenant migrations completed"
        );
        Ok(report)
    }

    async fn migrate_one(
        &self,
        registry: &ConnectionRegistry<P>,
        tenant: &dyn TenantDescriptor,
    ) -> TenantDbResult<MigrationBatch> {
        registry.configure(tenant).await?;
        self.runner
            .ensure_repository(registry.connection_name())
            .await?;
        self.runner
            .run(registry.connection_name(), &self.config.migrations_path)
            .await
    }
}

/// Runs ordered `.sql` scripts through the pool, recording applied ones in
/// a ledger table so re-runs skip them.
pub struct SqlScriptRunner<P: ConnectionPool + ?Sized> {
    pool: Arc<P>,
    ledger_table: String,
}

impl<P: ConnectionPool + ?Sized> SqlScriptRunner<P> {
    pub fn new(pool: Arc<P>) -> Self {
        Self {
            pool,
            ledger_table: "dog_tenant_migrations".to_string(),
        }
    }

    pub fn with_ledger_table(mut self, table: impl Into<String>) -> Self {
        self.ledger_table = table.into();
        self
    }

    async fn applied(&self, connection: &str) -> TenantDbResult<Vec<String>> {
        self.pool
            .fetch_strings(
                connection,
                &format!(
                    "SELECT migration FROM {} ORDER BY migration",
                    self.ledger_table
                ),
            )
            .await
    }

    async fn script_files(path: &Path) -> TenantDbResult<Vec<PathBuf>> {
        let mut entries = tokio::fs::read_dir(path).await?;
        let mut files = Vec::new();

        while let Some(entry) = entries.next_entry().await? {
            let file = entry.path();
            if file.extension().and_then(|ext| ext.to_str()) == Some("sql") {
                files.push(file);
            }
        }

        files.sort();
        Ok(files)
    }
}

#[async_trait]
impl<P: ConnectionPool + ?Sized> MigrationRunner for SqlScriptRunner<P> {
    async fn ensure_repository(&self, connection: &str) -> TenantDbResult<()> {
        if !self.pool.capabilities().supports_queries {
            return Err(TenantDbError::PoolUnsupported(
                "migration ledger requires a query-capable pool".to_string(),
            ));
        }

        let sql = format!(
            "CREATE TABLE IF NOT EXISTS {} (\
             migration VARCHAR(255) NOT NULL PRIMARY KEY, \
             applied_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP)",
            self.ledger_table
        );
        self.pool.execute(connection, &sql).await?;
        Ok(())
    }

    async fn run(&self, connection: &str, path: &Path) -> TenantDbResult<MigrationBatch> {
        let files = Self::script_files(path).await?;
        let already_applied = self.applied(connection).await?;

        let mut batch = MigrationBatch::default();

        for file in files {
            let name = file
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_default();

            if already_applied.iter().any(|applied| applied == &name) {
                continue;
            }

            let sql = tokio::fs::read_to_string(&file).await?;

            match self.pool.execute(connection, &sql).await {
                Ok(_) => {
                    let record = format!(
                        "INSERT INTO {} (migration) VALUES ('{}')",
                        self.ledger_table,
                        name.replace('\'', "''")
                    );
                    self.pool.execute(connection, &record).await?;

                    info!(migration = %name, connection, "applied migration");
                    batch.applied.push(name);
                }
                Err(err) => {
                    warn!(migration = %name, connection, error = %err, "migration file failed");
                    batch.failed.push((name, err.to_string()));
                }
            }
        }

        Ok(batch)
    }
}
