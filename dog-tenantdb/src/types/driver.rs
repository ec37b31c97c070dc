use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TenantDbError;

/// Closed enumeration of supported database drivers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DriverKind {
    Sqlite,
    MySql,
    MariaDb,
    #[serde(rename = "pgsql")]
    Postgres,
    #[serde(rename = "sqlsrv")]
    SqlServer,
}

impl DriverKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DriverKind::Sqlite => "sqlite",
            DriverKind::MySql => "mysql",
            DriverKind::MariaDb => "mariadb",
            DriverKind::Postgres => "pgsql",
            DriverKind::SqlServer => "sqlsrv",
        }
    }

    /// File-backed drivers have no server to issue DDL against; their
    /// database is a file on disk.
    pub fn is_file_based(&self) -> bool {
        matches!(self, DriverKind::Sqlite)
    }

    /// The SQL dialect entry for this driver
    pub fn dialect(&self) -> &'static Dialect {
        match self {
            DriverKind::Sqlite => &SQLITE,
            DriverKind::MySql => &MYSQL,
            DriverKind::MariaDb => &MARIADB,
            DriverKind::Postgres => &POSTGRES,
            DriverKind::SqlServer => &SQLSERVER,
        }
    }
}

impl FromStr for DriverKind {
    type Err = TenantDbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sqlite" => Ok(DriverKind::Sqlite),
            "mysql" => Ok(DriverKind::MySql),
            "mariadb" => Ok(DriverKind::MariaDb),
            "pgsql" => Ok(DriverKind::Postgres),
            "sqlsrv" => Ok(DriverKind::SqlServer),
            other => Err(TenantDbError::UnsupportedDriver(other.to_string())),
        }
    }
}

impl fmt::Display for DriverKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a dialect phrases database-level DDL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DdlStyle {
    MySqlFamily,
    Postgres,
    SqlServer,
    /// No DDL; the database is a file
    File,
}

/// Per-driver dialect entry: identifier quoting, charset defaults, and
/// database-level DDL phrasing
#[derive(Debug)]
pub struct Dialect {
    pub default_charset: Option<&'static str>,
    pub default_collation: Option<&'static str>,
    quote_open: char,
    quote_close: char,
    ddl: DdlStyle,
}

static SQLITE: Dialect = Dialect {
    default_charset: None,
    default_collation: None,
    quote_open: '"',
    quote_close: '"',
    ddl: DdlStyle::File,
};

static MYSQL: Dialect = Dialect {
    default_charset: Some("utf8mb4"),
    default_collation: Some("utf8mb4_unicode_ci"),
    quote_open: '`',
    quote_close: '`',
    ddl: DdlStyle::MySqlFamily,
};

static MARIADB: Dialect = Dialect {
    default_charset: Some("utf8mb4"),
    default_collation: Some("utf8mb4_unicode_ci"),
    quote_open: '`',
    quote_close: '`',
    ddl: DdlStyle::MySqlFamily,
};

static POSTGRES: Dialect = Dialect {
    default_charset: Some("utf8"),
    default_collation: None,
    quote_open: '"',
    quote_close: '"',
    ddl: DdlStyle::Postgres,
};

static SQLSERVER: Dialect = Dialect {
    default_charset: None,
    default_collation: None,
    quote_open: '[',
    quote_close: ']',
    ddl: DdlStyle::SqlServer,
};

impl Dialect {
    pub fn quote_ident(&self, ident: &str) -> String {
        format!("{}{}{}", self.quote_open, ident, self.quote_close)
    }

    /// DDL to create `database`, or `None` for file-backed drivers
    pub fn create_database_sql(&self, database: &str) -> Option<String> {
        let quoted = self.quote_ident(database);
        match self.ddl {
            DdlStyle::MySqlFamily => Some(format!(
                "CREATE DATABASE IF NOT EXISTS {} CHARACTER SET {} COLLATE {}",
                quoted,
                self.default_charset.unwrap_or("utf8mb4"),
                self.default_collation.unwrap_or("utf8mb4_unicode_ci"),
            )),
            DdlStyle::Postgres => Some(format!(
                "CREATE DATABASE {} WITH ENCODING '{}'",
                quoted,
                self.default_charset.unwrap_or("utf8"),
            )),
            DdlStyle::SqlServer => Some(format!("CREATE DATABASE {}", quoted)),
            DdlStyle::File => None,
        }
    }

    /// DDL to drop `database`, or `None` for file-backed drivers
    pub fn drop_database_sql(&self, database: &str) -> Option<String> {
        let quoted = self.quote_ident(database);
        match self.ddl {
            DdlStyle::MySqlFamily | DdlStyle::Postgres | DdlStyle::SqlServer => {
                Some(format!("DROP DATABASE IF EXISTS {}", quoted))
            }
            DdlStyle::File => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_drivers() {
        assert_eq!("sqlite".parse::<DriverKind>().unwrap(), DriverKind::Sqlite);
        assert_eq!("mysql".parse::<DriverKind>().unwrap(), DriverKind::MySql);
        assert_eq!("mariadb".parse::<DriverKind>().unwrap(), DriverKind::MariaDb);
        assert_eq!("pgsql".parse::<DriverKind>().unwrap(), DriverKind::Postgres);
        assert_eq!("sqlsrv".parse::<DriverKind>().unwrap(), DriverKind::SqlServer);
    }

    #[test]
    fn test_parse_unknown_driver() {
        let err = "oracle".parse::<DriverKind>().unwrap_err();
        assert!(matches!(err, TenantDbError::UnsupportedDriver(ref name) if name == "oracle"));
    }

    #[test]
    fn test_mysql_create_database_sql() {
        let sql = DriverKind::MySql.dialect().create_database_sql("tenant_1_acme_2024");
        assert_eq!(
            sql.as_deref(),
            Some(
                "CREATE DATABASE IF NOT EXISTS `tenant_1_acme_2024` \
                 CHARACTER SET utf8mb4 COLLATE utf8mb4_unicode_ci"
            )
        );
    }

    #[test]
    fn test_postgres_create_database_sql() {
        let sql = DriverKind::Postgres.dialect().create_database_sql("tenant_1_acme_2024");
        assert_eq!(
            sql.as_deref(),
            Some("CREATE DATABASE \"tenant_1_acme_2024\" WITH ENCODING 'utf8'")
        );
    }

    #[test]
    fn test_sqlserver_quoting() {
        let dialect = DriverKind::SqlServer.dialect();
        assert_eq!(
            dialect.create_database_sql("tenants").as_deref(),
            Some("CREATE DATABASE [tenants]")
        );
        assert_eq!(
            dialect.drop_database_sql("tenants").as_deref(),
            Some("DROP DATABASE IF EXISTS [tenants]")
        );
    }

    #[test]
    fn test_file_driver_has_no_ddl() {
        let dialect = DriverKind::Sqlite.dialect();
        assert!(dialect.create_database_sql("tenant.db").is_none());
        assert!(dialect.drop_database_sql("tenant.db").is_none());
    }

    #[test]
    fn test_drop_quotes_per_dialect() {
        assert_eq!(
            DriverKind::MariaDb.dialect().drop_database_sql("db").as_deref(),
            Some("DROP DATABASE IF EXISTS `db`")
        );
        assert_eq!(
            DriverKind::Postgres.dialect().drop_database_sql("db").as_deref(),
            Some("DROP DATABASE IF EXISTS \"db\"")
        );
    }
}
