/// Read-only capability exposing a tenant's database coordinates.
///
/// The host application owns the concrete tenant entity; any type that can
/// answer these accessors can be routed to. The core only ever reads the
/// descriptor, and treats it as immutable for the duration of a session.
pub trait TenantDescriptor: Send + Sync + std::fmt::Debug {
    /// Opaque identity key, used in logs and error messages
    fn tenant_key(&self) -> String;

    /// Driver name; must be one of the closed driver enumeration
    fn driver(&self) -> &str;

    fn host(&self) -> &str;

    fn port(&self) -> u16;

    fn database(&self) -> &str;

    fn username(&self) -> &str;

    fn password(&self) -> &str;
}

/// Plain descriptor for fixtures, dev wiring, and hosts without a bespoke
/// tenant entity type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticTenant {
    pub key: String,
    pub driver: String,
    pub host: String,
    pub port: u16,
    pub database: String,
    pub username: String,
    pub password: String,
}

impl StaticTenant {
    pub fn new(
        key: impl Into<String>,
        driver: impl Into<String>,
        database: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            driver: driver.into(),
            host: "127.0.0.1".to_string(),
            port: 3306,
            database: database.into(),
            username: String::new(),
            password: String::new(),
        }
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.username = username.into();
        self.password = password.into();
        self
    }
}

impl TenantDescriptor for StaticTenant {
    fn tenant_key(&self) -> String {
        self.key.clone()
    }

    fn driver(&self) -> &str {
        &self.driver
    }

    fn host(&self) -> &str {
        &self.host
    }

    fn port(&self) -> u16 {
        self.port
    }

    fn database(&self) -> &str {
        &self.database
    }

    fn username(&self) -> &str {
        &self.username
    }

    fn password(&self) -> &str {
        &self.password
    }
}
