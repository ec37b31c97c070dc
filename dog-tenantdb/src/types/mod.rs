pub mod conn;
pub mod ctx;
pub mod descriptor;
pub mod driver;

pub use conn::ConnectionConfig;
pub use ctx::ActiveTenant;
pub use descriptor::{StaticTenant, TenantDescriptor};
pub use driver::{Dialect, DriverKind};
