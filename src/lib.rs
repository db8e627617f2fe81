mod registry;

pub use quarry_core::*;
#[cfg(feature = "mysql")]
pub use quarry_mysql as mysql;
#[cfg(feature = "sqlite")]
pub use quarry_sqlite as sqlite;
pub use registry::*;
