use crate::{Connection, Prepared, Result, SqlWriter};
use std::{borrow::Cow, future::Future};

/// Backend entry point tying together its connection, prepared statement and
/// SQL dialect.
pub trait Driver: Send + Sync {
    type Connection: Connection<Driver = Self>;
    type SqlWriter: SqlWriter;
    type Prepared: Prepared;

    /// Provider name, also the scheme of the connection url.
    const NAME: &'static str;

    fn sql_writer(&self) -> Self::SqlWriter;

    fn connect(&self, url: Cow<'static, str>) -> impl Future<Output = Result<Self::Connection>> {
        Self::Connection::connect(url)
    }
}
