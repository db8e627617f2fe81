use crate::{MySqlConnection, MySqlPrepared, MySqlSqlWriter};
use quarry_core::Driver;

#[derive(Default, Debug, Clone, Copy)]
pub struct MySqlDriver;

impl MySqlDriver {
    pub const fn new() -> Self {
        Self
    }
}

impl Driver for MySqlDriver {
    type Connection = MySqlConnection;
    type SqlWriter = MySqlSqlWriter;
    type Prepared = MySqlPrepared;

    const NAME: &'static str = "mysql";

    fn sql_writer(&self) -> Self::SqlWriter {
        MySqlSqlWriter::default()
    }
}
