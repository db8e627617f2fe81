mod connection;
mod driver;
mod prepared;
mod row_wrap;
mod sql_writer;
mod value_wrap;

pub use connection::*;
pub use driver::*;
pub use prepared::*;
pub(crate) use row_wrap::*;
pub use sql_writer::*;
pub(crate) use value_wrap::*;

use quarry_core::{DatabaseError, Error, ErrorKind};

/// Kind of a MySQL server error code.
pub(crate) fn classify(code: u16) -> ErrorKind {
    match code {
        1062 | 1586 => ErrorKind::DuplicateEntry,
        1051 | 1109 | 1146 => ErrorKind::MissingTable,
        1054 => ErrorKind::MissingColumn,
        1064 | 1149 => ErrorKind::Syntax,
        1210 => ErrorKind::Binding,
        1044 | 1045 | 1049 | 2002 | 2003 | 2006 | 2013 => ErrorKind::Connection,
        _ => ErrorKind::Other,
    }
}

/// Put the server (or client) error at the root of an `anyhow` chain.
pub(crate) fn database_error(error: mysql_async::Error) -> Error {
    let database_error = match &error {
        mysql_async::Error::Server(e) => {
            DatabaseError::new(classify(e.code), e.message.clone()).with_code(e.code)
        }
        mysql_async::Error::Io(..) | mysql_async::Error::Url(..) => {
            DatabaseError::new(ErrorKind::Connection, error.to_string())
        }
        mysql_async::Error::Driver(e) => {
            let message = e.to_string();
            let kind = if message.contains("param") {
                ErrorKind::Binding
            } else {
                ErrorKind::Other
            };
            DatabaseError::new(kind, message)
        }
        _ => DatabaseError::new(ErrorKind::Other, error.to_string()),
    };
    Error::new(database_error)
}
