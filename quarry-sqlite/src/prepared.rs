use crate::{CBox, error_from_db};
use libsqlite3_sys::*;
use quarry_core::{AsValue, DatabaseError, Error, ErrorKind, Prepared, Result, Value, truncate_long};
use std::{
    ffi::{CStr, CString, c_int},
    fmt::{self, Display},
    os::raw::{c_char, c_void},
};

pub struct SqlitePrepared {
    pub(crate) statement: CBox<*mut sqlite3_stmt>,
    pub(crate) index: u64,
}

impl SqlitePrepared {
    pub(crate) fn new(statement: CBox<*mut sqlite3_stmt>) -> Self {
        unsafe {
            sqlite3_clear_bindings(*statement);
        }
        Self {
            statement,
            index: 1,
        }
    }

    /// Number of markers in the statement.
    pub fn parameter_count(&self) -> u64 {
        unsafe { sqlite3_bind_parameter_count(*self.statement) as u64 }
    }

    fn sql(&self) -> String {
        unsafe {
            let sql = sqlite3_sql(*self.statement);
            if sql.is_null() {
                return String::new();
            }
            CStr::from_ptr(sql).to_string_lossy().into_owned()
        }
    }

    fn binding_error(&self, message: String) -> Error {
        let error = Error::new(DatabaseError::new(ErrorKind::Binding, message)).context(format!(
            "While binding the parameters of:\n{}",
            truncate_long!(self.sql())
        ));
        log::error!("{:#}", error);
        error
    }
}

impl Prepared for SqlitePrepared {
    fn clear_bindings(&mut self) -> Result<&mut Self> {
        unsafe {
            sqlite3_reset(*self.statement);
            sqlite3_clear_bindings(*self.statement);
        }
        self.index = 1;
        Ok(self)
    }

    fn bind(&mut self, value: impl AsValue) -> Result<&mut Self> {
        let index = self.index;
        self.bind_index(value, index)
    }

    fn bind_index(&mut self, value: impl AsValue, index: u64) -> Result<&mut Self> {
        if index == 0 || index > self.parameter_count() {
            return Err(self.binding_error(format!(
                "Parameter index {} is out of range, the query has {} parameters",
                index,
                self.parameter_count()
            )));
        }
        let position = index as c_int;
        let statement = *self.statement;
        let value = value.as_value();
        let rc = unsafe {
            match &value {
                Value::Null => sqlite3_bind_null(statement, position),
                Value::Boolean(v) => sqlite3_bind_int(statement, position, *v as c_int),
                Value::Int64(v) => sqlite3_bind_int64(statement, position, *v),
                Value::UInt64(v) => {
                    let Ok(v) = sqlite3_int64::try_from(*v) else {
                        return Err(self.binding_error(format!(
                            "Cannot bind {} into a sqlite integer because it's out of bounds",
                            v
                        )));
                    };
                    sqlite3_bind_int64(statement, position, v)
                }
                Value::Float64(v) => sqlite3_bind_double(statement, position, *v),
                Value::Varchar(v) => sqlite3_bind_text(
                    statement,
                    position,
                    v.as_ptr() as *const c_char,
                    v.len() as c_int,
                    SQLITE_TRANSIENT(),
                ),
                Value::Blob(v) => sqlite3_bind_blob(
                    statement,
                    position,
                    v.as_ptr() as *const c_void,
                    v.len() as c_int,
                    SQLITE_TRANSIENT(),
                ),
            }
        };
        if rc != SQLITE_OK {
            let error = Error::new(unsafe { error_from_db(sqlite3_db_handle(statement)) })
                .context(format!(
                    "Cannot bind parameter {} to query:\n{}",
                    index,
                    truncate_long!(self.sql())
                ));
            log::error!("{:#}", error);
            return Err(error);
        }
        self.index = index + 1;
        Ok(self)
    }

    fn bind_named(&mut self, name: &str, value: impl AsValue) -> Result<&mut Self> {
        let Ok(c_name) = CString::new(name) else {
            return Err(self.binding_error(format!("Invalid parameter name `{}`", name)));
        };
        let index = unsafe { sqlite3_bind_parameter_index(*self.statement, c_name.as_ptr()) };
        if index == 0 {
            return Err(self.binding_error(format!(
                "The query has no parameter named `{}`",
                name
            )));
        }
        self.bind_index(value, index as u64)
    }
}

impl Display for SqlitePrepared {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", truncate_long!(self.sql()))
    }
}
