mod cbox;
mod connection;
mod driver;
mod extract;
mod prepared;
mod sql_writer;

use libsqlite3_sys::{
    SQLITE_CANTOPEN, SQLITE_CONSTRAINT_PRIMARYKEY, SQLITE_CONSTRAINT_UNIQUE, SQLITE_NOTADB,
    SQLITE_RANGE, sqlite3, sqlite3_errmsg, sqlite3_extended_errcode,
};
use quarry_core::{DatabaseError, ErrorKind};
use std::{
    ffi::{CStr, c_char, c_int},
    ptr,
};

pub(crate) use cbox::*;
pub use connection::*;
pub use driver::*;
pub use prepared::*;
pub use sql_writer::*;

pub(crate) fn error_message_from_ptr(ptr: &'_ *const c_char) -> &'_ str {
    unsafe {
        if *ptr != ptr::null() {
            CStr::from_ptr(*ptr)
                .to_str()
                .unwrap_or("Unknown error (the error message was not a valid C string)")
        } else {
            "Unknown error (could not extract the error message)"
        }
    }
}

/// Classify a sqlite result code and message.
pub(crate) fn classify(code: c_int, message: &str) -> ErrorKind {
    match code {
        SQLITE_CONSTRAINT_PRIMARYKEY | SQLITE_CONSTRAINT_UNIQUE => ErrorKind::DuplicateEntry,
        SQLITE_RANGE => ErrorKind::Binding,
        _ if matches!(code & 0xff, SQLITE_CANTOPEN | SQLITE_NOTADB) => ErrorKind::Connection,
        _ if message.starts_with("no such table") => ErrorKind::MissingTable,
        _ if message.starts_with("no such column") || message.contains("has no column named") => {
            ErrorKind::MissingColumn
        }
        _ if message.contains("syntax error") || message.starts_with("incomplete input") => {
            ErrorKind::Syntax
        }
        _ => ErrorKind::Other,
    }
}

/// Error currently reported by the connection `db`.
pub(crate) fn error_from_db(db: *mut sqlite3) -> DatabaseError {
    unsafe {
        let code = sqlite3_extended_errcode(db);
        let message = error_message_from_ptr(&sqlite3_errmsg(db)).to_string();
        DatabaseError::new(classify(code, &message), message).with_code(code)
    }
}
