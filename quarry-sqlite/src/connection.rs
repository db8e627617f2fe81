use crate::{
    CBox, SqliteDriver, SqlitePrepared, error_from_db,
    extract::{extract_name, extract_value},
};
use async_stream::try_stream;
use libsqlite3_sys::*;
use quarry_core::{
    Connection, Context, DatabaseError, Driver, Error, ErrorKind, Executor, Query, QueryResult,
    Result, RowLabeled, RowsAffected, stream::Stream, truncate_long,
};
use std::{
    borrow::Cow,
    ffi::{CStr, CString, c_char, c_int},
    ptr,
    sync::Arc,
};
use tokio::task::spawn_blocking;

/// How long a statement waits on a locked database before failing.
const BUSY_TIMEOUT_MS: c_int = 5_000;

fn close(connection: *mut sqlite3) {
    unsafe {
        sqlite3_close(connection);
    }
}

fn finalize(statement: *mut sqlite3_stmt) {
    unsafe {
        sqlite3_finalize(statement);
    }
}

fn config_error(message: String) -> Error {
    let error = Error::new(DatabaseError::new(ErrorKind::Config, message));
    log::error!("{:#}", error);
    error
}

pub struct SqliteConnection {
    pub(crate) connection: CBox<*mut sqlite3>,
}

/// Step `statement` until done, pushing its rows, or the change it made when
/// it returns no columns, into `out`.
fn run_statement(
    db: *mut sqlite3,
    statement: *mut sqlite3_stmt,
    out: &mut Vec<QueryResult>,
) -> Result<()> {
    unsafe {
        let count = sqlite3_column_count(statement);
        let labels = (0..count)
            .map(|i| extract_name(statement, i))
            .collect::<Result<Arc<[_]>>>()?;
        let before = sqlite3_total_changes64(db);
        loop {
            match sqlite3_step(statement) {
                SQLITE_ROW => {
                    let values = (0..count)
                        .map(|i| extract_value(statement, i))
                        .collect::<Result<_>>()?;
                    out.push(RowLabeled::new(labels.clone(), values).into());
                }
                SQLITE_DONE => break,
                _ => return Err(error_from_db(db).into()),
            }
        }
        if count == 0 {
            // `changes64` leaves out trigger rows but keeps the count of an
            // earlier DML statement, so only trust it when the total moved
            let rows_affected = if sqlite3_total_changes64(db) != before {
                sqlite3_changes64(db).max(0) as u64
            } else {
                0
            };
            out.push(
                RowsAffected {
                    rows_affected,
                    last_insert_id: Some(sqlite3_last_insert_rowid(db)),
                }
                .into(),
            );
        }
        Ok(())
    }
}

/// Prepare and run, one after the other, every statement in `sql`.
fn run_unprepared(db: *mut sqlite3, sql: &str) -> Result<Vec<QueryResult>> {
    let sql = CString::new(sql).context("Could not create a CString from the query String")?;
    let mut results = Vec::new();
    unsafe {
        let end = sql.as_ptr().add(sql.as_bytes().len());
        let mut tail: *const c_char = sql.as_ptr();
        while tail < end {
            let mut statement = CBox::new(ptr::null_mut(), finalize);
            let mut next = ptr::null();
            let rc = sqlite3_prepare_v2(
                db,
                tail,
                end.offset_from(tail) as c_int,
                &mut *statement,
                &mut next,
            );
            if rc != SQLITE_OK {
                return Err(error_from_db(db).into());
            }
            if next <= tail {
                break;
            }
            tail = next;
            if statement.is_null() {
                // Only whitespace or comments
                continue;
            }
            run_statement(db, *statement, &mut results)?;
        }
    }
    Ok(results)
}

impl Executor for SqliteConnection {
    type Driver = SqliteDriver;

    fn driver(&self) -> &Self::Driver {
        &SqliteDriver {}
    }

    async fn prepare(&mut self, query: String) -> Result<Query<Self::Driver>> {
        let connection = self.connection.borrowed();
        let context = format!("While preparing the query:\n{}", truncate_long!(query));
        let statement = spawn_blocking(move || -> Result<CBox<*mut sqlite3_stmt>> {
            unsafe {
                let db = *connection;
                let sql = CString::new(query.as_bytes())
                    .context("Could not create a CString from the query String")?;
                let mut statement = CBox::new(ptr::null_mut(), finalize);
                let mut tail = ptr::null();
                let rc = sqlite3_prepare_v2(
                    db,
                    sql.as_ptr(),
                    sql.as_bytes().len() as c_int,
                    &mut *statement,
                    &mut tail,
                );
                if rc != SQLITE_OK {
                    return Err(Error::new(error_from_db(db)));
                }
                if statement.is_null() {
                    return Err(Error::msg("The query contains no statement"));
                }
                if !tail.is_null()
                    && !CStr::from_ptr(tail)
                        .to_bytes()
                        .iter()
                        .all(u8::is_ascii_whitespace)
                {
                    return Err(Error::msg(
                        "Cannot prepare more than one statement at a time",
                    ));
                }
                Ok(statement)
            }
        })
        .await?
        .map_err(|e| {
            let e = e.context(context);
            log::error!("{:#}", e);
            e
        })?;
        Ok(Query::Prepared(SqlitePrepared::new(statement)))
    }

    fn run(&mut self, query: Query<Self::Driver>) -> impl Stream<Item = Result<QueryResult>> + Send {
        let connection = self.connection.borrowed();
        try_stream! {
            let context = format!("While executing the query:\n{}", query);
            let results = spawn_blocking(move || {
                let db = *connection;
                match query {
                    Query::Raw(sql) => run_unprepared(db, &sql),
                    Query::Prepared(prepared) => {
                        let mut results = Vec::new();
                        run_statement(db, *prepared.statement, &mut results).map(|_| results)
                    }
                }
            })
            .await?
            .map_err(|e| {
                let e = e.context(context);
                log::error!("{:#}", e);
                e
            })?;
            for result in results {
                yield result;
            }
        }
    }
}

impl Connection for SqliteConnection {
    async fn connect(url: Cow<'static, str>) -> Result<SqliteConnection> {
        let prefix = format!("{}://", <Self::Driver as Driver>::NAME);
        let Some(rest) = url.strip_prefix(&prefix) else {
            return Err(config_error(format!(
                "Expected sqlite connection url to start with `{}`",
                &prefix
            )));
        };
        let (path, params) = rest.split_once('?').unwrap_or((rest, ""));
        let path = urlencoding::decode(path)
            .with_context(|| format!("Error while decoding connection URL: `{}`", url))?
            .into_owned();
        if path.is_empty() {
            return Err(config_error(format!(
                "The connection URL `{}` has no database path",
                url
            )));
        }
        let mut flags = SQLITE_OPEN_READWRITE | SQLITE_OPEN_CREATE;
        let mut charset = None;
        for (key, value) in url::form_urlencoded::parse(params.as_bytes()) {
            match key.as_ref() {
                "mode" => {
                    flags = match value.as_ref() {
                        "ro" => SQLITE_OPEN_READONLY,
                        "rw" => SQLITE_OPEN_READWRITE,
                        "rwc" => SQLITE_OPEN_READWRITE | SQLITE_OPEN_CREATE,
                        "memory" => SQLITE_OPEN_READWRITE | SQLITE_OPEN_CREATE | SQLITE_OPEN_MEMORY,
                        _ => {
                            return Err(config_error(format!(
                                "Unknown sqlite mode `{}`, expected one of ro, rw, rwc, memory",
                                value
                            )));
                        }
                    }
                }
                "charset" => charset = Some(value.into_owned()),
                _ => log::warn!("Ignoring the unknown sqlite connection parameter `{}`", key),
            }
        }
        let c_path = CString::new(path)
            .with_context(|| format!("Error while decoding connection URL: `{}`", url))?;
        let connection = spawn_blocking(move || -> Result<CBox<*mut sqlite3>> {
            unsafe {
                let mut connection = CBox::new(ptr::null_mut(), close);
                let rc = sqlite3_open_v2(
                    c_path.as_ptr(),
                    &mut *connection,
                    flags | SQLITE_OPEN_URI,
                    ptr::null(),
                );
                if rc != SQLITE_OK {
                    let message = if connection.is_null() {
                        "Could not allocate the database connection".to_string()
                    } else {
                        error_from_db(*connection).message().to_string()
                    };
                    return Err(Error::new(
                        DatabaseError::new(ErrorKind::Connection, message).with_code(rc),
                    ));
                }
                sqlite3_extended_result_codes(*connection, 1);
                sqlite3_busy_timeout(*connection, BUSY_TIMEOUT_MS);
                Ok(connection)
            }
        })
        .await?
        .map_err(|e| {
            let e = e.context(format!("While opening the database `{}`", url));
            log::error!("{:#}", e);
            e
        })?;
        let mut connection = SqliteConnection { connection };
        if let Some(charset) = charset {
            let encoding = match charset.to_ascii_lowercase().as_str() {
                "utf8" | "utf-8" | "utf8mb4" => "UTF-8",
                "utf16" | "utf-16" => "UTF-16",
                "utf16le" | "utf-16le" => "UTF-16le",
                "utf16be" | "utf-16be" => "UTF-16be",
                _ => {
                    return Err(config_error(format!(
                        "Unsupported sqlite charset `{}`",
                        charset
                    )));
                }
            };
            connection
                .execute(Query::Raw(format!("PRAGMA encoding = '{}'", encoding)))
                .await?;
        }
        Ok(connection)
    }
}
