use crate::{
    AsValue, Connection, DatabaseError, Driver, Executor, Insert, Result, ReturnMode, RowLabeled,
    RowsAffected, SqlWriter, Statements, Value,
    future::{BoxFuture, FutureExt},
    stream::TryStreamExt,
    truncate_long,
};
use std::fmt::{self, Debug};
use tokio::sync::Mutex;

/// Object safe view of a connection, lets one [`Database`] hold any driver.
trait DynExecutor: Send {
    fn execute<'s>(
        &'s mut self,
        sql: String,
        statements: &'s Statements,
    ) -> BoxFuture<'s, Result<RowsAffected>>;

    fn fetch<'s>(
        &'s mut self,
        sql: String,
        statements: &'s Statements,
    ) -> BoxFuture<'s, Result<Vec<RowLabeled>>>;

    fn write_insert(&self, out: &mut String, table: &str, columns: &[(String, Value)]);
}

impl<C: Connection + 'static> DynExecutor for C {
    fn execute<'s>(
        &'s mut self,
        sql: String,
        statements: &'s Statements,
    ) -> BoxFuture<'s, Result<RowsAffected>> {
        async move {
            let query = self.bound(sql, statements).await?;
            Executor::execute(self, query).await
        }
        .boxed()
    }

    fn fetch<'s>(
        &'s mut self,
        sql: String,
        statements: &'s Statements,
    ) -> BoxFuture<'s, Result<Vec<RowLabeled>>> {
        async move {
            let query = self.bound(sql, statements).await?;
            Executor::fetch(self, query).try_collect().await
        }
        .boxed()
    }

    fn write_insert(&self, out: &mut String, table: &str, columns: &[(String, Value)]) {
        self.driver()
            .sql_writer()
            .write_insert(out, table, columns);
    }
}

/// The query facade: one live connection plus the operations run through it.
///
/// Calls are serialized on the connection, one round trip each. Every failure
/// comes back as a [`DatabaseError`] carrying the driver's own message.
pub struct Database {
    identifier: String,
    provider: &'static str,
    executor: Mutex<Box<dyn DynExecutor>>,
}

impl Database {
    /// Wrap an open connection.
    pub fn new<C: Connection + 'static>(identifier: impl Into<String>, connection: C) -> Self {
        Self {
            identifier: identifier.into(),
            provider: <C::Driver as Driver>::NAME,
            executor: Mutex::new(Box::new(connection)),
        }
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Name of the driver behind this connection.
    pub fn provider(&self) -> &'static str {
        self.provider
    }

    /// Execute `sql`.
    ///
    /// Without statements the SQL runs literally, otherwise it is prepared and
    /// every statement is bound before running it. Returns the rows affected
    /// or the last insert id, depending on `mode`.
    pub async fn query(
        &self,
        sql: impl Into<String>,
        statements: impl Into<Statements>,
        mode: ReturnMode,
    ) -> std::result::Result<i64, DatabaseError> {
        let sql = sql.into();
        let statements = statements.into();
        log::debug!(
            "[{}] query ({} bindings):\n{}",
            self.identifier,
            statements.len(),
            truncate_long!(sql)
        );
        let mut executor = self.executor.lock().await;
        let result = DynExecutor::execute(&mut **executor, sql, &statements)
            .await
            .and_then(|affected| affected.result(mode));
        result.map_err(|e| self.fail(e))
    }

    /// Run a row returning statement with the same binding rules as `query`.
    pub async fn fetch(
        &self,
        sql: impl Into<String>,
        statements: impl Into<Statements>,
    ) -> std::result::Result<Vec<RowLabeled>, DatabaseError> {
        let sql = sql.into();
        let statements = statements.into();
        let mut executor = self.executor.lock().await;
        DynExecutor::fetch(&mut **executor, sql, &statements)
            .await
            .map_err(|e| self.fail(e))
    }

    /// Start an insert of `columns`, values that are markers (`?`, `:name`)
    /// are filled from `statements`.
    pub fn insert<K, V>(
        &self,
        columns: impl IntoIterator<Item = (K, V)>,
        statements: impl Into<Statements>,
    ) -> Insert<'_>
    where
        K: Into<String>,
        V: AsValue,
    {
        Insert::new(
            self,
            columns
                .into_iter()
                .map(|(k, v)| (k.into(), v.as_value()))
                .collect(),
            statements.into(),
        )
    }

    /// Render the INSERT statement in this connection's dialect.
    pub async fn write_insert(&self, out: &mut String, table: &str, columns: &[(String, Value)]) {
        let executor = self.executor.lock().await;
        DynExecutor::write_insert(&**executor, out, table, columns);
    }

    fn fail(&self, error: anyhow::Error) -> DatabaseError {
        log::error!("[{}] {:#}", self.identifier, error);
        error.into()
    }
}

impl Debug for Database {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Database")
            .field("identifier", &self.identifier)
            .field("provider", &self.provider)
            .finish_non_exhaustive()
    }
}
