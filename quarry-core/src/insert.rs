use crate::{Database, DatabaseError, ErrorKind, ReturnMode, Statements, Value};

/// Insert being built by [`Database::insert`].
///
/// ```rust,ignore
/// let id = db
///     .insert([("name", ":name"), ("email", ":email")], statements)
///     .in_table("test_table")
///     .execute(ReturnMode::LastInsertId)
///     .await?;
/// ```
#[derive(Debug)]
#[must_use = "an insert does nothing until executed"]
pub struct Insert<'d> {
    database: &'d Database,
    columns: Vec<(String, Value)>,
    statements: Statements,
    table: Option<String>,
}

impl<'d> Insert<'d> {
    pub(crate) fn new(
        database: &'d Database,
        columns: Vec<(String, Value)>,
        statements: Statements,
    ) -> Self {
        Self {
            database,
            columns,
            statements,
            table: None,
        }
    }

    /// Set the destination table.
    #[doc(alias = "in")]
    pub fn in_table(mut self, table: impl Into<String>) -> Self {
        self.table = Some(table.into());
        self
    }

    pub fn columns(&self) -> &[(String, Value)] {
        &self.columns
    }

    pub fn statements(&self) -> &Statements {
        &self.statements
    }

    /// SQL text of this insert in the connection's dialect.
    pub async fn sql(&self) -> Result<String, DatabaseError> {
        let Some(table) = &self.table else {
            return Err(invalid("The insert has no destination table, call `in_table` first"));
        };
        if self.columns.is_empty() {
            return Err(invalid("The insert has no columns"));
        }
        let mut sql = String::new();
        self.database
            .write_insert(&mut sql, table, &self.columns)
            .await;
        Ok(sql)
    }

    /// Run the insert, same semantics as [`Database::query`].
    pub async fn execute(self, mode: ReturnMode) -> Result<i64, DatabaseError> {
        let sql = self.sql().await?;
        self.database.query(sql, self.statements, mode).await
    }
}

fn invalid(message: &str) -> DatabaseError {
    let error = DatabaseError::new(ErrorKind::Other, message);
    log::error!("{}", error);
    error
}
