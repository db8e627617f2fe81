use crate::{
    Driver, Query, QueryResult, Result, RowLabeled, RowsAffected, Statements,
    stream::{Stream, StreamExt, TryStreamExt},
};
use std::future::Future;

pub trait Executor: Send + Sized {
    type Driver: Driver;

    fn driver(&self) -> &Self::Driver;

    /// Prepare a single statement.
    fn prepare(
        &mut self,
        query: String,
    ) -> impl Future<Output = Result<Query<Self::Driver>>> + Send;

    /// General method to send any query and return any result type (either row or count)
    fn run(&mut self, query: Query<Self::Driver>) -> impl Stream<Item = Result<QueryResult>> + Send;

    /// Execute the query and returns the rows.
    fn fetch(&mut self, query: Query<Self::Driver>) -> impl Stream<Item = Result<RowLabeled>> + Send {
        self.run(query).filter_map(|v| async move {
            match v {
                Ok(QueryResult::Row(v)) => Some(Ok(v)),
                Err(e) => Some(Err(e)),
                _ => None,
            }
        })
    }

    /// Execute the query and return the total number of rows affected.
    fn execute(
        &mut self,
        query: Query<Self::Driver>,
    ) -> impl Future<Output = Result<RowsAffected>> + Send {
        self.run(query)
            .filter_map(|v| async move {
                match v {
                    Ok(QueryResult::Affected(v)) => Some(Ok(v)),
                    Err(e) => Some(Err(e)),
                    _ => None,
                }
            })
            .try_collect()
    }

    /// Turn `sql` and its bindings into a query: raw when there are no
    /// bindings, prepared and bound otherwise.
    fn bound(
        &mut self,
        sql: String,
        statements: &Statements,
    ) -> impl Future<Output = Result<Query<Self::Driver>>> + Send {
        async move {
            if statements.is_empty() {
                return Ok(Query::Raw(sql));
            }
            let mut query = self.prepare(sql).await?;
            if let Query::Prepared(prepared) = &mut query {
                statements.bind_to(prepared)?;
            }
            Ok(query)
        }
    }
}
