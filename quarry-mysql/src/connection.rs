use crate::{MySqlDriver, MySqlPrepared, RowWrap, database_error};
use async_stream::try_stream;
use mysql_async::{Conn, Opts, prelude::Queryable};
use quarry_core::{
    Connection, Context, DatabaseError, Driver, Error, ErrorKind, Executor, Query, QueryResult,
    Result, RowsAffected,
    stream::{Stream, StreamExt, TryStreamExt},
    truncate_long,
};
use std::{borrow::Cow, sync::Arc};
use url::Url;

pub struct MySqlConnection {
    pub(crate) connection: Conn,
}

impl Executor for MySqlConnection {
    type Driver = MySqlDriver;

    fn driver(&self) -> &Self::Driver {
        &MySqlDriver {}
    }

    async fn prepare(&mut self, query: String) -> Result<Query<Self::Driver>> {
        let statement = self
            .connection
            .prep(query.as_str())
            .await
            .map_err(database_error)
            .map_err(|e| {
                let e = e.context(format!(
                    "While preparing the query:\n{}",
                    truncate_long!(query)
                ));
                log::error!("{:#}", e);
                e
            })?;
        Ok(Query::Prepared(MySqlPrepared::new(statement, query)))
    }

    fn run(&mut self, query: Query<Self::Driver>) -> impl Stream<Item = Result<QueryResult>> + Send {
        let context = Arc::new(format!("While running the query:\n{}", query));
        try_stream! {
            // One `Affected` per result set without columns, the caller sums them
            match query {
                Query::Raw(sql) => {
                    let mut result = self.connection.query_iter(sql).await.map_err(database_error)?;
                    let mut sets = 0;
                    while let Some(mut stream) = result.stream::<RowWrap>().await.map_err(database_error)? {
                        sets += 1;
                        while let Some(row) = stream.next().await.transpose().map_err(database_error)? {
                            yield QueryResult::Row(row.0);
                        }
                        if stream.columns_ref().is_empty() {
                            yield QueryResult::Affected(RowsAffected {
                                rows_affected: stream.affected_rows(),
                                last_insert_id: stream.last_insert_id().map(|v| v as i64),
                            });
                        }
                    }
                    if sets == 0 {
                        yield QueryResult::Affected(RowsAffected {
                            rows_affected: result.affected_rows(),
                            last_insert_id: result.last_insert_id().map(|v| v as i64),
                        });
                    }
                }
                Query::Prepared(mut prepared) => {
                    let params = prepared.take_params()?;
                    let mut result = self
                        .connection
                        .exec_iter(&prepared.statement, params)
                        .await
                        .map_err(database_error)?;
                    let mut sets = 0;
                    while let Some(mut stream) = result.stream::<RowWrap>().await.map_err(database_error)? {
                        sets += 1;
                        while let Some(row) = stream.next().await.transpose().map_err(database_error)? {
                            yield QueryResult::Row(row.0);
                        }
                        if stream.columns_ref().is_empty() {
                            yield QueryResult::Affected(RowsAffected {
                                rows_affected: stream.affected_rows(),
                                last_insert_id: stream.last_insert_id().map(|v| v as i64),
                            });
                        }
                    }
                    if sets == 0 {
                        yield QueryResult::Affected(RowsAffected {
                            rows_affected: result.affected_rows(),
                            last_insert_id: result.last_insert_id().map(|v| v as i64),
                        });
                    }
                }
            }
        }
        .map_err(move |e: Error| {
            let e = e.context(context.clone());
            log::error!("{:#}", e);
            e
        })
    }
}

fn config_error(message: String) -> Error {
    let error = Error::new(DatabaseError::new(ErrorKind::Config, message));
    log::error!("{:#}", error);
    error
}

impl Connection for MySqlConnection {
    async fn connect(url: Cow<'static, str>) -> Result<MySqlConnection> {
        let context = || format!("While trying to connect to `{}`", truncate_long!(url));
        let prefix = format!("{}://", <Self::Driver as Driver>::NAME);
        if !url.starts_with(&prefix) {
            return Err(config_error(format!(
                "MySQL connection url must start with `{}`",
                &prefix
            )));
        }
        let mut parsed = Url::parse(&url)
            .map_err(|e| config_error(format!("Invalid connection url: {}", e)))?;
        let mut charset = None;
        let mut options = Vec::new();
        for (key, value) in parsed.query_pairs() {
            if key == "charset" {
                charset = Some(value.into_owned());
            } else {
                options.push((key.into_owned(), value.into_owned()));
            }
        }
        if options.is_empty() {
            parsed.set_query(None);
        } else {
            parsed.query_pairs_mut().clear().extend_pairs(options);
        }
        let opts = Opts::from_url(parsed.as_str())
            .map_err(|e| database_error(e.into()))
            .with_context(context)?;
        let connection = Conn::new(opts)
            .await
            .map_err(database_error)
            .with_context(context)
            .map_err(|e| {
                log::error!("{:#}", e);
                e
            })?;
        let mut connection = MySqlConnection { connection };
        if let Some(charset) = charset {
            if charset.is_empty()
                || !charset
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '_')
            {
                return Err(config_error(format!("Invalid charset `{}`", charset)));
            }
            connection
                .execute(Query::Raw(format!("SET NAMES {}", charset)))
                .await?;
        }
        Ok(connection)
    }
}
