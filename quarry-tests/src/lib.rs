mod builder;
mod insert;

use crate::{builder::builder_queries, insert::raw_queries};
use indoc::indoc;
use log::LevelFilter;
use quarry_core::{AsValue, Database, DatabaseError, ErrorKind, ReturnMode, Statement};
use std::env;

/// Words one of which a missing table error message contains.
pub const MISSING_TABLE: &[&str] = &["table", "view", "not", "found", "exist", "Table"];
/// Words one of which a missing column error message contains.
pub const MISSING_COLUMN: &[&str] = &["Column", "not", "found", "Unknown", "column"];

pub fn init_logs() {
    let mut logger = env_logger::builder();
    logger
        .is_test(true)
        .format_file(true)
        .format_line_number(true);
    if env::var("RUST_LOG").is_err() {
        logger.filter_level(LevelFilter::Warn);
    }
    let _ = logger.try_init();
}

/// Run the whole suite against `database`, it (re)creates `test_table`.
pub async fn execute_tests(database: &Database) {
    create_table(database).await;
    raw_queries(database).await;
    builder_queries(database).await;
    persisted_rows(database).await;
}

async fn create_table(database: &Database) {
    database
        .query("DROP TABLE IF EXISTS test_table", (), ReturnMode::RowsAffected)
        .await
        .expect("Could not drop test_table");
    let sql = match database.provider() {
        "sqlite" => indoc! {"
            CREATE TABLE test_table (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT,
                email TEXT
            )
        "},
        _ => indoc! {"
            CREATE TABLE test_table (
                id INT AUTO_INCREMENT PRIMARY KEY,
                name VARCHAR(255),
                email VARCHAR(255)
            )
        "},
    };
    database
        .query(sql, (), ReturnMode::RowsAffected)
        .await
        .expect("Could not create test_table");
}

/// Name and email of the row `id`.
pub async fn person(database: &Database, id: i64) -> (String, String) {
    let rows = database
        .fetch(
            "SELECT name, email FROM test_table WHERE id = ?",
            [Statement::position(1, id)],
        )
        .await
        .unwrap_or_else(|e| panic!("Could not read the row {}: {}", id, e));
    assert_eq!(rows.len(), 1, "Expected exactly one row with id {}", id);
    let column = |name: &str| {
        String::try_from_value(rows[0].get_column(name).cloned().unwrap_or_default())
            .unwrap_or_else(|e| panic!("Column {} of row {} is not text: {:#}", name, id, e))
    };
    (column("name"), column("email"))
}

/// Assert that `result` failed with `kind` and a message containing one of `patterns`.
pub fn expect_error(
    result: Result<i64, DatabaseError>,
    kind: ErrorKind,
    patterns: &[&str],
) -> DatabaseError {
    let error = match result {
        Ok(v) => panic!("Expected a {:?} error, the query returned {}", kind, v),
        Err(e) => e,
    };
    assert_eq!(error.kind(), kind, "Unexpected error: {}", error);
    assert!(
        error.matches_any(patterns),
        "The message `{}` contains none of {:?}",
        error,
        patterns
    );
    error
}

async fn persisted_rows(database: &Database) {
    let isis = ("Isis".to_string(), "isis@email.com".to_string());
    for id in [1, 2, 3, 3008, 3009, 4883, 4884, 4885, 4886, 4887, 4888] {
        assert_eq!(person(database, id).await, isis, "Row {} differs", id);
    }
    assert_eq!(person(database, 3).await, person(database, 3009).await);
    assert_eq!(person(database, 3008).await, person(database, 4883).await);
    assert_eq!(
        person(database, 4889).await,
        ("O'Brien".to_string(), "o'brien@email.com".to_string())
    );

    let rows = database
        .fetch("SELECT COUNT(*) AS n FROM test_table", ())
        .await
        .expect("Could not count the rows");
    let count = i64::try_from_value(rows[0].values()[0].clone()).expect("Count is not integer");
    assert_eq!(count, 12);

    let rows = database
        .fetch("SELECT id FROM test_table ORDER BY id", ())
        .await
        .expect("Could not read the ids");
    let ids = rows
        .into_iter()
        .map(|row| i64::try_from_value(row.values()[0].clone()).expect("Id is not integer"))
        .collect::<Vec<_>>();
    assert_eq!(
        ids,
        [1, 2, 3, 3008, 3009, 4883, 4884, 4885, 4886, 4887, 4888, 4889]
    );
}

#[macro_export]
macro_rules! silent_logs {
    ($($code:tt)+) => {{
        let level = log::max_level();
        log::set_max_level(log::LevelFilter::Off);
        let result = { $($code)+ };
        log::set_max_level(level);
        result
    }};
}
