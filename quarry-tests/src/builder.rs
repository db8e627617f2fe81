use crate::{MISSING_COLUMN, MISSING_TABLE, expect_error, silent_logs};
use quarry_core::{AsValue, DataType, Database, ErrorKind, ReturnMode, Statement};

pub async fn builder_queries(database: &Database) {
    let id = database
        .insert([("name", "Isis"), ("email", "isis@email.com")], ())
        .in_table("test_table")
        .execute(ReturnMode::LastInsertId)
        .await
        .expect("Builder insert failed");
    assert_eq!(id, 4884);

    let id = database
        .insert(
            [("name", ":name"), ("email", ":email")],
            [
                Statement::named(":name", "Isis").with_type(DataType::Str),
                Statement::named(":email", "isis@email.com").with_type(DataType::Str),
            ],
        )
        .in_table("test_table")
        .execute(ReturnMode::LastInsertId)
        .await
        .expect("Builder insert with typed named statements failed");
    assert_eq!(id, 4885);

    let id = database
        .insert(
            [("name", ":name"), ("email", ":email")],
            [
                Statement::named(":name", "Isis"),
                Statement::named(":email", "isis@email.com"),
            ],
        )
        .in_table("test_table")
        .execute(ReturnMode::LastInsertId)
        .await
        .expect("Builder insert with named statements failed");
    assert_eq!(id, 4886);

    let id = database
        .insert(
            [("name", "?"), ("email", "?")],
            [
                Statement::position(1, "Isis"),
                Statement::position(2, "isis@email.com"),
            ],
        )
        .in_table("test_table")
        .execute(ReturnMode::LastInsertId)
        .await
        .expect("Builder insert with positional statements failed");
    assert_eq!(id, 4887);

    let rows = database
        .insert(
            [("name", "?"), ("email", "?")],
            [
                Statement::position(1, "Isis").with_type(DataType::Str),
                Statement::position(2, "isis@email.com").with_type(DataType::Str),
            ],
        )
        .in_table("test_table")
        .execute(ReturnMode::RowsAffected)
        .await
        .expect("Builder insert with typed positional statements failed");
    assert_eq!(rows, 1);

    let insert = database
        .insert(
            [
                ("id", 4889i64.as_value()),
                ("name", "O'Brien".as_value()),
                ("email", "o'brien@email.com".as_value()),
            ],
            (),
        )
        .in_table("test_table");
    let sql = insert.sql().await.expect("Could not write the insert");
    assert!(sql.starts_with("INSERT INTO "), "Unexpected sql: {}", sql);
    assert!(sql.contains("4889"), "Unexpected sql: {}", sql);
    let id = insert
        .execute(ReturnMode::LastInsertId)
        .await
        .expect("Builder insert with literal values failed");
    assert_eq!(id, 4889);

    let missing_table = silent_logs! {
        database
            .insert(
                [("name", ":name"), ("email", ":email")],
                [
                    Statement::named(":name", "Isis"),
                    Statement::named(":email", "isis@email.com"),
                ],
            )
            .in_table("xxxx")
            .execute(ReturnMode::RowsAffected)
            .await
    };
    expect_error(missing_table, ErrorKind::MissingTable, MISSING_TABLE);

    let missing_column = silent_logs! {
        database
            .insert([("xxxx", "Isis"), ("email", "isis@email.com")], ())
            .in_table("test_table")
            .execute(ReturnMode::RowsAffected)
            .await
    };
    expect_error(missing_column, ErrorKind::MissingColumn, MISSING_COLUMN);

    let no_table = silent_logs! {
        database
            .insert([("name", "Isis")], ())
            .execute(ReturnMode::RowsAffected)
            .await
    };
    assert!(no_table.is_err(), "An insert without table must fail");
}
