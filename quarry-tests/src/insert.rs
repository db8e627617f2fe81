use crate::{MISSING_COLUMN, MISSING_TABLE, expect_error, silent_logs};
use quarry_core::{DataType, Database, ErrorKind, ReturnMode, Statement, Statements};

fn named(typed: bool) -> Statements {
    let statements = [
        Statement::named(":name", "Isis"),
        Statement::named("email", "isis@email.com"),
    ];
    if typed {
        statements
            .into_iter()
            .map(|s| s.with_type(DataType::Str))
            .collect()
    } else {
        statements.into()
    }
}

pub async fn raw_queries(database: &Database) {
    let rows = database
        .query(
            "INSERT INTO test_table (name, email) VALUES ('Isis', 'isis@email.com')",
            (),
            ReturnMode::RowsAffected,
        )
        .await
        .expect("Raw insert failed");
    assert_eq!(rows, 1);

    let id = database
        .query(
            "INSERT INTO test_table (name, email) VALUES ('Isis', 'isis@email.com')",
            (),
            ReturnMode::LastInsertId,
        )
        .await
        .expect("Raw insert returning the id failed");
    assert_eq!(id, 2);

    let rows = database
        .query(
            "INSERT INTO test_table (name, email) VALUES (:name, :email)",
            named(false),
            ReturnMode::RowsAffected,
        )
        .await
        .expect("Insert with named statements failed");
    assert_eq!(rows, 1);

    let mut explicit = named(true);
    explicit.push(Statement::named(":id", 3008).with_type(DataType::Int));
    let sql = "INSERT INTO test_table (id, name, email) VALUES (:id, :name, :email)";
    let rows = database
        .query(sql, explicit.clone(), ReturnMode::RowsAffected)
        .await
        .expect("Insert with typed named statements failed");
    assert_eq!(rows, 1);

    let duplicate = silent_logs! {
        database.query(sql, explicit, ReturnMode::RowsAffected).await
    };
    expect_error(
        duplicate,
        ErrorKind::DuplicateEntry,
        &["Duplicate entry", "UNIQUE constraint failed"],
    );

    let id = database
        .query(
            "INSERT INTO test_table (name, email) VALUES (?, ?)",
            [
                Statement::position(1, "Isis"),
                Statement::position(2, "isis@email.com"),
            ],
            ReturnMode::LastInsertId,
        )
        .await
        .expect("Insert with positional statements failed");
    assert_eq!(id, 3009);

    let id = database
        .query(
            "INSERT INTO test_table (id, name, email) VALUES (?, ?, ?)",
            [
                Statement::position(1, "4883").with_type(DataType::Int),
                Statement::position(2, "Isis").with_type(DataType::Str),
                Statement::position(3, "isis@email.com").with_type(DataType::Str),
            ],
            ReturnMode::LastInsertId,
        )
        .await
        .expect("Insert with typed positional statements failed");
    assert_eq!(id, 4883);

    let missing_table = silent_logs! {
        database
            .query(
                "INSERT INTO xxxx (name, email) VALUES ('Isis', 'isis@email.com')",
                (),
                ReturnMode::RowsAffected,
            )
            .await
    };
    expect_error(missing_table, ErrorKind::MissingTable, MISSING_TABLE);

    let missing_column = silent_logs! {
        database
            .query(
                "INSERT INTO test_table (xxxx, email) VALUES ('Isis', 'isis@email.com')",
                (),
                ReturnMode::LastInsertId,
            )
            .await
    };
    expect_error(missing_column, ErrorKind::MissingColumn, MISSING_COLUMN);

    let missing_table = silent_logs! {
        database
            .query(
                "INSERT INTO xxxx (name, email) VALUES (:name, :email)",
                named(false),
                ReturnMode::RowsAffected,
            )
            .await
    };
    expect_error(missing_table, ErrorKind::MissingTable, MISSING_TABLE);

    let missing_column = silent_logs! {
        database
            .query(
                "INSERT INTO test_table (xxxx, email) VALUES (:name, :email)",
                named(false),
                ReturnMode::RowsAffected,
            )
            .await
    };
    expect_error(missing_column, ErrorKind::MissingColumn, MISSING_COLUMN);

    let unbound = silent_logs! {
        database
            .query(
                "INSERT INTO test_table (name, email) VALUES (:name, :email)",
                [Statement::named(":nickname", "Isis")],
                ReturnMode::RowsAffected,
            )
            .await
    };
    assert!(unbound.is_err(), "Binding an unknown marker must fail");
}
