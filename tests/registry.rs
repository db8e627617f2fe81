#[cfg(all(test, feature = "sqlite"))]
mod tests {
    use quarry::{
        ConnectionConfig, ErrorKind, ReturnMode, Statement, connect, connection, disconnect,
        get_connection,
    };
    use quarry_tests::{init_logs, silent_logs};
    use std::sync::Arc;

    #[tokio::test]
    async fn same_instance_by_identifier() {
        init_logs();
        let config = ConnectionConfig::file(":memory:");
        let first = get_connection("registry-same", "sqlite", &config)
            .await
            .expect("Could not open the connection");
        let second = get_connection("registry-same", "SQLite", &ConnectionConfig::default())
            .await
            .expect("Could not fetch the registered connection");
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.identifier(), "registry-same");
        assert_eq!(first.provider(), "sqlite");
        let third = connection("registry-same").expect("The connection is registered");
        assert!(Arc::ptr_eq(&first, &third));

        assert!(disconnect("registry-same"));
        assert!(!disconnect("registry-same"));
        assert!(connection("registry-same").is_none());
        let fresh = get_connection("registry-same", "sqlite", &config)
            .await
            .expect("Could not reopen the connection");
        assert!(!Arc::ptr_eq(&first, &fresh));
        disconnect("registry-same");
    }

    #[tokio::test]
    async fn unknown_provider() {
        init_logs();
        let result = silent_logs! {
            get_connection("registry-unknown", "oracle", &ConnectionConfig::file(":memory:")).await
        };
        let error = result.err().expect("Oracle is not a provider");
        assert_eq!(error.kind(), ErrorKind::Config);
        assert!(error.message().contains("oracle"));
        assert!(connection("registry-unknown").is_none());
    }

    #[tokio::test]
    async fn builder_and_query_agree() {
        init_logs();
        let database = connect("sqlite", &ConnectionConfig::file(":memory:"))
            .await
            .expect("Could not open the connection");
        database
            .query(
                "CREATE TABLE people (id INTEGER PRIMARY KEY AUTOINCREMENT, name TEXT, email TEXT)",
                (),
                ReturnMode::RowsAffected,
            )
            .await
            .expect("Could not create the table");
        let raw = database
            .query(
                "INSERT INTO people (name, email) VALUES (:name, :email)",
                [
                    Statement::named(":name", "Isis"),
                    Statement::named(":email", "isis@email.com"),
                ],
                ReturnMode::LastInsertId,
            )
            .await
            .expect("Raw insert failed");
        let built = database
            .insert(
                [("name", ":name"), ("email", ":email")],
                [
                    Statement::named(":name", "Isis"),
                    Statement::named(":email", "isis@email.com"),
                ],
            )
            .in_table("people")
            .execute(ReturnMode::LastInsertId)
            .await
            .expect("Builder insert failed");
        assert_eq!((raw, built), (1, 2));
        let rows = database
            .fetch("SELECT name, email FROM people ORDER BY id", ())
            .await
            .expect("Could not read the rows");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].values(), rows[1].values());
    }
}
