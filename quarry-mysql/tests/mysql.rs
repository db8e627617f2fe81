#[cfg(test)]
mod tests {
    use quarry_core::{
        Connection, ConnectionConfig, Database, DatabaseError, ErrorKind, Executor, Query,
    };
    use quarry_mysql::MySqlConnection;
    use quarry_tests::{execute_tests, init_logs, silent_logs};
    use std::{env, sync::Mutex};

    static MUTEX: Mutex<()> = Mutex::new(());

    /// Server described by `DB_HOST`, `DB_PORT`, `DB_USER`, `DB_PASSWORD`,
    /// `DB_NAME` and `DB_CHARSET`.
    fn config() -> Option<ConnectionConfig> {
        if env::var("DB_HOST").is_err() {
            log::warn!("DB_HOST is not set, skipping the MySQL tests");
            return None;
        }
        Some(ConnectionConfig::from_env().expect("Invalid database environment"))
    }

    #[tokio::test]
    async fn mysql() {
        init_logs();
        let Some(config) = config() else {
            return;
        };
        let _guard = MUTEX.lock().unwrap_or_else(|e| e.into_inner());
        let connection = MySqlConnection::connect_with(&config)
            .await
            .expect("Could not connect to MySQL");
        let database = Database::new("mysql-tests", connection);
        execute_tests(&database).await;
    }

    #[tokio::test]
    async fn multiple_statements() {
        init_logs();
        let Some(config) = config() else {
            return;
        };
        let _guard = MUTEX.lock().unwrap_or_else(|e| e.into_inner());
        let mut connection = MySqlConnection::connect_with(&config)
            .await
            .expect("Could not connect to MySQL");
        let affected = connection
            .execute(Query::Raw(
                "DROP TABLE IF EXISTS quarry_numbers;
                 CREATE TABLE quarry_numbers (id INT AUTO_INCREMENT PRIMARY KEY, n INT);
                 INSERT INTO quarry_numbers (n) VALUES (1), (2), (3);
                 INSERT INTO quarry_numbers (n) VALUES (4);
                 UPDATE quarry_numbers SET n = n * 10 WHERE n > 2;"
                    .into(),
            ))
            .await
            .expect("Could not run the statements");
        assert_eq!(affected.rows_affected, 6);
        assert_eq!(affected.last_insert_id, Some(4));
        connection
            .execute(Query::Raw("DROP TABLE quarry_numbers".into()))
            .await
            .expect("Could not drop the table");
    }

    #[tokio::test]
    async fn wrong_credentials() {
        init_logs();
        let Some(mut config) = config() else {
            return;
        };
        config.password = "definitely not the password".into();
        config.user = "quarry_missing_user".into();
        let result = silent_logs! { MySqlConnection::connect_with(&config).await };
        let error = result
            .err()
            .expect("Connecting with wrong credentials must fail");
        assert_eq!(DatabaseError::from(error).kind(), ErrorKind::Connection);
    }

    #[tokio::test]
    async fn wrong_url() {
        init_logs();
        silent_logs! {
            let error = MySqlConnection::connect("sqlite://some_value".into())
                .await
                .err()
                .expect("A sqlite url is not a mysql url");
            assert_eq!(DatabaseError::from(error).kind(), ErrorKind::Config);
        }
    }
}
