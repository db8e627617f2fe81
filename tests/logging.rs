#[cfg(all(test, feature = "sqlite"))]
mod tests {
    use log::{Level, LevelFilter, Log, Metadata, Record};
    use quarry::{ConnectionConfig, ErrorKind, ReturnMode, connect};
    use std::sync::Mutex;

    struct Capture(Mutex<Vec<(Level, String)>>);

    impl Log for Capture {
        fn enabled(&self, _: &Metadata) -> bool {
            true
        }
        fn log(&self, record: &Record) {
            self.0
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .push((record.level(), record.args().to_string()));
        }
        fn flush(&self) {}
    }

    static CAPTURE: Capture = Capture(Mutex::new(Vec::new()));

    #[tokio::test]
    async fn failures_are_logged_as_errors() {
        log::set_logger(&CAPTURE).expect("Only this test installs a logger");
        log::set_max_level(LevelFilter::Trace);
        let database = connect("sqlite", &ConnectionConfig::file(":memory:"))
            .await
            .expect("Could not open the database");
        let error = database
            .query("INSERT INTO xxxx VALUES (1)", (), ReturnMode::RowsAffected)
            .await
            .expect_err("The table does not exist");
        assert_eq!(error.kind(), ErrorKind::MissingTable);
        let records = CAPTURE.0.lock().unwrap_or_else(|e| e.into_inner());
        assert!(
            records
                .iter()
                .any(|(level, message)| *level == Level::Error
                    && message.starts_with("[sqlite] ")
                    && message.contains("no such table")),
            "No error record for the failed query in {:?}",
            records
        );
    }
}
