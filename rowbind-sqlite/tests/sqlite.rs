#[cfg(test)]
mod tests {
    use rowbind::{Database, Outcome, Record, Value, scan_report};
    use rowbind_sqlite::SqliteProvider;
    use rowbind_tests::{execute_tests, init_logs};

    #[test]
    fn sqlite() {
        init_logs();
        let directory = tempfile::tempdir().expect("Failed to create a temporary directory");
        let path = directory.path().join("tests.sqlite");
        assert!(!path.exists(), "Database file should not exist before test");
        let db = Database::new(SqliteProvider::new(format!(
            "sqlite://{}?mode=rwc&busy_timeout=1000",
            path.display()
        )));
        execute_tests(&db);
        assert!(path.exists(), "Database file should be created by the tests");
    }

    #[test]
    fn threads() {
        init_logs();
        let directory = tempfile::tempdir().expect("Failed to create a temporary directory");
        let path = directory.path().join("threads.sqlite");
        let db = Database::new(SqliteProvider::new(format!(
            "sqlite://{}?busy_timeout=5000",
            path.display()
        )));
        db.exec(
            "CREATE TABLE counters (id INTEGER PRIMARY KEY, worker INTEGER NOT NULL)",
            &[],
        )
        .expect("Failed to create counters table");
        std::thread::scope(|scope| {
            for worker in 0..4i64 {
                let db = &db;
                scope.spawn(move || {
                    for _ in 0..10 {
                        db.exec_for_id("INSERT INTO counters (worker) VALUES (?)", &[worker.into()])
                            .expect("Failed to insert a counter");
                    }
                });
            }
        });
        let rows = db
            .query_rows("SELECT COUNT(*) FROM counters", &[])
            .and_then(|mut rows| {
                rows.advance()?;
                Ok(rows.values().to_vec())
            })
            .expect("Failed to count the counters");
        assert_eq!(rows, [rowbind::Value::Int64(40)]);
    }

    #[derive(Record, Default, Debug)]
    struct Entry {
        #[rowbind(name = "day")]
        day: String,
        #[rowbind(name = "amount")]
        amount: String,
        #[rowbind(name = "note")]
        note: String,
    }

    #[test]
    fn declared_types() {
        init_logs();
        let directory = tempfile::tempdir().expect("Failed to create a temporary directory");
        let path = directory.path().join("declared.sqlite");
        let db = Database::new(SqliteProvider::new(format!("sqlite://{}", path.display())));
        db.exec(
            "CREATE TABLE entries (day DATE, amount DECIMAL(10, 2), note TEXT)",
            &[],
        )
        .expect("Failed to create entries table");
        db.exec(
            "INSERT INTO entries (day, amount, note) VALUES (?, ?, ?)",
            &["2024-03-01".into(), "12.50".into(), "paid".into()],
        )
        .expect("Failed to insert an entry");

        let mut rows = db
            .query_rows("SELECT day, amount, note FROM entries", &[])
            .expect("Failed to query the entries");
        assert!(rows.advance().expect("Failed to read a row"));
        assert!(matches!(rows.values()[0], Value::Date(..)));
        assert!(matches!(rows.values()[1], Value::Decimal(..)));
        assert_eq!(rows.values()[2], Value::Varchar("paid".into()));

        // Text fields do not receive the refined values
        let mut entry = Entry {
            day: "unset".into(),
            amount: "unset".into(),
            ..Default::default()
        };
        let report = scan_report(rows.column_names(), rows.values(), &mut entry)
            .expect("Skipped values are not an error");
        assert_eq!(report.outcome("day"), Some(Outcome::Skipped));
        assert_eq!(report.outcome("amount"), Some(Outcome::Skipped));
        assert_eq!(report.outcome("note"), Some(Outcome::Assigned));
        assert_eq!(entry.day, "unset");
        assert_eq!(entry.amount, "unset");
        assert_eq!(entry.note, "paid");

        // Casting keeps the storage value
        drop(rows);
        db.query_one(
            "SELECT CAST(day AS TEXT) AS day, CAST(amount AS TEXT) AS amount FROM entries",
            &mut entry,
            &[],
        )
        .expect("Failed to read the casted entry");
        assert_eq!(entry.day, "2024-03-01");
        assert_eq!(entry.amount, "12.5");
    }
}
