use crate::silent_logs;
use rowbind::{CoercionCause, ConnectionProvider, Database, Error, Outcome, Record};

#[derive(Record, Default, Debug)]
struct Measure {
    #[rowbind(name = "id")]
    id: i64,
    #[rowbind(name = "small")]
    small: i8,
    #[rowbind(name = "label")]
    label: String,
}

pub fn failures<P: ConnectionProvider>(db: &Database<P>) {
    let mut measure = Measure::default();

    // No rows
    let result = db.query_one("SELECT 1 AS id WHERE 1 = 0", &mut measure, &[]);
    assert!(matches!(result, Err(Error::NoRows)), "{:?}", result);

    // Unknown columns are ignored
    db.query_one(
        "SELECT 5 AS id, 'five' AS label, 'ignored' AS extra",
        &mut measure,
        &[],
    )
    .expect("Unknown columns should be ignored");
    assert_eq!(measure.id, 5);
    assert_eq!(measure.label, "five");

    // Values without conversion are skipped
    let mut rows = db
        .query_rows("SELECT 42 AS label", &[])
        .expect("Failed to run the query");
    assert!(rows.advance().unwrap());
    let report = rowbind::scan_report(rows.column_names(), rows.values(), &mut measure)
        .expect("Skipped values are not an error");
    assert_eq!(report.outcome("label"), Some(Outcome::Skipped));
    assert_eq!(measure.label, "five");
    drop(rows);

    // Out of range
    let result = db.query_one("SELECT 300 AS small", &mut measure, &[]);
    let Err(Error::Coercion { column, source }) = result else {
        panic!("Expected a coercion error, got {:?}", result);
    };
    assert_eq!(column, "small");
    assert_eq!(source.cause, CoercionCause::Range);
    assert_eq!(source.raw_text, "300");

    // Invalid syntax
    let result = db.query_one("SELECT 'abc' AS small", &mut measure, &[]);
    assert!(
        matches!(&result, Err(Error::Coercion { source, .. }) if source.cause == CoercionCause::Syntax),
        "{:?}",
        result
    );

    silent_logs! {
        // Broken statements
        let result = db.exec("SELEC 1", &[]);
        assert!(matches!(result, Err(Error::StatementPrepareFailure { .. })), "{:?}", result);
        let result = db.exec("INSERT INTO missing_table VALUES (1)", &[]);
        assert!(matches!(result, Err(Error::StatementPrepareFailure { .. })), "{:?}", result);

        // Wrong number of arguments
        let result = db.exec("SELECT ?", &[]);
        assert!(matches!(result, Err(Error::ExecutionFailure(..))), "{:?}", result);

        // Failing statement
        db.exec("DROP TABLE IF EXISTS unique_codes", &[]).unwrap();
        db.exec("CREATE TABLE unique_codes (code TEXT UNIQUE)", &[]).unwrap();
        db.exec("INSERT INTO unique_codes VALUES (?)", &["A1".into()]).unwrap();
        let result = db.exec("INSERT INTO unique_codes VALUES (?)", &["A1".into()]);
        assert!(matches!(result, Err(Error::ExecutionFailure(..))), "{:?}", result);
    }
}
