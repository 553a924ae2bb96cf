use indoc::indoc;
use rowbind::{ConnectionProvider, Database, Error, FieldKind, Nullable, Record};

#[derive(Record, Default, Debug, PartialEq)]
#[table_name("readings")]
struct Reading {
    #[rowbind(name = "id")]
    id: i64,
    #[rowbind(name = "sensor")]
    sensor: String,
    #[rowbind(name = "level")]
    level: Nullable<Option<f64>>,
    #[rowbind(name = "shift")]
    shift: Nullable<i64>,
    #[rowbind(name = "note")]
    note: Option<String>,
}

pub fn nullability<P: ConnectionProvider>(db: &Database<P>) {
    // Setup
    db.exec("DROP TABLE IF EXISTS readings", &[])
        .expect("Failed to drop readings table");
    db.exec(
        indoc! {"
            CREATE TABLE readings (
                id INTEGER PRIMARY KEY,
                sensor TEXT NOT NULL,
                level REAL,
                shift INTEGER,
                note TEXT
            )
        "},
        &[],
    )
    .expect("Failed to create readings table");

    let id = db
        .insert(&Reading {
            sensor: "north".into(),
            level: Nullable::Valid(None),
            shift: Nullable::Valid(-3),
            ..Default::default()
        })
        .expect("Failed to insert the north reading");
    let mut reading = Reading::default();
    db.query_one(
        "SELECT * FROM readings WHERE id = ?",
        &mut reading,
        &[id.into()],
    )
    .expect("Failed to query the north reading");
    assert!(!reading.level.is_valid());
    assert_eq!(reading.shift, Nullable::Valid(-3));
    assert_eq!(reading.note, None);

    let id = db
        .exec_for_id(
            "INSERT INTO readings (sensor, level, note) VALUES (?, ?, ?)",
            &["south".into(), 0.75.into(), "recalibrated".into()],
        )
        .expect("Failed to insert the south reading");
    let mut reading = Reading::default();
    let result = db.query_one(
        "SELECT * FROM readings WHERE id = ?",
        &mut reading,
        &[id.into()],
    );
    // `shift` is NULL but its field cannot hold NULL
    let Err(Error::NullToNonNullable { column, kind }) = result else {
        panic!("Expected a NULL to non nullable error, got {:?}", result);
    };
    assert_eq!(column, "shift");
    assert_eq!(kind, FieldKind::SignedInt(64));

    let mut reading = Reading::default();
    db.query_one(
        "SELECT id, sensor, level, note FROM readings WHERE id = ?",
        &mut reading,
        &[id.into()],
    )
    .expect("Failed to query the south reading without shift");
    assert_eq!(reading.level, Nullable::Valid(Some(0.75)));
    assert!(!reading.shift.is_valid());
    assert_eq!(reading.note.as_deref(), Some("recalibrated"));
}
