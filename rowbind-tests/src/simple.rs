use indoc::indoc;
use rowbind::{ConnectionProvider, Database, Record};
use time::Time;
use uuid::Uuid;

pub fn simple<P: ConnectionProvider>(db: &Database<P>) {
    #[derive(Record, Default, Debug, PartialEq)]
    struct SimpleFields {
        #[rowbind(name = "id")]
        id: i64,
        #[rowbind(name = "alpha")]
        alpha: Option<u8>,
        #[rowbind(name = "bravo")]
        bravo: i32,
        #[rowbind(name = "charlie")]
        charlie: f32,
        #[rowbind(name = "delta")]
        delta: String,
        #[rowbind(name = "echo")]
        echo: Option<Uuid>,
        #[rowbind(name = "foxtrot")]
        foxtrot: Option<Time>,
        #[rowbind(name = "golf")]
        golf: Vec<u8>,
        #[rowbind(name = "hotel")]
        hotel: bool,
    }

    // Setup
    db.exec("DROP TABLE IF EXISTS simple_fields", &[])
        .expect("Failed to drop simple_fields table");
    db.exec(
        indoc! {"
            CREATE TABLE simple_fields (
                id INTEGER PRIMARY KEY,
                alpha INTEGER,
                bravo INTEGER NOT NULL,
                charlie REAL NOT NULL,
                delta TEXT NOT NULL,
                echo UUID,
                foxtrot TIME,
                golf BLOB NOT NULL,
                hotel BOOLEAN NOT NULL
            )
        "},
        &[],
    )
    .expect("Failed to create simple_fields table");

    // Simple 1
    let entity = SimpleFields {
        id: 0,
        alpha: None,
        bravo: 777,
        charlie: -2.25,
        delta: "Hello world!".into(),
        echo: None,
        foxtrot: Time::from_hms(12, 0, 10).ok(),
        golf: vec![0, 1, 2, 255],
        hotel: true,
    };
    let id = db.insert(&entity).expect("Failed to insert simple 1");
    let mut found = SimpleFields::default();
    db.query_one(
        "SELECT * FROM simple_fields WHERE id = ?",
        &mut found,
        &[id.into()],
    )
    .expect("Failed to query simple 1");
    assert_eq!(found.id, id);
    assert_eq!(found.alpha, None);
    assert_eq!(found.bravo, 777);
    assert_eq!(found.charlie, -2.25);
    assert_eq!(found.delta, "Hello world!");
    assert_eq!(found.echo, None);
    assert_eq!(found.foxtrot, Some(Time::from_hms(12, 0, 10).unwrap()));
    assert_eq!(found.golf, [0, 1, 2, 255]);
    assert!(found.hotel);

    // Simple 2
    let echo = Uuid::parse_str("5e915574-bb30-4430-98cf-c5854f61fbbd").unwrap();
    let entity = SimpleFields {
        id: 0,
        alpha: Some(255),
        bravo: i32::MIN,
        charlie: 0.5,
        delta: String::new(),
        echo: Some(echo),
        foxtrot: None,
        golf: Vec::new(),
        hotel: false,
    };
    let id = db
        .insert_new("simple_fields", &entity)
        .expect("Failed to insert simple 2");
    let mut found = SimpleFields::default();
    db.query_one(
        "SELECT * FROM simple_fields WHERE id = ?",
        &mut found,
        &[id.into()],
    )
    .expect("Failed to query simple 2");
    assert_eq!(found, SimpleFields { id, ..entity });

    let all = db
        .query_all::<SimpleFields>("SELECT * FROM simple_fields ORDER BY id", &[])
        .expect("Failed to query every simple_fields row");
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].delta, "Hello world!");
    assert_eq!(all[1].echo, Some(echo));
}
