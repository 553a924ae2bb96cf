use indoc::indoc;
use rowbind::{ConnectionProvider, Database, Record, Value};
use rust_decimal::Decimal;
use time::{Date, Month, PrimitiveDateTime, Time};

#[derive(Record, Default, Debug, PartialEq, Clone)]
#[table_name("products")]
struct Product {
    #[rowbind(name = "id")]
    id: u64,
    #[rowbind(name = "name")]
    name: String,
    #[rowbind(name = "price")]
    price: Decimal,
    #[rowbind(name = "available")]
    available: bool,
    #[rowbind(name = "added_on")]
    added_on: Option<PrimitiveDateTime>,
    /// Only used by the application.
    cart_quantity: u32,
}

#[derive(Record, Default, Debug)]
struct Summary {
    #[rowbind(name = "total")]
    total: u32,
    #[rowbind(name = "value")]
    value: f64,
}

pub fn shopping<P: ConnectionProvider>(db: &Database<P>) {
    // Setup
    db.exec("DROP TABLE IF EXISTS products", &[])
        .expect("Failed to drop products table");
    db.exec(
        indoc! {"
            CREATE TABLE products (
                id INTEGER PRIMARY KEY,
                name VARCHAR(255) NOT NULL,
                price DECIMAL(10, 2) NOT NULL,
                available BOOLEAN NOT NULL,
                added_on TIMESTAMP
            )
        "},
        &[],
    )
    .expect("Failed to create products table");

    let added_on = PrimitiveDateTime::new(
        Date::from_calendar_date(2025, Month::June, 24).unwrap(),
        Time::from_hms(10, 30, 7).unwrap(),
    );
    let products = [
        Product {
            name: "Smartphone".into(),
            price: Decimal::new(49999, 2),
            available: true,
            added_on: Some(added_on),
            cart_quantity: 2,
            ..Default::default()
        },
        Product {
            name: "Laptop".into(),
            price: Decimal::new(129900, 2),
            available: false,
            added_on: None,
            ..Default::default()
        },
        Product {
            name: "Headphones".into(),
            price: Decimal::new(8950, 2),
            available: true,
            added_on: Some(added_on),
            ..Default::default()
        },
    ];
    let mut ids = Vec::new();
    for product in &products {
        ids.push(db.insert(product).expect("Failed to insert a product") as u64);
    }
    assert_eq!(ids.len(), 3);
    assert!(ids.windows(2).all(|v| v[0] < v[1]));

    // Query all
    let found = db
        .query_all::<Product>("SELECT * FROM products ORDER BY id", &[])
        .expect("Failed to query the products");
    assert_eq!(found.len(), 3);
    for ((found, expected), id) in found.iter().zip(&products).zip(&ids) {
        assert_eq!(found.id, *id);
        assert_eq!(found.name, expected.name);
        assert_eq!(found.price, expected.price);
        assert_eq!(found.available, expected.available);
        assert_eq!(found.added_on, expected.added_on);
        assert_eq!(found.cart_quantity, 0);
    }

    // Streaming
    let mut rows = db
        .query_rows(
            "SELECT name, price FROM products WHERE available = ? ORDER BY price",
            &[true.into()],
        )
        .expect("Failed to query the available products");
    assert_eq!(rows.column_names(), ["name", "price"]);
    let mut names = Vec::new();
    let mut product = Product::default();
    while rows.next_into(&mut product).expect("Failed to scan a product") {
        names.push(product.name.clone());
    }
    drop(rows);
    assert_eq!(names, ["Headphones", "Smartphone"]);

    // Update
    db.exec(
        "UPDATE products SET available = ?, price = ? WHERE name = ?",
        &[true.into(), Value::Decimal(Decimal::new(119900, 2)), "Laptop".into()],
    )
    .expect("Failed to update the laptop");
    let mut laptop = Product::default();
    db.query_one(
        "SELECT * FROM products WHERE name = ?",
        &mut laptop,
        &["Laptop".into()],
    )
    .expect("Failed to query the laptop");
    assert!(laptop.available);
    assert_eq!(laptop.price, Decimal::new(119900, 2));

    // Raw insert
    let id = db
        .exec_for_id(
            "INSERT INTO products (name, price, available) VALUES (?, ?, ?)",
            &["Charger".into(), Value::Decimal(Decimal::new(1999, 2)), false.into()],
        )
        .expect("Failed to insert the charger");
    assert!(id as u64 > ids[2]);

    // Aggregates
    let mut summary = Summary::default();
    db.query_one(
        "SELECT COUNT(*) AS total, SUM(price) AS value FROM products",
        &mut summary,
        &[],
    )
    .expect("Failed to compute the summary");
    assert_eq!(summary.total, 4);
    assert!((summary.value - (499.99 + 1199.0 + 89.5 + 19.99)).abs() < 1e-6);
}
