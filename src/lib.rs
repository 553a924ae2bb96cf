//! Rowbind maps SQL rows onto plain Rust structs.
//!
//! Declare the column each field reads from, derive [`Record`] and hand the struct to a
//! [`Database`]:
//!
//! ```rust,ignore
//! use rowbind::{Database, Nullable, Record};
//!
//! #[derive(Record, Default)]
//! struct Product {
//!     #[rowbind(name = "id")]
//!     id: i64,
//!     #[rowbind(name = "name")]
//!     name: String,
//!     #[rowbind(name = "price")]
//!     price: f64,
//!     #[rowbind(name = "discount")]
//!     discount: Nullable<Option<f64>>,
//!     cached_label: String,
//! }
//!
//! let id = database.insert(&product)?;
//! let mut found = Product::default();
//! database.query_one("SELECT * FROM product WHERE id = ?", &mut found, &[id.into()])?;
//! ```
pub use rowbind_core::*;
pub use rowbind_macros::*;
