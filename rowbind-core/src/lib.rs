mod coerce;
mod column_map;
mod column_value;
mod database;
mod driver;
mod error;
mod field;
mod insert;
mod nullable;
mod record;
mod scan;
mod sql_writer;
mod util;
mod value;

pub use ::anyhow::Context;
pub use coerce::*;
pub use column_map::*;
pub use column_value::*;
pub use database::*;
pub use driver::*;
pub use error::*;
pub use field::*;
pub use insert::*;
pub use nullable::*;
pub use record::*;
pub use scan::*;
pub use sql_writer::*;
pub use util::*;
pub use value::*;
