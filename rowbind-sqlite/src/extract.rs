use anyhow::anyhow;
use libsqlite3_sys::*;
use rowbind_core::{Value, to_canonical_text};
use rust_decimal::Decimal;
use std::{
    ffi::{CStr, c_int},
    slice,
    str::FromStr,
};
use time::{Date, PrimitiveDateTime, Time, format_description::BorrowedFormatItem, macros::format_description};
use uuid::Uuid;

const DATE: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");
const TIME: &[BorrowedFormatItem<'_>] =
    format_description!("[hour]:[minute]:[second][optional [.[subsecond]]]");
const TIMESTAMP: &[BorrowedFormatItem<'_>] = format_description!(
    "[year]-[month]-[day] [hour]:[minute]:[second][optional [.[subsecond]]]"
);

/// Declared column type, used to restore values sqlite stores as text or numbers.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DeclaredType {
    #[default]
    Other,
    Date,
    Time,
    Timestamp,
    Decimal,
    Uuid,
}

impl DeclaredType {
    pub(crate) fn from_declaration(declaration: &str) -> Self {
        let declaration = declaration.trim().to_ascii_lowercase();
        match declaration.as_str() {
            "date" => DeclaredType::Date,
            "time" => DeclaredType::Time,
            "timestamp" | "datetime" => DeclaredType::Timestamp,
            "uuid" => DeclaredType::Uuid,
            v if v.starts_with("decimal") || v.starts_with("numeric") => DeclaredType::Decimal,
            _ => DeclaredType::Other,
        }
    }

    /// Turn a storage value into the richer value its declaration describes, or leave it as is.
    pub(crate) fn refine(self, value: Value) -> Value {
        let refined = match (self, &value) {
            (DeclaredType::Date, Value::Varchar(v)) => Date::parse(v, DATE).ok().map(Value::Date),
            (DeclaredType::Time, Value::Varchar(v)) => Time::parse(v, TIME).ok().map(Value::Time),
            (DeclaredType::Timestamp, Value::Varchar(v)) => PrimitiveDateTime::parse(v, TIMESTAMP)
                .ok()
                .map(Value::Timestamp),
            (DeclaredType::Decimal, Value::Int64(..) | Value::Float64(..) | Value::Varchar(..)) => {
                Decimal::from_str(&to_canonical_text(&value))
                    .ok()
                    .map(Value::Decimal)
            }
            (DeclaredType::Uuid, Value::Varchar(v)) => Uuid::parse_str(v).ok().map(Value::Uuid),
            (DeclaredType::Uuid, Value::Blob(v)) => Uuid::from_slice(v).ok().map(Value::Uuid),
            _ => None,
        };
        refined.unwrap_or(value)
    }
}

unsafe fn column_bytes<'a>(ptr: *const u8, len: c_int) -> &'a [u8] {
    if ptr.is_null() || len <= 0 {
        &[]
    } else {
        unsafe { slice::from_raw_parts(ptr, len as usize) }
    }
}

pub(crate) fn extract_value(
    statement: *mut sqlite3_stmt,
    index: c_int,
    declared: DeclaredType,
) -> anyhow::Result<Value> {
    unsafe {
        let column_type = sqlite3_column_type(statement, index);
        let value = match column_type {
            SQLITE_NULL => Value::Null,
            SQLITE_INTEGER => Value::Int64(sqlite3_column_int64(statement, index)),
            SQLITE_FLOAT => Value::Float64(sqlite3_column_double(statement, index)),
            SQLITE_BLOB => {
                let ptr = sqlite3_column_blob(statement, index) as *const u8;
                let len = sqlite3_column_bytes(statement, index);
                Value::Blob(column_bytes(ptr, len).into())
            }
            SQLITE_TEXT => {
                let ptr = sqlite3_column_text(statement, index);
                let len = sqlite3_column_bytes(statement, index);
                Value::Varchar(String::from_utf8_lossy(column_bytes(ptr, len)).into_owned())
            }
            _ => return Err(anyhow!("Unexpected column type {}", column_type)),
        };
        Ok(declared.refine(value))
    }
}

pub(crate) fn extract_name(statement: *mut sqlite3_stmt, index: c_int) -> anyhow::Result<String> {
    unsafe {
        let name = sqlite3_column_name(statement, index);
        if name.is_null() {
            return Err(anyhow!("Could not read the name of column {}", index));
        }
        Ok(CStr::from_ptr(name).to_string_lossy().into_owned())
    }
}

pub(crate) fn extract_declared(statement: *mut sqlite3_stmt, index: c_int) -> DeclaredType {
    unsafe {
        let declaration = sqlite3_column_decltype(statement, index);
        if declaration.is_null() {
            return DeclaredType::Other;
        }
        DeclaredType::from_declaration(&CStr::from_ptr(declaration).to_string_lossy())
    }
}
