use rust_decimal::Decimal;
use std::fmt::{self, Display};
use time::{Date, PrimitiveDateTime, Time};
use uuid::Uuid;

/// Untyped value produced by a driver cursor for one column of one row, and the form in which
/// statement arguments are handed back to the driver.
///
/// Drivers decide which variant they produce: SQLite only ever yields `Null`, `Int64`,
/// `Float64`, `Varchar` and `Blob`, while other backends may return native temporal or decimal
/// values. The row scanner accepts any of them and coerces according to the destination field.
#[derive(Default, Debug, Clone, PartialEq)]
pub enum Value {
    #[default]
    Null,
    Boolean(bool),
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    UInt8(u8),
    UInt16(u16),
    UInt32(u32),
    UInt64(u64),
    Float32(f32),
    Float64(f64),
    Decimal(Decimal),
    Varchar(String),
    Blob(Box<[u8]>),
    Date(Date),
    Time(Time),
    Timestamp(PrimitiveDateTime),
    Uuid(Uuid),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Name of the variant, used in diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "Null",
            Value::Boolean(..) => "Boolean",
            Value::Int8(..) => "Int8",
            Value::Int16(..) => "Int16",
            Value::Int32(..) => "Int32",
            Value::Int64(..) => "Int64",
            Value::UInt8(..) => "UInt8",
            Value::UInt16(..) => "UInt16",
            Value::UInt32(..) => "UInt32",
            Value::UInt64(..) => "UInt64",
            Value::Float32(..) => "Float32",
            Value::Float64(..) => "Float64",
            Value::Decimal(..) => "Decimal",
            Value::Varchar(..) => "Varchar",
            Value::Blob(..) => "Blob",
            Value::Date(..) => "Date",
            Value::Time(..) => "Time",
            Value::Timestamp(..) => "Timestamp",
            Value::Uuid(..) => "Uuid",
        }
    }

    pub fn same_type(&self, other: &Self) -> bool {
        core::mem::discriminant(self) == core::mem::discriminant(other)
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Varchar(v) => write!(f, "'{}'", v.replace('\'', "''")),
            Value::Blob(v) => {
                f.write_str("X'")?;
                for b in v.iter() {
                    write!(f, "{:02X}", b)?;
                }
                f.write_str("'")
            }
            _ => f.write_str(&crate::to_canonical_text(self)),
        }
    }
}

macro_rules! impl_from {
    ($source:ty, $variant:path) => {
        impl From<$source> for Value {
            fn from(value: $source) -> Self {
                $variant(value)
            }
        }
    };
}
impl_from!(bool, Value::Boolean);
impl_from!(i8, Value::Int8);
impl_from!(i16, Value::Int16);
impl_from!(i32, Value::Int32);
impl_from!(i64, Value::Int64);
impl_from!(u8, Value::UInt8);
impl_from!(u16, Value::UInt16);
impl_from!(u32, Value::UInt32);
impl_from!(u64, Value::UInt64);
impl_from!(f32, Value::Float32);
impl_from!(f64, Value::Float64);
impl_from!(Decimal, Value::Decimal);
impl_from!(String, Value::Varchar);
impl_from!(Box<[u8]>, Value::Blob);
impl_from!(Date, Value::Date);
impl_from!(Time, Value::Time);
impl_from!(PrimitiveDateTime, Value::Timestamp);
impl_from!(Uuid, Value::Uuid);

impl From<isize> for Value {
    fn from(value: isize) -> Self {
        Value::Int64(value as _)
    }
}

impl From<usize> for Value {
    fn from(value: usize) -> Self {
        Value::UInt64(value as _)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Varchar(value.into())
    }
}

impl From<&[u8]> for Value {
    fn from(value: &[u8]) -> Self {
        Value::Blob(value.into())
    }
}

impl From<Vec<u8>> for Value {
    fn from(value: Vec<u8>) -> Self {
        Value::Blob(value.into_boxed_slice())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Value::Null)
    }
}
