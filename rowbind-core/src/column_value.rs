use crate::{
    CoercionCause, FieldError, FieldKind, Nullable, Value, clone_bytes, coerce::coercion_error,
    to_bool, to_canonical_text, to_float, to_signed_int, to_unsigned_int,
};
use rust_decimal::Decimal;
use std::any;
use time::{Date, PrimitiveDateTime, Time};
use uuid::Uuid;

/// Result of assigning one raw value to one record field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The field now holds the (possibly empty) value of the column.
    Assigned,
    /// No conversion exists between the raw value and the field, the field was left untouched.
    Skipped,
    /// The column has no field in the record.
    Unmapped,
}

/// A type that can be the destination of a mapped column.
///
/// Implementations define the coercion policy of their [`FieldKind`]:
/// - integers, floats, `bool` and `String` reject NULL and parse the canonical text of the raw
///   value at their exact width;
/// - `Option<T>` maps NULL to `None` and otherwise applies the policy of `T`;
/// - [`Nullable<T>`] applies the policy of `T` and records that a value was assigned;
/// - byte sequences, decimals, temporal types and `Uuid` are only assigned from a raw value of
///   the very same type, anything else is skipped.
pub trait ColumnValue {
    fn kind() -> FieldKind
    where
        Self: Sized;

    /// Builds a value from a raw driver value. `Ok(None)` means the raw value has no conversion
    /// to this type and must be skipped.
    fn decode(raw: &Value) -> Result<Option<Self>, FieldError>
    where
        Self: Sized;

    /// Overwrites `self` with the decoded raw value.
    fn assign(&mut self, raw: &Value) -> Result<Outcome, FieldError>;

    /// Value handed to the driver as a statement argument.
    fn to_value(&self) -> Value;
}

fn assign_decoded<T: ColumnValue>(slot: &mut T, raw: &Value) -> Result<Outcome, FieldError> {
    Ok(match T::decode(raw)? {
        Some(v) => {
            *slot = v;
            Outcome::Assigned
        }
        None => Outcome::Skipped,
    })
}

macro_rules! impl_column_value {
    ($source:ty, $kind:expr, |$raw:ident| $decode:expr, |$this:ident| $to_value:expr $(,)?) => {
        impl ColumnValue for $source {
            fn kind() -> FieldKind {
                $kind
            }
            fn decode($raw: &Value) -> Result<Option<Self>, FieldError> {
                if $raw.is_null() {
                    return Err(FieldError::NullToNonNullable(Self::kind()));
                }
                $decode
            }
            fn assign(&mut self, raw: &Value) -> Result<Outcome, FieldError> {
                assign_decoded(self, raw)
            }
            fn to_value(&self) -> Value {
                let $this = self;
                $to_value
            }
        }
    };
}

macro_rules! impl_signed {
    ($($source:ty),+) => {
        $(impl_column_value!(
            $source,
            FieldKind::SignedInt(<$source>::BITS),
            |raw| Ok(Some(to_signed_int(raw, <$source>::BITS)? as $source)),
            |v| Value::from(*v),
        );)+
    };
}
impl_signed!(i8, i16, i32, i64, isize);

macro_rules! impl_unsigned {
    ($($source:ty),+) => {
        $(impl_column_value!(
            $source,
            FieldKind::UnsignedInt(<$source>::BITS),
            |raw| Ok(Some(to_unsigned_int(raw, <$source>::BITS)? as $source)),
            |v| Value::from(*v),
        );)+
    };
}
impl_unsigned!(u8, u16, u32, u64, usize);

impl_column_value!(
    f32,
    FieldKind::Float(32),
    |raw| Ok(Some(to_float(raw, 32)? as f32)),
    |v| Value::Float32(*v),
);
impl_column_value!(
    f64,
    FieldKind::Float(64),
    |raw| Ok(Some(to_float(raw, 64)?)),
    |v| Value::Float64(*v),
);
impl_column_value!(
    bool,
    FieldKind::Boolean,
    |raw| Ok(Some(to_bool(raw)?)),
    |v| Value::Boolean(*v),
);
impl_column_value!(
    String,
    FieldKind::Text,
    |raw| Ok(match raw {
        Value::Varchar(..) | Value::Blob(..) => Some(to_canonical_text(raw).into_owned()),
        _ => None,
    }),
    |v| Value::Varchar(v.clone()),
);

macro_rules! impl_opaque {
    ($source:ty, $kind:expr, $variant:path, |$raw:ident| $decode:expr $(,)?) => {
        impl ColumnValue for $source {
            fn kind() -> FieldKind {
                $kind
            }
            fn decode($raw: &Value) -> Result<Option<Self>, FieldError> {
                Ok($decode)
            }
            fn assign(&mut self, raw: &Value) -> Result<Outcome, FieldError> {
                assign_decoded(self, raw)
            }
            fn to_value(&self) -> Value {
                $variant(self.clone().into())
            }
        }
    };
}
impl_opaque!(Box<[u8]>, FieldKind::Bytes, Value::Blob, |raw| match raw {
    Value::Blob(v) => clone_bytes(Some(&v[..])),
    _ => None,
});
impl_opaque!(Vec<u8>, FieldKind::Bytes, Value::Blob, |raw| match raw {
    Value::Blob(v) => clone_bytes(Some(&v[..])).map(Into::into),
    _ => None,
});

macro_rules! impl_same_variant {
    ($($source:ty => $variant:path),+ $(,)?) => {
        $(impl_opaque!(
            $source,
            FieldKind::Opaque(any::type_name::<$source>()),
            $variant,
            |raw| match raw {
                $variant(v) => Some(v.clone()),
                _ => None,
            },
        );)+
    };
}
impl_same_variant!(
    Decimal => Value::Decimal,
    Date => Value::Date,
    Time => Value::Time,
    PrimitiveDateTime => Value::Timestamp,
    Uuid => Value::Uuid,
);

/// A `Value` field receives the raw value as is.
impl ColumnValue for Value {
    fn kind() -> FieldKind {
        FieldKind::Opaque(any::type_name::<Value>())
    }
    fn decode(raw: &Value) -> Result<Option<Self>, FieldError> {
        Ok(Some(raw.clone()))
    }
    fn assign(&mut self, raw: &Value) -> Result<Outcome, FieldError> {
        assign_decoded(self, raw)
    }
    fn to_value(&self) -> Value {
        self.clone()
    }
}

impl<T: ColumnValue> ColumnValue for Option<T> {
    fn kind() -> FieldKind {
        FieldKind::Optional(T::kind().into())
    }
    fn decode(raw: &Value) -> Result<Option<Self>, FieldError> {
        if raw.is_null() {
            return Ok(Some(None));
        }
        match T::decode(raw)? {
            Some(v) => Ok(Some(Some(v))),
            None => Err(coercion_error(
                raw,
                &to_canonical_text(raw),
                Self::kind(),
                CoercionCause::Unsupported,
            )
            .into()),
        }
    }
    fn assign(&mut self, raw: &Value) -> Result<Outcome, FieldError> {
        assign_decoded(self, raw)
    }
    fn to_value(&self) -> Value {
        match self {
            Some(v) => v.to_value(),
            None => Value::Null,
        }
    }
}

impl<T: ColumnValue> ColumnValue for Nullable<T> {
    fn kind() -> FieldKind {
        FieldKind::Nullable(T::kind().into())
    }
    fn decode(raw: &Value) -> Result<Option<Self>, FieldError> {
        if raw.is_null() && T::kind().is_optional() {
            return Ok(Some(Nullable::Null));
        }
        Ok(T::decode(raw)?.map(Nullable::Valid))
    }
    fn assign(&mut self, raw: &Value) -> Result<Outcome, FieldError> {
        assign_decoded(self, raw)
    }
    fn to_value(&self) -> Value {
        match self {
            Nullable::Valid(v) => v.to_value(),
            Nullable::Null => Value::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CoercionError;

    #[test]
    fn integers() {
        let mut v = 0i16;
        assert_eq!(v.assign(&Value::Varchar("-300".into())), Ok(Outcome::Assigned));
        assert_eq!(v, -300);
        assert_eq!(v.assign(&Value::Int64(12)), Ok(Outcome::Assigned));
        assert_eq!(v, 12);
        assert_eq!(
            v.assign(&Value::Null),
            Err(FieldError::NullToNonNullable(FieldKind::SignedInt(16)))
        );
        assert_eq!(v, 12);
        assert!(matches!(
            v.assign(&Value::Int64(40000)),
            Err(FieldError::Coercion(CoercionError {
                cause: CoercionCause::Range,
                ..
            }))
        ));
        let mut u = 0u8;
        assert_eq!(u.assign(&Value::Blob(b"200".as_slice().into())), Ok(Outcome::Assigned));
        assert_eq!(u, 200);
        assert_eq!(u64::kind(), FieldKind::UnsignedInt(64));
    }

    #[test]
    fn floats_and_bools() {
        let mut f = 0f32;
        assert_eq!(f.assign(&Value::Float64(2.5)), Ok(Outcome::Assigned));
        assert_eq!(f, 2.5);
        let mut b = false;
        assert_eq!(b.assign(&Value::Varchar("t".into())), Ok(Outcome::Assigned));
        assert!(b);
        assert_eq!(
            b.assign(&Value::Null),
            Err(FieldError::NullToNonNullable(FieldKind::Boolean))
        );
    }

    #[test]
    fn strings() {
        let mut s = String::from("before");
        assert_eq!(s.assign(&Value::Blob(b"raw".as_slice().into())), Ok(Outcome::Assigned));
        assert_eq!(s, "raw");
        assert_eq!(s.assign(&Value::Int64(5)), Ok(Outcome::Skipped));
        assert_eq!(s, "raw");
        assert_eq!(
            s.assign(&Value::Null),
            Err(FieldError::NullToNonNullable(FieldKind::Text))
        );
    }

    #[test]
    fn optional() {
        let mut v: Option<i32> = Some(3);
        assert_eq!(v.assign(&Value::Null), Ok(Outcome::Assigned));
        assert_eq!(v, None);
        assert_eq!(v.assign(&Value::Varchar("41".into())), Ok(Outcome::Assigned));
        assert_eq!(v, Some(41));
        assert!(v.assign(&Value::Varchar("x".into())).is_err());
        let mut u: Option<Uuid> = None;
        let Err(FieldError::Coercion(error)) = u.assign(&Value::Varchar("nope".into())) else {
            panic!("Expected a coercion error");
        };
        assert_eq!(error.cause, CoercionCause::Unsupported);
        assert_eq!(error.target, <Option<Uuid>>::kind());
        assert_eq!(Some(7i64).to_value(), Value::Int64(7));
        assert_eq!(None::<i64>.to_value(), Value::Null);
    }

    #[test]
    fn nullable() {
        let mut v: Nullable<Option<i64>> = Nullable::Null;
        assert_eq!(v.assign(&Value::Int64(9)), Ok(Outcome::Assigned));
        assert_eq!(v, Nullable::Valid(Some(9)));
        assert!(v.is_valid());
        assert_eq!(v.assign(&Value::Null), Ok(Outcome::Assigned));
        assert!(!v.is_valid());

        let mut v: Nullable<f64> = Nullable::Null;
        assert_eq!(v.assign(&Value::Varchar("1.25".into())), Ok(Outcome::Assigned));
        assert_eq!(v, Nullable::Valid(1.25));
        assert_eq!(
            v.assign(&Value::Null),
            Err(FieldError::NullToNonNullable(FieldKind::Float(64)))
        );
        assert_eq!(v, Nullable::Valid(1.25));

        let mut v: Nullable<String> = Nullable::Null;
        assert_eq!(v.assign(&Value::Int32(1)), Ok(Outcome::Skipped));
        assert!(!v.is_valid());
    }

    #[test]
    fn opaque() {
        let mut bytes: Vec<u8> = Vec::new();
        let raw = Value::Blob([1u8, 2].as_slice().into());
        assert_eq!(bytes.assign(&raw), Ok(Outcome::Assigned));
        assert_eq!(bytes, vec![1, 2]);
        let Value::Blob(source) = &raw else {
            unreachable!()
        };
        assert_ne!(bytes.as_ptr(), source.as_ptr());
        assert_eq!(bytes.assign(&Value::Varchar("12".into())), Ok(Outcome::Skipped));
        assert_eq!(bytes.assign(&Value::Null), Ok(Outcome::Skipped));
        assert_eq!(bytes, vec![1, 2]);

        let id = Uuid::from_u128(0x5e915574_bb30_4430_98cf_c5854f61fbbd);
        let mut v = Uuid::nil();
        assert_eq!(v.assign(&Value::Uuid(id)), Ok(Outcome::Assigned));
        assert_eq!(v, id);
        assert_eq!(v.assign(&Value::Varchar(id.to_string())), Ok(Outcome::Skipped));

        let mut any = Value::Null;
        assert_eq!(any.assign(&Value::Float32(1.5)), Ok(Outcome::Assigned));
        assert_eq!(any, Value::Float32(1.5));
    }
}
