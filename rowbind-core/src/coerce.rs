//! Conversions between raw driver values, their canonical text and typed scalars.
//!
//! Every typed conversion goes through the canonical text of the raw value, so an integer column
//! returned as `Varchar("42")` by one driver and as `Int64(42)` by another decodes the same way.
use crate::{CoercionCause, CoercionError, FieldKind, Value};
use atoi::{FromRadix10Checked, FromRadix10SignedChecked};
use std::borrow::Cow;

/// Renders a raw value as plain text using its narrowest lossless form.
///
/// Integers are written in base 10, floats in the shortest representation that parses back to
/// the same value (integral floats have no fractional part: `3` rather than `3.0`), booleans as
/// `true`/`false`. Strings are returned verbatim and byte sequences are decoded as UTF-8 without
/// validation errors (invalid sequences become U+FFFD).
pub fn to_canonical_text(value: &Value) -> Cow<'_, str> {
    match value {
        Value::Null => Cow::Borrowed("NULL"),
        Value::Boolean(v) => Cow::Borrowed(if *v { "true" } else { "false" }),
        Value::Int8(v) => integer_text(*v),
        Value::Int16(v) => integer_text(*v),
        Value::Int32(v) => integer_text(*v),
        Value::Int64(v) => integer_text(*v),
        Value::UInt8(v) => integer_text(*v),
        Value::UInt16(v) => integer_text(*v),
        Value::UInt32(v) => integer_text(*v),
        Value::UInt64(v) => integer_text(*v),
        Value::Float32(v) => float_text(*v),
        Value::Float64(v) => float_text(*v),
        Value::Varchar(v) => Cow::Borrowed(v),
        Value::Blob(v) => String::from_utf8_lossy(v),
        Value::Decimal(v) => Cow::Owned(v.to_string()),
        Value::Date(v) => Cow::Owned(v.to_string()),
        Value::Time(v) => Cow::Owned(v.to_string()),
        Value::Timestamp(v) => Cow::Owned(v.to_string()),
        Value::Uuid(v) => Cow::Owned(v.to_string()),
    }
}

fn integer_text<I: itoa::Integer>(value: I) -> Cow<'static, str> {
    Cow::Owned(itoa::Buffer::new().format(value).to_owned())
}

fn float_text<F: ryu::Float>(value: F) -> Cow<'static, str> {
    let mut buffer = ryu::Buffer::new();
    let text = buffer.format(value);
    Cow::Owned(text.strip_suffix(".0").unwrap_or(text).to_owned())
}

/// Parses a base 10 signed integer that must fit in `bits` bits.
pub fn parse_signed(text: &str, bits: u32) -> Result<i64, CoercionCause> {
    let digits = text.strip_prefix(['+', '-']).unwrap_or(text);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CoercionCause::Syntax);
    }
    let (value, used) = i64::from_radix_10_signed_checked(text.as_bytes());
    let value = match value {
        Some(v) if used == text.len() => v,
        _ => return Err(CoercionCause::Range),
    };
    let bits = bits.clamp(1, 64);
    let min = -(1i128 << (bits - 1));
    let max = (1i128 << (bits - 1)) - 1;
    if (value as i128) < min || (value as i128) > max {
        return Err(CoercionCause::Range);
    }
    Ok(value)
}

/// Parses a base 10 unsigned integer (no sign allowed) that must fit in `bits` bits.
pub fn parse_unsigned(text: &str, bits: u32) -> Result<u64, CoercionCause> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CoercionCause::Syntax);
    }
    let (value, used) = u64::from_radix_10_checked(text.as_bytes());
    let value = match value {
        Some(v) if used == text.len() => v,
        _ => return Err(CoercionCause::Range),
    };
    let bits = bits.clamp(1, 64);
    if (value as u128) > (1u128 << bits) - 1 {
        return Err(CoercionCause::Range);
    }
    Ok(value)
}

/// Parses a decimal floating point literal, rounding to `f32` when `bits` is 32.
///
/// A finite literal that overflows the target width is a range error, while explicit
/// infinities (`inf`, `-Infinity`) are accepted.
pub fn parse_float(text: &str, bits: u32) -> Result<f64, CoercionCause> {
    let value = if bits == 32 {
        fast_float::parse::<f32, _>(text).map(f64::from)
    } else {
        fast_float::parse::<f64, _>(text)
    }
    .map_err(|_| CoercionCause::Syntax)?;
    if value.is_infinite() {
        let literal = text.trim_start_matches(['+', '-']);
        if !literal
            .get(..3)
            .is_some_and(|v| v.eq_ignore_ascii_case("inf"))
        {
            return Err(CoercionCause::Range);
        }
    }
    Ok(value)
}

/// Parses the boolean forms `1 t T TRUE true True` and `0 f F FALSE false False`.
pub fn parse_bool(text: &str) -> Result<bool, CoercionCause> {
    match text {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        _ => Err(CoercionCause::Syntax),
    }
}

pub fn to_signed_int(raw: &Value, bits: u32) -> Result<i64, CoercionError> {
    let text = to_canonical_text(raw);
    parse_signed(&text, bits)
        .map_err(|cause| coercion_error(raw, &text, FieldKind::SignedInt(bits), cause))
}

pub fn to_unsigned_int(raw: &Value, bits: u32) -> Result<u64, CoercionError> {
    let text = to_canonical_text(raw);
    parse_unsigned(&text, bits)
        .map_err(|cause| coercion_error(raw, &text, FieldKind::UnsignedInt(bits), cause))
}

pub fn to_float(raw: &Value, bits: u32) -> Result<f64, CoercionError> {
    let text = to_canonical_text(raw);
    parse_float(&text, bits).map_err(|cause| coercion_error(raw, &text, FieldKind::Float(bits), cause))
}

pub fn to_bool(raw: &Value) -> Result<bool, CoercionError> {
    let text = to_canonical_text(raw);
    parse_bool(&text).map_err(|cause| coercion_error(raw, &text, FieldKind::Boolean, cause))
}

/// Independent copy of a byte sequence, so a record never aliases a driver buffer.
pub fn clone_bytes(bytes: Option<&[u8]>) -> Option<Box<[u8]>> {
    bytes.map(Into::into)
}

pub(crate) fn coercion_error(
    raw: &Value,
    text: &str,
    target: FieldKind,
    cause: CoercionCause,
) -> CoercionError {
    CoercionError {
        raw_type: raw.type_name(),
        raw_text: text.to_owned(),
        target,
        cause,
    }
}
