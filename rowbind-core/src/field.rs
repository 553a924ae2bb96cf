use std::fmt::{self, Display};

/// Name of the column treated as the identity (auto generated primary key).
pub const IDENTITY_COLUMN: &str = "id";

/// Static kind of a record field, it decides which coercion policy the row scanner applies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    /// Signed integer of the given bit width.
    SignedInt(u32),
    /// Unsigned integer of the given bit width.
    UnsignedInt(u32),
    /// Floating point of the given bit width (32 or 64).
    Float(u32),
    Boolean,
    Text,
    Bytes,
    /// `Option<T>`: NULL maps to `None`.
    Optional(Box<FieldKind>),
    /// `Nullable<T>`: value plus validity flag.
    Nullable(Box<FieldKind>),
    /// Anything else, assigned only from a raw value of the very same type.
    Opaque(&'static str),
}

impl FieldKind {
    pub fn is_optional(&self) -> bool {
        matches!(self, FieldKind::Optional(..))
    }
}

impl Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::SignedInt(bits) => write!(f, "i{}", bits),
            FieldKind::UnsignedInt(bits) => write!(f, "u{}", bits),
            FieldKind::Float(bits) => write!(f, "f{}", bits),
            FieldKind::Boolean => f.write_str("bool"),
            FieldKind::Text => f.write_str("String"),
            FieldKind::Bytes => f.write_str("bytes"),
            FieldKind::Optional(inner) => write!(f, "Option<{}>", inner),
            FieldKind::Nullable(inner) => write!(f, "Nullable<{}>", inner),
            FieldKind::Opaque(name) => f.write_str(name),
        }
    }
}

/// Descriptor of one mapped field of a record type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDef {
    /// Declaration index of the field inside the struct (unmapped fields count too).
    pub position: usize,
    /// External column name.
    pub name: &'static str,
    /// Rust identifier of the field.
    pub field: &'static str,
    pub kind: FieldKind,
}

impl FieldDef {
    pub fn is_identity(&self) -> bool {
        self.name == IDENTITY_COLUMN
    }
}

#[cfg(test)]
mod tests {
    use super::FieldKind;

    #[test]
    fn kind_display() {
        assert_eq!(FieldKind::SignedInt(16).to_string(), "i16");
        assert_eq!(
            FieldKind::Nullable(FieldKind::Optional(FieldKind::Float(64).into()).into())
                .to_string(),
            "Nullable<Option<f64>>"
        );
        assert_eq!(FieldKind::Opaque("uuid::Uuid").to_string(), "uuid::Uuid");
    }
}
