/// Value plus validity flag, for columns where "was populated" matters.
///
/// A field of this type starts out `Null` and becomes `Valid` once the scanner assigns a value
/// to it. When the inner type is itself an `Option`, a NULL column leaves the wrapper `Null`;
/// for any other inner type NULL is rejected exactly as it would be for the bare type.
#[derive(Debug, Default)]
pub enum Nullable<T> {
    #[default]
    Null,
    Valid(T),
}

impl<T> Nullable<T> {
    pub fn is_valid(&self) -> bool {
        matches!(self, Nullable::Valid(..))
    }

    pub fn as_ref(&self) -> Nullable<&T> {
        match self {
            Nullable::Valid(v) => Nullable::Valid(v),
            Nullable::Null => Nullable::Null,
        }
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Nullable::Valid(v) => Some(v),
            Nullable::Null => None,
        }
    }
}

impl<T: PartialEq> PartialEq for Nullable<T> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Valid(lhs), Self::Valid(rhs)) => lhs == rhs,
            _ => core::mem::discriminant(self) == core::mem::discriminant(other),
        }
    }
}

impl<T: Clone> Clone for Nullable<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Valid(v) => Self::Valid(v.clone()),
            Self::Null => Self::Null,
        }
    }
}

impl<T> From<T> for Nullable<T> {
    fn from(value: T) -> Self {
        Self::Valid(value)
    }
}

impl<T> From<Nullable<T>> for Option<T> {
    fn from(value: Nullable<T>) -> Self {
        value.into_option()
    }
}
