use crate::FieldKind;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by the row scanner and the database façade.
///
/// Driver failures are carried untouched as the `source` of the variant describing the stage
/// that failed.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Could not acquire a database connection")]
    ConnectionFailure(#[source] anyhow::Error),
    #[error("Could not prepare the statement `{query}`")]
    StatementPrepareFailure {
        query: String,
        #[source]
        source: anyhow::Error,
    },
    #[error("The statement failed to execute")]
    ExecutionFailure(#[source] anyhow::Error),
    #[error("The query returned no rows")]
    NoRows,
    #[error("Converting NULL to {kind} is unsupported (column `{column}`)")]
    NullToNonNullable { column: String, kind: FieldKind },
    #[error("Cannot scan column `{column}`")]
    Coercion {
        column: String,
        #[source]
        source: CoercionError,
    },
    #[error("The row has {columns} column names but {values} values")]
    RowShape { columns: usize, values: usize },
}

/// Why a textual conversion failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoercionCause {
    /// The text is not a literal of the target kind.
    Syntax,
    /// The literal does not fit the target bit width.
    Range,
    /// No conversion exists from the raw type to the target kind.
    Unsupported,
}

impl std::fmt::Display for CoercionCause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            CoercionCause::Syntax => "invalid syntax",
            CoercionCause::Range => "value out of range",
            CoercionCause::Unsupported => "unsupported conversion",
        })
    }
}

/// Failed conversion of a raw driver value into a typed field value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Converting driver value of type {raw_type} (`{raw_text}`) to {target}: {cause}")]
pub struct CoercionError {
    /// Variant name of the raw value.
    pub raw_type: &'static str,
    /// Canonical text the conversion was attempted on.
    pub raw_text: String,
    pub target: FieldKind,
    pub cause: CoercionCause,
}

/// Failure of a single field assignment, the scanner attaches the column name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    NullToNonNullable(FieldKind),
    Coercion(CoercionError),
}

impl FieldError {
    pub fn into_error(self, column: impl Into<String>) -> Error {
        match self {
            FieldError::NullToNonNullable(kind) => Error::NullToNonNullable {
                column: column.into(),
                kind,
            },
            FieldError::Coercion(source) => Error::Coercion {
                column: column.into(),
                source,
            },
        }
    }
}

impl From<CoercionError> for FieldError {
    fn from(value: CoercionError) -> Self {
        FieldError::Coercion(value)
    }
}
