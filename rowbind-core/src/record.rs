use crate::{ColumnValue, FieldDef};

/// A struct whose fields are mapped to database columns.
///
/// Normally implemented through `#[derive(Record)]`, which builds the descriptor table once and
/// generates the positional accessors. Only fields carrying `#[rowbind(name = "...")]` appear in
/// [`Record::fields`]; the accessors return `None` for every other position.
pub trait Record {
    /// Table used by `Database::insert`.
    fn table_name() -> &'static str
    where
        Self: Sized;

    /// Descriptors of the mapped fields, in declaration order.
    fn fields() -> &'static [FieldDef]
    where
        Self: Sized;

    fn field(&self, position: usize) -> Option<&dyn ColumnValue>;

    fn field_mut(&mut self, position: usize) -> Option<&mut dyn ColumnValue>;
}
