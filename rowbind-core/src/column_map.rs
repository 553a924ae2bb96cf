use crate::{FieldDef, Record};
use std::collections::HashMap;

/// Column name to field position lookup for one record type.
///
/// Built from the record descriptors on every scan call. When two fields declare the same
/// column name the later one wins.
#[derive(Debug, Default, Clone)]
pub struct ColumnMap {
    positions: HashMap<&'static str, usize>,
    mapped: usize,
}

impl ColumnMap {
    pub fn resolve<R: Record>() -> Self {
        Self::from_fields(R::fields())
    }

    pub fn from_fields(fields: &[FieldDef]) -> Self {
        let mut positions = HashMap::with_capacity(fields.len());
        let mut mapped = 0;
        for field in fields.iter().filter(|f| !f.name.is_empty()) {
            positions.insert(field.name, field.position);
            mapped += 1;
        }
        Self { positions, mapped }
    }

    pub fn get(&self, column: &str) -> Option<usize> {
        self.positions.get(column).copied()
    }

    /// Number of fields declaring a column name, duplicates included.
    pub fn mapped(&self) -> usize {
        self.mapped
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }
}
