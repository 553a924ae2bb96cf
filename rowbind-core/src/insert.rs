use crate::{Record, Value};

/// Column list, placeholders and arguments of a single row INSERT.
///
/// The three sequences always have the same length and share the field declaration order.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct InsertParts {
    pub columns: Vec<&'static str>,
    pub placeholders: Vec<&'static str>,
    pub values: Vec<Value>,
}

impl InsertParts {
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Collects every mapped field of `record` except the identity one.
pub fn build_insert<R: Record>(record: &R) -> InsertParts {
    let fields = R::fields();
    let mut parts = InsertParts {
        columns: Vec::with_capacity(fields.len()),
        placeholders: Vec::with_capacity(fields.len()),
        values: Vec::with_capacity(fields.len()),
    };
    for def in fields.iter().filter(|f| !f.name.is_empty() && !f.is_identity()) {
        let Some(field) = record.field(def.position) else {
            log::warn!(
                "Record `{}` declares column `{}` at position {} but has no such field",
                R::table_name(),
                def.name,
                def.position
            );
            continue;
        };
        parts.columns.push(def.name);
        parts.placeholders.push("?");
        parts.values.push(field.to_value());
    }
    parts
}
