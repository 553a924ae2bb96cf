use crate::{InsertParts, separated_by};

/// Dialect printer for the few statements the façade synthesizes.
pub trait SqlWriter {
    /// Escape occurrences of `search` char with `replace` while copying into buffer.
    fn write_escaped(&self, out: &mut String, value: &str, search: char, replace: &str) {
        let mut position = 0;
        for (i, c) in value.char_indices() {
            if c == search {
                out.push_str(&value[position..i]);
                out.push_str(replace);
                position = i + c.len_utf8();
            }
        }
        out.push_str(&value[position..]);
    }

    /// Quote identifiers (`name`) doubling inner backticks.
    fn write_identifier_quoted(&self, out: &mut String, value: &str) {
        out.push('`');
        self.write_escaped(out, value, '`', "``");
        out.push('`');
    }

    /// Table names are written as given, they may carry a schema prefix.
    fn write_table_name(&self, out: &mut String, table: &str) {
        out.push_str(table);
    }

    /// Render `INSERT INTO table(cols) VALUES (placeholders)`.
    fn write_insert(&self, out: &mut String, table: &str, parts: &InsertParts) {
        out.reserve(32 + table.len() + parts.len() * 24);
        out.push_str("INSERT INTO ");
        self.write_table_name(out, table);
        if parts.is_empty() {
            self.write_insert_default_values(out);
            return;
        }
        out.push('(');
        separated_by(
            out,
            parts.columns.iter(),
            |out, v| self.write_identifier_quoted(out, v),
            ",",
        );
        out.push_str(") VALUES (");
        separated_by(out, parts.placeholders.iter(), |out, v| out.push_str(v), ",");
        out.push(')');
    }

    /// Suffix used when a record has no column besides the identity.
    fn write_insert_default_values(&self, out: &mut String) {
        out.push_str("() VALUES ()");
    }
}

/// Writer using the default dialect.
#[derive(Debug, Default, Clone, Copy)]
pub struct GenericSqlWriter;

impl SqlWriter for GenericSqlWriter {}
