use rowbind_core::SqlWriter;

/// Sqlite dialect: double quoted identifiers, `DEFAULT VALUES` for empty inserts.
#[derive(Debug, Default, Clone, Copy)]
pub struct SqliteSqlWriter {}

impl SqlWriter for SqliteSqlWriter {
    fn write_identifier_quoted(&self, out: &mut String, value: &str) {
        out.push('"');
        self.write_escaped(out, value, '"', "\"\"");
        out.push('"');
    }

    fn write_insert_default_values(&self, out: &mut String) {
        out.push_str(" DEFAULT VALUES");
    }
}

#[cfg(test)]
mod tests {
    use super::SqliteSqlWriter;
    use rowbind_core::{InsertParts, SqlWriter, Value};

    #[test]
    fn insert() {
        let mut out = String::new();
        let parts = InsertParts {
            columns: vec!["name", "say \"hi\""],
            placeholders: vec!["?", "?"],
            values: vec![Value::Null, Value::Null],
        };
        SqliteSqlWriter {}.write_insert(&mut out, "product", &parts);
        assert_eq!(
            out,
            r#"INSERT INTO product("name","say ""hi""") VALUES (?,?)"#
        );
        let mut out = String::new();
        SqliteSqlWriter {}.write_insert(&mut out, "product", &InsertParts::default());
        assert_eq!(out, "INSERT INTO product DEFAULT VALUES");
    }
}
