use crate::{
    SqlitePrepared, last_error, logged,
    extract::{DeclaredType, extract_declared, extract_name, extract_value},
};
use libsqlite3_sys::{
    SQLITE_DONE, SQLITE_ROW, sqlite3_column_count, sqlite3_db_handle, sqlite3_step,
};
use rowbind_core::{RowCursor, Value};

/// Rows of a running query, owns its statement and a handle on the connection.
///
/// Columns declared `DATE`, `TIME`, `TIMESTAMP`/`DATETIME`, `DECIMAL`/`NUMERIC` or `UUID` yield
/// `Value::Date`, `Value::Time`, `Value::Timestamp`, `Value::Decimal` or `Value::Uuid`. A `String`
/// field reading such a column is skipped and keeps its content, cast the column to `TEXT` to read
/// it as text.
pub struct SqliteCursor {
    prepared: SqlitePrepared,
    names: Vec<String>,
    declared: Vec<DeclaredType>,
    current: Vec<Value>,
    done: bool,
}

impl SqliteCursor {
    pub(crate) fn new(prepared: SqlitePrepared) -> anyhow::Result<Self> {
        let statement = *prepared.statement;
        let count = unsafe { sqlite3_column_count(statement) };
        let names = (0..count)
            .map(|i| extract_name(statement, i))
            .collect::<anyhow::Result<Vec<_>>>()
            .map_err(logged)?;
        let declared = (0..count).map(|i| extract_declared(statement, i)).collect();
        Ok(Self {
            prepared,
            names,
            declared,
            current: Vec::new(),
            done: false,
        })
    }
}

impl RowCursor for SqliteCursor {
    fn column_names(&self) -> &[String] {
        &self.names
    }

    fn advance(&mut self) -> anyhow::Result<bool> {
        if self.done {
            return Ok(false);
        }
        let statement = *self.prepared.statement;
        match unsafe { sqlite3_step(statement) } {
            SQLITE_ROW => {
                self.current = self
                    .declared
                    .iter()
                    .enumerate()
                    .map(|(i, declared)| extract_value(statement, i as _, *declared))
                    .collect::<anyhow::Result<_>>()
                    .map_err(logged)?;
                Ok(true)
            }
            SQLITE_DONE => {
                self.done = true;
                self.current.clear();
                Ok(false)
            }
            _ => {
                self.done = true;
                let error = unsafe { last_error(sqlite3_db_handle(statement)) }.context(format!(
                    "While reading the rows of the query:\n{}",
                    rowbind_core::truncate_long(&self.prepared.query())
                ));
                Err(logged(error))
            }
        }
    }

    fn values(&self) -> &[Value] {
        &self.current
    }
}
