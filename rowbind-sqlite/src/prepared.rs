use crate::{CBox, last_error, logged};
use anyhow::anyhow;
use libsqlite3_sys::*;
use rowbind_core::{ExecResult, Statement, Value, truncate_long};
use std::{
    ffi::{CStr, c_int},
    fmt::{self, Display},
    os::raw::{c_char, c_void},
    sync::Arc,
};

/// A compiled statement, finalized on drop before its connection is released.
pub struct SqlitePrepared {
    pub(crate) statement: CBox<*mut sqlite3_stmt>,
    _connection: Arc<CBox<*mut sqlite3>>,
}

impl SqlitePrepared {
    pub(crate) fn new(
        statement: CBox<*mut sqlite3_stmt>,
        connection: Arc<CBox<*mut sqlite3>>,
    ) -> Self {
        Self {
            statement,
            _connection: connection,
        }
    }

    /// SQL text the statement was compiled from.
    pub fn query(&self) -> String {
        unsafe {
            let sql = sqlite3_sql(*self.statement);
            if sql.is_null() {
                return String::new();
            }
            CStr::from_ptr(sql).to_string_lossy().into_owned()
        }
    }

    fn error(&self, error: anyhow::Error) -> anyhow::Error {
        logged(error.context(format!(
            "While running the query:\n{}",
            truncate_long(&self.query())
        )))
    }

    /// Reset the statement and bind `args` to its parameters in order.
    pub(crate) fn bind_all(&mut self, args: &[Value]) -> anyhow::Result<()> {
        let expected = unsafe {
            sqlite3_reset(*self.statement);
            sqlite3_clear_bindings(*self.statement);
            sqlite3_bind_parameter_count(*self.statement)
        };
        if expected as usize != args.len() {
            return Err(self.error(anyhow!(
                "Expected {} arguments, got {}",
                expected,
                args.len()
            )));
        }
        for (i, value) in args.iter().enumerate() {
            self.bind_index(value, i as c_int + 1)?;
        }
        Ok(())
    }

    fn bind_index(&mut self, value: &Value, index: c_int) -> anyhow::Result<()> {
        let statement = *self.statement;
        let rc = unsafe {
            match value {
                Value::Null => sqlite3_bind_null(statement, index),
                Value::Boolean(v) => sqlite3_bind_int(statement, index, *v as c_int),
                Value::Int8(v) => sqlite3_bind_int(statement, index, *v as c_int),
                Value::Int16(v) => sqlite3_bind_int(statement, index, *v as c_int),
                Value::Int32(v) => sqlite3_bind_int(statement, index, *v as c_int),
                Value::Int64(v) => sqlite3_bind_int64(statement, index, *v),
                Value::UInt8(v) => sqlite3_bind_int(statement, index, *v as c_int),
                Value::UInt16(v) => sqlite3_bind_int(statement, index, *v as c_int),
                Value::UInt32(v) => sqlite3_bind_int64(statement, index, *v as sqlite3_int64),
                Value::UInt64(v) => {
                    let Ok(v) = sqlite3_int64::try_from(*v) else {
                        return Err(self.error(anyhow!(
                            "Cannot bind u64 value `{}` into sqlite integer because it's out of bounds",
                            v
                        )));
                    };
                    sqlite3_bind_int64(statement, index, v)
                }
                Value::Float32(v) => sqlite3_bind_double(statement, index, *v as f64),
                Value::Float64(v) => sqlite3_bind_double(statement, index, *v),
                Value::Varchar(v) => bind_text(statement, index, v),
                Value::Blob(v) => sqlite3_bind_blob(
                    statement,
                    index,
                    v.as_ptr() as *const c_void,
                    v.len() as c_int,
                    SQLITE_TRANSIENT(),
                ),
                Value::Decimal(v) => bind_text(statement, index, &v.to_string()),
                Value::Date(v) => bind_text(statement, index, &v.to_string()),
                Value::Time(v) => bind_text(statement, index, &v.to_string()),
                Value::Timestamp(v) => bind_text(statement, index, &v.to_string()),
                Value::Uuid(v) => bind_text(statement, index, &v.to_string()),
            }
        };
        if rc != SQLITE_OK {
            let error = unsafe { last_error(sqlite3_db_handle(statement)) };
            return Err(self.error(error.context(format!("Cannot bind parameter {}", index))));
        }
        Ok(())
    }
}

unsafe fn bind_text(statement: *mut sqlite3_stmt, index: c_int, value: &str) -> c_int {
    unsafe {
        sqlite3_bind_text(
            statement,
            index,
            value.as_ptr() as *const c_char,
            value.len() as c_int,
            SQLITE_TRANSIENT(),
        )
    }
}

impl Statement for SqlitePrepared {
    fn execute(&mut self, args: &[Value]) -> anyhow::Result<ExecResult> {
        self.bind_all(args)?;
        unsafe {
            loop {
                match sqlite3_step(*self.statement) {
                    SQLITE_ROW => continue,
                    SQLITE_DONE => break,
                    _ => {
                        let error = last_error(sqlite3_db_handle(*self.statement));
                        return Err(self.error(error));
                    }
                }
            }
            let db = sqlite3_db_handle(*self.statement);
            Ok(ExecResult {
                rows_affected: sqlite3_changes64(db) as u64,
                last_insert_id: Some(sqlite3_last_insert_rowid(db)),
            })
        }
    }
}

impl Display for SqlitePrepared {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:p}", *self.statement)
    }
}
