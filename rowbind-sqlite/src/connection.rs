use crate::{
    CBox, SqliteCursor, SqlitePrepared, SqliteSqlWriter, last_error, logged,
};
use anyhow::{Context, anyhow};
use libsqlite3_sys::{
    SQLITE_OK, sqlite3, sqlite3_finalize, sqlite3_prepare_v2, sqlite3_stmt,
};
use rowbind_core::{Connection, Value, truncate_long};
use std::{
    ffi::{CStr, CString, c_char},
    ptr,
    sync::Arc,
};

/// An open sqlite database handle, closed once the connection and every statement or cursor
/// created from it are dropped.
pub struct SqliteConnection {
    pub(crate) connection: Arc<CBox<*mut sqlite3>>,
}

impl SqliteConnection {
    pub(crate) fn prepare_statement(&self, query: &str) -> anyhow::Result<CBox<*mut sqlite3_stmt>> {
        let context = || format!("While preparing the query:\n{}", truncate_long(query));
        let sql = CString::new(query)
            .context("Could not create a CString from the query String")
            .with_context(context)
            .map_err(logged)?;
        let mut statement = CBox::new(ptr::null_mut::<sqlite3_stmt>(), |p| unsafe {
            sqlite3_finalize(p);
        });
        let mut tail: *const c_char = ptr::null();
        unsafe {
            let rc = sqlite3_prepare_v2(
                **self.connection,
                sql.as_ptr(),
                -1,
                &mut *statement,
                &mut tail,
            );
            if rc != SQLITE_OK {
                return Err(logged(last_error(**self.connection).context(context())));
            }
            if statement.is_null() {
                return Err(logged(
                    anyhow!("The query does not contain any statement").context(context()),
                ));
            }
            if !tail.is_null()
                && !CStr::from_ptr(tail)
                    .to_bytes()
                    .iter()
                    .all(|b| b.is_ascii_whitespace() || *b == b';')
            {
                return Err(logged(
                    anyhow!("Cannot prepare more than one statement at a time").context(context()),
                ));
            }
        }
        Ok(statement)
    }
}

impl Connection for SqliteConnection {
    type Statement = SqlitePrepared;
    type Cursor = SqliteCursor;
    type SqlWriter = SqliteSqlWriter;

    fn sql_writer(&self) -> SqliteSqlWriter {
        SqliteSqlWriter {}
    }

    fn prepare(&mut self, query: &str) -> anyhow::Result<SqlitePrepared> {
        let statement = self.prepare_statement(query)?;
        Ok(SqlitePrepared::new(statement, self.connection.clone()))
    }

    fn query(&mut self, query: &str, args: &[Value]) -> anyhow::Result<SqliteCursor> {
        let mut prepared = self.prepare(query)?;
        prepared.bind_all(args)?;
        SqliteCursor::new(prepared)
    }
}
