use crate::{SqlWriter, Value};
use anyhow::anyhow;

/// Source of live connections, typically a pool or a connection URL.
pub trait ConnectionProvider {
    type Connection: Connection;

    /// Yields a connection, released when dropped.
    fn acquire(&self) -> anyhow::Result<Self::Connection>;
}

/// A live database connection, closed when dropped.
pub trait Connection {
    type Statement: Statement;
    /// Cursors own whatever they need from the connection, they may outlive the borrow that
    /// created them.
    type Cursor: RowCursor;
    type SqlWriter: SqlWriter;

    fn sql_writer(&self) -> Self::SqlWriter;

    /// Compile a single statement.
    fn prepare(&mut self, query: &str) -> anyhow::Result<Self::Statement>;

    /// Run a query binding `args` in order and return a cursor positioned before the first row.
    fn query(&mut self, query: &str, args: &[Value]) -> anyhow::Result<Self::Cursor>;
}

/// A prepared statement, finalized when dropped.
pub trait Statement {
    fn execute(&mut self, args: &[Value]) -> anyhow::Result<ExecResult>;
}

/// Outcome of a statement that does not return rows.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecResult {
    /// Total number of rows impacted.
    pub rows_affected: u64,
    /// Identity generated by the statement, when the backend reports one.
    pub last_insert_id: Option<i64>,
}

impl ExecResult {
    pub fn last_insert_id(&self) -> anyhow::Result<i64> {
        self.last_insert_id
            .ok_or_else(|| anyhow!("The driver did not report a generated identity"))
    }
}

/// Forward only iterator over the rows of a query, closed when dropped.
pub trait RowCursor {
    fn column_names(&self) -> &[String];

    /// Move to the next row, returns false once the rows are exhausted.
    fn advance(&mut self) -> anyhow::Result<bool>;

    /// Values of the current row, same length and order as [`RowCursor::column_names`].
    fn values(&self) -> &[Value];
}
