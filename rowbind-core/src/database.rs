use crate::{
    Connection, ConnectionProvider, Error, ExecResult, Record, Result, RowCursor, SqlWriter,
    Statement, Value, build_insert, scan, truncate_long,
};

/// Entry point running statements and mapping their rows into records.
///
/// Every call acquires its own connection from the provider and releases it before returning,
/// except [`Database::query_rows`] whose connection lives as long as the returned [`Rows`].
/// Driver errors are returned untouched as the source of the failing stage.
#[derive(Debug, Default, Clone)]
pub struct Database<P: ConnectionProvider> {
    provider: P,
}

impl<P: ConnectionProvider> Database<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    fn connection(&self) -> Result<P::Connection> {
        self.provider.acquire().map_err(Error::ConnectionFailure)
    }

    /// Insert `record` into `table` and return the generated identity.
    ///
    /// The identity field (`id`) is not part of the statement.
    pub fn insert_new<R: Record>(&self, table: &str, record: &R) -> Result<i64> {
        let parts = build_insert(record);
        let mut connection = self.connection()?;
        let mut query = String::new();
        connection
            .sql_writer()
            .write_insert(&mut query, table, &parts);
        execute(&mut connection, &query, &parts.values)?
            .last_insert_id()
            .map_err(Error::ExecutionFailure)
    }

    /// Insert `record` into the table declared by its type.
    pub fn insert<R: Record>(&self, record: &R) -> Result<i64> {
        self.insert_new(R::table_name(), record)
    }

    /// Run a statement and return the identity it generated.
    pub fn exec_for_id(&self, query: &str, args: &[Value]) -> Result<i64> {
        let mut connection = self.connection()?;
        execute(&mut connection, query, args)?
            .last_insert_id()
            .map_err(Error::ExecutionFailure)
    }

    /// Run a statement discarding its result.
    pub fn exec(&self, query: &str, args: &[Value]) -> Result<()> {
        let mut connection = self.connection()?;
        execute(&mut connection, query, args).map(|_| ())
    }

    /// Run a query and return its live cursor, dropping it releases the connection.
    pub fn query_rows(&self, query: &str, args: &[Value]) -> Result<Rows<P::Connection>> {
        let mut connection = self.connection()?;
        log::debug!("Query: {}", truncate_long(query));
        let cursor = connection
            .query(query, args)
            .map_err(Error::ExecutionFailure)?;
        Ok(Rows {
            cursor,
            _connection: connection,
        })
    }

    /// Scan the first row of the query into `record`, [`Error::NoRows`] when there is none.
    pub fn query_one<R: Record>(&self, query: &str, record: &mut R, args: &[Value]) -> Result<()> {
        let mut rows = self.query_rows(query, args)?;
        if !rows.advance()? {
            return Err(Error::NoRows);
        }
        scan(rows.column_names(), rows.values(), record)
    }

    /// Scan every row of the query into a fresh record.
    pub fn query_all<R: Record + Default>(&self, query: &str, args: &[Value]) -> Result<Vec<R>> {
        let mut rows = self.query_rows(query, args)?;
        let mut result = Vec::new();
        loop {
            let mut record = R::default();
            if !rows.next_into(&mut record)? {
                break;
            }
            result.push(record);
        }
        Ok(result)
    }
}

fn execute<C: Connection>(connection: &mut C, query: &str, args: &[Value]) -> Result<ExecResult> {
    log::debug!("Execute: {}", truncate_long(query));
    let mut statement =
        connection
            .prepare(query)
            .map_err(|source| Error::StatementPrepareFailure {
                query: truncate_long(query).into_owned(),
                source,
            })?;
    statement.execute(args).map_err(Error::ExecutionFailure)
}

/// Rows of a query together with the connection that produced them.
///
/// The cursor is closed before the connection is released.
pub struct Rows<C: Connection> {
    cursor: C::Cursor,
    _connection: C,
}

impl<C: Connection> Rows<C> {
    pub fn column_names(&self) -> &[String] {
        self.cursor.column_names()
    }

    /// Move to the next row, false once the rows are exhausted.
    pub fn advance(&mut self) -> Result<bool> {
        self.cursor.advance().map_err(Error::ExecutionFailure)
    }

    /// Values of the current row.
    pub fn values(&self) -> &[Value] {
        self.cursor.values()
    }

    /// Advance and scan the new row into `target`, false once the rows are exhausted.
    pub fn next_into<R: Record>(&mut self, target: &mut R) -> Result<bool> {
        if !self.advance()? {
            return Ok(false);
        }
        scan(self.cursor.column_names(), self.cursor.values(), target)?;
        Ok(true)
    }
}
