use crate::{CBox, SqliteConnection, last_error};
use anyhow::{Context, anyhow};
use libsqlite3_sys::{
    SQLITE_OK, SQLITE_OPEN_CREATE, SQLITE_OPEN_MEMORY, SQLITE_OPEN_READONLY,
    SQLITE_OPEN_READWRITE, sqlite3, sqlite3_busy_timeout, sqlite3_close, sqlite3_open_v2,
};
use rowbind_core::ConnectionProvider;
use std::{
    ffi::{CString, c_int},
    ptr,
    sync::Arc,
};

const PREFIX: &str = "sqlite://";

/// Opens a new sqlite connection on every acquire.
///
/// The URL has the form `sqlite://<path>?mode=ro|rw|rwc|memory&busy_timeout=<ms>`, the path is
/// percent decoded and `mode` defaults to `rwc`. With `mode=memory` every connection gets its own
/// empty database.
#[derive(Debug, Clone)]
pub struct SqliteProvider {
    url: String,
}

/// Result of parsing the connection URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqliteOptions {
    pub path: String,
    pub flags: c_int,
    pub busy_timeout: Option<c_int>,
}

impl SqliteProvider {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn options(&self) -> anyhow::Result<SqliteOptions> {
        parse_url(&self.url)
    }
}

pub fn parse_url(url: &str) -> anyhow::Result<SqliteOptions> {
    let Some(rest) = url.strip_prefix(PREFIX) else {
        return Err(anyhow!(
            "Expected sqlite connection url to start with `{}`",
            PREFIX
        ));
    };
    let (path, query) = rest.split_once('?').unwrap_or((rest, ""));
    let path = urlencoding::decode(path)
        .with_context(|| format!("Error while decoding the path of the connection URL `{}`", url))?
        .into_owned();
    if path.is_empty() {
        return Err(anyhow!("The connection URL `{}` has no database path", url));
    }
    let mut options = SqliteOptions {
        path,
        flags: SQLITE_OPEN_READWRITE | SQLITE_OPEN_CREATE,
        busy_timeout: None,
    };
    for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
        match &*key {
            "mode" => {
                options.flags = match &*value {
                    "ro" => SQLITE_OPEN_READONLY,
                    "rw" => SQLITE_OPEN_READWRITE,
                    "rwc" => SQLITE_OPEN_READWRITE | SQLITE_OPEN_CREATE,
                    "memory" => SQLITE_OPEN_READWRITE | SQLITE_OPEN_CREATE | SQLITE_OPEN_MEMORY,
                    _ => {
                        return Err(anyhow!(
                            "Unknown sqlite mode `{}`, expected one of ro, rw, rwc, memory",
                            value
                        ));
                    }
                }
            }
            "busy_timeout" => {
                let timeout = value
                    .parse::<c_int>()
                    .with_context(|| format!("Invalid busy_timeout `{}`", value))?;
                options.busy_timeout = Some(timeout);
            }
            _ => return Err(anyhow!("Unknown sqlite connection option `{}`", key)),
        }
    }
    Ok(options)
}

impl ConnectionProvider for SqliteProvider {
    type Connection = SqliteConnection;

    fn acquire(&self) -> anyhow::Result<SqliteConnection> {
        let context = || format!("While opening the database `{}`", self.url);
        let options = parse_url(&self.url).with_context(context).inspect_err(|e| {
            log::error!("{:#}", e);
        })?;
        let path = CString::new(options.path.as_str()).with_context(context)?;
        let mut connection = CBox::new(ptr::null_mut::<sqlite3>(), |p| unsafe {
            sqlite3_close(p);
        });
        unsafe {
            let rc = sqlite3_open_v2(path.as_ptr(), &mut *connection, options.flags, ptr::null());
            if rc != SQLITE_OK {
                let error = last_error(*connection).context(context());
                log::error!("{:#}", error);
                return Err(error);
            }
            if let Some(timeout) = options.busy_timeout {
                sqlite3_busy_timeout(*connection, timeout);
            }
        }
        Ok(SqliteConnection {
            connection: Arc::new(connection),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::parse_url;
    use libsqlite3_sys::{SQLITE_OPEN_CREATE, SQLITE_OPEN_READONLY, SQLITE_OPEN_READWRITE};

    #[test]
    fn options() {
        let options = parse_url("sqlite://data/my%20db.sqlite?mode=ro&busy_timeout=250").unwrap();
        assert_eq!(options.path, "data/my db.sqlite");
        assert_eq!(options.flags, SQLITE_OPEN_READONLY);
        assert_eq!(options.busy_timeout, Some(250));

        let options = parse_url("sqlite:///tmp/shop.sqlite").unwrap();
        assert_eq!(options.path, "/tmp/shop.sqlite");
        assert_eq!(options.flags, SQLITE_OPEN_READWRITE | SQLITE_OPEN_CREATE);
        assert_eq!(options.busy_timeout, None);
    }

    #[test]
    fn invalid() {
        assert!(parse_url("postgres://localhost/db").is_err());
        assert!(parse_url("sqlite://").is_err());
        assert!(parse_url("sqlite://db.sqlite?mode=append").is_err());
        assert!(parse_url("sqlite://db.sqlite?busy_timeout=soon").is_err());
        assert!(parse_url("sqlite://db.sqlite?cache=shared").is_err());
    }
}
