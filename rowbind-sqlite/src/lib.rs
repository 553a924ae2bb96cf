mod cbox;
mod connection;
mod cursor;
mod driver;
mod extract;
mod prepared;
mod sql_writer;

use libsqlite3_sys::{sqlite3, sqlite3_errmsg};
use std::{
    ffi::{CStr, c_char},
    ptr,
};

pub(crate) use cbox::*;
pub use connection::*;
pub use cursor::*;
pub use driver::*;
pub use prepared::*;
pub use sql_writer::*;

pub(crate) fn error_message_from_ptr(ptr: &'_ *const c_char) -> &'_ str {
    unsafe {
        if *ptr != ptr::null() {
            CStr::from_ptr(*ptr)
                .to_str()
                .unwrap_or("Unknown error (the error message was not a valid C string)")
        } else {
            "Unknown error (could not extract the error message)"
        }
    }
}

/// Last error reported on `connection` as an owned message.
pub(crate) fn last_error(connection: *mut sqlite3) -> anyhow::Error {
    if connection.is_null() {
        return anyhow::Error::msg("Unknown error (the connection handle is null)");
    }
    unsafe { anyhow::Error::msg(error_message_from_ptr(&sqlite3_errmsg(connection)).to_string()) }
}

pub(crate) fn logged(error: anyhow::Error) -> anyhow::Error {
    log::error!("{:#}", error);
    error
}
