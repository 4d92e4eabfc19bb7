use std::io;

use fe_engine::{Error, Result};

/// Attach an operation name to a `windows` error.
pub(crate) trait OsContext<T> {
    /// Map the error into [`Error::Os`] tagged with `op`.
    fn os(self, op: &'static str) -> Result<T>;
}

impl<T> OsContext<T> for windows::core::Result<T> {
    fn os(self, op: &'static str) -> Result<T> {
        self.map_err(|e| Error::os(op, e.message()))
    }
}

/// [`Error::Os`] for `op` carrying the thread's last Win32 error.
pub(crate) fn last_error(op: &'static str) -> Error {
    Error::os(op, io::Error::last_os_error().to_string())
}
