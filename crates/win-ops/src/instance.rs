use fe_engine::Result;
use tracing::debug;
use windows::{
    Win32::{
        Foundation::{ERROR_ALREADY_EXISTS, GetLastError, HANDLE},
        System::Threading::{CreateMutexW, ReleaseMutex},
    },
    core::HSTRING,
};

use crate::{error::OsContext, util::close_handle};

/// Ownership of a named mutex marking the running instance.
///
/// Released when dropped.
#[derive(Debug)]
pub struct SingleInstance {
    /// Owned mutex handle.
    handle: HANDLE,
}

impl SingleInstance {
    /// Claim the mutex `name`. `Ok(None)` when another process already holds it.
    pub fn acquire(name: &str) -> Result<Option<Self>> {
        let handle =
            unsafe { CreateMutexW(None, true, &HSTRING::from(name)) }.os("CreateMutex")?;
        if unsafe { GetLastError() } == ERROR_ALREADY_EXISTS {
            debug!("Mutex {} already held", name);
            close_handle(handle);
            return Ok(None);
        }
        Ok(Some(Self { handle }))
    }
}

impl Drop for SingleInstance {
    fn drop(&mut self) {
        if let Err(e) = unsafe { ReleaseMutex(self.handle) } {
            debug!("ReleaseMutex failed: {}", e);
        }
        close_handle(self.handle);
    }
}
