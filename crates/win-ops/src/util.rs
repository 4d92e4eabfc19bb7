//! UTF-16 and handle helpers shared by the backends.

use windows::{
    Win32::{
        Foundation::{CloseHandle, HANDLE},
        System::Environment::ExpandEnvironmentStringsW,
    },
    core::{HSTRING, PCWSTR},
};

use tracing::debug;

/// Nul-terminated UTF-16 copy of `s`, for parameters the API may modify.
pub(crate) fn to_wide(s: &str) -> Vec<u16> {
    s.encode_utf16().chain(Some(0)).collect()
}

/// Decode a fixed-size UTF-16 buffer up to its first nul.
pub(crate) fn from_wide(buf: &[u16]) -> String {
    let end = buf.iter().position(|&c| c == 0).unwrap_or(buf.len());
    String::from_utf16_lossy(&buf[..end])
}

/// Pointer for an optional string parameter; null when absent.
pub(crate) fn opt_pcwstr(s: Option<&HSTRING>) -> PCWSTR {
    s.map_or(PCWSTR::null(), |h| PCWSTR(h.as_ptr()))
}

/// Expand `%VAR%` references in `s`.
///
/// Returns `s` unchanged when expansion fails.
pub fn expand_env(s: &str) -> String {
    if !s.contains('%') {
        return s.to_string();
    }
    let src = HSTRING::from(s);
    let needed = unsafe { ExpandEnvironmentStringsW(&src, None) };
    if needed == 0 {
        return s.to_string();
    }
    let mut buf = vec![0u16; needed as usize];
    let written = unsafe { ExpandEnvironmentStringsW(&src, Some(&mut buf)) };
    if written == 0 || written > needed {
        return s.to_string();
    }
    from_wide(&buf)
}

/// Close a kernel handle, logging failures.
pub(crate) fn close_handle(handle: HANDLE) {
    if handle.is_invalid() {
        return;
    }
    if let Err(e) = unsafe { CloseHandle(handle) } {
        debug!("CloseHandle failed: {}", e);
    }
}
