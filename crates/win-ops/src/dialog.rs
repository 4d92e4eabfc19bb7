//! COM setup, the PNG save prompt and message boxes.

use std::path::PathBuf;

use fe_engine::Result;
use tracing::{debug, warn};
use windows::{
    Win32::{
        System::Com::{
            CLSCTX_INPROC_SERVER, COINIT_APARTMENTTHREADED, CoCreateInstance, CoInitializeEx,
            CoTaskMemFree,
        },
        UI::{
            Shell::{Common::COMDLG_FILTERSPEC, FileSaveDialog, IFileSaveDialog, SIGDN_FILESYSPATH},
            WindowsAndMessaging::{
                MB_ICONERROR, MB_ICONINFORMATION, MB_OK, MB_SETFOREGROUND, MESSAGEBOX_STYLE,
                MessageBoxW,
            },
        },
    },
    core::{HSTRING, w},
};

use crate::error::OsContext;

/// Initialize COM for the calling thread (single-threaded apartment).
///
/// Required once before the save prompt or shortcut creation is used.
pub fn init_com() -> Result<()> {
    unsafe { CoInitializeEx(None, COINIT_APARTMENTTHREADED) }
        .ok()
        .os("CoInitializeEx")
}

/// Run the save dialog; `Ok(None)` when the user cancels.
fn save_dialog(default_name: &str) -> windows::core::Result<Option<PathBuf>> {
    unsafe {
        let dialog: IFileSaveDialog = CoCreateInstance(&FileSaveDialog, None, CLSCTX_INPROC_SERVER)?;
        let filters = [COMDLG_FILTERSPEC {
            pszName: w!("PNG image (*.png)"),
            pszSpec: w!("*.png"),
        }];
        dialog.SetFileTypes(&filters)?;
        dialog.SetDefaultExtension(w!("png"))?;
        dialog.SetFileName(&HSTRING::from(default_name))?;
        if let Err(e) = dialog.Show(None) {
            debug!("Save dialog closed: {}", e.message());
            return Ok(None);
        }
        let item = dialog.GetResult()?;
        let raw = item.GetDisplayName(SIGDN_FILESYSPATH)?;
        let path = raw.to_string();
        CoTaskMemFree(Some(raw.0 as *const _));
        Ok(path.ok().map(PathBuf::from))
    }
}

/// Ask for a PNG file name, proposing `default_name`.
pub(crate) fn prompt_save_path(default_name: &str) -> Option<PathBuf> {
    match save_dialog(default_name) {
        Ok(path) => path,
        Err(e) => {
            warn!("Save dialog failed: {}", e.message());
            None
        }
    }
}

/// Modal message box owned by no window.
fn message_box(title: &str, text: &str, style: MESSAGEBOX_STYLE) {
    unsafe {
        MessageBoxW(
            None,
            &HSTRING::from(text),
            &HSTRING::from(title),
            style | MB_OK | MB_SETFOREGROUND,
        )
    };
}

/// Show an error notification.
pub fn notify_error(title: &str, text: &str) {
    message_box(title, text, MB_ICONERROR);
}

/// Show informational text, such as the log or the hotkey listing.
pub fn show_text(title: &str, text: &str) {
    message_box(title, text, MB_ICONINFORMATION);
}
