//! Top-level windows and screen geometry.

use std::ffi::c_void;

use config::ShowMode;
use fe_engine::{Error, Rect, Result, WindowInfo};
use tracing::warn;
use windows::{
    Win32::{
        Foundation::{HWND, LPARAM, RECT},
        UI::WindowsAndMessaging::{
            EnumWindows, GetForegroundWindow, GetSystemMetrics, GetWindowRect, GetWindowTextW,
            GetWindowThreadProcessId, IsWindow, SHOW_WINDOW_CMD, SM_CXSCREEN, SM_CXVIRTUALSCREEN,
            SM_CYSCREEN, SM_CYVIRTUALSCREEN, SM_XVIRTUALSCREEN, SM_YVIRTUALSCREEN, SW_FORCEMINIMIZE,
            SW_HIDE, SW_RESTORE, SW_SHOW, SW_SHOWMAXIMIZED, SW_SHOWNORMAL, ShowWindow,
        },
    },
    core::BOOL,
};

/// Longest title read per window, in UTF-16 units.
const TITLE_CAPACITY: usize = 512;

/// Native command for a show mode.
pub(crate) fn show_cmd(mode: ShowMode) -> SHOW_WINDOW_CMD {
    match mode {
        ShowMode::Normal => SW_SHOWNORMAL,
        ShowMode::Hide => SW_HIDE,
        ShowMode::Min => SW_FORCEMINIMIZE,
        ShowMode::Max => SW_SHOWMAXIMIZED,
        ShowMode::Restore => SW_RESTORE,
        ShowMode::Show => SW_SHOW,
    }
}

/// `EnumWindows` callback; `lparam` points at the output vector.
unsafe extern "system" fn collect_window(hwnd: HWND, lparam: LPARAM) -> BOOL {
    let out = unsafe { &mut *(lparam.0 as *mut Vec<WindowInfo>) };
    let mut title = [0u16; TITLE_CAPACITY];
    let len = unsafe { GetWindowTextW(hwnd, &mut title) };
    let mut pid = 0u32;
    unsafe { GetWindowThreadProcessId(hwnd, Some(&mut pid)) };
    out.push(WindowInfo {
        handle: hwnd.0 as isize,
        pid,
        title: String::from_utf16_lossy(&title[..usize::try_from(len).unwrap_or(0)]),
    });
    BOOL::from(true)
}

/// Every top-level window, in z-order.
pub(crate) fn list_windows() -> Vec<WindowInfo> {
    let mut out: Vec<WindowInfo> = Vec::new();
    let param = LPARAM(&mut out as *mut Vec<WindowInfo> as isize);
    if let Err(e) = unsafe { EnumWindows(Some(collect_window), param) } {
        warn!("EnumWindows failed: {}", e);
    }
    out
}

/// Apply `mode` to the window behind `handle`.
pub(crate) fn set_show_state(handle: isize, mode: ShowMode) -> Result<()> {
    let hwnd = HWND(handle as *mut c_void);
    if !unsafe { IsWindow(Some(hwnd)) }.as_bool() {
        return Err(Error::os("ShowWindow", format!("window {:#x} is gone", handle)));
    }
    // The return value is the previous visibility, not a status.
    let _was_visible = unsafe { ShowWindow(hwnd, show_cmd(mode)) }.as_bool();
    Ok(())
}

/// Non-negative metric as a size.
fn dim(v: i32) -> u32 {
    u32::try_from(v).unwrap_or(0)
}

/// Bounding rectangle of all monitors.
pub(crate) fn virtual_screen() -> Rect {
    unsafe {
        Rect::new(
            GetSystemMetrics(SM_XVIRTUALSCREEN),
            GetSystemMetrics(SM_YVIRTUALSCREEN),
            dim(GetSystemMetrics(SM_CXVIRTUALSCREEN)),
            dim(GetSystemMetrics(SM_CYVIRTUALSCREEN)),
        )
    }
}

/// The primary monitor at its current resolution.
pub(crate) fn primary_screen() -> Rect {
    unsafe {
        Rect::new(
            0,
            0,
            dim(GetSystemMetrics(SM_CXSCREEN)),
            dim(GetSystemMetrics(SM_CYSCREEN)),
        )
    }
}

/// Rectangle of the foreground window.
pub(crate) fn foreground_window_rect() -> Option<Rect> {
    let hwnd = unsafe { GetForegroundWindow() };
    if hwnd.is_invalid() {
        return None;
    }
    let mut r = RECT::default();
    unsafe { GetWindowRect(hwnd, &mut r) }.ok()?;
    Some(Rect::new(
        r.left,
        r.top,
        dim(r.right - r.left),
        dim(r.bottom - r.top),
    ))
}
