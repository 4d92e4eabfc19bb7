//! System capabilities consumed by the action handlers.
//!
//! Each method is one opaque call into the window system or process table.
//! The Windows implementation lives in the `win-ops` crate; tests use
//! [`crate::test_support::MockSysOps`].

use std::{path::PathBuf, process};

use chrono::{DateTime, Utc};
use config::ShowMode;

use crate::Result;

/// Exit code given to processes terminated by a `kill` action.
pub const KILL_EXIT_CODE: u32 = 1;

/// A top-level window as seen by the `find` action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowInfo {
    /// Opaque native handle.
    pub handle: isize,
    /// Owning process id.
    pub pid: u32,
    /// Window title; may be empty.
    pub title: String,
}

/// Screen rectangle in virtual-desktop coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rect {
    /// Left edge.
    pub x: i32,
    /// Top edge.
    pub y: i32,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Rect {
    /// Construct a rectangle from origin and size.
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// True when the rectangle covers no pixels.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Captured pixels, top-down rows, 4 bytes per pixel in RGBA order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel data, `width * height * 4` bytes.
    pub rgba: Vec<u8>,
}

/// Arguments for a shortcut-file creation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortcutSpec {
    /// Destination `.lnk` path.
    pub link: String,
    /// Target the shortcut points to.
    pub target: String,
    /// Command-line arguments for the target.
    pub args: Option<String>,
    /// Icon file.
    pub icon: Option<String>,
    /// Icon index within `icon`.
    pub icon_index: i32,
    /// Window show mode recorded in the shortcut.
    pub show: ShowMode,
}

/// Trait abstraction over OS side effects to improve testability.
pub trait SysOps: Send + Sync {
    /// Start `command` (a full command line). With `wait`, block until it exits.
    fn launch(&self, command: &str, show: ShowMode, wait: bool) -> Result<()>;
    /// Terminate one process.
    fn kill_pid(&self, pid: u32, exit_code: u32) -> Result<()>;
    /// Terminate every process whose image name equals `name`, ignoring case.
    /// Returns the number of processes terminated.
    fn kill_name(&self, name: &str, exit_code: u32) -> Result<usize>;
    /// Change the display mode of `monitor` (primary when `None`).
    fn change_display_mode(&self, monitor: Option<&str>, width: u32, height: u32) -> Result<()>;
    /// Enumerate top-level windows.
    fn list_windows(&self) -> Vec<WindowInfo>;
    /// Apply a show mode to one window.
    fn set_show_state(&self, handle: isize, mode: ShowMode) -> Result<()>;
    /// Process id whose windows are never touched by `find`.
    fn own_pid(&self) -> u32 {
        process::id()
    }
    /// Bounding rectangle of all monitors.
    fn virtual_screen(&self) -> Rect;
    /// Rectangle of the primary monitor.
    fn primary_screen(&self) -> Rect;
    /// Rectangle of the foreground window, if there is one.
    fn foreground_window_rect(&self) -> Option<Rect>;
    /// Capture the screen contents of `rect`.
    fn capture(&self, rect: Rect) -> Result<Bitmap>;
    /// Place an image on the clipboard.
    fn set_clipboard_image(&self, bitmap: &Bitmap) -> Result<()>;
    /// Ask the user for a PNG file name. `None` when cancelled.
    fn prompt_save_path(&self, default_name: &str) -> Option<PathBuf>;
    /// Run a shell verb on `file`.
    fn shell_execute(
        &self,
        verb: &str,
        file: &str,
        args: Option<&str>,
        directory: Option<&str>,
        show: ShowMode,
    ) -> Result<()>;
    /// Create a shortcut file.
    fn create_shortcut(&self, spec: &ShortcutSpec) -> Result<()>;
    /// Show a user-visible error notification.
    fn notify_error(&self, title: &str, text: &str);
    /// Current time, used for screenshot file names.
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
