use std::path::PathBuf;

use config::ShowMode;
use fe_engine::{Bitmap, Rect, Result, ShortcutSpec, SysOps, WindowInfo};

use crate::{capture, dialog, display, process, shell, window};

/// [`SysOps`] over the Win32 API.
///
/// COM must be initialized on the calling thread (see [`crate::init_com`])
/// before the save prompt or shortcut creation is used.
#[derive(Debug, Default, Clone, Copy)]
pub struct WinSysOps;

impl WinSysOps {
    /// Create the backend.
    pub fn new() -> Self {
        Self
    }
}

impl SysOps for WinSysOps {
    fn launch(&self, command: &str, show: ShowMode, wait: bool) -> Result<()> {
        process::launch(command, show, wait)
    }

    fn kill_pid(&self, pid: u32, exit_code: u32) -> Result<()> {
        process::kill_pid(pid, exit_code)
    }

    fn kill_name(&self, name: &str, exit_code: u32) -> Result<usize> {
        process::kill_name(name, exit_code)
    }

    fn change_display_mode(&self, monitor: Option<&str>, width: u32, height: u32) -> Result<()> {
        display::change_display_mode(monitor, width, height)
    }

    fn list_windows(&self) -> Vec<WindowInfo> {
        window::list_windows()
    }

    fn set_show_state(&self, handle: isize, mode: ShowMode) -> Result<()> {
        window::set_show_state(handle, mode)
    }

    fn virtual_screen(&self) -> Rect {
        window::virtual_screen()
    }

    fn primary_screen(&self) -> Rect {
        window::primary_screen()
    }

    fn foreground_window_rect(&self) -> Option<Rect> {
        window::foreground_window_rect()
    }

    fn capture(&self, rect: Rect) -> Result<Bitmap> {
        capture::capture(rect)
    }

    fn set_clipboard_image(&self, bitmap: &Bitmap) -> Result<()> {
        capture::set_clipboard_image(bitmap)
    }

    fn prompt_save_path(&self, default_name: &str) -> Option<PathBuf> {
        dialog::prompt_save_path(default_name)
    }

    fn shell_execute(
        &self,
        verb: &str,
        file: &str,
        args: Option<&str>,
        directory: Option<&str>,
        show: ShowMode,
    ) -> Result<()> {
        shell::shell_execute(verb, file, args, directory, show)
    }

    fn create_shortcut(&self, spec: &ShortcutSpec) -> Result<()> {
        shell::create_shortcut(spec)
    }

    fn notify_error(&self, title: &str, text: &str) {
        dialog::notify_error(title, text);
    }
}
