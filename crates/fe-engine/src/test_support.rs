//! Test doubles for the engine's OS seams.
//!
//! Both mocks are cheap clones over shared state: hand one clone to the
//! engine and keep another to script behavior and inspect recorded calls.

use std::{
    collections::{HashMap, HashSet},
    path::PathBuf,
    sync::{
        Arc,
        atomic::{AtomicBool, AtomicU32, Ordering},
    },
};

use chrono::{DateTime, TimeZone, Utc};
use config::ShowMode;
use parking_lot::Mutex;
use win_keycode::{Chord, Key, Modifiers};

use crate::{
    Error, Result,
    deps::HotkeyApi,
    ops::{Bitmap, Rect, ShortcutSpec, SysOps, WindowInfo},
};

/// In-memory hotkey facility that, like the OS, refuses a combination that is
/// already claimed.
#[derive(Clone, Default)]
pub struct MockHotkeyApi {
    calls: Arc<Mutex<Vec<String>>>,
    held: Arc<Mutex<HashMap<u32, (Modifiers, Key)>>>,
    /// Combinations currently claimed, for constant-time duplicate checks.
    claimed: Arc<Mutex<HashSet<(Modifiers, Key)>>>,
    unregistered: Arc<Mutex<Vec<u32>>>,
    fail_register: Arc<AtomicBool>,
}

impl MockHotkeyApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent registration fail.
    pub fn set_fail_register(&self, v: bool) {
        self.fail_register.store(v, Ordering::SeqCst);
    }

    /// Ids currently held, ascending.
    pub fn held_ids(&self) -> Vec<u32> {
        let mut ids: Vec<u32> = self.held.lock().keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Every id passed to a successful unregister, in call order.
    pub fn unregistered(&self) -> Vec<u32> {
        self.unregistered.lock().clone()
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    pub fn calls_contains(&self, needle: &str) -> bool {
        self.calls.lock().iter().any(|c| c == needle)
    }
}

impl HotkeyApi for MockHotkeyApi {
    fn register(&self, id: u32, chord: &Chord) -> Result<()> {
        self.calls.lock().push(format!("register:{}:{}", id, chord));
        let pair = (chord.registration_modifiers(), chord.key);
        if self.fail_register.load(Ordering::SeqCst) {
            return Err(Error::Hotkey {
                chord: chord.to_string(),
                message: "mock failure".into(),
            });
        }
        if !self.claimed.lock().insert(pair) {
            return Err(Error::Hotkey {
                chord: chord.to_string(),
                message: "already registered".into(),
            });
        }
        self.held.lock().insert(id, pair);
        Ok(())
    }

    fn unregister(&self, id: u32) -> Result<()> {
        self.calls.lock().push(format!("unregister:{}", id));
        let Some(pair) = self.held.lock().remove(&id) else {
            return Err(Error::Hotkey {
                chord: format!("id {}", id),
                message: "not registered".into(),
            });
        };
        self.claimed.lock().remove(&pair);
        self.unregistered.lock().push(id);
        Ok(())
    }
}

/// In-memory system capabilities recording every call as a string.
///
/// Call formats:
/// `launch:<cmd>:<mode>:<wait>`, `kill_pid:<pid>:<code>`,
/// `kill_name:<name>:<code>`, `display:<monitor|->:<w>x<h>`,
/// `show:<handle>:<mode>`, `capture:<x>,<y>,<w>,<h>`, `clipboard:<w>x<h>`,
/// `prompt:<default>`, `shell:<verb>:<file>:<args>:<dir>:<mode>`,
/// `shortcut:<link>:<target>:<args>:<icon>:<index>:<mode>`,
/// `notify:<title>:<text>`.
#[derive(Clone)]
pub struct MockSysOps {
    calls: Arc<Mutex<Vec<String>>>,
    windows: Arc<Mutex<Vec<WindowInfo>>>,
    own_pid: Arc<AtomicU32>,
    foreground: Arc<Mutex<Option<Rect>>>,
    save_path: Arc<Mutex<Option<PathBuf>>>,
    now: Arc<Mutex<DateTime<Utc>>>,
    fail_launch: Arc<AtomicBool>,
    fail_capture: Arc<AtomicBool>,
    fail_show: Arc<AtomicBool>,
}

impl Default for MockSysOps {
    fn default() -> Self {
        Self::new()
    }
}

impl MockSysOps {
    /// Virtual screen: two side-by-side monitors, the second left of the primary.
    pub const VIRTUAL: Rect = Rect {
        x: -1920,
        y: 0,
        width: 3840,
        height: 1080,
    };
    /// Primary monitor.
    pub const PRIMARY: Rect = Rect {
        x: 0,
        y: 0,
        width: 1920,
        height: 1080,
    };

    pub fn new() -> Self {
        let epoch = Utc
            .with_ymd_and_hms(2024, 1, 2, 3, 4, 5)
            .single()
            .unwrap_or_default();
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            windows: Arc::new(Mutex::new(Vec::new())),
            own_pid: Arc::new(AtomicU32::new(1)),
            foreground: Arc::new(Mutex::new(None)),
            save_path: Arc::new(Mutex::new(None)),
            now: Arc::new(Mutex::new(epoch)),
            fail_launch: Arc::new(AtomicBool::new(false)),
            fail_capture: Arc::new(AtomicBool::new(false)),
            fail_show: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn set_windows(&self, windows: Vec<WindowInfo>) {
        *self.windows.lock() = windows;
    }

    pub fn set_own_pid(&self, pid: u32) {
        self.own_pid.store(pid, Ordering::SeqCst);
    }

    pub fn set_foreground(&self, rect: Option<Rect>) {
        *self.foreground.lock() = rect;
    }

    /// Answer for the next save prompts; `None` cancels.
    pub fn set_save_path(&self, path: Option<PathBuf>) {
        *self.save_path.lock() = path;
    }

    pub fn set_now(&self, now: DateTime<Utc>) {
        *self.now.lock() = now;
    }

    pub fn set_fail_launch(&self, v: bool) {
        self.fail_launch.store(v, Ordering::SeqCst);
    }

    pub fn set_fail_capture(&self, v: bool) {
        self.fail_capture.store(v, Ordering::SeqCst);
    }

    pub fn set_fail_show(&self, v: bool) {
        self.fail_show.store(v, Ordering::SeqCst);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    pub fn calls_contains(&self, needle: &str) -> bool {
        self.calls.lock().iter().any(|c| c == needle)
    }

    /// Recorded calls whose name (text before the first `:`) is `name`.
    pub fn calls_named(&self, name: &str) -> Vec<String> {
        self.calls
            .lock()
            .iter()
            .filter(|c| c.split(':').next() == Some(name))
            .cloned()
            .collect()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().clear();
    }

    fn record(&self, call: String) {
        self.calls.lock().push(call);
    }
}

impl SysOps for MockSysOps {
    fn launch(&self, command: &str, show: ShowMode, wait: bool) -> Result<()> {
        self.record(format!("launch:{}:{}:{}", command, show.as_str(), wait));
        if self.fail_launch.load(Ordering::SeqCst) {
            return Err(Error::os("CreateProcess", "mock failure"));
        }
        Ok(())
    }

    fn kill_pid(&self, pid: u32, exit_code: u32) -> Result<()> {
        self.record(format!("kill_pid:{}:{}", pid, exit_code));
        Ok(())
    }

    fn kill_name(&self, name: &str, exit_code: u32) -> Result<usize> {
        self.record(format!("kill_name:{}:{}", name, exit_code));
        Ok(0)
    }

    fn change_display_mode(&self, monitor: Option<&str>, width: u32, height: u32) -> Result<()> {
        self.record(format!(
            "display:{}:{}x{}",
            monitor.unwrap_or("-"),
            width,
            height
        ));
        Ok(())
    }

    fn list_windows(&self) -> Vec<WindowInfo> {
        self.windows.lock().clone()
    }

    fn set_show_state(&self, handle: isize, mode: ShowMode) -> Result<()> {
        self.record(format!("show:{}:{}", handle, mode.as_str()));
        if self.fail_show.load(Ordering::SeqCst) {
            return Err(Error::os("ShowWindow", "mock failure"));
        }
        Ok(())
    }

    fn own_pid(&self) -> u32 {
        self.own_pid.load(Ordering::SeqCst)
    }

    fn virtual_screen(&self) -> Rect {
        Self::VIRTUAL
    }

    fn primary_screen(&self) -> Rect {
        Self::PRIMARY
    }

    fn foreground_window_rect(&self) -> Option<Rect> {
        *self.foreground.lock()
    }

    fn capture(&self, rect: Rect) -> Result<Bitmap> {
        self.record(format!(
            "capture:{},{},{},{}",
            rect.x, rect.y, rect.width, rect.height
        ));
        if self.fail_capture.load(Ordering::SeqCst) {
            return Err(Error::os("BitBlt", "mock failure"));
        }
        Ok(Bitmap {
            width: 2,
            height: 2,
            rgba: vec![0x80; 16],
        })
    }

    fn set_clipboard_image(&self, bitmap: &Bitmap) -> Result<()> {
        self.record(format!("clipboard:{}x{}", bitmap.width, bitmap.height));
        Ok(())
    }

    fn prompt_save_path(&self, default_name: &str) -> Option<PathBuf> {
        self.record(format!("prompt:{}", default_name));
        self.save_path.lock().clone()
    }

    fn shell_execute(
        &self,
        verb: &str,
        file: &str,
        args: Option<&str>,
        directory: Option<&str>,
        show: ShowMode,
    ) -> Result<()> {
        self.record(format!(
            "shell:{}:{}:{}:{}:{}",
            verb,
            file,
            args.unwrap_or(""),
            directory.unwrap_or(""),
            show.as_str()
        ));
        Ok(())
    }

    fn create_shortcut(&self, spec: &ShortcutSpec) -> Result<()> {
        self.record(format!(
            "shortcut:{}:{}:{}:{}:{}:{}",
            spec.link,
            spec.target,
            spec.args.as_deref().unwrap_or(""),
            spec.icon.as_deref().unwrap_or(""),
            spec.icon_index,
            spec.show.as_str()
        ));
        Ok(())
    }

    fn notify_error(&self, title: &str, text: &str) {
        self.record(format!("notify:{}:{}", title, text));
    }

    fn now(&self) -> DateTime<Utc> {
        *self.now.lock()
    }
}
