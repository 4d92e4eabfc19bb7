//! win-ops: Windows backends for fe.
//!
//! [`WinHotkeyApi`] claims global hotkeys on the calling thread and
//! [`WinSysOps`] implements every capability the action handlers call. The
//! remaining helpers cover what the tray binary needs around them: COM
//! initialization, the single-instance guard, message boxes and the thread
//! message pump.
//!
//! The crate is empty on other platforms.
#![cfg(windows)]

mod capture;
mod dialog;
mod display;
mod error;
mod hotkey;
mod instance;
mod message;
mod process;
mod shell;
mod sys;
mod util;
mod window;

pub use dialog::{init_com, notify_error, show_text};
pub use hotkey::WinHotkeyApi;
pub use instance::SingleInstance;
pub use message::{Pump, pump_one, quit};
pub use sys::WinSysOps;
pub use util::expand_env;
