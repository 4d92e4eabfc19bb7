//! fe Engine
//!
//! The engine turns a parsed configuration into behavior:
//! - registers `hotkey` entries with the OS global-hotkey facility
//! - resolves hotkey presses and tray selections back to their entries
//! - selects and runs the single action each entry describes
//! - drives the load / reload / edit / shutdown lifecycle
//!
//! Every side effect goes through two seams, [`HotkeyApi`] and [`SysOps`], so
//! the whole engine runs against the in-memory doubles in [`test_support`].
//! The entry point is [`Session`].

mod deps;
mod dispatch;
mod error;
mod key_binding;
mod ops;
pub mod screenshot;
mod session;
mod toggle;

pub mod test_support;

pub use deps::HotkeyApi;
pub use dispatch::Dispatcher;
pub use error::{Error, Result};
pub use key_binding::{HotkeyRegistry, MAX_HOTKEY_ID, RegistrationReport};
pub use ops::{Bitmap, KILL_EXIT_CODE, Rect, ShortcutSpec, SysOps, WindowInfo};
pub use session::{APP_TITLE, DEFAULT_EDITOR, Session, SessionOptions, SessionState, Trigger};
pub use toggle::{Phase, Source, ToggleState};
