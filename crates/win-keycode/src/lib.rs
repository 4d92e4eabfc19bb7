//! win-keycode: Virtual-key codes and key-combination specs for Windows.
//!
//! - `Key`: a Windows virtual-key code with a closed table of spec names.
//! - `Modifiers`: the modifier bit set understood by the global hotkey API.
//! - `Chord`: a modifier set plus a key, parsed from and rendered to the
//!   prefix grammar used in configuration files (`"ctrl-alt-r"`).
//!
//! Names in the key table are lowercase and compared case-insensitively.
//! Codes outside the table are accepted in numeric form and rendered as
//! `0x%08x`.

mod chord;
mod key;
mod modifiers;
mod num;

pub use chord::Chord;
pub use key::Key;
pub use modifiers::Modifiers;
pub use num::parse_unsigned;
