use win_keycode::Chord;

use crate::Result;

// ---- Hotkey API abstraction ----

/// Minimal global-hotkey API used by the registry.
///
/// Implementations register `chord` under the caller-chosen `id`; the id is
/// what the OS later reports when the combination is pressed. Registering a
/// combination that is already claimed must fail.
pub trait HotkeyApi: Send + Sync {
    /// Claim `chord` for `id`. Use [`Chord::registration_modifiers`] for the
    /// modifier flags passed to the OS.
    fn register(&self, id: u32, chord: &Chord) -> Result<()>;
    /// Release a previously granted `id`.
    fn unregister(&self, id: u32) -> Result<()>;
}
