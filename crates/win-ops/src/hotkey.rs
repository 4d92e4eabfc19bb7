use fe_engine::{Error, HotkeyApi, Result};
use tracing::trace;
use win_keycode::Chord;
use windows::Win32::UI::Input::KeyboardAndMouse::{
    HOT_KEY_MODIFIERS, RegisterHotKey, UnregisterHotKey,
};

/// Global hotkeys bound to the registering thread's message queue.
///
/// Presses arrive as `WM_HOTKEY` with the binding id in `wParam` (see
/// [`crate::pump_one`]), so every call must come from the thread that runs
/// the message loop.
#[derive(Debug, Default, Clone, Copy)]
pub struct WinHotkeyApi;

impl WinHotkeyApi {
    /// Create the API handle.
    pub fn new() -> Self {
        Self
    }
}

/// Binding ids are `i32` at the OS boundary.
fn os_id(op: &'static str, id: u32) -> Result<i32> {
    i32::try_from(id).map_err(|_| Error::os(op, format!("hotkey id {} out of range", id)))
}

impl HotkeyApi for WinHotkeyApi {
    fn register(&self, id: u32, chord: &Chord) -> Result<()> {
        let os_id = os_id("RegisterHotKey", id)?;
        let mods = HOT_KEY_MODIFIERS(chord.registration_modifiers().bits());
        trace!(id, mods = mods.0, vk = chord.key.code(), "RegisterHotKey");
        unsafe { RegisterHotKey(None, os_id, mods, chord.key.code()) }.map_err(|e| {
            Error::Hotkey {
                chord: chord.to_string(),
                message: e.message(),
            }
        })
    }

    fn unregister(&self, id: u32) -> Result<()> {
        let os_id = os_id("UnregisterHotKey", id)?;
        trace!(id, "UnregisterHotKey");
        unsafe { UnregisterHotKey(None, os_id) }
            .map_err(|e| Error::os("UnregisterHotKey", e.message()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_above_i32_are_os_errors() {
        let api = WinHotkeyApi::new();
        let chord = Chord::parse("ctrl-f1").expect("chord");
        match api.register(u32::MAX, &chord) {
            Err(Error::Os { op, message }) => {
                assert_eq!(op, "RegisterHotKey");
                assert!(message.contains("out of range"), "{message}");
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(matches!(
            api.unregister(u32::MAX),
            Err(Error::Os {
                op: "UnregisterHotKey",
                ..
            })
        ));
    }

    #[test]
    fn id_ceiling_fits_os_range() {
        assert_eq!(
            os_id("RegisterHotKey", fe_engine::MAX_HOTKEY_ID).ok(),
            Some(0xBFFF)
        );
    }
}
