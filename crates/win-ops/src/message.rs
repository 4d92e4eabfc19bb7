//! The thread message pump.

use std::io;

use tracing::error;
use windows::Win32::UI::WindowsAndMessaging::{
    DispatchMessageW, GetMessageW, MSG, PostQuitMessage, TranslateMessage, WM_HOTKEY,
};

/// Outcome of one [`pump_one`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pump {
    /// A registered hotkey fired; carries the binding id.
    Hotkey(u32),
    /// Some other message was dispatched to its window.
    Dispatched,
    /// `WM_QUIT` arrived, or the queue failed. Stop pumping.
    Quit,
}

/// Block for the next message on this thread's queue and handle it.
///
/// Hotkey messages are returned rather than dispatched; everything else goes
/// to its window procedure (this is how the tray icon sees its clicks).
pub fn pump_one() -> Pump {
    let mut msg = MSG::default();
    match unsafe { GetMessageW(&mut msg, None, 0, 0) }.0 {
        0 => return Pump::Quit,
        -1 => {
            error!("GetMessage failed: {}", io::Error::last_os_error());
            return Pump::Quit;
        }
        _ => {}
    }
    if msg.message == WM_HOTKEY {
        if let Ok(id) = u32::try_from(msg.wParam.0) {
            return Pump::Hotkey(id);
        }
    }
    unsafe {
        let _translated = TranslateMessage(&msg).as_bool();
        DispatchMessageW(&msg);
    }
    Pump::Dispatched
}

/// Ask the pump on this thread to stop.
pub fn quit() {
    unsafe { PostQuitMessage(0) };
}
