use std::mem::size_of;

use fe_engine::{Error, Result};
use tracing::debug;
use windows::{
    Win32::Graphics::Gdi::{
        CDS_UPDATEREGISTRY, ChangeDisplaySettingsExW, DEVMODEW, DISP_CHANGE_SUCCESSFUL,
        DM_PELSHEIGHT, DM_PELSWIDTH, ENUM_CURRENT_SETTINGS, EnumDisplaySettingsW,
    },
    core::HSTRING,
};

use crate::util::opt_pcwstr;

/// Switch `monitor` (a display device name such as `\\.\DISPLAY2`, primary
/// when `None`) to `width`x`height`, keeping its other settings. The new mode
/// is written to the registry.
pub(crate) fn change_display_mode(monitor: Option<&str>, width: u32, height: u32) -> Result<()> {
    let device = monitor.map(HSTRING::from);
    let name = opt_pcwstr(device.as_ref());
    let mut mode = DEVMODEW {
        dmSize: size_of::<DEVMODEW>() as u16,
        ..Default::default()
    };
    if !unsafe { EnumDisplaySettingsW(name, ENUM_CURRENT_SETTINGS, &mut mode) }.as_bool() {
        return Err(Error::os(
            "EnumDisplaySettings",
            format!("no current mode for {}", monitor.unwrap_or("primary display")),
        ));
    }
    mode.dmPelsWidth = width;
    mode.dmPelsHeight = height;
    mode.dmFields = DM_PELSWIDTH | DM_PELSHEIGHT;

    let status =
        unsafe { ChangeDisplaySettingsExW(name, Some(&mode), None, CDS_UPDATEREGISTRY, None) };
    if status != DISP_CHANGE_SUCCESSFUL {
        return Err(Error::os(
            "ChangeDisplaySettingsEx",
            format!("{}x{} rejected with status {}", width, height, status.0),
        ));
    }
    debug!("Display mode {}x{} applied", width, height);
    Ok(())
}
