//! Screenshot region resolution and save policy.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use config::{Region, SaveSpec};
use image::{ImageFormat, RgbaImage};
use tracing::{debug, info};

use crate::{
    Error, Result,
    ops::{Bitmap, Rect, SysOps},
};

/// Resolve the capture rectangle for `region`.
///
/// `Current` uses the foreground window and falls back to the primary
/// monitor when there is none or its rectangle is empty.
pub fn region_rect(ops: &dyn SysOps, region: Region) -> Rect {
    match region {
        Region::All => ops.virtual_screen(),
        Region::Current => ops
            .foreground_window_rect()
            .filter(|r| !r.is_empty())
            .unwrap_or_else(|| ops.primary_screen()),
        Region::Primary => ops.primary_screen(),
    }
}

/// `YYYYMMDDhhmmss`, zero-padded.
pub fn timestamp(now: DateTime<Utc>) -> String {
    now.format("%Y%m%d%H%M%S").to_string()
}

/// File name offered by the save prompt.
pub fn default_file_name(ts: &str) -> String {
    format!("ScreenShot-{}.png", ts)
}

/// Output path for a prefix save target.
pub fn prefixed_path(prefix: &str, ts: &str) -> PathBuf {
    PathBuf::from(format!("{}-{}.png", prefix, ts))
}

/// Convert captured pixels into an image with every pixel fully opaque.
fn to_image(bitmap: &Bitmap) -> Result<RgbaImage> {
    let mut img = RgbaImage::from_raw(bitmap.width, bitmap.height, bitmap.rgba.clone())
        .ok_or_else(|| {
            Error::Msg(format!(
                "bitmap {}x{} has {} bytes",
                bitmap.width,
                bitmap.height,
                bitmap.rgba.len()
            ))
        })?;
    for px in img.pixels_mut() {
        px.0[3] = 0xFF;
    }
    Ok(img)
}

/// Encode `bitmap` as an 8-bit RGBA PNG at `path`.
pub fn write_png(bitmap: &Bitmap, path: &Path) -> Result<()> {
    to_image(bitmap)?.save_with_format(path, ImageFormat::Png)?;
    info!("Screenshot saved to {}", path.display());
    Ok(())
}

/// Capture `region` and deliver it to `save`.
///
/// Returns the file written, if any.
pub fn take(ops: &dyn SysOps, region: Region, save: &SaveSpec) -> Result<Option<PathBuf>> {
    let rect = region_rect(ops, region);
    debug!(
        "Capture {:?} at {},{} {}x{}",
        region, rect.x, rect.y, rect.width, rect.height
    );
    let bitmap = ops.capture(rect)?;
    match save {
        SaveSpec::Clipboard => {
            ops.set_clipboard_image(&bitmap)?;
            Ok(None)
        }
        SaveSpec::Ask => {
            let name = default_file_name(&timestamp(ops.now()));
            let Some(path) = ops.prompt_save_path(&name) else {
                info!("Screenshot save cancelled");
                return Ok(None);
            };
            write_png(&bitmap, &path)?;
            Ok(Some(path))
        }
        SaveSpec::Prefix(prefix) => {
            let path = prefixed_path(prefix, &timestamp(ops.now()));
            write_png(&bitmap, &path)?;
            Ok(Some(path))
        }
    }
}
