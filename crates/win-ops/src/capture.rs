//! Screen capture and clipboard images.

use std::{mem::size_of, ptr};

use fe_engine::{Bitmap, Error, Rect, Result};
use tracing::{debug, warn};
use windows::Win32::{
    Foundation::{HANDLE, HGLOBAL},
    Graphics::Gdi::{
        BI_RGB, BITMAPINFO, BITMAPINFOHEADER, BitBlt, CreateCompatibleBitmap, CreateCompatibleDC,
        DIB_RGB_COLORS, DeleteDC, DeleteObject, GetDC, GetDIBits, HBITMAP, HDC, ReleaseDC,
        SRCCOPY, SelectObject,
    },
    System::{
        DataExchange::{CloseClipboard, EmptyClipboard, OpenClipboard, SetClipboardData},
        Memory::{GMEM_MOVEABLE, GlobalAlloc, GlobalFree, GlobalLock, GlobalUnlock},
        Ole::CF_DIB,
    },
};

use crate::error::{OsContext, last_error};

/// Size of a `BITMAPINFOHEADER` as stored in a packed DIB.
const DIB_HEADER_LEN: usize = 40;

/// Copy the screen contents of `rect` into RGBA pixels.
pub(crate) fn capture(rect: Rect) -> Result<Bitmap> {
    if rect.is_empty() {
        return Err(Error::os("BitBlt", "empty capture rectangle"));
    }
    let too_big = |_| Error::os("BitBlt", format!("capture rectangle too large: {:?}", rect));
    let w = i32::try_from(rect.width).map_err(too_big)?;
    let h = i32::try_from(rect.height).map_err(too_big)?;

    let screen = unsafe { GetDC(None) };
    if screen.is_invalid() {
        return Err(last_error("GetDC"));
    }
    let pixels = unsafe {
        let mem = CreateCompatibleDC(Some(screen));
        let bmp = CreateCompatibleBitmap(screen, w, h);
        let old = SelectObject(mem, bmp.into());
        let blt = BitBlt(mem, 0, 0, w, h, Some(screen), rect.x, rect.y, SRCCOPY).os("BitBlt");
        SelectObject(mem, old);
        let pixels = blt.and_then(|()| read_pixels(mem, bmp, rect.width, rect.height));
        let _deleted = DeleteObject(bmp.into()).as_bool();
        let _released = DeleteDC(mem).as_bool();
        pixels
    };
    unsafe { ReleaseDC(None, screen) };
    debug!("Captured {}x{} at {},{}", rect.width, rect.height, rect.x, rect.y);
    Ok(Bitmap {
        width: rect.width,
        height: rect.height,
        rgba: pixels?,
    })
}

/// Read `bmp` as top-down 32-bit pixels and reorder BGRA into RGBA.
///
/// # Safety
/// `bmp` must be a live bitmap of the given size, not selected into any DC.
unsafe fn read_pixels(dc: HDC, bmp: HBITMAP, width: u32, height: u32) -> Result<Vec<u8>> {
    let mut info = BITMAPINFO {
        bmiHeader: BITMAPINFOHEADER {
            biSize: size_of::<BITMAPINFOHEADER>() as u32,
            biWidth: width as i32,
            biHeight: -(height as i32),
            biPlanes: 1,
            biBitCount: 32,
            biCompression: BI_RGB.0,
            ..Default::default()
        },
        ..Default::default()
    };
    let mut buf = vec![0u8; width as usize * height as usize * 4];
    let lines = unsafe {
        GetDIBits(
            dc,
            bmp,
            0,
            height,
            Some(buf.as_mut_ptr().cast()),
            &mut info,
            DIB_RGB_COLORS,
        )
    };
    if lines == 0 {
        return Err(last_error("GetDIBits"));
    }
    for px in buf.chunks_exact_mut(4) {
        px.swap(0, 2);
    }
    Ok(buf)
}

/// Pack a bitmap as a `CF_DIB` payload: header, then bottom-up BGRA rows.
pub(crate) fn packed_dib(bitmap: &Bitmap) -> Vec<u8> {
    let stride = bitmap.width as usize * 4;
    let image_len = stride * bitmap.height as usize;
    let mut out = Vec::with_capacity(DIB_HEADER_LEN + image_len);
    out.extend_from_slice(&(DIB_HEADER_LEN as u32).to_le_bytes());
    out.extend_from_slice(&(bitmap.width as i32).to_le_bytes());
    out.extend_from_slice(&(bitmap.height as i32).to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes());
    out.extend_from_slice(&32u16.to_le_bytes());
    out.extend_from_slice(&BI_RGB.0.to_le_bytes());
    out.extend_from_slice(&(image_len as u32).to_le_bytes());
    // Resolution and palette fields.
    out.extend_from_slice(&[0u8; 16]);
    for row in bitmap.rgba.chunks_exact(stride).rev() {
        for px in row.chunks_exact(4) {
            out.extend_from_slice(&[px[2], px[1], px[0], px[3]]);
        }
    }
    out
}

/// Release a global block the clipboard did not take.
fn free_global(mem: HGLOBAL) {
    if let Err(e) = unsafe { GlobalFree(Some(mem)) } {
        debug!("GlobalFree failed: {}", e);
    }
}

/// Copy `dib` into a movable global block and hand it to the open clipboard.
///
/// # Safety
/// The clipboard must be open on this thread.
unsafe fn fill_clipboard(dib: &[u8]) -> Result<()> {
    unsafe {
        EmptyClipboard().os("EmptyClipboard")?;
        let mem = GlobalAlloc(GMEM_MOVEABLE, dib.len()).os("GlobalAlloc")?;
        let dst = GlobalLock(mem);
        if dst.is_null() {
            let err = last_error("GlobalLock");
            free_global(mem);
            return Err(err);
        }
        ptr::copy_nonoverlapping(dib.as_ptr(), dst.cast::<u8>(), dib.len());
        // Unlocking the last lock reports an "error" with a success code.
        if let Err(e) = GlobalUnlock(mem)
            && e.code().is_err()
        {
            debug!("GlobalUnlock failed: {}", e);
        }
        // On success the clipboard owns the block.
        if let Err(e) = SetClipboardData(u32::from(CF_DIB.0), Some(HANDLE(mem.0))) {
            free_global(mem);
            return Err(Error::os("SetClipboardData", e.message()));
        }
    }
    Ok(())
}

/// Replace the clipboard contents with `bitmap`.
pub(crate) fn set_clipboard_image(bitmap: &Bitmap) -> Result<()> {
    let dib = packed_dib(bitmap);
    unsafe { OpenClipboard(None) }.os("OpenClipboard")?;
    let result = unsafe { fill_clipboard(&dib) };
    if let Err(e) = unsafe { CloseClipboard() } {
        warn!("CloseClipboard failed: {}", e);
    }
    result
}
