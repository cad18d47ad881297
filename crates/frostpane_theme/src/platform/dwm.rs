//! Production DWM sink
//!
//! Writes window attributes with `DwmSetWindowAttribute`. All calls are
//! fire-and-forget: an attribute rejected by an older build inside a
//! tier degrades to the window's default chrome instead of surfacing an
//! error.

use std::ffi::c_void;

use windows::Win32::Foundation::HWND;
use windows::Win32::Graphics::Dwm::{
    DwmExtendFrameIntoClientArea, DwmSetWindowAttribute, DWMWINDOWATTRIBUTE,
};
use windows::Win32::UI::Controls::MARGINS;

use frostpane_core::WindowHandle;

use crate::backdrop::{DwmAttribute, WindowAttributeSink, WindowChrome};

/// Corner preference attribute and its "do not round" value, used when
/// chrome asks for a zero corner radius.
const DWMWA_WINDOW_CORNER_PREFERENCE: u32 = 33;
const DWMWCP_DONOTROUND: i32 = 1;

/// [`WindowAttributeSink`] backed by the desktop window manager.
#[derive(Clone, Copy, Debug, Default)]
pub struct DwmSink;

impl DwmSink {
    fn write(hwnd: HWND, code: u32, value: i32) {
        let _ = unsafe {
            DwmSetWindowAttribute(
                hwnd,
                DWMWINDOWATTRIBUTE(code as i32),
                &value as *const i32 as *const c_void,
                std::mem::size_of::<i32>() as u32,
            )
        };
    }
}

impl WindowAttributeSink for DwmSink {
    fn set_attribute(&mut self, handle: WindowHandle, attribute: DwmAttribute, value: i32) {
        let hwnd = HWND(handle.raw() as *mut c_void);
        Self::write(hwnd, attribute.code(), value);
    }

    fn set_chrome(&mut self, handle: WindowHandle, chrome: &WindowChrome) {
        let hwnd = HWND(handle.raw() as *mut c_void);

        if chrome.corner_radius == 0 {
            Self::write(hwnd, DWMWA_WINDOW_CORNER_PREFERENCE, DWMWCP_DONOTROUND);
        }

        if chrome.extend_frame {
            // Sheet-of-glass margins; the compositor material fills the
            // whole client area.
            let margins = MARGINS {
                cxLeftWidth: -1,
                cxRightWidth: -1,
                cyTopHeight: -1,
                cyBottomHeight: -1,
            };
            let _ = unsafe { DwmExtendFrameIntoClientArea(hwnd, &margins) };
        }

        // Caption hit-testing at chrome.caption_height belongs to the
        // embedding toolkit; DWM has no attribute for it.
        tracing::trace!(caption_height = chrome.caption_height, "chrome applied");
    }

    fn clear_background(&mut self, _handle: WindowHandle) {
        // The drawable surface is owned by the rendering toolkit. With
        // the frame extended, an embedder that clears its surface to
        // transparent lets the material show through; there is no DWM
        // call to do it on the toolkit's behalf.
    }
}
