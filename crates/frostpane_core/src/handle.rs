//! Native window handle shim

use raw_window_handle::{HasWindowHandle, RawWindowHandle};

/// A non-null native window handle (an `HWND` on Windows).
///
/// The handle only exists once the window has been shown; callers that
/// do not have one yet must defer native work rather than pass a
/// placeholder.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct WindowHandle(isize);

impl WindowHandle {
    /// Wrap a raw handle value. Returns `None` for null handles.
    pub fn new(raw: isize) -> Option<Self> {
        (raw != 0).then_some(Self(raw))
    }

    /// Extract the Win32 handle from any `raw-window-handle` window.
    ///
    /// Returns `None` when the window has no handle yet or is not a
    /// Win32 window; theming is inert on those targets.
    pub fn from_window(window: &impl HasWindowHandle) -> Option<Self> {
        match window.window_handle().ok()?.as_raw() {
            RawWindowHandle::Win32(handle) => Self::new(handle.hwnd.get()),
            _ => None,
        }
    }

    pub fn raw(self) -> isize {
        self.0
    }
}
