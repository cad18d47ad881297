//! Native backdrop attribute application
//!
//! Translates a desired backdrop, color scheme and caption height into
//! the DWM window-attribute writes valid for the host's capability
//! tier. Writes go through a [`WindowAttributeSink`] so the native
//! calls stay at one seam; they are fire-and-forget, and a host that
//! rejects an attribute simply keeps its default chrome.

use frostpane_core::{BackdropType, ColorScheme, WindowHandle};

use crate::platform::{capabilities, OsTier};

/// DWM window attributes written by the engine.
///
/// The numeric codes follow the documented `DWMWINDOWATTRIBUTE`
/// enumeration and are part of the interop contract.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DwmAttribute {
    /// `DWMWA_USE_IMMERSIVE_DARK_MODE`: boolean dark title bar.
    UseImmersiveDarkMode,
    /// `DWMWA_MICA_EFFECT`: undocumented boolean backdrop toggle used by
    /// builds before the typed attribute existed.
    MicaEffect,
    /// `DWMWA_SYSTEMBACKDROP_TYPE`: typed backdrop material.
    SystemBackdropType,
}

impl DwmAttribute {
    pub const fn code(self) -> u32 {
        match self {
            DwmAttribute::UseImmersiveDarkMode => 20,
            DwmAttribute::MicaEffect => 1029,
            DwmAttribute::SystemBackdropType => 38,
        }
    }
}

/// Custom chrome applied alongside a backdrop.
///
/// Zero corner radius and an extended glass frame let the compositor
/// material reach the window edge; caption hit-testing at
/// `caption_height` is owned by the embedding toolkit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WindowChrome {
    pub caption_height: i32,
    pub corner_radius: i32,
    pub extend_frame: bool,
}

/// Seam between the applier and the native window.
///
/// The production implementation is [`crate::platform::dwm::DwmSink`];
/// tests substitute recording sinks. Every method is best-effort.
pub trait WindowAttributeSink: Send {
    /// Write one DWM attribute value.
    fn set_attribute(&mut self, handle: WindowHandle, attribute: DwmAttribute, value: i32);

    /// Install custom chrome on the window.
    fn set_chrome(&mut self, handle: WindowHandle, chrome: &WindowChrome);

    /// Force the window's drawable background to fully transparent so
    /// the compositor material shows through.
    ///
    /// The drawable surface belongs to the embedding toolkit, and no
    /// DWM call clears it from outside; production sinks treat this as
    /// a notification and rely on the embedder clearing its surface.
    /// Recording sinks log it to pin the call order.
    fn clear_background(&mut self, handle: WindowHandle);
}

/// Sink that discards everything. Default on targets without a
/// compositor backdrop protocol.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl WindowAttributeSink for NullSink {
    fn set_attribute(&mut self, _: WindowHandle, _: DwmAttribute, _: i32) {}
    fn set_chrome(&mut self, _: WindowHandle, _: &WindowChrome) {}
    fn clear_background(&mut self, _: WindowHandle) {}
}

/// Issues the attribute sequence for one window.
pub struct BackdropApplier;

impl BackdropApplier {
    /// Apply `backdrop` and the concrete `scheme` to `handle`.
    ///
    /// The caller must already hold a valid handle; windows that have
    /// not been shown yet defer instead of calling this. Idempotent:
    /// identical arguments produce identical native state.
    ///
    /// On [`OsTier::Unsupported`] this returns without touching the
    /// sink.
    pub fn apply(
        sink: &mut dyn WindowAttributeSink,
        tier: OsTier,
        handle: WindowHandle,
        scheme: ColorScheme,
        backdrop: BackdropType,
        caption_height: i32,
    ) {
        let caps = capabilities(tier);
        if !caps.dark_mode_attribute {
            tracing::trace!(?tier, "backdrop apply skipped on unsupported host");
            return;
        }

        tracing::trace!(?tier, ?scheme, ?backdrop, caption_height, "applying backdrop");

        if caption_height != -1 {
            sink.set_chrome(
                handle,
                &WindowChrome {
                    caption_height,
                    corner_radius: 0,
                    extend_frame: true,
                },
            );
        }
        sink.clear_background(handle);

        sink.set_attribute(
            handle,
            DwmAttribute::UseImmersiveDarkMode,
            scheme.is_dark() as i32,
        );

        if caps.typed_backdrop {
            sink.set_attribute(handle, DwmAttribute::SystemBackdropType, backdrop as i32);
        } else if caps.legacy_backdrop_toggle {
            sink.set_attribute(handle, DwmAttribute::MicaEffect, 1);
        }
    }
}
