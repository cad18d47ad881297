//! Theme and accent color resolution
//!
//! Produces the themed default for each brush slot. Callers fill only
//! slots the user has not assigned; the engine never overwrites an
//! explicitly set brush (with one deliberate exception documented on
//! [`crate::window::ThemedWindow`]).
//!
//! Defaults follow the Fluent palette: near-black-on-light /
//! near-white-on-dark, with the Windows accent blue when the OS does
//! not report an accent of its own.

use frostpane_core::{BrushSlot, Color, ColorScheme, ThemeMode};

use crate::platform::SystemTheme;

/// Built-in default for a slot under a concrete scheme.
pub fn themed_default(scheme: ColorScheme, slot: BrushSlot) -> Color {
    match (scheme, slot) {
        (ColorScheme::Light, BrushSlot::Accent) => Color::from_hex(0x0078D4),
        (ColorScheme::Dark, BrushSlot::Accent) => Color::from_hex(0x60CDFF),
        (ColorScheme::Light, BrushSlot::Background) => Color::from_hex(0xF3F3F3),
        (ColorScheme::Dark, BrushSlot::Background) => Color::from_hex(0x202020),
        (ColorScheme::Light, BrushSlot::Foreground) => Color::from_hex(0x1A1A1A),
        (ColorScheme::Dark, BrushSlot::Foreground) => Color::WHITE,
    }
}

/// Resolve a slot for an already-concrete scheme.
///
/// The accent slot follows the OS accent color when `use_system_accent`
/// is set and the probe reports one.
pub fn resolve_for_scheme(
    scheme: ColorScheme,
    slot: BrushSlot,
    use_system_accent: bool,
    system: &dyn SystemTheme,
) -> Color {
    if slot == BrushSlot::Accent && use_system_accent {
        if let Some(accent) = system.accent_color() {
            return accent;
        }
    }
    themed_default(scheme, slot)
}

/// Resolve a slot for a [`ThemeMode`].
///
/// `Auto` queries the system light/dark setting first, then applies the
/// mapping for the concrete scheme.
pub fn resolve_color(
    mode: ThemeMode,
    slot: BrushSlot,
    use_system_accent: bool,
    system: &dyn SystemTheme,
) -> Color {
    let scheme = mode.resolve_with(system.color_scheme());
    resolve_for_scheme(scheme, slot, use_system_accent, system)
}
