//! Public theming enums
//!
//! `BackdropType`'s numeric values are part of the native contract: they
//! match the DWM `DWM_SYSTEMBACKDROP_TYPE` enumeration and must survive
//! serialization bit-exact.

use serde::{Deserialize, Serialize};

/// The compositor material drawn behind a window's client area.
///
/// Meaningless on unsupported hosts, where applying it is a no-op.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(i32)]
pub enum BackdropType {
    None = 1,
    #[default]
    Mica = 2,
    Acrylic = 3,
    Tabbed = 4,
}

/// The color scheme a window is asked to use.
///
/// `Auto` tracks the host OS light/dark setting.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ThemeMode {
    Light,
    Dark,
    #[default]
    Auto,
}

/// A resolved, concrete light/dark scheme.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColorScheme {
    #[default]
    Light,
    Dark,
}

impl ColorScheme {
    pub fn toggle(self) -> Self {
        match self {
            ColorScheme::Light => ColorScheme::Dark,
            ColorScheme::Dark => ColorScheme::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        self == ColorScheme::Dark
    }
}

impl ThemeMode {
    /// Collapse to a concrete scheme, given the system scheme for `Auto`.
    pub fn resolve_with(self, system: ColorScheme) -> ColorScheme {
        match self {
            ThemeMode::Light => ColorScheme::Light,
            ThemeMode::Dark => ColorScheme::Dark,
            ThemeMode::Auto => system,
        }
    }
}

/// The three per-window brush slots resolved by the theming engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BrushSlot {
    Accent,
    Background,
    Foreground,
}
