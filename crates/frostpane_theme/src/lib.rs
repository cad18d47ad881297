//! Frostpane Theme Engine
//!
//! Gives desktop windows a native compositor backdrop (Mica, Acrylic,
//! Tabbed) and keeps their color scheme synchronized with the host OS
//! theme, with an opt-out for manual control.
//!
//! # Overview
//!
//! The engine is built from five parts:
//!
//! - **Capability classification** ([`platform`]): one-shot detection of
//!   the host OS build, mapped to an ordered set of [`platform::OsTier`]
//!   values and a capability table. Unknown builds degrade, never panic.
//! - **Attribute application** ([`backdrop`]): writes the DWM window
//!   attributes valid for the detected tier through a
//!   [`backdrop::WindowAttributeSink`], fire-and-forget.
//! - **Color resolution** ([`resolver`]): themed defaults for the accent,
//!   background and foreground slots, following the OS accent color and
//!   light/dark setting on demand.
//! - **Theme awareness** ([`awareness`]): a per-window state machine that
//!   follows OS theme-change notifications or suspends them while the
//!   caller drives the theme manually.
//! - **Theme pack hot-swap** ([`packs`]): atomically replaces the
//!   process-wide theme resource pack without a styling gap.
//!
//! [`window::ThemedWindow`] ties these together behind settable
//! properties, the way a toolkit window would expose them.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use frostpane_core::{BackdropType, ThemeMode, WindowHandle};
//! use frostpane_theme::window::ThemedWindow;
//!
//! let mut window = ThemedWindow::new();
//! window.set_theme(ThemeMode::Auto);
//! window.set_backdrop(BackdropType::Mica);
//!
//! // Once the native window exists:
//! let handle = WindowHandle::from_window(&winit_window).unwrap();
//! window.on_loaded(handle);
//!
//! // Feed OS theme changes into the engine, e.g. from winit:
//! // WindowEvent::ThemeChanged(theme) =>
//! //     frostpane_theme::awareness::scheme_events().publish(&scheme);
//! ```
//!
//! # Platform behavior
//!
//! The backdrop protocol is produced entirely by the Windows compositor.
//! On every other target (and on Windows builds before 22000) the engine
//! classifies the host as unsupported and all native calls become no-ops;
//! nothing in this crate is fatal to the hosting application.

pub mod awareness;
pub mod backdrop;
pub mod error;
pub mod packs;
pub mod platform;
pub mod resolver;
pub mod window;

// Re-export commonly used types
pub use awareness::{scheme_events, AwarenessState, SchemeEvents, ThemeAwareness};
pub use backdrop::{BackdropApplier, DwmAttribute, NullSink, WindowAttributeSink, WindowChrome};
pub use error::{Result, ThemeError};
pub use packs::{PackLoader, ResourceSet, ThemePackService, TomlPackLoader, THEME_PACK_MARKER};
pub use platform::{detect_system_color_scheme, os_tier, OsTier, SystemTheme, SystemThemeProbe};
pub use resolver::resolve_color;
pub use window::{reactions, Reactions, ThemedWindow, WindowProp};
