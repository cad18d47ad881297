//! Frostpane Core
//!
//! Foundational value types shared by the Frostpane theming engine:
//!
//! - **Colors**: RGBA [`Color`] with hex parsing and serde support
//! - **Theming enums**: [`BackdropType`], [`ThemeMode`], [`ColorScheme`]
//! - **Window handles**: [`WindowHandle`], a thin shim over a native
//!   window handle, extractable from any `raw-window-handle` window
//! - **Events**: [`EventHub`] with idempotent [`Subscription`] tokens
//!
//! # Example
//!
//! ```rust
//! use frostpane_core::{Color, ColorScheme, EventHub};
//!
//! let hub: EventHub<ColorScheme> = EventHub::new();
//! let seen = std::sync::Arc::new(std::sync::Mutex::new(Vec::new()));
//! let sink = seen.clone();
//! let sub = hub.subscribe(move |scheme| sink.lock().unwrap().push(*scheme));
//!
//! hub.publish(&ColorScheme::Dark);
//! assert_eq!(seen.lock().unwrap().as_slice(), [ColorScheme::Dark]);
//! drop(sub);
//!
//! let accent: Color = "#0078D4".parse().unwrap();
//! assert_eq!(accent, Color::from_hex(0x0078D4));
//! ```

pub mod color;
pub mod events;
pub mod handle;
pub mod types;

pub use color::{Color, ParseColorError};
pub use events::{EventHub, Subscription};
pub use handle::WindowHandle;
pub use types::{BackdropType, BrushSlot, ColorScheme, ThemeMode};
