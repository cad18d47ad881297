//! Shared test doubles: a recording attribute sink, a scriptable system
//! theme probe, and an in-memory pack loader.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use rustc_hash::FxHashMap;

use frostpane_core::{Color, ColorScheme, WindowHandle};
use frostpane_theme::backdrop::{DwmAttribute, WindowAttributeSink, WindowChrome};
use frostpane_theme::error::ThemeError;
use frostpane_theme::packs::{PackLoader, ResourceSet};
use frostpane_theme::platform::{OsTier, SystemTheme};
use frostpane_theme::window::ThemedWindow;
use frostpane_theme::SchemeEvents;

/// One native call observed by the recording sink.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SinkOp {
    Attribute { attr: DwmAttribute, value: i32 },
    Chrome { caption_height: i32, corner_radius: i32 },
    ClearBackground,
}

pub type Ops = Arc<Mutex<Vec<SinkOp>>>;

pub struct RecordingSink {
    ops: Ops,
}

impl RecordingSink {
    pub fn new() -> (Self, Ops) {
        let ops: Ops = Arc::new(Mutex::new(Vec::new()));
        (Self { ops: Arc::clone(&ops) }, ops)
    }
}

impl WindowAttributeSink for RecordingSink {
    fn set_attribute(&mut self, _: WindowHandle, attr: DwmAttribute, value: i32) {
        self.ops.lock().unwrap().push(SinkOp::Attribute { attr, value });
    }

    fn set_chrome(&mut self, _: WindowHandle, chrome: &WindowChrome) {
        self.ops.lock().unwrap().push(SinkOp::Chrome {
            caption_height: chrome.caption_height,
            corner_radius: chrome.corner_radius,
        });
    }

    fn clear_background(&mut self, _: WindowHandle) {
        self.ops.lock().unwrap().push(SinkOp::ClearBackground);
    }
}

/// Values written for one attribute, in call order.
pub fn attribute_values(ops: &Ops, attr: DwmAttribute) -> Vec<i32> {
    ops.lock()
        .unwrap()
        .iter()
        .filter_map(|op| match op {
            SinkOp::Attribute { attr: a, value } if *a == attr => Some(*value),
            _ => None,
        })
        .collect()
}

/// Scriptable [`SystemTheme`]: the test flips the shared scheme cell.
pub struct FakeSystemTheme {
    pub scheme: Arc<Mutex<ColorScheme>>,
    pub accent: Option<Color>,
}

impl FakeSystemTheme {
    pub fn new(scheme: ColorScheme) -> (Self, Arc<Mutex<ColorScheme>>) {
        let cell = Arc::new(Mutex::new(scheme));
        (
            Self {
                scheme: Arc::clone(&cell),
                accent: None,
            },
            cell,
        )
    }
}

impl SystemTheme for FakeSystemTheme {
    fn color_scheme(&self) -> ColorScheme {
        *self.scheme.lock().unwrap()
    }

    fn accent_color(&self) -> Option<Color> {
        self.accent
    }
}

/// In-memory [`PackLoader`] keyed by source locator.
#[derive(Default)]
pub struct MemoryPackLoader {
    packs: FxHashMap<String, ResourceSet>,
}

impl MemoryPackLoader {
    pub fn with_pack(mut self, source: &str, name: &str) -> Self {
        let mut colors = FxHashMap::default();
        colors.insert(
            frostpane_theme::THEME_PACK_MARKER.to_owned(),
            Color::from_hex(0x202020),
        );
        self.packs.insert(
            source.to_owned(),
            ResourceSet {
                name: name.to_owned(),
                source: Some(source.to_owned()),
                colors,
            },
        );
        self
    }
}

impl PackLoader for MemoryPackLoader {
    fn load(&self, source: &str) -> frostpane_theme::Result<ResourceSet> {
        self.packs
            .get(source)
            .cloned()
            .ok_or_else(|| ThemeError::PackRead {
                source: source.to_owned(),
                cause: std::io::Error::new(std::io::ErrorKind::NotFound, "no such pack"),
            })
    }
}

pub const HANDLE: isize = 0x1234;

pub fn handle() -> WindowHandle {
    WindowHandle::new(HANDLE).unwrap()
}

/// A themed window on an isolated hub, with a recording sink and a
/// scriptable probe.
pub fn themed_window(
    tier: OsTier,
    scheme: ColorScheme,
) -> (ThemedWindow, Ops, SchemeEvents, Arc<Mutex<ColorScheme>>) {
    let (sink, ops) = RecordingSink::new();
    let (system, scheme_cell) = FakeSystemTheme::new(scheme);
    let events = SchemeEvents::new();
    let window = ThemedWindow::with_parts(tier, Box::new(sink), Box::new(system), events.clone());
    (window, ops, events, scheme_cell)
}
