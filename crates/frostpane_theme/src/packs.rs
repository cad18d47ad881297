//! Theme pack hot-swap
//!
//! A theme pack is a named bundle of color definitions, loaded from a
//! source locator and merged into the process-wide resource state.
//! Exactly one pack is "current" per application instance; swapping it
//! adds the new pack before removing the old set so there is never a
//! styling gap between the two.
//!
//! Packs are TOML documents:
//!
//! ```toml
//! name = "frostpane-dark"
//!
//! [colors]
//! application-background = "#202020"
//! application-foreground = "#FFFFFF"
//! accent = "#60CDFF"
//! ```
//!
//! The `application-background` entry is the marker that identifies a
//! theme pack among arbitrary merged resource sets.

use std::sync::{Mutex, OnceLock};

use rustc_hash::FxHashMap;
use serde::Deserialize;

use frostpane_core::{Color, EventHub, Subscription};

use crate::error::{Result, ThemeError};

/// Marker key distinguishing theme packs from other resource sets.
pub const THEME_PACK_MARKER: &str = "application-background";

const BUILTIN_LIGHT: &str = include_str!("../assets/light.toml");
const BUILTIN_DARK: &str = include_str!("../assets/dark.toml");

/// A named bundle of color definitions.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ResourceSet {
    #[serde(default)]
    pub name: String,

    /// The locator this set was loaded from, if any.
    #[serde(skip)]
    pub source: Option<String>,

    #[serde(default)]
    pub colors: FxHashMap<String, Color>,
}

impl ResourceSet {
    /// Parse a TOML pack document.
    pub fn from_toml(source: &str, text: &str) -> Result<Self> {
        let mut set: ResourceSet =
            toml::from_str(text).map_err(|cause| ThemeError::PackParse {
                source: source.to_owned(),
                cause,
            })?;
        set.source = Some(source.to_owned());
        Ok(set)
    }

    /// Whether this set is a theme pack (carries the marker key).
    pub fn is_theme_pack(&self) -> bool {
        self.colors.contains_key(THEME_PACK_MARKER)
    }

    pub fn color(&self, key: &str) -> Option<Color> {
        self.colors.get(key).copied()
    }
}

/// Loads a resource set from a source locator.
///
/// Loading is total and synchronous: by the time `load` returns, the
/// pack is fully materialized, which is what lets the swap sequence
/// treat "add" as a single step.
pub trait PackLoader: Send {
    fn load(&self, source: &str) -> Result<ResourceSet>;
}

/// Production loader: `builtin://` packs shipped with the crate, or
/// TOML files addressed by path / `file://` locator.
#[derive(Clone, Copy, Debug, Default)]
pub struct TomlPackLoader;

impl PackLoader for TomlPackLoader {
    fn load(&self, source: &str) -> Result<ResourceSet> {
        if let Some(builtin) = source.strip_prefix("builtin://") {
            let text = match builtin {
                "light" => BUILTIN_LIGHT,
                "dark" => BUILTIN_DARK,
                other => return Err(ThemeError::UnknownBuiltin(other.to_owned())),
            };
            return ResourceSet::from_toml(source, text);
        }

        let path = source.strip_prefix("file://").unwrap_or(source);
        let text = std::fs::read_to_string(path).map_err(|cause| ThemeError::PackRead {
            source: source.to_owned(),
            cause,
        })?;
        ResourceSet::from_toml(source, &text)
    }
}

struct ServiceInner {
    current_source: Option<String>,
    merged: Vec<ResourceSet>,
    loader: Box<dyn PackLoader>,
    refresh_windows: Option<Box<dyn Fn() + Send>>,
}

/// Process-wide theme pack state with atomic hot-swap.
///
/// One service-level lock serializes overlapping swap sequences so
/// their add/remove steps cannot interleave; it provides ordering, not
/// general thread-safety, and all theming is expected to run on the UI
/// thread.
pub struct ThemePackService {
    inner: Mutex<ServiceInner>,
    source_changed: EventHub<String>,
}

static PACK_SERVICE: OnceLock<ThemePackService> = OnceLock::new();

impl ThemePackService {
    pub fn new(loader: Box<dyn PackLoader>) -> Self {
        Self {
            inner: Mutex::new(ServiceInner {
                current_source: None,
                merged: Vec::new(),
                loader,
                refresh_windows: None,
            }),
            source_changed: EventHub::new(),
        }
    }

    /// The process-wide service, backed by [`TomlPackLoader`].
    pub fn global() -> &'static ThemePackService {
        PACK_SERVICE.get_or_init(|| ThemePackService::new(Box::new(TomlPackLoader)))
    }

    /// Register the callback that refreshes all open windows' visual
    /// content before a swap removes the old pack.
    ///
    /// Runs inside the swap critical section; it must not call back
    /// into the service.
    pub fn set_refresh_callback(&self, callback: impl Fn() + Send + 'static) {
        self.inner.lock().unwrap().refresh_windows = Some(Box::new(callback));
    }

    /// Swap the current theme pack.
    ///
    /// The new pack is merged before the old set is removed; removing
    /// first would leave windows with default styling in between. After
    /// the swap completes, exactly one theme pack matching `source` is
    /// merged and a source-changed notification fires.
    pub fn set_theme_source(&self, source: &str) -> Result<()> {
        if source.trim().is_empty() {
            return Err(ThemeError::InvalidSource(source.to_owned()));
        }

        {
            let mut inner = self.inner.lock().unwrap();

            inner.current_source = Some(source.to_owned());

            let old_packs: Vec<usize> = inner
                .merged
                .iter()
                .enumerate()
                .filter(|(_, set)| set.is_theme_pack())
                .map(|(index, _)| index)
                .collect();

            // Invalidate cached styles in every open window before the
            // merged set changes underneath them.
            if let Some(refresh) = inner.refresh_windows.as_ref() {
                refresh();
            }

            let new_pack = inner.loader.load(source)?;
            tracing::debug!(source, replaced = old_packs.len(), "swapping theme pack");
            inner.merged.push(new_pack);

            for index in old_packs.into_iter().rev() {
                inner.merged.remove(index);
            }
        }

        self.source_changed.publish(&source.to_owned());
        Ok(())
    }

    /// The current theme source, if one has been set.
    pub fn theme_source(&self) -> Option<String> {
        self.inner.lock().unwrap().current_source.clone()
    }

    /// Observe completed source swaps.
    pub fn on_source_changed(
        &self,
        callback: impl FnMut(&String) + Send + 'static,
    ) -> Subscription {
        self.source_changed.subscribe(callback)
    }

    /// Merge a resource set that is not managed by the swap sequence
    /// (toolkit styles, app-specific colors). Sets without the marker
    /// key are never touched by [`set_theme_source`].
    pub fn add_resource_set(&self, set: ResourceSet) {
        self.inner.lock().unwrap().merged.push(set);
    }

    /// Snapshot of every merged resource set.
    pub fn merged_sets(&self) -> Vec<ResourceSet> {
        self.inner.lock().unwrap().merged.clone()
    }

    /// Snapshot of the merged theme packs (marker-keyed sets).
    pub fn theme_packs(&self) -> Vec<ResourceSet> {
        self.inner
            .lock()
            .unwrap()
            .merged
            .iter()
            .filter(|set| set.is_theme_pack())
            .cloned()
            .collect()
    }

    /// Look up a color across the merged sets, later merges winning.
    pub fn lookup_color(&self, key: &str) -> Option<Color> {
        self.inner
            .lock()
            .unwrap()
            .merged
            .iter()
            .rev()
            .find_map(|set| set.color(key))
    }
}
