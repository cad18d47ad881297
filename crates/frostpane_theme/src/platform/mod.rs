//! Host OS capability classification and theme probes
//!
//! The host is classified once per process into an [`OsTier`]; everything
//! downstream branches through the [`capabilities`] table instead of
//! re-reading version numbers. Classification never fails: malformed or
//! missing version data means [`OsTier::Unsupported`], because a theming
//! feature must never crash its host.

use std::sync::OnceLock;

use frostpane_core::{Color, ColorScheme};

#[cfg(target_os = "windows")]
pub mod dwm;

/// First Windows 11 build.
const WINDOWS_11_BUILD: u32 = 22000;

/// First build carrying the typed `DWMWA_SYSTEMBACKDROP_TYPE` attribute.
const TYPED_BACKDROP_BUILD: u32 = 22523;

/// Host capability tiers, ordered from least to most capable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OsTier {
    /// No compositor backdrop support; all native theming calls are inert.
    Unsupported,
    /// Windows 11 before build 22523: a single boolean backdrop toggle.
    LegacyBackdropSupport,
    /// Windows 11 build 22523 and later: typed backdrop materials.
    ModernBackdropSupport,
}

/// Which native operations are valid on a tier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TierCaps {
    /// `DWMWA_USE_IMMERSIVE_DARK_MODE` may be written.
    pub dark_mode_attribute: bool,
    /// Only the boolean `DWMWA_MICA_EFFECT` toggle exists; the material
    /// kind cannot be expressed.
    pub legacy_backdrop_toggle: bool,
    /// `DWMWA_SYSTEMBACKDROP_TYPE` carries the specific material.
    pub typed_backdrop: bool,
}

/// Capability table indexed by tier.
pub const fn capabilities(tier: OsTier) -> TierCaps {
    match tier {
        OsTier::Unsupported => TierCaps {
            dark_mode_attribute: false,
            legacy_backdrop_toggle: false,
            typed_backdrop: false,
        },
        OsTier::LegacyBackdropSupport => TierCaps {
            dark_mode_attribute: true,
            legacy_backdrop_toggle: true,
            typed_backdrop: false,
        },
        OsTier::ModernBackdropSupport => TierCaps {
            dark_mode_attribute: true,
            legacy_backdrop_toggle: false,
            typed_backdrop: true,
        },
    }
}

/// Map a build number to its tier.
///
/// Builds at or above a known threshold get that threshold's tier, so
/// future builds land on the nearest lower known tier rather than on a
/// guess. `None` (unreadable or non-Windows) is `Unsupported`.
pub fn classify(build: Option<u32>) -> OsTier {
    match build {
        Some(build) if build >= TYPED_BACKDROP_BUILD => OsTier::ModernBackdropSupport,
        Some(build) if build >= WINDOWS_11_BUILD => OsTier::LegacyBackdropSupport,
        _ => OsTier::Unsupported,
    }
}

static OS_TIER: OnceLock<OsTier> = OnceLock::new();

/// The host's capability tier, computed once per process.
pub fn os_tier() -> OsTier {
    *OS_TIER.get_or_init(|| {
        let build = current_build();
        let tier = classify(build);
        tracing::debug!(?build, ?tier, "classified host OS");
        tier
    })
}

/// Read-only view of the host's theme settings.
///
/// Queried on demand: at subscribe time and on each change notification,
/// never cached by the engine.
pub trait SystemTheme: Send {
    /// The current system light/dark setting.
    fn color_scheme(&self) -> ColorScheme;

    /// The current system accent color, when the host exposes one.
    fn accent_color(&self) -> Option<Color>;
}

/// Production [`SystemTheme`] backed by the host registry.
///
/// Non-Windows targets report `Light` and no accent.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemThemeProbe;

impl SystemTheme for SystemThemeProbe {
    fn color_scheme(&self) -> ColorScheme {
        read_apps_use_light_theme()
            .map(|light| if light { ColorScheme::Light } else { ColorScheme::Dark })
            .unwrap_or(ColorScheme::Light)
    }

    fn accent_color(&self) -> Option<Color> {
        read_colorization_color().map(Color::from_argb)
    }
}

/// Detect the current system light/dark setting.
pub fn detect_system_color_scheme() -> ColorScheme {
    SystemThemeProbe.color_scheme()
}

#[cfg(target_os = "windows")]
fn current_build() -> Option<u32> {
    registry::current_build_number()
}

#[cfg(target_os = "windows")]
fn read_apps_use_light_theme() -> Option<bool> {
    registry::apps_use_light_theme()
}

#[cfg(target_os = "windows")]
fn read_colorization_color() -> Option<u32> {
    registry::colorization_color()
}

#[cfg(not(target_os = "windows"))]
fn current_build() -> Option<u32> {
    None
}

#[cfg(not(target_os = "windows"))]
fn read_apps_use_light_theme() -> Option<bool> {
    None
}

#[cfg(not(target_os = "windows"))]
fn read_colorization_color() -> Option<u32> {
    None
}

#[cfg(target_os = "windows")]
mod registry {
    //! Best-effort registry reads; any failure reads as `None`.

    use windows::core::{w, PCWSTR};
    use windows::Win32::Foundation::ERROR_SUCCESS;
    use windows::Win32::System::Registry::{
        RegGetValueW, HKEY, HKEY_CURRENT_USER, HKEY_LOCAL_MACHINE, RRF_RT_REG_DWORD,
        RRF_RT_REG_SZ,
    };

    pub fn current_build_number() -> Option<u32> {
        let text = read_string(
            HKEY_LOCAL_MACHINE,
            w!(r"SOFTWARE\Microsoft\Windows NT\CurrentVersion"),
            w!("CurrentBuildNumber"),
        )?;
        text.trim().parse().ok()
    }

    pub fn apps_use_light_theme() -> Option<bool> {
        read_dword(
            HKEY_CURRENT_USER,
            w!(r"Software\Microsoft\Windows\CurrentVersion\Themes\Personalize"),
            w!("AppsUseLightTheme"),
        )
        .map(|v| v != 0)
    }

    pub fn colorization_color() -> Option<u32> {
        read_dword(
            HKEY_CURRENT_USER,
            w!(r"Software\Microsoft\Windows\DWM"),
            w!("ColorizationColor"),
        )
    }

    fn read_dword(root: HKEY, subkey: PCWSTR, value: PCWSTR) -> Option<u32> {
        let mut data: u32 = 0;
        let mut size = std::mem::size_of::<u32>() as u32;
        let status = unsafe {
            RegGetValueW(
                root,
                subkey,
                value,
                RRF_RT_REG_DWORD,
                None,
                Some(&mut data as *mut u32 as *mut _),
                Some(&mut size),
            )
        };
        (status == ERROR_SUCCESS).then_some(data)
    }

    fn read_string(root: HKEY, subkey: PCWSTR, value: PCWSTR) -> Option<String> {
        let mut buf = [0u16; 64];
        let mut size = (buf.len() * 2) as u32;
        let status = unsafe {
            RegGetValueW(
                root,
                subkey,
                value,
                RRF_RT_REG_SZ,
                None,
                Some(buf.as_mut_ptr() as *mut _),
                Some(&mut size),
            )
        };
        if status != ERROR_SUCCESS {
            return None;
        }
        let len = buf.iter().position(|&c| c == 0).unwrap_or(buf.len());
        Some(String::from_utf16_lossy(&buf[..len]))
    }
}
