mod common;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use common::MemoryPackLoader;
use frostpane_core::Color;
use frostpane_theme::packs::{ResourceSet, ThemePackService};
use frostpane_theme::ThemeError;

fn service() -> ThemePackService {
    let loader = MemoryPackLoader::default()
        .with_pack("pack://a", "pack-a")
        .with_pack("pack://b", "pack-b");
    ThemePackService::new(Box::new(loader))
}

#[test]
fn swapping_leaves_exactly_one_theme_pack() {
    let service = service();

    service.set_theme_source("pack://a").unwrap();
    let packs = service.theme_packs();
    assert_eq!(packs.len(), 1);
    assert_eq!(packs[0].source.as_deref(), Some("pack://a"));

    service.set_theme_source("pack://b").unwrap();
    let packs = service.theme_packs();
    assert_eq!(packs.len(), 1, "the old pack must be gone");
    assert_eq!(packs[0].source.as_deref(), Some("pack://b"));
    assert_eq!(service.theme_source().as_deref(), Some("pack://b"));
}

#[test]
fn non_theme_resource_sets_survive_swaps() {
    let service = service();
    let mut colors = rustc_hash::FxHashMap::default();
    colors.insert("border".to_owned(), Color::from_hex(0x112233));
    service.add_resource_set(ResourceSet {
        name: "toolkit-styles".to_owned(),
        source: None,
        colors,
    });

    service.set_theme_source("pack://a").unwrap();
    service.set_theme_source("pack://b").unwrap();

    let merged = service.merged_sets();
    assert_eq!(merged.len(), 2);
    assert!(merged.iter().any(|set| set.name == "toolkit-styles"));
}

#[test]
fn blank_sources_are_rejected_at_the_boundary() {
    let service = service();
    assert!(matches!(
        service.set_theme_source("  "),
        Err(ThemeError::InvalidSource(_))
    ));
    assert_eq!(service.theme_source(), None);
    assert!(service.theme_packs().is_empty());
}

#[test]
fn windows_are_refreshed_during_the_swap() {
    let service = service();
    let refreshes = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&refreshes);
    service.set_refresh_callback(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    service.set_theme_source("pack://a").unwrap();
    service.set_theme_source("pack://b").unwrap();
    assert_eq!(refreshes.load(Ordering::SeqCst), 2);
}

#[test]
fn completed_swaps_are_announced() {
    let service = service();
    let seen: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let _sub = service.on_source_changed(move |source| sink.lock().unwrap().push(source.clone()));

    service.set_theme_source("pack://a").unwrap();
    service.set_theme_source("pack://b").unwrap();
    assert_eq!(seen.lock().unwrap().as_slice(), ["pack://a", "pack://b"]);
}

#[test]
fn a_failed_load_does_not_disturb_the_merged_set() {
    let service = service();
    service.set_theme_source("pack://a").unwrap();

    assert!(service.set_theme_source("pack://missing").is_err());
    let packs = service.theme_packs();
    assert_eq!(packs.len(), 1);
    assert_eq!(packs[0].source.as_deref(), Some("pack://a"));
}

#[test]
fn color_lookup_prefers_the_latest_merge() {
    let service = service();
    service.set_theme_source("pack://a").unwrap();

    let marker = frostpane_theme::THEME_PACK_MARKER;
    assert_eq!(service.lookup_color(marker), Some(Color::from_hex(0x202020)));
    assert_eq!(service.lookup_color("no-such-key"), None);
}
