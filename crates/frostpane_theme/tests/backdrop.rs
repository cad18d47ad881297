mod common;

use common::{attribute_values, handle, RecordingSink, SinkOp};
use frostpane_core::{BackdropType, ColorScheme};
use frostpane_theme::backdrop::{BackdropApplier, DwmAttribute};
use frostpane_theme::platform::OsTier;

#[test]
fn modern_tier_writes_the_typed_backdrop() {
    let (mut sink, ops) = RecordingSink::new();
    BackdropApplier::apply(
        &mut sink,
        OsTier::ModernBackdropSupport,
        handle(),
        ColorScheme::Dark,
        BackdropType::Acrylic,
        20,
    );

    let recorded = ops.lock().unwrap().clone();
    assert_eq!(
        recorded,
        vec![
            SinkOp::Chrome {
                caption_height: 20,
                corner_radius: 0,
            },
            SinkOp::ClearBackground,
            SinkOp::Attribute {
                attr: DwmAttribute::UseImmersiveDarkMode,
                value: 1,
            },
            SinkOp::Attribute {
                attr: DwmAttribute::SystemBackdropType,
                value: BackdropType::Acrylic as i32,
            },
        ],
    );
}

#[test]
fn legacy_tier_cannot_express_the_material() {
    let (mut sink, ops) = RecordingSink::new();
    BackdropApplier::apply(
        &mut sink,
        OsTier::LegacyBackdropSupport,
        handle(),
        ColorScheme::Light,
        BackdropType::Tabbed,
        20,
    );

    // Tabbed collapses to the boolean toggle; no typed attribute exists.
    assert_eq!(attribute_values(&ops, DwmAttribute::MicaEffect), vec![1]);
    assert!(attribute_values(&ops, DwmAttribute::SystemBackdropType).is_empty());
    assert_eq!(
        attribute_values(&ops, DwmAttribute::UseImmersiveDarkMode),
        vec![0],
    );
}

#[test]
fn unsupported_tier_makes_no_native_calls() {
    let (mut sink, ops) = RecordingSink::new();
    BackdropApplier::apply(
        &mut sink,
        OsTier::Unsupported,
        handle(),
        ColorScheme::Dark,
        BackdropType::Mica,
        20,
    );
    assert!(ops.lock().unwrap().is_empty());
}

#[test]
fn applying_twice_repeats_the_same_state() {
    let (mut sink, ops) = RecordingSink::new();
    for _ in 0..2 {
        BackdropApplier::apply(
            &mut sink,
            OsTier::ModernBackdropSupport,
            handle(),
            ColorScheme::Dark,
            BackdropType::Mica,
            32,
        );
    }

    let recorded = ops.lock().unwrap().clone();
    let (first, second) = recorded.split_at(recorded.len() / 2);
    assert_eq!(first, second, "identical arguments must produce identical native state");
}

#[test]
fn caption_height_minus_one_skips_custom_chrome() {
    let (mut sink, ops) = RecordingSink::new();
    BackdropApplier::apply(
        &mut sink,
        OsTier::ModernBackdropSupport,
        handle(),
        ColorScheme::Light,
        BackdropType::Mica,
        -1,
    );
    assert!(ops
        .lock()
        .unwrap()
        .iter()
        .all(|op| !matches!(op, SinkOp::Chrome { .. })));
}
