use super::*;
use serde_json::json;
use crate::config::effective::{AnimationTrigger, BurstStyle, DrawingMode};

fn map(v: Value) -> OptionMap {
    v.as_object().cloned().unwrap_or_default()
}

fn resolver_with(name: &str, style: Value) -> ConfigResolver {
    let reg = Arc::new(StyleRegistry::new());
    reg.define(name, map(style));
    ConfigResolver::new(reg)
}

#[test]
fn later_tiers_win_key_by_key() {
    let resolver = resolver_with("s", json!({"amplitude": 0.8, "wavelength": 2}));
    let out = resolver.resolve(
        &map(json!({"amplitude": 0.5})),
        Some("s"),
        &map(json!({"wavelength": 3})),
    );
    assert!(out.warnings.is_empty());
    assert_eq!(out.config.amplitude, 0.8);
    assert_eq!(out.config.wavelength, 3.0);
    assert_eq!(out.config.animation_speed, 5000.0);
    assert_eq!(out.options["amplitude"], json!(0.8));
}

#[test]
fn nested_objects_merge_one_level() {
    let resolver = resolver_with("s", json!({"circle": {"loops": 5, "wobble": 0.9}}));
    let out = resolver.resolve(
        &map(json!({"circle": {"curve": 1.0}})),
        Some("s"),
        &map(json!({"circle": {"loops": 2}})),
    );
    assert_eq!(out.config.circle.curve, 1.0);
    assert_eq!(out.config.circle.wobble, 0.9);
    assert_eq!(out.config.circle.loops, 2.0);
    assert_eq!(out.config.circle.thickness, 5.0);
}

#[test]
fn scalar_override_only_replaces_scalar_field() {
    let out = merge_tiers([
        &map(json!({"burst": {"count": 20, "style": "cloud"}})),
        &map(json!({"burst": 2})),
    ]);
    assert_eq!(out["burst"], json!({"count": 20, "style": "cloud", "power": 2}));
}

#[test]
fn unknown_style_is_ignored() {
    let resolver = ConfigResolver::new(Arc::new(StyleRegistry::new()));
    let out = resolver.resolve(&OptionMap::new(), Some("missing"), &OptionMap::new());
    assert_eq!(out.config, EffectiveConfig::default());
}

#[test]
fn invalid_override_falls_back_to_schema_default() {
    // The merge happens before validation, so the bad override replaces the style value and
    // then falls back to the schema default.
    let resolver = resolver_with("s", json!({"delay": 300}));
    let out = resolver.resolve(&OptionMap::new(), Some("s"), &map(json!({"delay": -4})));
    assert_eq!(out.config.delay, 0.0);
    assert_eq!(out.warnings.len(), 1);
}

#[test]
fn layers_expose_each_tier() {
    let resolver = resolver_with("s", json!({"delay": 300}));
    let layers = resolver.layers(
        &map(json!({"debug": true})),
        Some("s"),
        &map(json!({"seed": 7})),
    );
    assert_eq!(layers.base["debug"], json!(true));
    assert_eq!(layers.style["delay"], json!(300));
    assert_eq!(layers.element["seed"], json!(7));
    assert_eq!(layers.effective["delay"], json!(300.0));
    assert_eq!(layers.effective["seed"], json!(7.0));
}

#[test]
fn typed_config_reads_enums() {
    let resolver = ConfigResolver::new(Arc::new(StyleRegistry::new()));
    let out = resolver.resolve(
        &OptionMap::new(),
        None,
        &map(json!({
            "drawingMode": "burst",
            "animationTrigger": "scrollIntoView",
            "easing": "ease-in-out",
            "burst": {"style": "cloud", "count": 12.4},
        })),
    );
    assert_eq!(out.config.drawing_mode, DrawingMode::Burst);
    assert_eq!(out.config.animation_trigger, AnimationTrigger::ScrollIntoView);
    assert_eq!(out.config.easing, crate::animation::ease::Easing::EaseInOut);
    assert_eq!(out.config.burst.style, BurstStyle::Cloud);
    assert_eq!(out.config.burst.count, 12);
}

#[test]
fn start_delay_staggers_lines() {
    let mut cfg = EffectiveConfig::default();
    cfg.delay = 100.0;
    cfg.multi_line_delay = 0.5;
    cfg.animation_speed = 1000.0;
    assert_eq!(cfg.start_delay_ms(0), 100.0);
    assert_eq!(cfg.start_delay_ms(2), 1100.0);
}

#[test]
fn unsupported_mode_is_a_construction_error() {
    let err = "spiral".parse::<DrawingMode>().unwrap_err();
    assert!(err.is_construction());
}
