use super::*;
use serde_json::json;

#[test]
fn case_conversion_round_trips_schema_keys() {
    assert_eq!(kebab_to_camel("animation-speed"), "animationSpeed");
    assert_eq!(kebab_to_camel("multi-line-delay"), "multiLineDelay");
    assert_eq!(camel_to_kebab("skewX"), "skew-x");
    assert_eq!(kebab_to_camel(&camel_to_kebab("animationTrigger")), "animationTrigger");
}

#[test]
fn values_parse_by_kind() {
    let out = extract_attributes([
        ("data-animate", "false"),
        ("data-animation-speed", "1200"),
        ("data-drawing-mode", "circle"),
        ("data-circle", r#"{"loops": 2}"#),
        ("data-burst", "3"),
    ]);
    assert_eq!(out["animate"], json!(false));
    assert_eq!(out["animationSpeed"], json!(1200.0));
    assert_eq!(out["drawingMode"], json!("circle"));
    assert_eq!(out["circle"]["loops"], json!(2));
    assert_eq!(out["burst"], json!(3));
}

#[test]
fn unparsable_and_unknown_pairs_are_skipped() {
    let out = extract_attributes([
        ("data-delay", "later"),
        ("data-drawing-mode", "spiral"),
        ("data-circle", "{not json"),
        ("data-colour", "red"),
        ("class", "marked"),
    ]);
    assert!(out.is_empty());
}

#[test]
fn prefix_is_optional() {
    let out = extract_attributes([("delay", "10")]);
    assert_eq!(out["delay"], json!(10.0));
}
