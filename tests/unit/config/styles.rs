use super::*;
use serde_json::json;

fn fragment(v: serde_json::Value) -> OptionMap {
    v.as_object().cloned().unwrap_or_default()
}

#[test]
fn define_then_get_returns_snapshot() {
    let reg = StyleRegistry::new();
    reg.define("loud", fragment(json!({"amplitude": 2})));
    let got = reg.get("loud").unwrap();
    assert_eq!(got["amplitude"], json!(2));
    assert!(reg.get("quiet").is_none());
}

#[test]
fn redefinition_overwrites() {
    let reg = StyleRegistry::new();
    reg.define("s", fragment(json!({"delay": 1})));
    reg.define("s", fragment(json!({"delay": 2})));
    assert_eq!(reg.get("s").unwrap()["delay"], json!(2));
    assert_eq!(reg.names(), vec!["s".to_owned()]);
}

#[test]
fn names_are_sorted() {
    let reg = StyleRegistry::new();
    reg.define("b", OptionMap::new());
    reg.define("a", OptionMap::new());
    assert_eq!(reg.names(), vec!["a".to_owned(), "b".to_owned()]);
}

#[test]
fn global_is_shared() {
    let a = StyleRegistry::global();
    let b = StyleRegistry::global();
    assert!(Arc::ptr_eq(&a, &b));
}
