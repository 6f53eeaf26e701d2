use serde_json::Value;

use crate::config::schema::{OptionKind, OptionMap, coerce_number, rule};

/// `roughEnds` -> `rough-ends`.
pub fn camel_to_kebab(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for ch in name.chars() {
        if ch.is_ascii_uppercase() {
            out.push('-');
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

/// `animation-speed` -> `animationSpeed`.
pub fn kebab_to_camel(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper = false;
    for ch in name.chars() {
        if ch == '-' {
            upper = true;
        } else if upper {
            out.push(ch.to_ascii_uppercase());
            upper = false;
        } else {
            out.push(ch);
        }
    }
    out
}

/// Build a per-region override map from markup-style attribute pairs.
///
/// Names may carry a `data-` prefix and are kebab-case (`data-animation-speed`). Values are
/// parsed according to the option's schema kind; pairs naming unknown options or failing to
/// parse are skipped.
pub fn extract_attributes<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> OptionMap {
    let mut out = OptionMap::new();
    for (name, raw) in pairs {
        let bare = name.strip_prefix("data-").unwrap_or(name);
        let key = kebab_to_camel(bare);
        let Some(r) = rule(&key) else {
            continue;
        };
        let parsed = match r.kind {
            OptionKind::Bool { .. } => Some(Value::Bool(raw.trim() == "true")),
            OptionKind::Number { .. } => coerce_number(&Value::String(raw.to_owned())).map(Value::from),
            OptionKind::Enum { values, .. } => values
                .contains(&raw.trim())
                .then(|| Value::String(raw.trim().to_owned())),
            OptionKind::Object { .. } => serde_json::from_str::<Value>(raw).ok(),
        };
        match parsed {
            Some(value) => {
                out.insert(key, value);
            }
            None => tracing::debug!(attribute = name, value = raw, "unparsable option attribute skipped"),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/config/attributes.rs"]
mod tests;
