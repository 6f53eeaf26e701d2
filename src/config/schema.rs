use anyhow::Context as _;
use serde_json::{Map, Value};
use std::fmt;

use crate::foundation::error::{InkError, InkResult};

/// Raw option map as supplied by one configuration tier.
pub type OptionMap = Map<String, Value>;

/// Closed description of one option's type, range and default.
#[derive(Debug, Clone, Copy)]
pub(crate) enum OptionKind {
    Bool {
        default: bool,
    },
    Number {
        min: Option<f64>,
        max: Option<f64>,
        default: f64,
    },
    Enum {
        values: &'static [&'static str],
        default: &'static str,
    },
    /// Nested option object, merged one level deep. A bare scalar is assigned to `scalar_field`.
    Object {
        scalar_field: &'static str,
        fields: &'static [OptionRule],
    },
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct OptionRule {
    pub(crate) key: &'static str,
    pub(crate) kind: OptionKind,
}

const fn boolean(key: &'static str, default: bool) -> OptionRule {
    OptionRule {
        key,
        kind: OptionKind::Bool { default },
    }
}

const fn number(key: &'static str, min: Option<f64>, max: Option<f64>, default: f64) -> OptionRule {
    OptionRule {
        key,
        kind: OptionKind::Number { min, max, default },
    }
}

const fn choice(
    key: &'static str,
    values: &'static [&'static str],
    default: &'static str,
) -> OptionRule {
    OptionRule {
        key,
        kind: OptionKind::Enum { values, default },
    }
}

const fn object(
    key: &'static str,
    scalar_field: &'static str,
    fields: &'static [OptionRule],
) -> OptionRule {
    OptionRule {
        key,
        kind: OptionKind::Object {
            scalar_field,
            fields,
        },
    }
}

pub(crate) const TRIGGERS: &[&str] = &["load", "scrollIntoView"];
pub(crate) const DRAWING_MODES: &[&str] = &["highlight", "circle", "burst", "scribble", "sketchout"];
pub(crate) const BURST_STYLES: &[&str] = &["lines", "burst", "curve", "cloud"];

const HIGHLIGHT_FIELDS: &[OptionRule] = &[
    number("roughEnds", Some(0.0), Some(10.0), 0.5),
    number("jitter", Some(0.0), Some(1.0), 0.0),
];

const CIRCLE_FIELDS: &[OptionRule] = &[
    number("curve", Some(0.0), Some(1.0), 0.5),
    number("wobble", Some(0.0), Some(1.0), 0.3),
    number("loops", Some(1.0), Some(10.0), 3.0),
    number("thickness", Some(1.0), Some(10.0), 5.0),
];

const BURST_FIELDS: &[OptionRule] = &[
    choice("style", BURST_STYLES, "lines"),
    number("power", Some(0.1), Some(5.0), 1.0),
    number("count", Some(3.0), Some(500.0), 10.0),
    number("randomness", Some(0.0), Some(1.0), 0.5),
    number("gap", Some(0.0), Some(5.0), 0.2),
];

/// Every recognized option, in resolution order.
pub(crate) const SCHEMA: &[OptionRule] = &[
    boolean("animate", true),
    number("animationSpeed", Some(100.0), Some(100_000.0), 5000.0),
    choice("animationTrigger", TRIGGERS, "load"),
    number("height", Some(0.0), None, 1.0),
    number("offset", Some(-5.0), Some(5.0), 0.0),
    number("padding", Some(-10.0), Some(10.0), 0.0),
    object("highlight", "roughEnds", HIGHLIGHT_FIELDS),
    object("circle", "curve", CIRCLE_FIELDS),
    object("burst", "power", BURST_FIELDS),
    number("wavelength", Some(0.0), Some(500.0), 1.0),
    number("amplitude", Some(0.0), Some(500.0), 0.5),
    choice("easing", crate::animation::ease::Easing::NAMES, "ease"),
    choice("drawingMode", DRAWING_MODES, "highlight"),
    boolean("debug", false),
    number("skewX", Some(-10.0), Some(10.0), 0.0),
    number("skewY", Some(-10.0), Some(10.0), 0.0),
    number("multiLineDelay", Some(0.0), Some(1.0), 0.0),
    number("delay", Some(0.0), Some(60_000.0), 0.0),
    number("seed", Some(0.0), Some(4_294_967_295.0), 0.0),
];

pub(crate) fn rule(key: &str) -> Option<&'static OptionRule> {
    SCHEMA.iter().find(|r| r.key == key)
}

fn field_rule(rule: &OptionRule, field: &str) -> Option<&'static OptionRule> {
    match rule.kind {
        OptionKind::Object { fields, .. } => fields.iter().find(|f| f.key == field),
        _ => None,
    }
}

/// Schema default for a top-level number option, or for `field` of a nested object option.
pub(crate) fn default_number(key: &str, field: Option<&str>) -> f64 {
    let found = match field {
        Some(field) => rule(key).and_then(|r| field_rule(r, field)),
        None => rule(key),
    };
    match found.map(|r| r.kind) {
        Some(OptionKind::Number { default, .. }) => default,
        _ => 0.0,
    }
}

/// Category of a configuration diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum WarningKind {
    /// Key is not part of the schema; it was dropped.
    UnknownKey,
    /// Value has the wrong type; the schema default was used.
    InvalidValue,
    /// Number outside the allowed range; the schema default was used.
    OutOfRange,
}

/// Non-fatal diagnostic produced while validating options.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ConfigWarning {
    /// What went wrong.
    pub kind: WarningKind,
    /// Dotted option path, e.g. `circle.loops`.
    pub path: String,
    /// Human-readable detail.
    pub message: String,
}

impl ConfigWarning {
    fn new(kind: WarningKind, path: &str, message: impl Into<String>) -> Self {
        Self {
            kind,
            path: path.to_owned(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "option '{}': {}", self.path, self.message)
    }
}

/// Output of [`validate_options`]: a complete option map plus diagnostics.
#[derive(Debug, Clone, Default)]
pub struct ValidatedOptions {
    /// Every schema key, schema-typed, in range.
    pub options: OptionMap,
    /// Unknown keys and replaced values, in schema order.
    pub warnings: Vec<ConfigWarning>,
}

/// Validate a raw option map against the schema.
///
/// Never fails: unknown keys are dropped and invalid or out-of-range values are replaced by the
/// schema default, each with a [`ConfigWarning`].
pub fn validate_options(raw: &OptionMap) -> ValidatedOptions {
    let mut warnings = Vec::new();

    for key in raw.keys() {
        if rule(key).is_none() {
            warnings.push(ConfigWarning::new(
                WarningKind::UnknownKey,
                key,
                "not a recognized option; ignored",
            ));
        }
    }

    let mut options = OptionMap::new();
    for r in SCHEMA {
        let value = validate_value(r.kind, raw.get(r.key), r.key, &mut warnings);
        options.insert(r.key.to_owned(), value);
    }

    ValidatedOptions { options, warnings }
}

/// Parse one tier of raw options from JSON text. The top level must be an object.
///
/// Malformed JSON is an [`InkError::Other`]; a well-formed non-object is an
/// [`InkError::Config`]. Values inside the object are not checked here.
pub fn parse_option_map(raw: &str) -> InkResult<OptionMap> {
    let value: Value = serde_json::from_str(raw).context("parse options JSON")?;
    match value {
        Value::Object(map) => Ok(map),
        other => Err(InkError::config(format!(
            "options must be a JSON object, got {other}"
        ))),
    }
}

pub(crate) fn default_value(kind: OptionKind) -> Value {
    match kind {
        OptionKind::Bool { default } => Value::Bool(default),
        OptionKind::Number { default, .. } => Value::from(default),
        OptionKind::Enum { default, .. } => Value::String(default.to_owned()),
        OptionKind::Object { fields, .. } => Value::Object(
            fields
                .iter()
                .map(|f| (f.key.to_owned(), default_value(f.kind)))
                .collect(),
        ),
    }
}

/// Accept JSON numbers and numeric strings.
pub(crate) fn coerce_number(value: &Value) -> Option<f64> {
    let v = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    v.is_finite().then_some(v)
}

fn validate_value(
    kind: OptionKind,
    value: Option<&Value>,
    path: &str,
    warnings: &mut Vec<ConfigWarning>,
) -> Value {
    let value = match value {
        None | Some(Value::Null) => return default_value(kind),
        Some(v) => v,
    };

    match kind {
        OptionKind::Bool { default } => match value {
            Value::Bool(b) => Value::Bool(*b),
            other => {
                warnings.push(ConfigWarning::new(
                    WarningKind::InvalidValue,
                    path,
                    format!("expected a boolean, got {other}; using {default}"),
                ));
                Value::Bool(default)
            }
        },
        OptionKind::Number { min, max, default } => {
            let Some(v) = coerce_number(value) else {
                warnings.push(ConfigWarning::new(
                    WarningKind::InvalidValue,
                    path,
                    format!("expected a number, got {value}; using {default}"),
                ));
                return Value::from(default);
            };
            let below = min.is_some_and(|m| v < m);
            let above = max.is_some_and(|m| v > m);
            if below || above {
                warnings.push(ConfigWarning::new(
                    WarningKind::OutOfRange,
                    path,
                    format!(
                        "{v} is outside [{}, {}]; using {default}",
                        min.map_or("-inf".to_owned(), |m| m.to_string()),
                        max.map_or("inf".to_owned(), |m| m.to_string()),
                    ),
                ));
                return Value::from(default);
            }
            Value::from(v)
        }
        OptionKind::Enum { values, default } => match value.as_str() {
            Some(s) if values.contains(&s) => Value::String(s.to_owned()),
            _ => {
                warnings.push(ConfigWarning::new(
                    WarningKind::InvalidValue,
                    path,
                    format!(
                        "expected one of {}, got {value}; using \"{default}\"",
                        values.join(", ")
                    ),
                ));
                Value::String(default.to_owned())
            }
        },
        OptionKind::Object {
            scalar_field,
            fields,
        } => {
            let obj = match value {
                Value::Object(m) => m.clone(),
                scalar => {
                    let mut m = OptionMap::new();
                    m.insert(scalar_field.to_owned(), scalar.clone());
                    m
                }
            };

            for key in obj.keys() {
                if !fields.iter().any(|f| f.key == key) {
                    warnings.push(ConfigWarning::new(
                        WarningKind::UnknownKey,
                        &format!("{path}.{key}"),
                        "not a recognized option; ignored",
                    ));
                }
            }

            let mut out = OptionMap::new();
            for f in fields {
                let sub = validate_value(f.kind, obj.get(f.key), &format!("{path}.{}", f.key), warnings);
                out.insert(f.key.to_owned(), sub);
            }
            Value::Object(out)
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/schema.rs"]
mod tests;
