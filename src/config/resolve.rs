use std::sync::Arc;

use serde_json::Value;

use crate::config::effective::EffectiveConfig;
use crate::config::schema::{ConfigWarning, OptionKind, OptionMap, rule, validate_options};
use crate::config::styles::StyleRegistry;

/// Result of resolving one region's options.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Typed effective configuration.
    pub config: EffectiveConfig,
    /// Validated option map (every schema key present).
    pub options: OptionMap,
    /// Diagnostics produced while validating the merged tiers.
    pub warnings: Vec<ConfigWarning>,
}

/// Per-tier view of a region's options, for inspection tooling.
#[derive(Debug, Clone, serde::Serialize)]
pub struct OptionLayers {
    /// Global defaults as set on the orchestrator.
    pub base: OptionMap,
    /// Fragment of the named style, empty when none applies.
    pub style: OptionMap,
    /// Per-region overrides.
    pub element: OptionMap,
    /// Validated merge of all three.
    pub effective: OptionMap,
}

/// Merges {global, named style, per-region override} into one validated configuration.
#[derive(Debug, Clone)]
pub struct ConfigResolver {
    styles: Arc<StyleRegistry>,
}

impl ConfigResolver {
    /// Resolve against the given style registry.
    pub fn new(styles: Arc<StyleRegistry>) -> Self {
        Self { styles }
    }

    /// Style registry consulted during resolution.
    pub fn styles(&self) -> &Arc<StyleRegistry> {
        &self.styles
    }

    /// Resolve one region's configuration. Later tiers win key by key.
    ///
    /// An unknown style name resolves as if no style were given.
    pub fn resolve(
        &self,
        global: &OptionMap,
        style: Option<&str>,
        overrides: &OptionMap,
    ) -> ResolvedConfig {
        let style_map = self.style_fragment(style);
        let merged = merge_tiers([global, &style_map, overrides]);
        let validated = validate_options(&merged);
        for w in &validated.warnings {
            tracing::warn!(path = %w.path, kind = ?w.kind, "{}", w.message);
        }
        ResolvedConfig {
            config: EffectiveConfig::from_validated(&validated.options),
            options: validated.options,
            warnings: validated.warnings,
        }
    }

    /// Per-tier breakdown of the same resolution [`ConfigResolver::resolve`] performs.
    pub fn layers(
        &self,
        global: &OptionMap,
        style: Option<&str>,
        overrides: &OptionMap,
    ) -> OptionLayers {
        let style_map = self.style_fragment(style);
        let merged = merge_tiers([global, &style_map, overrides]);
        OptionLayers {
            base: global.clone(),
            effective: validate_options(&merged).options,
            style: style_map,
            element: overrides.clone(),
        }
    }

    fn style_fragment(&self, style: Option<&str>) -> OptionMap {
        match style {
            Some(name) => self.styles.get(name).unwrap_or_else(|| {
                tracing::warn!(style = name, "unknown style name; ignored");
                OptionMap::new()
            }),
            None => OptionMap::new(),
        }
    }
}

/// Ordered merge of raw option tiers.
///
/// Scalars replace; nested object options merge one level deep. A scalar given for an object
/// option is first lifted to `{scalar_field: value}`.
pub fn merge_tiers<'a>(tiers: impl IntoIterator<Item = &'a OptionMap>) -> OptionMap {
    let mut out = OptionMap::new();
    for tier in tiers {
        for (key, value) in tier {
            let value = lift_scalar(key, value);
            if let (Some(Value::Object(existing)), Value::Object(incoming)) =
                (out.get_mut(key), &value)
            {
                for (k, v) in incoming {
                    existing.insert(k.clone(), v.clone());
                }
                continue;
            }
            out.insert(key.clone(), value);
        }
    }
    out
}

fn lift_scalar(key: &str, value: &Value) -> Value {
    match (rule(key).map(|r| r.kind), value) {
        (Some(OptionKind::Object { scalar_field, .. }), v) if !v.is_object() && !v.is_null() => {
            let mut m = OptionMap::new();
            m.insert(scalar_field.to_owned(), v.clone());
            Value::Object(m)
        }
        _ => value.clone(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/resolve.rs"]
mod tests;
