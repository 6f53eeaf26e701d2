use std::collections::HashMap;
use std::sync::{Arc, LazyLock, PoisonError, RwLock};

use crate::config::schema::OptionMap;

static GLOBAL: LazyLock<Arc<StyleRegistry>> = LazyLock::new(|| Arc::new(StyleRegistry::new()));

/// Named option fragments ("styles") that regions reference by name.
///
/// Entries are only ever added or overwritten. The process-wide instance is reachable through
/// [`StyleRegistry::global`]; tests and embedders can inject their own `Arc<StyleRegistry>`.
#[derive(Debug, Default)]
pub struct StyleRegistry {
    styles: RwLock<HashMap<String, OptionMap>>,
}

impl StyleRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared process-wide registry.
    pub fn global() -> Arc<Self> {
        Arc::clone(&GLOBAL)
    }

    /// Register `options` under `name`, replacing any previous definition.
    pub fn define(&self, name: impl Into<String>, options: OptionMap) {
        let name = name.into();
        tracing::debug!(style = %name, keys = options.len(), "style defined");
        self.styles
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name, options);
    }

    /// Snapshot of the fragment registered under `name`.
    pub fn get(&self, name: &str) -> Option<OptionMap> {
        self.styles
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }

    /// Registered style names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .styles
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        names.sort();
        names
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/styles.rs"]
mod tests;
