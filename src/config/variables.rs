//! Host variable providers
//!
//! The widget's host exposes a flat key/value store. The core only sees it
//! through [`VariableProvider`], so the process environment, an inline map
//! from settings.yml, or a test double can all stand in for it.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tracing::warn;

/// Key/value store supplied by the host
pub trait VariableProvider: Send + Sync {
    /// Read a variable; `None` when the host does not know it
    fn get(&self, name: &str) -> Option<String>;

    /// Write a variable; returns false when the host refuses or is read-only
    fn set(&self, _name: &str, _value: &str) -> bool {
        false
    }
}

/// In-memory variables
#[derive(Debug, Default, Clone)]
pub struct MapVariables {
    values: Arc<RwLock<HashMap<String, String>>>,
}

impl MapVariables {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(&name.into(), &value.into());
        self
    }
}

impl From<HashMap<String, String>> for MapVariables {
    fn from(values: HashMap<String, String>) -> Self {
        Self {
            values: Arc::new(RwLock::new(values)),
        }
    }
}

impl VariableProvider for MapVariables {
    fn get(&self, name: &str) -> Option<String> {
        let values = self.values.read().unwrap_or_else(|e| e.into_inner());
        values.get(name).cloned()
    }

    fn set(&self, name: &str, value: &str) -> bool {
        let mut values = self.values.write().unwrap_or_else(|e| e.into_inner());
        values.insert(name.to_string(), value.to_string());
        true
    }
}

/// Variables read from the process environment
#[derive(Debug, Default, Clone)]
pub struct EnvVariables {
    prefix: String,
}

impl EnvVariables {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up `<prefix><name>` instead of `<name>`
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl VariableProvider for EnvVariables {
    fn get(&self, name: &str) -> Option<String> {
        std::env::var(format!("{}{}", self.prefix, name)).ok()
    }
}

/// Several providers consulted in order; the first hit wins
#[derive(Default)]
pub struct LayeredVariables {
    layers: Vec<Box<dyn VariableProvider>>,
}

impl LayeredVariables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn layer(mut self, provider: impl VariableProvider + 'static) -> Self {
        self.layers.push(Box::new(provider));
        self
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

impl VariableProvider for LayeredVariables {
    fn get(&self, name: &str) -> Option<String> {
        self.layers.iter().find_map(|layer| layer.get(name))
    }

    /// Writes go to the first layer that accepts them
    fn set(&self, name: &str, value: &str) -> bool {
        let accepted = self.layers.iter().any(|layer| layer.set(name, value));
        if !accepted {
            warn!("Could not set host variable '{}'", name);
        }
        accepted
    }
}
