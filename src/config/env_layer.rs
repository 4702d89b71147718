//! Environment variable layering.
//!
//! The ancestor ("global") environment and the project ("local")
//! environment are kept as separate layers so the merged result can report
//! where each value came from.

use super::EnvMap;

/// Represents a layer of environment variables.
///
/// # Example
///
/// ```
/// use fedconf::config::EnvLayer;
///
/// let mut layer = EnvLayer::new("/workspace");
/// layer.set("VITE_SHELL", "localhost:3000");
///
/// assert_eq!(layer.vars.get("VITE_SHELL").map(String::as_str), Some("localhost:3000"));
/// assert_eq!(layer.source, "/workspace");
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnvLayer {
    /// Variables in this layer.
    pub vars: EnvMap,
    /// Source of this layer (for display).
    pub source: String,
}

impl EnvLayer {
    /// Create a new layer with the given source name.
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            vars: EnvMap::new(),
            source: source.into(),
        }
    }

    /// Create a layer from already-loaded variables.
    pub fn from_vars(source: impl Into<String>, vars: EnvMap) -> Self {
        Self {
            vars,
            source: source.into(),
        }
    }

    /// Add a variable to this layer.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(key.into(), value.into());
    }

    /// Check if this layer has a variable.
    pub fn contains(&self, key: &str) -> bool {
        self.vars.contains_key(key)
    }

    /// Get the number of variables in this layer.
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    /// Check if this layer is empty.
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

/// Manages layered environment variables.
///
/// The first layer pushed has lowest priority, the last has highest.
///
/// # Example
///
/// ```
/// use fedconf::config::{EnvLayer, EnvLayerStack};
///
/// let mut stack = EnvLayerStack::new();
///
/// let mut global = EnvLayer::new("global");
/// global.set("VITE_SHELL", "localhost:3000");
/// global.set("VITE_AUTH", "localhost:3001");
/// stack.push(global);
///
/// let mut local = EnvLayer::new("local");
/// local.set("VITE_AUTH", "localhost:4001");
/// stack.push(local);
///
/// assert_eq!(stack.get("VITE_AUTH"), Some("localhost:4001"));
/// assert_eq!(stack.get("VITE_SHELL"), Some("localhost:3000"));
/// assert_eq!(stack.source_of("VITE_AUTH"), Some("local"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct EnvLayerStack {
    /// Layers from lowest to highest priority.
    layers: Vec<EnvLayer>,
}

impl EnvLayerStack {
    /// Create a new empty stack.
    pub fn new() -> Self {
        Self { layers: vec![] }
    }

    /// Add a layer on top of the stack.
    pub fn push(&mut self, layer: EnvLayer) {
        self.layers.push(layer);
    }

    /// Get the resolved value for a variable.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.layers
            .iter()
            .rev()
            .find_map(|layer| layer.vars.get(key))
            .map(String::as_str)
    }

    /// Get all resolved variables, higher layers winning on collision.
    pub fn resolve(&self) -> EnvMap {
        let mut result = EnvMap::new();
        for layer in &self.layers {
            result.extend(layer.vars.clone());
        }
        result
    }

    /// Get the source of the layer that supplies a variable.
    pub fn source_of(&self, key: &str) -> Option<&str> {
        self.layers
            .iter()
            .rev()
            .find(|layer| layer.contains(key))
            .map(|layer| layer.source.as_str())
    }

    /// Get all layers for inspection.
    pub fn layers(&self) -> &[EnvLayer] {
        &self.layers
    }

    /// Get the number of layers.
    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }
}
