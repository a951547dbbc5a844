use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use rand_chacha::ChaCha8Rng;
use serde_json::Value;

/// RNG handed to generator functions; seeded once per generation call.
pub type GenRng = ChaCha8Rng;

/// A callable generator: arguments from the field spec plus the call's RNG.
pub type GeneratorFn = Arc<dyn Fn(&[Value], &mut GenRng) -> Value + Send + Sync>;

/// Resolves `namespace.method` generator paths to callables.
pub trait GeneratorCapability: Send + Sync {
    fn resolve(&self, namespace: &str, method: &str) -> Option<GeneratorFn>;

    /// Splits `path` on its first `.`; malformed paths resolve to nothing.
    fn resolve_path(&self, path: &str) -> Option<GeneratorFn> {
        let (namespace, method) = split_path(path)?;
        self.resolve(namespace, method)
    }

    /// Paths this capability knows about, when it can enumerate them.
    fn paths(&self) -> Vec<String> {
        Vec::new()
    }
}

pub fn split_path(path: &str) -> Option<(&str, &str)> {
    let (namespace, method) = path.split_once('.')?;
    if namespace.is_empty() || method.is_empty() {
        return None;
    }
    Some((namespace, method))
}

/// User supplied generators keyed by full path.
#[derive(Clone, Default)]
pub struct StaticCapability {
    generators: HashMap<String, GeneratorFn>,
}

impl StaticCapability {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with<F>(mut self, path: impl Into<String>, generator: F) -> Self
    where
        F: Fn(&[Value], &mut GenRng) -> Value + Send + Sync + 'static,
    {
        self.insert(path, generator);
        self
    }

    pub fn insert<F>(&mut self, path: impl Into<String>, generator: F)
    where
        F: Fn(&[Value], &mut GenRng) -> Value + Send + Sync + 'static,
    {
        self.generators.insert(path.into(), Arc::new(generator));
    }
}

impl GeneratorCapability for StaticCapability {
    fn resolve(&self, namespace: &str, method: &str) -> Option<GeneratorFn> {
        self.generators.get(&format!("{namespace}.{method}")).cloned()
    }

    fn paths(&self) -> Vec<String> {
        let mut paths: Vec<String> = self.generators.keys().cloned().collect();
        paths.sort();
        paths
    }
}

impl fmt::Debug for StaticCapability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticCapability")
            .field("paths", &self.paths())
            .finish()
    }
}

/// Ordered capabilities; the first layer that resolves a path wins.
#[derive(Clone, Default)]
pub struct LayeredCapability {
    layers: Vec<Arc<dyn GeneratorCapability>>,
}

impl LayeredCapability {
    pub fn new(layers: Vec<Arc<dyn GeneratorCapability>>) -> Self {
        Self { layers }
    }

    pub fn push(&mut self, layer: Arc<dyn GeneratorCapability>) {
        self.layers.push(layer);
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

impl GeneratorCapability for LayeredCapability {
    fn resolve(&self, namespace: &str, method: &str) -> Option<GeneratorFn> {
        self.layers
            .iter()
            .find_map(|layer| layer.resolve(namespace, method))
    }

    fn paths(&self) -> Vec<String> {
        let mut paths: Vec<String> = self.layers.iter().flat_map(|layer| layer.paths()).collect();
        paths.sort();
        paths.dedup();
        paths
    }
}

impl fmt::Debug for LayeredCapability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayeredCapability")
            .field("layers", &self.layers.len())
            .finish()
    }
}
