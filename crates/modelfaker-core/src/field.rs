use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use crate::model::Model;
use crate::name::ModelName;

/// A generated record; keys keep insertion order.
pub type Record = serde_json::Map<String, Value>;

/// Error type returned by user callbacks (hooks and custom generators).
pub type CallbackError = Box<dyn std::error::Error + Send + Sync>;

/// Custom generator: receives the sibling fields resolved so far.
pub type CustomFn = Arc<dyn Fn(&Record) -> Result<Value, CallbackError> + Send + Sync>;

/// How one field of a model produces its value.
#[derive(Clone)]
pub enum FieldSpec {
    /// Generator path such as `"person.firstName"`, called without arguments.
    Literal(String),
    /// Generator path plus arguments forwarded to the call.
    Parameterized { path: String, params: Vec<Value> },
    /// Computed from the partially built record, after every other field.
    Custom(CustomFn),
    /// Expansion of another model.
    Reference(RefSpec),
}

impl FieldSpec {
    pub fn literal(path: impl Into<String>) -> Self {
        FieldSpec::Literal(path.into())
    }

    pub fn parameterized(path: impl Into<String>, params: impl IntoIterator<Item = Value>) -> Self {
        FieldSpec::Parameterized {
            path: path.into(),
            params: params.into_iter().collect(),
        }
    }

    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&Record) -> Result<Value, CallbackError> + Send + Sync + 'static,
    {
        FieldSpec::Custom(Arc::new(f))
    }

    /// Reference to another model, by handle or by name.
    pub fn reference(target: impl Into<RefTarget>) -> RefSpec {
        RefSpec::new(target)
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            FieldSpec::Literal(_) => FieldKind::String,
            FieldSpec::Parameterized { .. } => FieldKind::Array,
            FieldSpec::Custom(_) => FieldKind::Function,
            FieldSpec::Reference(_) => FieldKind::Object,
        }
    }
}

impl fmt::Debug for FieldSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldSpec::Literal(path) => f.debug_tuple("Literal").field(path).finish(),
            FieldSpec::Parameterized { path, params } => f
                .debug_struct("Parameterized")
                .field("path", path)
                .field("params", params)
                .finish(),
            FieldSpec::Custom(_) => f.write_str("Custom(<fn>)"),
            FieldSpec::Reference(reference) => f.debug_tuple("Reference").field(reference).finish(),
        }
    }
}

impl From<&str> for FieldSpec {
    fn from(value: &str) -> Self {
        FieldSpec::Literal(value.to_string())
    }
}

impl From<String> for FieldSpec {
    fn from(value: String) -> Self {
        FieldSpec::Literal(value)
    }
}

impl From<Model> for FieldSpec {
    fn from(value: Model) -> Self {
        FieldSpec::Reference(RefSpec::new(value))
    }
}

impl From<&Model> for FieldSpec {
    fn from(value: &Model) -> Self {
        FieldSpec::Reference(RefSpec::new(value.clone()))
    }
}

impl From<RefSpec> for FieldSpec {
    fn from(value: RefSpec) -> Self {
        FieldSpec::Reference(value)
    }
}

/// Shape tag of a [`FieldSpec`], as reported to hooks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    String,
    Array,
    Function,
    Object,
}

impl FieldKind {
    pub fn as_str(self) -> &'static str {
        match self {
            FieldKind::String => "string",
            FieldKind::Array => "array",
            FieldKind::Function => "function",
            FieldKind::Object => "object",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reference to another model with optional default cardinality and depth.
#[derive(Debug, Clone)]
pub struct RefSpec {
    pub target: RefTarget,
    pub count: Option<i64>,
    pub deep: Option<i64>,
}

impl RefSpec {
    pub fn new(target: impl Into<RefTarget>) -> Self {
        Self {
            target: target.into(),
            count: None,
            deep: None,
        }
    }

    pub fn count(mut self, count: i64) -> Self {
        self.count = Some(count);
        self
    }

    pub fn deep(mut self, deep: i64) -> Self {
        self.deep = Some(deep);
        self
    }
}

/// Target of a reference: a model handle or a name looked up at resolution time.
#[derive(Debug, Clone)]
pub enum RefTarget {
    Model(Model),
    Name(ModelName),
}

impl fmt::Display for RefTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RefTarget::Model(model) => fmt::Display::fmt(model.name(), f),
            RefTarget::Name(name) => fmt::Display::fmt(name, f),
        }
    }
}

impl From<Model> for RefTarget {
    fn from(value: Model) -> Self {
        RefTarget::Model(value)
    }
}

impl From<&Model> for RefTarget {
    fn from(value: &Model) -> Self {
        RefTarget::Model(value.clone())
    }
}

impl From<ModelName> for RefTarget {
    fn from(value: ModelName) -> Self {
        RefTarget::Name(value)
    }
}

impl From<&str> for RefTarget {
    fn from(value: &str) -> Self {
        RefTarget::Name(ModelName::from(value))
    }
}

impl From<String> for RefTarget {
    fn from(value: String) -> Self {
        RefTarget::Name(ModelName::from(value))
    }
}

impl From<crate::name::Symbol> for RefTarget {
    fn from(value: crate::name::Symbol) -> Self {
        RefTarget::Name(ModelName::from(value))
    }
}

/// Ordered field name to [`FieldSpec`] mapping.
///
/// Inserting an existing key replaces its spec in place, so declaration order
/// is stable across edits.
#[derive(Debug, Clone, Default)]
pub struct FieldMap {
    entries: Vec<(String, FieldSpec)>,
}

impl FieldMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`FieldMap::insert`].
    pub fn field(mut self, key: impl Into<String>, spec: impl Into<FieldSpec>) -> Self {
        self.insert(key, spec);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, spec: impl Into<FieldSpec>) -> Option<FieldSpec> {
        let key = key.into();
        let spec = spec.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, spec)),
            None => {
                self.entries.push((key, spec));
                None
            }
        }
    }

    pub fn remove(&mut self, key: &str) -> Option<FieldSpec> {
        let index = self.entries.iter().position(|(existing, _)| existing == key)?;
        Some(self.entries.remove(index).1)
    }

    pub fn get(&self, key: &str) -> Option<&FieldSpec> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, spec)| spec)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldSpec)> {
        self.entries.iter().map(|(key, spec)| (key.as_str(), spec))
    }
}

impl<K, V> FromIterator<(K, V)> for FieldMap
where
    K: Into<String>,
    V: Into<FieldSpec>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = FieldMap::new();
        for (key, spec) in iter {
            map.insert(key, spec);
        }
        map
    }
}

impl IntoIterator for FieldMap {
    type Item = (String, FieldSpec);
    type IntoIter = std::vec::IntoIter<(String, FieldSpec)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
