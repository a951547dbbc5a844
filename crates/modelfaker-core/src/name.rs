use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_SYMBOL_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique model identity.
///
/// Two symbols are equal only when they come from the same [`Symbol::new`]
/// call; the description is for display.
#[derive(Clone)]
pub struct Symbol {
    id: u64,
    description: Arc<str>,
}

impl Symbol {
    pub fn new(description: impl Into<Arc<str>>) -> Self {
        Self {
            id: NEXT_SYMBOL_ID.fetch_add(1, Ordering::Relaxed),
            description: description.into(),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

impl PartialEq for Symbol {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Symbol {}

impl Hash for Symbol {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({}#{})", self.description, self.id)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({})", self.description)
    }
}

/// Name a model is registered and referenced under.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ModelName {
    Text(String),
    Symbol(Symbol),
}

impl ModelName {
    /// Registry key: text names are case-insensitive, symbols compare by identity.
    pub fn key(&self) -> NameKey {
        match self {
            ModelName::Text(value) => NameKey::Text(value.to_lowercase()),
            ModelName::Symbol(symbol) => NameKey::Symbol(symbol.id()),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ModelName::Text(value) => Some(value.as_str()),
            ModelName::Symbol(_) => None,
        }
    }
}

impl fmt::Display for ModelName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelName::Text(value) => f.write_str(value),
            ModelName::Symbol(symbol) => symbol.fmt(f),
        }
    }
}

impl From<&str> for ModelName {
    fn from(value: &str) -> Self {
        ModelName::Text(value.to_string())
    }
}

impl From<String> for ModelName {
    fn from(value: String) -> Self {
        ModelName::Text(value)
    }
}

impl From<&String> for ModelName {
    fn from(value: &String) -> Self {
        ModelName::Text(value.clone())
    }
}

impl From<Symbol> for ModelName {
    fn from(value: Symbol) -> Self {
        ModelName::Symbol(value)
    }
}

impl From<&Symbol> for ModelName {
    fn from(value: &Symbol) -> Self {
        ModelName::Symbol(value.clone())
    }
}

impl From<&ModelName> for ModelName {
    fn from(value: &ModelName) -> Self {
        value.clone()
    }
}

/// Normalized form of a [`ModelName`] used for registry lookups and cycle
/// detection.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NameKey {
    Text(String),
    Symbol(u64),
}
