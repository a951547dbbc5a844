use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use tracing::{debug, warn};

use crate::capability::{GeneratorCapability, LayeredCapability};
use crate::faker_rs::{FakerCapability, LocaleKey};

/// Which generator capability a call should use.
#[derive(Clone)]
pub enum LocaleSpec {
    /// Built-in faker locale such as `"pt_BR"`.
    Id(String),
    /// A ready capability, used as is.
    Capability(Arc<dyn GeneratorCapability>),
    /// Layers merged in order; earlier items win.
    List(Vec<LocaleItem>),
}

#[derive(Clone)]
pub enum LocaleItem {
    Id(String),
    Definition {
        name: String,
        capability: Arc<dyn GeneratorCapability>,
    },
}

impl LocaleItem {
    pub fn definition(name: impl Into<String>, capability: Arc<dyn GeneratorCapability>) -> Self {
        LocaleItem::Definition {
            name: name.into(),
            capability,
        }
    }

    fn cache_key(&self) -> &str {
        match self {
            LocaleItem::Id(id) => id,
            LocaleItem::Definition { name, .. } => name,
        }
    }

    /// Address of a definition's capability; `None` for built-in ids.
    fn definition_addr(&self) -> Option<usize> {
        match self {
            LocaleItem::Id(_) => None,
            LocaleItem::Definition { capability, .. } => {
                Some(Arc::as_ptr(capability) as *const () as usize)
            }
        }
    }
}

impl From<&str> for LocaleSpec {
    fn from(value: &str) -> Self {
        LocaleSpec::Id(value.to_string())
    }
}

impl From<String> for LocaleSpec {
    fn from(value: String) -> Self {
        LocaleSpec::Id(value)
    }
}

impl From<Vec<LocaleItem>> for LocaleSpec {
    fn from(value: Vec<LocaleItem>) -> Self {
        LocaleSpec::List(value)
    }
}

impl From<Arc<dyn GeneratorCapability>> for LocaleSpec {
    fn from(value: Arc<dyn GeneratorCapability>) -> Self {
        LocaleSpec::Capability(value)
    }
}

impl From<&str> for LocaleItem {
    fn from(value: &str) -> Self {
        LocaleItem::Id(value.to_string())
    }
}

impl fmt::Debug for LocaleSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocaleSpec::Id(id) => f.debug_tuple("Id").field(id).finish(),
            LocaleSpec::Capability(_) => f.write_str("Capability(<dyn>)"),
            LocaleSpec::List(items) => f.debug_tuple("List").field(items).finish(),
        }
    }
}

impl fmt::Debug for LocaleItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocaleItem::Id(id) => f.debug_tuple("Id").field(id).finish(),
            LocaleItem::Definition { name, .. } => {
                f.debug_struct("Definition").field("name", name).finish()
            }
        }
    }
}

/// Turns a [`LocaleSpec`] into a capability.
///
/// Layered capabilities built from lists are cached by their joined item
/// keys, so repeated calls with the same list share one instance. A cached
/// entry is only reused while its definitions are the same capability
/// instances; a name reused for a different capability replaces the entry.
pub struct LocaleSelector {
    default_locale: LocaleKey,
    cache: Mutex<HashMap<String, CachedLayers>>,
}

struct CachedLayers {
    definitions: Vec<Option<usize>>,
    capability: Arc<dyn GeneratorCapability>,
}

impl LocaleSelector {
    pub fn new(default_locale: LocaleKey) -> Self {
        Self {
            default_locale,
            cache: Mutex::new(HashMap::new()),
        }
    }

    pub fn default_locale(&self) -> LocaleKey {
        self.default_locale
    }

    pub fn select(&self, spec: Option<&LocaleSpec>) -> Arc<dyn GeneratorCapability> {
        match spec {
            None => self.default_capability(),
            Some(LocaleSpec::Id(id)) => self.faker_for(id).unwrap_or_else(|| {
                warn!(locale = %id, fallback = %self.default_locale, "unknown locale");
                self.default_capability()
            }),
            Some(LocaleSpec::Capability(capability)) => Arc::clone(capability),
            Some(LocaleSpec::List(items)) => self.layered(items),
        }
    }

    pub fn cached_len(&self) -> usize {
        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn layered(&self, items: &[LocaleItem]) -> Arc<dyn GeneratorCapability> {
        let key = items
            .iter()
            .map(LocaleItem::cache_key)
            .collect::<Vec<_>>()
            .join("-");
        let definitions: Vec<Option<usize>> =
            items.iter().map(LocaleItem::definition_addr).collect();
        let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(existing) = cache.get(&key) {
            if existing.definitions == definitions {
                return Arc::clone(&existing.capability);
            }
            warn!(key = %key, "locale definition name reused for a different capability; rebuilding");
        }

        let mut layers = LayeredCapability::default();
        for item in items {
            match item {
                LocaleItem::Id(id) => match self.faker_for(id) {
                    Some(capability) => layers.push(capability),
                    None => warn!(locale = %id, "unknown locale in list; skipped"),
                },
                LocaleItem::Definition { capability, .. } => layers.push(Arc::clone(capability)),
            }
        }
        if layers.is_empty() {
            layers.push(self.default_capability());
        }

        debug!(key = %key, layers = layers.len(), "built layered locale");
        let capability: Arc<dyn GeneratorCapability> = Arc::new(layers);
        cache.insert(
            key,
            CachedLayers {
                definitions,
                capability: Arc::clone(&capability),
            },
        );
        capability
    }

    fn faker_for(&self, id: &str) -> Option<Arc<dyn GeneratorCapability>> {
        LocaleKey::parse(id).map(|key| Arc::new(FakerCapability::new(key)) as Arc<dyn GeneratorCapability>)
    }

    fn default_capability(&self) -> Arc<dyn GeneratorCapability> {
        Arc::new(FakerCapability::new(self.default_locale))
    }
}

impl Default for LocaleSelector {
    fn default() -> Self {
        Self::new(LocaleKey::default())
    }
}

impl fmt::Debug for LocaleSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocaleSelector")
            .field("default_locale", &self.default_locale)
            .field("cached", &self.cached_len())
            .finish()
    }
}
