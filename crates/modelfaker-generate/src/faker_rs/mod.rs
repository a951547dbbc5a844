pub mod catalog;
pub mod locales;

use std::sync::Arc;

use serde_json::Value;

use crate::capability::{GenRng, GeneratorCapability, GeneratorFn};

pub use locales::LocaleKey;

/// Generator capability backed by the `fake` crate for one locale.
#[derive(Debug, Clone, Copy, Default)]
pub struct FakerCapability {
    locale: LocaleKey,
}

impl FakerCapability {
    pub fn new(locale: LocaleKey) -> Self {
        Self { locale }
    }

    pub fn locale(&self) -> LocaleKey {
        self.locale
    }

    pub fn list_paths() -> &'static [&'static str] {
        catalog::PATHS
    }
}

impl GeneratorCapability for FakerCapability {
    fn resolve(&self, namespace: &str, method: &str) -> Option<GeneratorFn> {
        let path = format!("{namespace}.{method}");
        if !catalog::contains(&path) {
            return None;
        }
        let locale = self.locale;
        Some(Arc::new(move |args: &[Value], rng: &mut GenRng| {
            catalog::generate_value(&path, locale, args, rng).unwrap_or_default()
        }))
    }

    fn paths(&self) -> Vec<String> {
        catalog::PATHS.iter().map(|path| path.to_string()).collect()
    }
}
