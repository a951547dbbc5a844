use modelfaker_rules::RuleTree;
use serde::{Deserialize, Serialize};

use crate::engine::DEFAULT_CYCLE_GUARD;
use crate::faker_rs::LocaleKey;
use crate::hooks::HookSet;
use crate::locale::LocaleSpec;

/// Settings shared by every call on a [`crate::DataFaker`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FakerConfig {
    /// Seed used when a call does not pass one; `None` draws a fresh seed.
    pub seed: Option<u64>,
    /// `DEEP` applied to circular references that have none.
    pub cycle_guard: i64,
    pub default_locale: LocaleKey,
}

impl Default for FakerConfig {
    fn default() -> Self {
        Self {
            seed: None,
            cycle_guard: DEFAULT_CYCLE_GUARD,
            default_locale: LocaleKey::default(),
        }
    }
}

/// Per-call options. A bare `i64` converts into `{count}`.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub count: i64,
    pub ref_rules: RuleTree,
    pub hooks: HookSet,
    pub locale: Option<LocaleSpec>,
    pub seed: Option<u64>,
}

impl GenerateOptions {
    pub fn new(count: i64) -> Self {
        Self {
            count,
            ..Self::default()
        }
    }

    pub fn rules(mut self, rules: RuleTree) -> Self {
        self.ref_rules = rules;
        self
    }

    pub fn hooks(mut self, hooks: HookSet) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn locale(mut self, locale: impl Into<LocaleSpec>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            count: 1,
            ref_rules: RuleTree::default(),
            hooks: HookSet::default(),
            locale: None,
            seed: None,
        }
    }
}

impl From<i64> for GenerateOptions {
    fn from(count: i64) -> Self {
        GenerateOptions::new(count)
    }
}

/// Summary of one generation call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationReport {
    pub model: String,
    pub count_requested: i64,
    pub records_generated: usize,
    pub seed: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    pub duration_ms: u64,
}
