use std::sync::{Arc, PoisonError, RwLock};
use std::time::Instant;

use modelfaker_core::{
    DataModel, FieldMap, Model, ModelName, ModelRegistry, RefTarget, define_from_json,
};
use rand::Rng;
use serde_json::Value;
use tracing::info;

use crate::capability::GeneratorCapability;
use crate::engine::{SchemaResolver, hash_seed};
use crate::errors::GenerationError;
use crate::hooks::HookSet;
use crate::locale::{LocaleSelector, LocaleSpec};
use crate::model::{FakerConfig, GenerateOptions, GenerationReport};

/// Result of a generation call.
#[derive(Debug, Clone)]
pub struct GenerationResult {
    pub value: Value,
    pub report: GenerationReport,
}

/// Entry point: owns the model registry, global hooks and locale selection.
///
/// ```
/// use modelfaker_core::FieldMap;
/// use modelfaker_generate::{DataFaker, GenerateOptions};
///
/// let faker = DataFaker::new();
/// faker
///     .define_model("user", FieldMap::new().field("name", "person.firstName"))
///     .unwrap();
///
/// let users = faker.generate("user", GenerateOptions::new(3).seed(7)).unwrap();
/// assert_eq!(users.as_array().map(Vec::len), Some(3));
/// ```
#[derive(Debug)]
pub struct DataFaker {
    registry: ModelRegistry,
    hooks: RwLock<HookSet>,
    locales: LocaleSelector,
    config: FakerConfig,
}

impl DataFaker {
    pub fn new() -> Self {
        Self::with_config(FakerConfig::default())
    }

    pub fn with_config(config: FakerConfig) -> Self {
        Self {
            registry: ModelRegistry::new(),
            hooks: RwLock::new(HookSet::default()),
            locales: LocaleSelector::new(config.default_locale),
            config,
        }
    }

    pub fn config(&self) -> &FakerConfig {
        &self.config
    }

    pub fn registry(&self) -> &ModelRegistry {
        &self.registry
    }

    pub fn define_model(
        &self,
        name: impl Into<ModelName>,
        fields: FieldMap,
    ) -> modelfaker_core::Result<Model> {
        self.registry.define(name, fields)
    }

    /// Define every model of a `{"models": {...}}` document.
    pub fn define_models_json(&self, document: &Value) -> modelfaker_core::Result<Vec<Model>> {
        define_from_json(&self.registry, document)
    }

    pub fn clone_model(
        &self,
        new_name: impl Into<ModelName>,
        model: &Model,
    ) -> modelfaker_core::Result<Model> {
        self.registry.clone_model(new_name, model)
    }

    pub fn lookup_model(&self, name: impl Into<ModelName>) -> Option<Model> {
        self.registry.get(name)
    }

    pub fn register_type<T: DataModel>(&self) -> modelfaker_core::Result<Model> {
        self.registry.register::<T>()
    }

    pub fn lookup_type<T: DataModel>(&self) -> Option<Model> {
        self.registry.lookup::<T>()
    }

    /// Replace the global hooks applied to every call.
    pub fn set_hooks(&self, hooks: HookSet) {
        *self.hooks.write().unwrap_or_else(PoisonError::into_inner) = hooks;
    }

    pub fn hooks(&self) -> HookSet {
        self.hooks
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Capability a call with `locale` would use.
    pub fn capability(&self, locale: Option<&LocaleSpec>) -> Arc<dyn GeneratorCapability> {
        self.locales.select(locale)
    }

    pub fn generate(
        &self,
        target: impl Into<RefTarget>,
        options: impl Into<GenerateOptions>,
    ) -> Result<Value, GenerationError> {
        self.run(target, options).map(|result| result.value)
    }

    /// Like [`DataFaker::generate`], also returning a report of the call.
    pub fn run(
        &self,
        target: impl Into<RefTarget>,
        options: impl Into<GenerateOptions>,
    ) -> Result<GenerationResult, GenerationError> {
        let target = target.into();
        let options = options.into();
        let start = Instant::now();
        let seed = options
            .seed
            .or(self.config.seed)
            .unwrap_or_else(|| rand::rng().random());
        let model = target.to_string();

        info!(model = %model, count = options.count, seed, "generation started");

        let hooks = HookSet::merge(&self.hooks(), &options.hooks);
        let capability = self.locales.select(options.locale.as_ref());
        let mut resolver = SchemaResolver::new(
            &self.registry,
            capability.as_ref(),
            &hooks,
            hash_seed(seed, &model),
        )
        .with_cycle_guard(self.config.cycle_guard);
        let value = resolver.resolve_model(&target, options.count, &options.ref_rules)?;

        let records_generated = match &value {
            Value::Null => 0,
            Value::Array(records) => records.len(),
            _ => 1,
        };
        let duration_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
        info!(
            model = %model,
            records = records_generated,
            duration_ms,
            "generation completed"
        );

        let report = GenerationReport {
            model,
            count_requested: options.count,
            records_generated,
            seed,
            locale: options.locale.as_ref().and_then(describe_locale),
            duration_ms,
        };
        Ok(GenerationResult { value, report })
    }
}

impl Default for DataFaker {
    fn default() -> Self {
        Self::new()
    }
}

fn describe_locale(locale: &LocaleSpec) -> Option<String> {
    match locale {
        LocaleSpec::Id(id) => Some(id.clone()),
        LocaleSpec::Capability(_) => None,
        LocaleSpec::List(items) => Some(
            items
                .iter()
                .map(|item| match item {
                    crate::locale::LocaleItem::Id(id) => id.as_str(),
                    crate::locale::LocaleItem::Definition { name, .. } => name.as_str(),
                })
                .collect::<Vec<_>>()
                .join(","),
        ),
    }
}
