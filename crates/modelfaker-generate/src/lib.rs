//! Record generation for models defined in `modelfaker-core`.
//!
//! [`DataFaker`] expands a model into JSON records: generator paths are
//! resolved through a locale-aware [`GeneratorCapability`], references are
//! expanded recursively under per-call [`modelfaker_rules::RuleTree`] limits,
//! and [`HookSet`] callbacks can observe or rewrite every stage.

pub mod capability;
pub mod engine;
pub mod errors;
pub mod faker;
pub mod faker_rs;
pub mod hooks;
pub mod locale;
pub mod model;
pub mod params;

pub use capability::{GenRng, GeneratorCapability, GeneratorFn, LayeredCapability, StaticCapability};
pub use engine::{DEFAULT_CYCLE_GUARD, SchemaResolver, TraversalPath};
pub use errors::GenerationError;
pub use faker::{DataFaker, GenerationResult};
pub use faker_rs::{FakerCapability, LocaleKey};
pub use hooks::{AfterEachContext, BeforeEachContext, Hook, HookSet, HookStage};
pub use locale::{LocaleItem, LocaleSelector, LocaleSpec};
pub use model::{FakerConfig, GenerateOptions, GenerationReport};
