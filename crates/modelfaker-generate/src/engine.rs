use modelfaker_core::{
    FieldKind, FieldMap, FieldSpec, Model, ModelName, ModelRegistry, NameKey, Record, RefSpec,
    RefTarget,
};
use modelfaker_rules::{RuleTree, child};
use rand::SeedableRng;
use serde_json::Value;
use tracing::{debug, warn};

use crate::capability::{GenRng, GeneratorCapability};
use crate::errors::GenerationError;
use crate::hooks::{AfterEachContext, BeforeEachContext, HookSet};

/// Recursion bound applied to circular references that carry no `DEEP`.
pub const DEFAULT_CYCLE_GUARD: i64 = 1;

/// Model names on the current branch of the expansion.
///
/// Each fan-out point extends its own copy, so sibling branches never see
/// each other's entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TraversalPath {
    names: Vec<NameKey>,
}

impl TraversalPath {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, name: &ModelName) -> bool {
        let key = name.key();
        self.names.contains(&key)
    }

    /// Copy of this path with `name` appended (no-op when already present).
    pub fn with(&self, name: &ModelName) -> Self {
        let mut next = self.clone();
        let key = name.key();
        if !next.names.contains(&key) {
            next.names.push(key);
        }
        next
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Depth-first expansion of models into JSON records.
///
/// One resolver serves one generation call: it owns the call's RNG, so
/// output is reproducible for a seed.
pub struct SchemaResolver<'a> {
    registry: &'a ModelRegistry,
    capability: &'a dyn GeneratorCapability,
    hooks: &'a HookSet,
    cycle_guard: i64,
    rng: GenRng,
}

impl<'a> SchemaResolver<'a> {
    pub fn new(
        registry: &'a ModelRegistry,
        capability: &'a dyn GeneratorCapability,
        hooks: &'a HookSet,
        seed: u64,
    ) -> Self {
        Self {
            registry,
            capability,
            hooks,
            cycle_guard: DEFAULT_CYCLE_GUARD,
            rng: GenRng::seed_from_u64(seed),
        }
    }

    pub fn with_cycle_guard(mut self, cycle_guard: i64) -> Self {
        self.cycle_guard = cycle_guard;
        self
    }

    /// Expand `target` into `count` records.
    ///
    /// Returns `null` for an unknown model or a non-positive count, a single
    /// record for `1`, and an array otherwise. Before-all hooks see the root
    /// schema once; after-all hooks see the final result once.
    pub fn resolve_model(
        &mut self,
        target: &RefTarget,
        count: i64,
        rules: &RuleTree,
    ) -> Result<Value, GenerationError> {
        let Some(model) = self.lookup(target) else {
            warn!(model = %target, "model not found");
            return Ok(Value::Null);
        };
        let name = model.name().clone();
        let schema = self.hooks.run_before_all(model.fields())?;
        if count <= 0 {
            return Ok(Value::Null);
        }

        let path = TraversalPath::new();
        let result = if count == 1 {
            self.resolve_schema(&schema, rules, &path, 0, &name)?
        } else {
            let mut records = Vec::new();
            for _ in 0..count {
                records.push(self.resolve_schema(&schema, rules, &path, 0, &name)?);
            }
            Value::Array(records)
        };

        self.hooks.run_after_all(result)
    }

    /// Build one record from `schema`.
    ///
    /// Custom generators run after every other field of the record, in
    /// declaration order, and see the fields resolved so far. The returned
    /// record keeps declaration order regardless.
    pub fn resolve_schema(
        &mut self,
        schema: &FieldMap,
        rules: &RuleTree,
        path: &TraversalPath,
        depth: i64,
        owner: &ModelName,
    ) -> Result<Value, GenerationError> {
        if schema.is_empty() {
            return Ok(Value::Null);
        }
        if rules.deep.is_some_and(|deep| depth > deep) {
            return Ok(Value::Null);
        }

        let mut record = Record::new();
        let mut order: Vec<String> = Vec::with_capacity(schema.len());
        let mut deferred = Vec::new();

        for (key, spec) in schema.iter() {
            let (key, spec) = if self.hooks.has_before_each() {
                let ctx = self.hooks.run_before_each(BeforeEachContext {
                    key: key.to_string(),
                    schema: spec.clone(),
                    kind: spec.kind(),
                    belong_to: owner.clone(),
                })?;
                (ctx.key, ctx.schema)
            } else {
                (key.to_string(), spec.clone())
            };
            let kind = spec.kind();
            order.push(key.clone());

            let value = match spec {
                FieldSpec::Custom(generator) => {
                    deferred.push((key, generator));
                    continue;
                }
                FieldSpec::Literal(generator_path) => self.call_generator(&generator_path, &[]),
                FieldSpec::Parameterized {
                    path: generator_path,
                    params,
                } => self.call_generator(&generator_path, &params),
                FieldSpec::Reference(reference) => {
                    self.resolve_reference(&key, &reference, rules, path, depth)?
                }
            };

            let (key, value) = self.after_each(key, value, &record, kind, owner)?;
            if kind == FieldKind::Object && value.is_null() {
                continue;
            }
            record.insert(key, value);
        }

        for (key, generator) in deferred {
            let value = generator(&record).map_err(|source| GenerationError::CustomGenerator {
                field: key.clone(),
                source,
            })?;
            let (key, value) = self.after_each(key, value, &record, FieldKind::Function, owner)?;
            record.insert(key, value);
        }

        Ok(Value::Object(in_declaration_order(record, &order)))
    }

    fn resolve_reference(
        &mut self,
        key: &str,
        reference: &RefSpec,
        parent_rules: &RuleTree,
        path: &TraversalPath,
        depth: i64,
    ) -> Result<Value, GenerationError> {
        let overrides = child(parent_rules, key)?;
        let Some(model) = self.lookup(&reference.target) else {
            warn!(field = key, model = %reference.target, "referenced model not found");
            return Ok(Value::Null);
        };
        let name = model.name().clone();
        let circular = path.contains(&name);

        let count = overrides
            .count
            .or(reference.count)
            .unwrap_or(1)
            .max(0);
        let mut deep = overrides.deep.or(reference.deep).or(parent_rules.deep);
        if circular && deep.is_none() {
            debug!(field = key, model = %name, cycle_guard = self.cycle_guard, "cycle guard applied");
            deep = Some(self.cycle_guard);
        }

        let mut rules = overrides;
        rules.count = Some(count);
        rules.deep = deep;
        let next_path = path.with(&name);
        let next_depth = if circular { depth + 1 } else { 0 };
        let schema = model.fields();

        debug!(
            field = key,
            model = %name,
            count,
            deep = ?deep,
            depth = next_depth,
            "expanding reference"
        );

        match count {
            0 => Ok(Value::Null),
            1 => self.resolve_schema(&schema, &rules, &next_path, next_depth, &name),
            _ => {
                let mut records = Vec::new();
                for _ in 0..count {
                    let record =
                        self.resolve_schema(&schema, &rules, &next_path, next_depth, &name)?;
                    if !record.is_null() {
                        records.push(record);
                    }
                }
                if records.is_empty() {
                    Ok(Value::Null)
                } else {
                    Ok(Value::Array(records))
                }
            }
        }
    }

    fn after_each(
        &self,
        key: String,
        value: Value,
        record: &Record,
        kind: FieldKind,
        owner: &ModelName,
    ) -> Result<(String, Value), GenerationError> {
        if !self.hooks.has_after_each() {
            return Ok((key, value));
        }
        let ctx = self.hooks.run_after_each(AfterEachContext {
            key,
            value,
            result: record.clone(),
            kind,
            belong_to: owner.clone(),
        })?;
        Ok((ctx.key, ctx.value))
    }

    fn call_generator(&mut self, generator_path: &str, params: &[Value]) -> Value {
        match self.capability.resolve_path(generator_path) {
            Some(generator) => generator(params, &mut self.rng),
            None => {
                warn!(path = generator_path, "unresolved generator path");
                Value::Null
            }
        }
    }

    fn lookup(&self, target: &RefTarget) -> Option<Model> {
        match target {
            RefTarget::Model(model) => Some(model.clone()),
            RefTarget::Name(name) => self.registry.get(name),
        }
    }
}

fn in_declaration_order(mut record: Record, order: &[String]) -> Record {
    let mut ordered = Record::new();
    for key in order {
        if let Some(value) = record.remove(key) {
            ordered.insert(key.clone(), value);
        }
    }
    ordered.extend(record);
    ordered
}

/// FNV-1a style mix of a seed and a key.
pub fn hash_seed(seed: u64, key: &str) -> u64 {
    let mut hash = seed ^ 0xcbf29ce484222325;
    for byte in key.as_bytes() {
        hash ^= *byte as u64;
        hash = hash.wrapping_mul(0x100000001b3);
    }
    hash
}
