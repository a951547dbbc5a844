//! Callbacks that observe and rewrite intermediate generation state.
//!
//! Each slot holds an ordered list of callbacks folded left over a context.
//! A callback returns `Ok(Some(ctx))` to replace the context, `Ok(None)` to
//! keep it, or an error that aborts the whole generation call.

use std::fmt;
use std::sync::Arc;

use modelfaker_core::{CallbackError, FieldKind, FieldMap, FieldSpec, ModelName, Record};
use serde_json::Value;

use crate::errors::GenerationError;

pub type Hook<C> = Arc<dyn Fn(&C) -> Result<Option<C>, CallbackError> + Send + Sync>;

/// Input of a before-each hook: one field about to be resolved.
#[derive(Debug, Clone)]
pub struct BeforeEachContext {
    pub key: String,
    pub schema: FieldSpec,
    pub kind: FieldKind,
    pub belong_to: ModelName,
}

/// Input of an after-each hook: one resolved field.
///
/// `result` holds the sibling fields resolved before this one.
#[derive(Debug, Clone)]
pub struct AfterEachContext {
    pub key: String,
    pub value: Value,
    pub result: Record,
    pub kind: FieldKind,
    pub belong_to: ModelName,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookStage {
    BeforeAll,
    AfterAll,
    BeforeEach,
    AfterEach,
}

impl HookStage {
    pub fn as_str(self) -> &'static str {
        match self {
            HookStage::BeforeAll => "before_all",
            HookStage::AfterAll => "after_all",
            HookStage::BeforeEach => "before_each",
            HookStage::AfterEach => "after_each",
        }
    }
}

impl fmt::Display for HookStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Default)]
pub struct HookSet {
    before_all: Vec<Hook<FieldMap>>,
    after_all: Vec<Hook<Value>>,
    before_each: Vec<Hook<BeforeEachContext>>,
    after_each: Vec<Hook<AfterEachContext>>,
}

impl HookSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs once per call on a snapshot of the root model's fields.
    pub fn before_all<F>(mut self, hook: F) -> Self
    where
        F: Fn(&FieldMap) -> Result<Option<FieldMap>, CallbackError> + Send + Sync + 'static,
    {
        self.before_all.push(Arc::new(hook));
        self
    }

    /// Runs once per call on the final result.
    pub fn after_all<F>(mut self, hook: F) -> Self
    where
        F: Fn(&Value) -> Result<Option<Value>, CallbackError> + Send + Sync + 'static,
    {
        self.after_all.push(Arc::new(hook));
        self
    }

    pub fn before_each<F>(mut self, hook: F) -> Self
    where
        F: Fn(&BeforeEachContext) -> Result<Option<BeforeEachContext>, CallbackError>
            + Send
            + Sync
            + 'static,
    {
        self.before_each.push(Arc::new(hook));
        self
    }

    pub fn after_each<F>(mut self, hook: F) -> Self
    where
        F: Fn(&AfterEachContext) -> Result<Option<AfterEachContext>, CallbackError>
            + Send
            + Sync
            + 'static,
    {
        self.after_each.push(Arc::new(hook));
        self
    }

    /// Global callbacks first, then runtime callbacks, per slot.
    pub fn merge(global: &HookSet, runtime: &HookSet) -> HookSet {
        fn concat<T: Clone>(first: &[T], second: &[T]) -> Vec<T> {
            first.iter().chain(second).cloned().collect()
        }
        HookSet {
            before_all: concat(&global.before_all, &runtime.before_all),
            after_all: concat(&global.after_all, &runtime.after_all),
            before_each: concat(&global.before_each, &runtime.before_each),
            after_each: concat(&global.after_each, &runtime.after_each),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.before_all.is_empty()
            && self.after_all.is_empty()
            && self.before_each.is_empty()
            && self.after_each.is_empty()
    }

    pub fn has_before_each(&self) -> bool {
        !self.before_each.is_empty()
    }

    pub fn has_after_each(&self) -> bool {
        !self.after_each.is_empty()
    }

    pub fn run_before_all(&self, schema: FieldMap) -> Result<FieldMap, GenerationError> {
        run(&self.before_all, HookStage::BeforeAll, schema)
    }

    pub fn run_after_all(&self, result: Value) -> Result<Value, GenerationError> {
        run(&self.after_all, HookStage::AfterAll, result)
    }

    pub fn run_before_each(
        &self,
        ctx: BeforeEachContext,
    ) -> Result<BeforeEachContext, GenerationError> {
        run(&self.before_each, HookStage::BeforeEach, ctx)
    }

    pub fn run_after_each(
        &self,
        ctx: AfterEachContext,
    ) -> Result<AfterEachContext, GenerationError> {
        run(&self.after_each, HookStage::AfterEach, ctx)
    }
}

impl fmt::Debug for HookSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HookSet")
            .field("before_all", &self.before_all.len())
            .field("after_all", &self.after_all.len())
            .field("before_each", &self.before_each.len())
            .field("after_each", &self.after_each.len())
            .finish()
    }
}

fn run<C>(hooks: &[Hook<C>], stage: HookStage, ctx: C) -> Result<C, GenerationError> {
    let mut ctx = ctx;
    for hook in hooks {
        if let Some(next) = hook(&ctx).map_err(|source| GenerationError::Hook { stage, source })? {
            ctx = next;
        }
    }
    Ok(ctx)
}
