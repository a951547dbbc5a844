use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::field::{FieldMap, FieldSpec, RefSpec, RefTarget};
use crate::name::ModelName;

/// Named record template.
///
/// `Model` is a shared handle: clones point at the same schema, and edits made
/// through [`Model::with_field`] or [`Model::exclude_field`] are visible to
/// every holder, including the registry. Generation always works on a
/// snapshot taken by [`Model::fields`].
#[derive(Clone)]
pub struct Model {
    inner: Arc<ModelInner>,
}

struct ModelInner {
    name: ModelName,
    fields: RwLock<FieldMap>,
}

impl Model {
    pub fn new(name: impl Into<ModelName>, fields: FieldMap) -> Self {
        Self {
            inner: Arc::new(ModelInner {
                name: name.into(),
                fields: RwLock::new(fields),
            }),
        }
    }

    pub fn name(&self) -> &ModelName {
        &self.inner.name
    }

    /// Snapshot of the current field map.
    pub fn fields(&self) -> FieldMap {
        self.read().clone()
    }

    pub fn field_count(&self) -> usize {
        self.read().len()
    }

    pub fn with_field(&self, key: impl Into<String>, spec: impl Into<FieldSpec>) -> &Self {
        self.write().insert(key, spec);
        self
    }

    pub fn with_fields<I, K, V>(&self, fields: I) -> &Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<FieldSpec>,
    {
        let mut guard = self.write();
        for (key, spec) in fields {
            guard.insert(key, spec);
        }
        drop(guard);
        self
    }

    pub fn exclude_field(&self, key: &str) -> &Self {
        self.write().remove(key);
        self
    }

    pub fn exclude_fields<'a, I>(&self, keys: I) -> &Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut guard = self.write();
        for key in keys {
            guard.remove(key);
        }
        drop(guard);
        self
    }

    /// True when both handles point at the same model.
    pub fn ptr_eq(&self, other: &Model) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Copy this model under `new_name`.
    ///
    /// Models embedded by handle are copied too, each exactly once: handles
    /// shared inside the source stay shared inside the copy, and a model that
    /// embeds itself maps onto the copy.
    pub fn deep_clone(&self, new_name: impl Into<ModelName>) -> Model {
        let copy = Model::new(new_name, FieldMap::new());
        let mut copies = HashMap::new();
        copies.insert(self.addr(), copy.clone());
        let fields = copy_fields(&self.fields(), &mut copies);
        copy.replace_fields(fields);
        copy
    }

    fn replace_fields(&self, fields: FieldMap) {
        *self.write() = fields;
    }

    fn addr(&self) -> usize {
        Arc::as_ptr(&self.inner) as usize
    }

    fn read(&self) -> RwLockReadGuard<'_, FieldMap> {
        self.inner
            .fields
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, FieldMap> {
        self.inner
            .fields
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Field specs may embed this model again; print keys only.
        let fields = self.read();
        f.debug_struct("Model")
            .field("name", &self.inner.name)
            .field("fields", &fields.keys().collect::<Vec<_>>())
            .finish()
    }
}

fn copy_model(model: &Model, copies: &mut HashMap<usize, Model>) -> Model {
    if let Some(existing) = copies.get(&model.addr()) {
        return existing.clone();
    }
    let copy = Model::new(model.name().clone(), FieldMap::new());
    copies.insert(model.addr(), copy.clone());
    let fields = copy_fields(&model.fields(), copies);
    copy.replace_fields(fields);
    copy
}

fn copy_fields(fields: &FieldMap, copies: &mut HashMap<usize, Model>) -> FieldMap {
    fields
        .iter()
        .map(|(key, spec)| (key.to_string(), copy_spec(spec, copies)))
        .collect()
}

fn copy_spec(spec: &FieldSpec, copies: &mut HashMap<usize, Model>) -> FieldSpec {
    match spec {
        FieldSpec::Reference(reference) => {
            let target = match &reference.target {
                RefTarget::Model(model) => RefTarget::Model(copy_model(model, copies)),
                RefTarget::Name(name) => RefTarget::Name(name.clone()),
            };
            FieldSpec::Reference(RefSpec {
                target,
                count: reference.count,
                deep: reference.deep,
            })
        }
        other => other.clone(),
    }
}
