use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use tracing::debug;

use crate::authoring::DataModel;
use crate::error::{ModelError, Result};
use crate::field::FieldMap;
use crate::model::Model;
use crate::name::{ModelName, NameKey};

/// Named model store.
///
/// Text names are matched case-insensitively, symbol names by identity.
/// Registration takes a write lock, so definitions are serialized against
/// concurrent lookups.
#[derive(Debug, Default)]
pub struct ModelRegistry {
    models: RwLock<HashMap<NameKey, Model>>,
}

impl ModelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a model and register it.
    pub fn define(&self, name: impl Into<ModelName>, fields: FieldMap) -> Result<Model> {
        self.insert(Model::new(name, fields))
    }

    /// Register an existing model handle under its own name.
    pub fn insert(&self, model: Model) -> Result<Model> {
        let key = model.name().key();
        let mut models = self.models.write().unwrap_or_else(PoisonError::into_inner);
        if models.contains_key(&key) {
            return Err(ModelError::Duplicate(model.name().to_string()));
        }
        debug!(model = %model.name(), fields = model.field_count(), "model registered");
        models.insert(key, model.clone());
        Ok(model)
    }

    pub fn get(&self, name: impl Into<ModelName>) -> Option<Model> {
        let key = name.into().key();
        self.models
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
            .cloned()
    }

    pub fn contains(&self, name: impl Into<ModelName>) -> bool {
        self.get(name).is_some()
    }

    /// Deep-copy `model` and register the copy under `new_name`.
    pub fn clone_model(&self, new_name: impl Into<ModelName>, model: &Model) -> Result<Model> {
        self.insert(model.deep_clone(new_name))
    }

    /// Register the model declared by `T`.
    pub fn register<T: DataModel>(&self) -> Result<Model> {
        self.define(T::model_name(), T::fields())
    }

    /// Look up the model declared by `T`.
    pub fn lookup<T: DataModel>(&self) -> Option<Model> {
        self.get(T::model_name())
    }

    pub fn len(&self) -> usize {
        self.models
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Registered names, sorted by their display form.
    pub fn names(&self) -> Vec<ModelName> {
        let mut names: Vec<ModelName> = self
            .models
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .map(|model| model.name().clone())
            .collect();
        names.sort_by_key(ToString::to_string);
        names
    }
}
