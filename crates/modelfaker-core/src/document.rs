//! JSON model documents.
//!
//! ```json
//! {
//!   "models": {
//!     "address": { "country": "location.country", "city": "location.city" },
//!     "user": {
//!       "name": "person.fullName",
//!       "age": ["number.int", { "min": 18, "max": 65 }],
//!       "home": { "refModel": "address", "count": 2 }
//!     }
//!   }
//! }
//! ```
//!
//! References are by name, so a model may point at one declared later in the
//! same document. Custom generators cannot be expressed here.

use serde_json::Value;

use crate::error::{ModelError, Result};
use crate::field::{FieldMap, FieldSpec, RefSpec};
use crate::model::Model;
use crate::registry::ModelRegistry;

/// Define every model of `document` in document order.
pub fn define_from_json(registry: &ModelRegistry, document: &Value) -> Result<Vec<Model>> {
    let models = document
        .get("models")
        .and_then(Value::as_object)
        .ok_or_else(|| ModelError::InvalidDocument("expected a 'models' object".to_string()))?;

    let mut defined = Vec::with_capacity(models.len());
    for (name, fields) in models {
        let fields = field_map_from_json(name, fields)?;
        defined.push(registry.define(name.as_str(), fields)?);
    }
    Ok(defined)
}

/// Parse and define models from JSON text.
pub fn define_from_str(registry: &ModelRegistry, contents: &str) -> Result<Vec<Model>> {
    let document: Value = serde_json::from_str(contents)?;
    define_from_json(registry, &document)
}

pub fn field_map_from_json(model: &str, value: &Value) -> Result<FieldMap> {
    let object = value.as_object().ok_or_else(|| {
        ModelError::InvalidDocument(format!("model '{model}' must be a JSON object"))
    })?;

    let mut fields = FieldMap::new();
    for (key, spec) in object {
        fields.insert(key.as_str(), field_spec_from_json(key, spec)?);
    }
    Ok(fields)
}

/// Interpret one field: a path string, a `[path, ...params]` array, or a
/// `{ "refModel", "count"?, "deep"? }` reference.
pub fn field_spec_from_json(field: &str, value: &Value) -> Result<FieldSpec> {
    match value {
        Value::String(path) => Ok(FieldSpec::Literal(path.clone())),
        Value::Array(items) => {
            let Some((head, params)) = items.split_first() else {
                return Err(invalid(field, "parameterized spec must not be empty"));
            };
            let path = head
                .as_str()
                .ok_or_else(|| invalid(field, "first element must be a generator path"))?;
            Ok(FieldSpec::parameterized(path, params.iter().cloned()))
        }
        Value::Object(map) => {
            let target = map
                .get("refModel")
                .and_then(Value::as_str)
                .ok_or_else(|| invalid(field, "reference requires a string 'refModel'"))?;
            let mut reference = RefSpec::new(target);
            reference.count = optional_int(field, map.get("count"), "count")?;
            reference.deep = optional_int(field, map.get("deep"), "deep")?;
            Ok(FieldSpec::Reference(reference))
        }
        _ => Err(invalid(field, "expected a string, array, or object")),
    }
}

fn optional_int(field: &str, value: Option<&Value>, name: &str) -> Result<Option<i64>> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(value) => value
            .as_i64()
            .map(Some)
            .ok_or_else(|| invalid(field, &format!("'{name}' must be an integer"))),
    }
}

fn invalid(field: &str, reason: &str) -> ModelError {
    ModelError::InvalidFieldSpec {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}
