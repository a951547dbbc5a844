//! Model definitions and the model registry for modelfaker.
//!
//! A model is a named, ordered map of field specs. Specs either name a
//! generator path, carry generator arguments, compute a value from sibling
//! fields, or reference another model.

pub mod authoring;
pub mod document;
pub mod error;
pub mod field;
pub mod model;
pub mod name;
pub mod registry;

pub use authoring::DataModel;
pub use document::{define_from_json, define_from_str, field_spec_from_json};
pub use error::{ModelError, Result};
pub use field::{CallbackError, CustomFn, FieldKind, FieldMap, FieldSpec, Record, RefSpec, RefTarget};
pub use model::Model;
pub use name::{ModelName, NameKey, Symbol};
pub use registry::ModelRegistry;
