use crate::field::FieldMap;
use crate::name::ModelName;

/// Declares a model on a Rust type.
///
/// ```
/// use modelfaker_core::{DataModel, FieldMap, ModelName, ModelRegistry};
///
/// struct Address;
///
/// impl DataModel for Address {
///     fn model_name() -> ModelName {
///         ModelName::from("address")
///     }
///
///     fn fields() -> FieldMap {
///         FieldMap::new()
///             .field("country", "location.country")
///             .field("city", "location.city")
///     }
/// }
///
/// let registry = ModelRegistry::new();
/// registry.register::<Address>().unwrap();
/// assert!(registry.lookup::<Address>().is_some());
/// ```
pub trait DataModel {
    fn model_name() -> ModelName;

    fn fields() -> FieldMap;
}
