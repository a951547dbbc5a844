use thiserror::Error;

/// Errors raised while defining, copying, or loading models.
#[derive(Debug, Error)]
pub enum ModelError {
    /// A model with the same normalized name is already registered.
    #[error("model '{0}' is already registered")]
    Duplicate(String),
    /// A field specification could not be interpreted.
    #[error("invalid field spec for '{field}': {reason}")]
    InvalidFieldSpec { field: String, reason: String },
    /// The model document does not have the expected shape.
    #[error("invalid model document: {0}")]
    InvalidDocument(String),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias for results returned by model operations.
pub type Result<T> = std::result::Result<T, ModelError>;
