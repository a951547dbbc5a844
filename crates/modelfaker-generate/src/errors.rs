use modelfaker_core::{CallbackError, ModelError};
use modelfaker_rules::RuleError;
use thiserror::Error;

use crate::hooks::HookStage;

/// Errors emitted while generating records.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error(transparent)]
    Model(#[from] ModelError),
    #[error(transparent)]
    Rule(#[from] RuleError),
    #[error("{stage} hook failed: {source}")]
    Hook {
        stage: HookStage,
        source: CallbackError,
    },
    #[error("custom generator for field '{field}' failed: {source}")]
    CustomGenerator {
        field: String,
        source: CallbackError,
    },
}
