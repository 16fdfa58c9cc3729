use carelink_types::EngineError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("key not found: {0}")]
    NotFound(String),

    #[error("duplicate key: {0}")]
    Duplicate(String),

    #[error("storage backend error: {0}")]
    Backend(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Store failures are dependency failures to the engine: fatal to the call,
/// never retried internally.
impl From<StoreError> for EngineError {
    fn from(err: StoreError) -> Self {
        EngineError::Dependency(err.to_string())
    }
}
