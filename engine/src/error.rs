//! Facade-level setup errors.

use thiserror::Error;

/// Errors raised while loading configuration or assembling the engine.
/// Runtime operations use [`carelink_types::EngineError`] instead.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file error: {0}")]
    Io(String),

    #[error("config parse error: {0}")]
    Parse(String),

    #[error("signing key error: {0}")]
    Key(String),
}
