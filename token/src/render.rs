//! Scannable-code rendering capability.
//!
//! Rendering is a collaborator concern: the surrounding application plugs
//! in its QR renderer; tests use the null renderer.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("code rendering failed: {0}")]
    Failed(String),
}

/// A rendered scannable code as a data URI (e.g. `data:image/png;base64,…`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedCode(pub String);

impl RenderedCode {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Render an emergency-access URL into a scannable code image.
pub trait CodeRenderer: Send + Sync {
    fn render(&self, url: &str) -> Result<RenderedCode, RenderError>;
}
