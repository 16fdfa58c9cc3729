//! Capability token engine.
//!
//! An emergency-access token is a signed, self-contained capability bound
//! to one health identity. Verification is offline-computable: signature,
//! expiry, and payload digest are checked before any store lookup happens.
//! Revocation and rotation are *not* token operations — they live on the
//! owning health access card, which stops referencing the old token.

pub mod engine;
pub mod payload;
pub mod render;

pub use engine::{MintedToken, TokenEngine};
pub use payload::TokenPayload;
pub use render::{CodeRenderer, RenderError, RenderedCode};
