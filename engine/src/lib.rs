//! The Carelink emergency access engine.
//!
//! One facade over the four subsystems: one-time credentials, capability
//! tokens, health access cards, and trust-gated disclosure. The
//! surrounding application hands in its stores and channel gateways; the
//! engine owns all policy (expiry, cooldowns, attempt ceilings, what an
//! anonymous scanner may see).

pub mod config;
pub mod engine;
pub mod error;
pub mod logging;

pub use config::{ChannelEndpoint, ChannelsConfig, EngineConfig};
pub use engine::{AccessEngine, EngineDeps};
pub use error::ConfigError;
pub use logging::{init_logging, LogFormat};
