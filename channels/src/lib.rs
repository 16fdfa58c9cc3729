//! Outbound message channels.
//!
//! One-time codes fan out concurrently to every configured channel. Each
//! channel attempt is independent: a slow, unreachable, or unconfigured
//! provider can fail its own attempt but never the others, and never the
//! issuance itself.

pub mod fanout;
pub mod noop;
pub mod sender;
pub mod webhook;

pub use fanout::{dispatch, ChannelAttempt, DispatchReport, DispatchRequest};
pub use noop::NoopSender;
pub use sender::{ChannelKind, ChannelSender, SendOutcome};
pub use webhook::{WebhookConfig, WebhookSender};
