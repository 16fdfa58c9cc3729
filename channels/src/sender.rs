//! The channel sender capability.

use futures_util::future::BoxFuture;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The delivery channels the engine knows how to fan out to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelKind {
    Sms,
    WhatsApp,
    Email,
}

impl ChannelKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChannelKind::Sms => "sms",
            ChannelKind::WhatsApp => "whatsapp",
            ChannelKind::Email => "email",
        }
    }

    /// Whether this channel delivers to a phone number (vs an email).
    pub fn is_phone_channel(&self) -> bool {
        matches!(self, ChannelKind::Sms | ChannelKind::WhatsApp)
    }
}

impl fmt::Display for ChannelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result of one channel attempt. Failures are data, not errors: the
/// fan-out aggregates them and issuance continues regardless.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SendOutcome {
    Sent {
        provider_message_id: Option<String>,
    },
    Failed {
        reason: String,
    },
}

impl SendOutcome {
    pub fn is_sent(&self) -> bool {
        matches!(self, SendOutcome::Sent { .. })
    }

    pub fn failed(reason: impl Into<String>) -> Self {
        SendOutcome::Failed {
            reason: reason.into(),
        }
    }
}

/// A single outbound channel.
///
/// Object-safe so the engine can hold a heterogeneous set; `send` returns a
/// boxed future for the same reason.
pub trait ChannelSender: Send + Sync {
    fn kind(&self) -> ChannelKind;

    /// Deliver `message` to `destination` (a normalized phone or email).
    /// Must not panic; all failure modes surface as [`SendOutcome::Failed`].
    fn send<'a>(&'a self, destination: &'a str, message: &'a str) -> BoxFuture<'a, SendOutcome>;
}
