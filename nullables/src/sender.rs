//! Deterministic channel sender.

use std::sync::Mutex;

use carelink_channels::{ChannelKind, ChannelSender, SendOutcome};
use futures_util::future::BoxFuture;
use futures_util::FutureExt;

/// A channel sender that records what it was asked to deliver and returns
/// scripted outcomes.
///
/// Outcomes are consumed in order; once exhausted, every further send
/// succeeds. Tests read back deliveries with [`NullSender::deliveries`] —
/// the recorded message contains the plaintext code, which is exactly what
/// a test needs to play the holder's side of the flow.
pub struct NullSender {
    kind: ChannelKind,
    scripted: Mutex<Vec<SendOutcome>>,
    deliveries: Mutex<Vec<(String, String)>>,
}

impl NullSender {
    /// A sender that always succeeds.
    pub fn new(kind: ChannelKind) -> Self {
        Self::with_outcomes(kind, Vec::new())
    }

    /// A sender that plays back `outcomes` in order, then succeeds.
    pub fn with_outcomes(kind: ChannelKind, outcomes: Vec<SendOutcome>) -> Self {
        Self {
            kind,
            scripted: Mutex::new(outcomes),
            deliveries: Mutex::new(Vec::new()),
        }
    }

    /// Everything sent so far, as (destination, message) pairs.
    pub fn deliveries(&self) -> Vec<(String, String)> {
        self.deliveries.lock().unwrap().clone()
    }
}

impl ChannelSender for NullSender {
    fn kind(&self) -> ChannelKind {
        self.kind
    }

    fn send<'a>(&'a self, destination: &'a str, message: &'a str) -> BoxFuture<'a, SendOutcome> {
        async move {
            self.deliveries
                .lock()
                .unwrap()
                .push((destination.to_string(), message.to_string()));
            let mut scripted = self.scripted.lock().unwrap();
            if scripted.is_empty() {
                SendOutcome::Sent {
                    provider_message_id: None,
                }
            } else {
                scripted.remove(0)
            }
        }
        .boxed()
    }
}
