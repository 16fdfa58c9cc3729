//! Local no-op sender for environments without provider credentials.

use futures_util::future::BoxFuture;
use futures_util::FutureExt;

use crate::{ChannelKind, ChannelSender, SendOutcome};
use carelink_utils::mask_contact;

/// Sender used when a channel has no provider configured.
///
/// Reports success so development and test environments behave like
/// production, and logs the delivery (destination masked, message content
/// never logged — it contains the code).
pub struct NoopSender {
    kind: ChannelKind,
}

impl NoopSender {
    pub fn new(kind: ChannelKind) -> Self {
        Self { kind }
    }
}

impl ChannelSender for NoopSender {
    fn kind(&self) -> ChannelKind {
        self.kind
    }

    fn send<'a>(&'a self, destination: &'a str, _message: &'a str) -> BoxFuture<'a, SendOutcome> {
        async move {
            tracing::info!(
                channel = self.kind.as_str(),
                destination = %mask_contact(destination),
                "channel not configured; delivery skipped (dev mode)"
            );
            SendOutcome::Sent {
                provider_message_id: None,
            }
        }
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn noop_reports_success() {
        let sender = NoopSender::new(ChannelKind::Sms);
        let outcome = sender.send("+15551234567", "Your code is 123456").await;
        assert!(outcome.is_sent());
    }
}
