//! Concurrent best-effort dispatch across channels.
//!
//! All configured channels are attempted at once; the call waits for every
//! attempt to settle. Each attempt carries its own timeout so one stalled
//! provider cannot block the rest, and a timeout counts as that channel's
//! failure only.

use futures_util::future::join_all;
use std::sync::Arc;
use std::time::Duration;

use crate::{ChannelKind, ChannelSender, SendOutcome};
use carelink_utils::mask_contact;

/// One planned delivery: a sender plus the destination it should reach.
pub struct DispatchRequest {
    pub sender: Arc<dyn ChannelSender>,
    pub destination: String,
}

/// The settled outcome of one channel attempt.
#[derive(Clone, Debug)]
pub struct ChannelAttempt {
    pub channel: ChannelKind,
    /// Masked destination, safe for logs and audit metadata.
    pub destination: String,
    pub outcome: SendOutcome,
}

/// Aggregate result of a fan-out. Tests and callers assert on this object,
/// not on side effects.
#[derive(Clone, Debug, Default)]
pub struct DispatchReport {
    pub attempts: Vec<ChannelAttempt>,
}

impl DispatchReport {
    pub fn any_sent(&self) -> bool {
        self.attempts.iter().any(|a| a.outcome.is_sent())
    }

    pub fn all_failed(&self) -> bool {
        !self.attempts.is_empty() && !self.any_sent()
    }

    pub fn sent_count(&self) -> usize {
        self.attempts.iter().filter(|a| a.outcome.is_sent()).count()
    }
}

/// Send `message` on every requested channel concurrently and wait for all
/// attempts to settle.
pub async fn dispatch(
    requests: Vec<DispatchRequest>,
    message: &str,
    per_channel_timeout: Duration,
) -> DispatchReport {
    let futures = requests.iter().map(|req| {
        let sender = Arc::clone(&req.sender);
        let destination = req.destination.clone();
        async move {
            let outcome = match tokio::time::timeout(
                per_channel_timeout,
                sender.send(&destination, message),
            )
            .await
            {
                Ok(outcome) => outcome,
                Err(_) => SendOutcome::failed(format!(
                    "timed out after {}s",
                    per_channel_timeout.as_secs()
                )),
            };

            if let SendOutcome::Failed { reason } = &outcome {
                tracing::warn!(
                    channel = sender.kind().as_str(),
                    destination = %mask_contact(&destination),
                    reason = %reason,
                    "channel attempt failed"
                );
            }

            ChannelAttempt {
                channel: sender.kind(),
                destination: mask_contact(&destination),
                outcome,
            }
        }
    });

    DispatchReport {
        attempts: join_all(futures).await,
    }
}
