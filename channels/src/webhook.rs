//! Generic HTTP webhook sender.
//!
//! Covers SMS, WhatsApp, and transactional-email gateways that accept a
//! JSON POST of `{from, to, body}` and respond with a message id. The
//! concrete provider lives behind the endpoint URL in configuration.

use futures_util::future::BoxFuture;
use futures_util::FutureExt;
use serde::Deserialize;

use crate::{ChannelKind, ChannelSender, SendOutcome};
use carelink_utils::mask_contact;

/// Provider endpoint configuration for one channel.
#[derive(Clone, Debug)]
pub struct WebhookConfig {
    pub endpoint: String,
    pub auth_token: Option<String>,
    pub from: String,
}

#[derive(Deserialize)]
struct ProviderResponse {
    #[serde(default)]
    message_id: Option<String>,
}

/// A channel sender backed by an HTTP JSON gateway.
pub struct WebhookSender {
    kind: ChannelKind,
    config: WebhookConfig,
    client: reqwest::Client,
}

impl WebhookSender {
    pub fn new(kind: ChannelKind, config: WebhookConfig, client: reqwest::Client) -> Self {
        Self {
            kind,
            config,
            client,
        }
    }

    async fn post(&self, destination: &str, message: &str) -> SendOutcome {
        let body = serde_json::json!({
            "from": self.config.from,
            "to": destination,
            "body": message,
        });

        let mut request = self.client.post(&self.config.endpoint).json(&body);
        if let Some(token) = &self.config.auth_token {
            request = request.bearer_auth(token);
        }

        let response = match request.send().await {
            Ok(r) => r,
            Err(e) => {
                return SendOutcome::failed(format!("request failed: {e}"));
            }
        };

        if !response.status().is_success() {
            return SendOutcome::failed(format!("provider returned {}", response.status()));
        }

        let provider_message_id = response
            .json::<ProviderResponse>()
            .await
            .ok()
            .and_then(|r| r.message_id);

        tracing::info!(
            channel = self.kind.as_str(),
            destination = %mask_contact(destination),
            provider_message_id = provider_message_id.as_deref().unwrap_or("-"),
            "channel message delivered"
        );

        SendOutcome::Sent {
            provider_message_id,
        }
    }
}

impl ChannelSender for WebhookSender {
    fn kind(&self) -> ChannelKind {
        self.kind
    }

    fn send<'a>(&'a self, destination: &'a str, message: &'a str) -> BoxFuture<'a, SendOutcome> {
        self.post(destination, message).boxed()
    }
}
