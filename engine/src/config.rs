//! Engine configuration with TOML file support.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use carelink_channels::{ChannelKind, ChannelSender, NoopSender, WebhookConfig, WebhookSender};
use carelink_crypto::TokenKeypair;
use carelink_types::EngineParams;

use crate::ConfigError;

/// Configuration for the Carelink access engine.
///
/// Can be loaded from a TOML file via [`EngineConfig::from_toml_file`] or
/// built programmatically (e.g. for tests).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Policy parameters (expiry windows, attempt ceilings, base URL).
    #[serde(default)]
    pub params: EngineParams,

    /// Hex-encoded 32-byte Ed25519 signing seed for capability tokens.
    /// Absent means a fresh ephemeral key: fine for development, wrong
    /// for production (every restart invalidates all issued tokens).
    #[serde(default)]
    pub signing_seed: Option<String>,

    /// Outbound channel gateways, one optional section per channel.
    #[serde(default)]
    pub channels: ChannelsConfig,

    /// Log format: "human" or "json".
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// One section per supported channel; an absent section degrades that
/// channel to a logging no-op.
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct ChannelsConfig {
    #[serde(default)]
    pub sms: Option<ChannelEndpoint>,
    #[serde(default)]
    pub whatsapp: Option<ChannelEndpoint>,
    #[serde(default)]
    pub email: Option<ChannelEndpoint>,
}

/// Gateway endpoint for a single channel.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChannelEndpoint {
    pub endpoint: String,
    #[serde(default)]
    pub auth_token: Option<String>,
    pub from: String,
}

impl ChannelEndpoint {
    fn to_webhook_config(&self) -> WebhookConfig {
        WebhookConfig {
            endpoint: self.endpoint.clone(),
            auth_token: self.auth_token.clone(),
            from: self.from.clone(),
        }
    }
}

// Programmatic construction and TOML parsing must agree on defaults.
impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            params: EngineParams::default(),
            signing_seed: None,
            channels: ChannelsConfig::default(),
            log_format: default_log_format(),
            log_level: default_log_level(),
        }
    }
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_log_format() -> String {
    "human".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl EngineConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: &str) -> Result<Self, ConfigError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// The token signing keypair: derived from the configured seed, or
    /// freshly generated when no seed is set.
    pub fn signing_keypair(&self) -> Result<TokenKeypair, ConfigError> {
        match &self.signing_seed {
            None => {
                tracing::warn!("no signing seed configured; using an ephemeral token key");
                Ok(TokenKeypair::generate())
            }
            Some(seed_hex) => {
                let bytes = hex::decode(seed_hex)
                    .map_err(|e| ConfigError::Key(format!("signing seed is not hex: {e}")))?;
                let seed: [u8; 32] = bytes
                    .try_into()
                    .map_err(|_| ConfigError::Key("signing seed must be 32 bytes".to_string()))?;
                Ok(TokenKeypair::from_seed(&seed))
            }
        }
    }

    /// Initialise logging as configured. Call once, at startup.
    pub fn init_logging(&self) {
        crate::logging::init_logging(
            crate::logging::LogFormat::from_config(&self.log_format),
            &self.log_level,
        );
    }

    /// Build the channel sender set. Configured channels get a webhook
    /// sender sharing one HTTP client; the rest get no-ops so issuance
    /// never depends on which providers this deployment has.
    pub fn build_senders(&self) -> Vec<Arc<dyn ChannelSender>> {
        let client = reqwest::Client::new();
        [
            (ChannelKind::Sms, &self.channels.sms),
            (ChannelKind::WhatsApp, &self.channels.whatsapp),
            (ChannelKind::Email, &self.channels.email),
        ]
        .into_iter()
        .map(|(kind, endpoint)| match endpoint {
            Some(e) => Arc::new(WebhookSender::new(kind, e.to_webhook_config(), client.clone()))
                as Arc<dyn ChannelSender>,
            None => Arc::new(NoopSender::new(kind)) as Arc<dyn ChannelSender>,
        })
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_uses_defaults() {
        let config = EngineConfig::from_toml_str("").expect("empty toml should use defaults");
        assert_eq!(config.params.otp_max_attempts, 3);
        assert_eq!(config.log_format, "human");
        assert!(config.channels.sms.is_none());
    }

    #[test]
    fn partial_toml_overrides() {
        let toml = r#"
            log_level = "debug"

            [params]
            otp_cooldown_secs = 120

            [channels.sms]
            endpoint = "https://sms.example/send"
            from = "CARELINK"
        "#;
        let config = EngineConfig::from_toml_str(toml).expect("should parse");
        assert_eq!(config.params.otp_cooldown_secs, 120);
        assert_eq!(config.params.otp_max_attempts, 3); // default
        assert_eq!(config.log_level, "debug");
        assert_eq!(
            config.channels.sms.as_ref().unwrap().endpoint,
            "https://sms.example/send"
        );
    }

    #[test]
    fn programmatic_default_matches_empty_toml() {
        let built = EngineConfig::default();
        let parsed = EngineConfig::from_toml_str("").expect("empty toml should use defaults");
        assert_eq!(built.log_format, parsed.log_format);
        assert_eq!(built.log_level, parsed.log_level);
        assert_eq!(built.log_format, "human");
        assert_eq!(built.log_level, "info");
    }

    #[test]
    fn seed_must_be_32_hex_bytes() {
        let config = EngineConfig {
            signing_seed: Some("abcd".to_string()),
            ..EngineConfig::default()
        };
        assert!(config.signing_keypair().is_err());

        let config = EngineConfig {
            signing_seed: Some(hex::encode([7u8; 32])),
            ..EngineConfig::default()
        };
        assert!(config.signing_keypair().is_ok());
    }

    #[test]
    fn every_channel_gets_a_sender() {
        let config = EngineConfig::default();
        let senders = config.build_senders();
        assert_eq!(senders.len(), 3);
    }
}
