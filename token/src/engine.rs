//! Minting and verification of emergency-access tokens.

use std::sync::Arc;

use carelink_types::{EngineError, HealthId, IdentityHandle, Timestamp};
use carelink_crypto::{digest_sealed_token, TokenKeypair};

use crate::payload::{seal, unseal};
use crate::{CodeRenderer, RenderedCode, TokenPayload};

/// Everything produced by a mint: the sealed token, the emergency URL it is
/// reachable under, the rendered code, and the digest the owning card will
/// reference.
#[derive(Clone, Debug)]
pub struct MintedToken {
    pub token: String,
    pub url: String,
    pub image: RenderedCode,
    pub token_digest: [u8; 32],
    pub payload: TokenPayload,
}

/// Mints and verifies capability tokens.
///
/// Holds the server signing keypair and the injected renderer; constructed
/// once at startup.
pub struct TokenEngine {
    keypair: TokenKeypair,
    renderer: Arc<dyn CodeRenderer>,
    base_url: String,
    validity_secs: u64,
}

impl TokenEngine {
    pub fn new(
        keypair: TokenKeypair,
        renderer: Arc<dyn CodeRenderer>,
        base_url: impl Into<String>,
        validity_secs: u64,
    ) -> Self {
        Self {
            keypair,
            renderer,
            base_url: base_url.into(),
            validity_secs,
        }
    }

    /// Mint a token bound to `identity` and render its scannable code.
    pub fn mint(
        &self,
        identity: IdentityHandle,
        health_id: HealthId,
        display_name: String,
        now: Timestamp,
    ) -> Result<MintedToken, EngineError> {
        let payload = TokenPayload::new(
            identity,
            health_id,
            display_name,
            now,
            now.plus_secs(self.validity_secs),
        );
        let token = seal(&payload, &self.keypair)?;
        let url = format!("{}/emergency?token={}", self.base_url, token);
        let image = self
            .renderer
            .render(&url)
            .map_err(|e| EngineError::Dependency(e.to_string()))?;

        tracing::info!(
            health_id = %payload.health_id,
            expires_at = %payload.expires_at,
            "minted emergency access token"
        );

        Ok(MintedToken {
            token_digest: digest_sealed_token(&token),
            token,
            url,
            image,
            payload,
        })
    }

    /// Verify a sealed token: signature and payload integrity first, then
    /// expiry. No store lookup happens here.
    ///
    /// An expired token fails with [`EngineError::NotFoundOrExpired`] (an
    /// explainable state); every other failure is [`EngineError::Integrity`]
    /// and deliberately does not say which check failed.
    pub fn verify(&self, sealed: &str, now: Timestamp) -> Result<TokenPayload, EngineError> {
        let payload = unseal(sealed, &self.keypair)?;
        if payload.expires_at <= now {
            tracing::info!(health_id = %payload.health_id, "token expired");
            return Err(EngineError::NotFoundOrExpired);
        }
        Ok(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{RenderError, RenderedCode};

    struct StubRenderer;

    impl CodeRenderer for StubRenderer {
        fn render(&self, url: &str) -> Result<RenderedCode, RenderError> {
            Ok(RenderedCode(format!("data:image/png;base64,{}", url.len())))
        }
    }

    fn engine() -> TokenEngine {
        TokenEngine::new(
            TokenKeypair::from_seed(&[9u8; 32]),
            Arc::new(StubRenderer),
            "https://care.example",
            1_000,
        )
    }

    fn mint_at(engine: &TokenEngine, now: Timestamp) -> MintedToken {
        engine
            .mint(
                IdentityHandle::new("id-7"),
                HealthId::new("clh_x1"),
                "Asha Rao".to_string(),
                now,
            )
            .unwrap()
    }

    #[test]
    fn mint_verify_round_trip_binds_identity() {
        let engine = engine();
        let minted = mint_at(&engine, Timestamp::new(100));
        let payload = engine.verify(&minted.token, Timestamp::new(500)).unwrap();
        assert_eq!(payload.identity, IdentityHandle::new("id-7"));
        assert_eq!(payload.health_id, HealthId::new("clh_x1"));
    }

    #[test]
    fn url_embeds_token() {
        let engine = engine();
        let minted = mint_at(&engine, Timestamp::new(100));
        assert!(minted.url.starts_with("https://care.example/emergency?token="));
        assert!(minted.url.ends_with(&minted.token));
    }

    #[test]
    fn expired_is_distinct_from_invalid() {
        let engine = engine();
        let minted = mint_at(&engine, Timestamp::new(100));
        assert_eq!(
            engine.verify(&minted.token, Timestamp::new(1_100)),
            Err(EngineError::NotFoundOrExpired)
        );
        assert_eq!(
            engine.verify("deadbeef", Timestamp::new(500)),
            Err(EngineError::Integrity)
        );
    }

    #[test]
    fn verify_works_up_to_the_boundary() {
        let engine = engine();
        let minted = mint_at(&engine, Timestamp::new(100));
        assert!(engine.verify(&minted.token, Timestamp::new(1_099)).is_ok());
        assert!(engine.verify(&minted.token, Timestamp::new(1_100)).is_err());
    }

    #[test]
    fn token_digest_matches_wire_form() {
        let engine = engine();
        let minted = mint_at(&engine, Timestamp::new(100));
        assert_eq!(
            minted.token_digest,
            carelink_crypto::digest_sealed_token(&minted.token)
        );
    }
}
