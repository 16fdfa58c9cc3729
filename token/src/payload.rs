//! Token payload and sealed wire form.

use carelink_types::{EngineError, HealthId, IdentityHandle, Timestamp};
use carelink_crypto::{blake2b_256_multi, sign_bytes, verify_bytes, TokenKeypair};
use ed25519_dalek::Signature;
use serde::{Deserialize, Serialize};

/// Discriminator baked into every payload; anything else is a foreign or
/// tampered token.
pub const TOKEN_KIND: &str = "emergency_access";

/// The semantic content of an emergency-access token.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TokenPayload {
    pub kind: String,
    pub identity: IdentityHandle,
    pub health_id: HealthId,
    pub display_name: String,
    /// Blake2b-256 over the semantic fields, bound into the signature.
    pub data_digest: [u8; 32],
    pub issued_at: Timestamp,
    pub expires_at: Timestamp,
}

impl TokenPayload {
    pub fn new(
        identity: IdentityHandle,
        health_id: HealthId,
        display_name: String,
        issued_at: Timestamp,
        expires_at: Timestamp,
    ) -> Self {
        let data_digest = semantic_digest(&identity, &health_id, &display_name, issued_at, expires_at);
        Self {
            kind: TOKEN_KIND.to_string(),
            identity,
            health_id,
            display_name,
            data_digest,
            issued_at,
            expires_at,
        }
    }

    /// Recompute the digest from the payload's own fields.
    pub fn expected_digest(&self) -> [u8; 32] {
        semantic_digest(
            &self.identity,
            &self.health_id,
            &self.display_name,
            self.issued_at,
            self.expires_at,
        )
    }
}

fn semantic_digest(
    identity: &IdentityHandle,
    health_id: &HealthId,
    display_name: &str,
    issued_at: Timestamp,
    expires_at: Timestamp,
) -> [u8; 32] {
    blake2b_256_multi(&[
        TOKEN_KIND.as_bytes(),
        identity.as_str().as_bytes(),
        health_id.as_str().as_bytes(),
        display_name.as_bytes(),
        &issued_at.as_secs().to_be_bytes(),
        &expires_at.as_secs().to_be_bytes(),
    ])
}

/// The wire envelope: serialized payload bytes plus the signature over them.
#[derive(Serialize, Deserialize)]
struct Envelope {
    payload: Vec<u8>,
    signature: Signature,
}

/// Seal a payload into its hex wire form.
pub(crate) fn seal(payload: &TokenPayload, keypair: &TokenKeypair) -> Result<String, EngineError> {
    let payload_bytes = bincode::serialize(payload)
        .map_err(|e| EngineError::Dependency(format!("token encoding failed: {e}")))?;
    let signature = sign_bytes(&payload_bytes, keypair);
    let envelope = Envelope {
        payload: payload_bytes,
        signature,
    };
    let envelope_bytes = bincode::serialize(&envelope)
        .map_err(|e| EngineError::Dependency(format!("token encoding failed: {e}")))?;
    Ok(hex::encode(envelope_bytes))
}

/// Open a sealed token: decode, verify the signature, check the kind tag
/// and the payload digest. Expiry is checked by the caller so the two
/// failure classes stay distinct.
///
/// Every failure here collapses to [`EngineError::Integrity`]; the detailed
/// reason is logged, never surfaced.
pub(crate) fn unseal(sealed: &str, keypair: &TokenKeypair) -> Result<TokenPayload, EngineError> {
    let envelope_bytes = hex::decode(sealed).map_err(|_| integrity("token is not valid hex"))?;
    let envelope: Envelope =
        bincode::deserialize(&envelope_bytes).map_err(|_| integrity("envelope decode failed"))?;

    if !verify_bytes(&envelope.payload, &envelope.signature, &keypair.verifying_key()) {
        return Err(integrity("signature verification failed"));
    }

    let payload: TokenPayload =
        bincode::deserialize(&envelope.payload).map_err(|_| integrity("payload decode failed"))?;

    if payload.kind != TOKEN_KIND {
        return Err(integrity("unexpected token kind"));
    }
    if payload.data_digest != payload.expected_digest() {
        return Err(integrity("payload digest mismatch"));
    }

    Ok(payload)
}

fn integrity(detail: &str) -> EngineError {
    tracing::warn!(detail, "token integrity check failed");
    EngineError::Integrity
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload() -> TokenPayload {
        TokenPayload::new(
            IdentityHandle::new("id-1"),
            HealthId::new("clh_abc"),
            "Asha Rao".to_string(),
            Timestamp::new(1_000),
            Timestamp::new(2_000),
        )
    }

    #[test]
    fn seal_unseal_round_trip() {
        let kp = TokenKeypair::from_seed(&[1u8; 32]);
        let sealed = seal(&payload(), &kp).unwrap();
        let opened = unseal(&sealed, &kp).unwrap();
        assert_eq!(opened, payload());
    }

    #[test]
    fn foreign_key_is_integrity_failure() {
        let kp = TokenKeypair::from_seed(&[1u8; 32]);
        let other = TokenKeypair::from_seed(&[2u8; 32]);
        let sealed = seal(&payload(), &kp).unwrap();
        assert_eq!(unseal(&sealed, &other), Err(EngineError::Integrity));
    }

    #[test]
    fn bitflip_is_integrity_failure() {
        let kp = TokenKeypair::from_seed(&[1u8; 32]);
        let sealed = seal(&payload(), &kp).unwrap();
        // Flip one nibble somewhere in the payload region.
        let mut bytes: Vec<char> = sealed.chars().collect();
        let mid = bytes.len() / 2;
        bytes[mid] = if bytes[mid] == '0' { '1' } else { '0' };
        let tampered: String = bytes.into_iter().collect();
        assert_eq!(unseal(&tampered, &kp), Err(EngineError::Integrity));
    }

    #[test]
    fn non_hex_is_integrity_failure() {
        let kp = TokenKeypair::from_seed(&[1u8; 32]);
        assert_eq!(unseal("not hex at all!", &kp), Err(EngineError::Integrity));
    }

    #[test]
    fn digest_binds_semantic_fields() {
        let a = payload();
        let mut b = a.clone();
        b.display_name = "Someone Else".to_string();
        assert_ne!(a.data_digest, b.expected_digest());
    }
}
