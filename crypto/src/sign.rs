//! Ed25519 signing and verification of token payload bytes.

use ed25519_dalek::{Signature, Signer, Verifier, VerifyingKey};

use crate::TokenKeypair;

/// Sign payload bytes with the server keypair.
pub fn sign_bytes(payload: &[u8], keypair: &TokenKeypair) -> Signature {
    keypair.signing_key().sign(payload)
}

/// Verify a signature against payload bytes and a verifying key.
///
/// Returns `true` only for a valid signature; malformed inputs are `false`.
pub fn verify_bytes(payload: &[u8], signature: &Signature, key: &VerifyingKey) -> bool {
    key.verify(payload, signature).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_and_verify() {
        let kp = TokenKeypair::generate();
        let msg = b"emergency access payload";
        let sig = sign_bytes(msg, &kp);
        assert!(verify_bytes(msg, &sig, &kp.verifying_key()));
    }

    #[test]
    fn tampered_payload_fails() {
        let kp = TokenKeypair::generate();
        let sig = sign_bytes(b"original payload", &kp);
        assert!(!verify_bytes(b"tampered payload", &sig, &kp.verifying_key()));
    }

    #[test]
    fn wrong_key_fails() {
        let kp1 = TokenKeypair::generate();
        let kp2 = TokenKeypair::generate();
        let sig = sign_bytes(b"payload", &kp1);
        assert!(!verify_bytes(b"payload", &sig, &kp2.verifying_key()));
    }

    #[test]
    fn deterministic_for_fixed_seed() {
        let kp = TokenKeypair::from_seed(&[42u8; 32]);
        let s1 = sign_bytes(b"payload", &kp);
        let s2 = sign_bytes(b"payload", &kp);
        assert_eq!(s1.to_bytes(), s2.to_bytes());
    }
}
