//! The server-held token signing key.

use ed25519_dalek::{SigningKey, VerifyingKey};
use rand::RngCore;

/// The Ed25519 keypair that seals capability tokens.
///
/// Constructed once at startup and passed by reference into the token
/// engine; there is no ambient singleton.
pub struct TokenKeypair {
    signing: SigningKey,
}

impl TokenKeypair {
    /// Derive the keypair from a 32-byte seed (e.g. from configuration).
    pub fn from_seed(seed: &[u8; 32]) -> Self {
        Self {
            signing: SigningKey::from_bytes(seed),
        }
    }

    /// Generate a fresh keypair from the OS CSPRNG.
    ///
    /// Tokens sealed with an ephemeral key do not survive a restart; use a
    /// configured seed in production.
    pub fn generate() -> Self {
        let mut seed = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut seed);
        Self::from_seed(&seed)
    }

    pub fn signing_key(&self) -> &SigningKey {
        &self.signing
    }

    pub fn verifying_key(&self) -> VerifyingKey {
        self.signing.verifying_key()
    }
}

impl std::fmt::Debug for TokenKeypair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("TokenKeypair(..)")
    }
}
