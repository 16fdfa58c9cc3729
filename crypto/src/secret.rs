//! Argon2id hashing of one-time codes.
//!
//! Raw codes are never persisted or logged; only the PHC-format digest is
//! stored. Comparison goes through Argon2's constant-time verifier.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Argon2id parameters. Codes are short-lived and low-entropy, so the cost
/// is kept moderate: 19 MiB memory, 2 iterations, 1 lane.
const ARGON2_MEMORY_KIB: u32 = 19_456;
const ARGON2_ITERATIONS: u32 = 2;
const ARGON2_PARALLELISM: u32 = 1;

#[derive(Debug, Error)]
pub enum SecretHashError {
    #[error("hashing failed: {0}")]
    Hash(String),
}

/// An irreversible digest of a one-time code, in PHC string format.
///
/// The `Debug` impl intentionally does not print the digest body.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretDigest(String);

impl SecretDigest {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for SecretDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SecretDigest(..)")
    }
}

fn argon2() -> Argon2<'static> {
    let params = Params::new(ARGON2_MEMORY_KIB, ARGON2_ITERATIONS, ARGON2_PARALLELISM, None)
        .expect("static Argon2 params are valid");
    Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
}

/// Hash a one-time code with a fresh random salt.
pub fn hash_secret(code: &str) -> Result<SecretDigest, SecretHashError> {
    let salt = SaltString::generate(&mut OsRng);
    let digest = argon2()
        .hash_password(code.as_bytes(), &salt)
        .map_err(|e| SecretHashError::Hash(e.to_string()))?;
    Ok(SecretDigest(digest.to_string()))
}

/// Compare a supplied code against a stored digest.
///
/// Any parse or verification failure counts as a mismatch.
pub fn verify_secret(code: &str, digest: &SecretDigest) -> bool {
    let Ok(parsed) = PasswordHash::new(digest.as_str()) else {
        return false;
    };
    argon2().verify_password(code.as_bytes(), &parsed).is_ok()
}
