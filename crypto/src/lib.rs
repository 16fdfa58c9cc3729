//! Cryptographic primitives for the Carelink engine.
//!
//! - **Argon2id** for one-way hashing of one-time codes before storage
//! - **Blake2b-256** for integrity digests (token payloads, sealed tokens)
//! - **Ed25519** for capability-token signing and verification
//! - OS-CSPRNG numeric code and health-id generation

pub mod code;
pub mod hash;
pub mod health_id;
pub mod keys;
pub mod secret;
pub mod sign;

pub use code::generate_code;
pub use hash::{blake2b_256, blake2b_256_multi, digest_sealed_token};
pub use health_id::generate_health_id;
pub use keys::TokenKeypair;
pub use secret::{hash_secret, verify_secret, SecretDigest, SecretHashError};
pub use sign::{sign_bytes, verify_bytes};
