//! Blake2b hashing for integrity digests.

use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};

type Blake2b256 = Blake2b<U32>;

/// Compute a 256-bit Blake2b hash of arbitrary data.
pub fn blake2b_256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Blake2b256::new();
    hasher.update(data);
    let result = hasher.finalize();
    let mut output = [0u8; 32];
    output.copy_from_slice(&result);
    output
}

/// Hash multiple byte slices in sequence (avoids concatenation allocation).
///
/// Used for token payload digests, where the semantic fields are hashed in
/// a fixed order.
pub fn blake2b_256_multi(parts: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Blake2b256::new();
    for part in parts {
        hasher.update(part);
    }
    let result = hasher.finalize();
    let mut output = [0u8; 32];
    output.copy_from_slice(&result);
    output
}

/// Digest of a sealed token's wire form.
///
/// The owning card stores this digest; rotation works by the card ceasing
/// to reference the old digest, which makes a stale-but-still-signed token
/// fail disclosure resolution.
pub fn digest_sealed_token(sealed: &str) -> [u8; 32] {
    blake2b_256(sealed.as_bytes())
}
