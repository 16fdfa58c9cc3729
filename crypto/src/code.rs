//! One-time code generation.

use rand::Rng;

/// Generate a numeric one-time code of `len` decimal digits from the
/// thread-local CSPRNG. Leading zeros are allowed: the code space is the
/// full `10^len`.
pub fn generate_code(len: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..len)
        .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
        .collect()
}
