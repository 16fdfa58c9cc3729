//! Health-id derivation.

use carelink_types::{HealthId, Timestamp};
use rand::RngCore;

/// Mint a fresh health id: `clh_` + issuance seconds (hex) + 6 random bytes.
///
/// The random tail makes ids unguessable; the timestamp keeps them roughly
/// sortable for operators. Stable for the life of the identity — card
/// regeneration reuses the existing id.
pub fn generate_health_id(now: Timestamp) -> HealthId {
    let mut tail = [0u8; 6];
    rand::thread_rng().fill_bytes(&mut tail);
    HealthId::new(format!(
        "{}{:x}{}",
        HealthId::PREFIX,
        now.as_secs(),
        hex::encode(tail)
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_valid() {
        let id = generate_health_id(Timestamp::new(1_700_000_000));
        assert!(id.is_valid());
    }

    #[test]
    fn generated_ids_are_unique() {
        let now = Timestamp::new(1_700_000_000);
        assert_ne!(generate_health_id(now), generate_health_id(now));
    }
}
