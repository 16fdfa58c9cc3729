use std::sync::Arc;

use proptest::prelude::*;

use carelink_crypto::TokenKeypair;
use carelink_token::{CodeRenderer, RenderError, RenderedCode, TokenEngine};
use carelink_types::{HealthId, IdentityHandle, Timestamp};

struct StubRenderer;

impl CodeRenderer for StubRenderer {
    fn render(&self, _url: &str) -> Result<RenderedCode, RenderError> {
        Ok(RenderedCode("data:image/png;base64,stub".to_string()))
    }
}

fn engine(seed: u8) -> TokenEngine {
    TokenEngine::new(
        TokenKeypair::from_seed(&[seed; 32]),
        Arc::new(StubRenderer),
        "https://care.example",
        3_600,
    )
}

proptest! {
    /// Round-trip: verify(mint(identity)) returns the same bound identity,
    /// for any identity, at any point before expiry.
    #[test]
    fn mint_verify_round_trip(
        id in "[a-z0-9-]{1,32}",
        hid in "[a-z0-9]{1,16}",
        name in "[A-Za-z ]{0,40}",
        issued in 0u64..1_000_000_000,
        offset in 0u64..3_600,
    ) {
        let engine = engine(3);
        let identity = IdentityHandle::new(id);
        let health_id = HealthId::new(format!("clh_{hid}"));
        let minted = engine
            .mint(identity.clone(), health_id.clone(), name, Timestamp::new(issued))
            .unwrap();
        let payload = engine
            .verify(&minted.token, Timestamp::new(issued + offset))
            .unwrap();
        prop_assert_eq!(payload.identity, identity);
        prop_assert_eq!(payload.health_id, health_id);
    }

    /// A token sealed under one key never verifies under another.
    #[test]
    fn cross_key_rejection(seed_a in 0u8..=127, seed_b in 128u8..=255) {
        let a = engine(seed_a);
        let b = engine(seed_b);
        let minted = a
            .mint(
                IdentityHandle::new("id-x"),
                HealthId::new("clh_y"),
                "Holder".to_string(),
                Timestamp::new(10),
            )
            .unwrap();
        prop_assert!(b.verify(&minted.token, Timestamp::new(20)).is_err());
    }
}
