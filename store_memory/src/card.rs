//! In-memory card store.

use std::collections::HashMap;
use std::sync::Mutex;

use carelink_store::{CardRecord, CardStore, StoreError};
use carelink_types::{HealthId, IdentityHandle};

/// Card storage keyed by identity; whole-record upsert is atomic under the
/// map lock.
#[derive(Default)]
pub struct MemoryCardStore {
    cards: Mutex<HashMap<IdentityHandle, CardRecord>>,
}

impl MemoryCardStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CardStore for MemoryCardStore {
    fn find_by_identity(&self, identity: &IdentityHandle) -> Result<Option<CardRecord>, StoreError> {
        Ok(self.cards.lock().unwrap().get(identity).cloned())
    }

    fn find_active_by_health_id(
        &self,
        health_id: &HealthId,
    ) -> Result<Option<CardRecord>, StoreError> {
        Ok(self
            .cards
            .lock()
            .unwrap()
            .values()
            .find(|c| c.active && &c.health_id == health_id)
            .cloned())
    }

    fn upsert(&self, card: CardRecord) -> Result<(), StoreError> {
        self.cards
            .lock()
            .unwrap()
            .insert(card.identity.clone(), card);
        Ok(())
    }
}
