//! Health access card storage.

use carelink_types::{BirthDate, HealthId, IdentityHandle, Timestamp};
use serde::{Deserialize, Serialize};

use crate::directory::EmergencyContact;
use crate::StoreError;

/// Point-in-time snapshot of card display fields, captured at generation —
/// never live-joined against the identity record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CardSnapshot {
    pub name: String,
    pub date_of_birth: BirthDate,
    pub gender: String,
    pub blood_type: String,
    pub emergency_contact: EmergencyContact,
    pub city: Option<String>,
    pub state: Option<String>,
}

/// The durable record owning the current token.
///
/// Regeneration replaces `token`/`token_digest` in place and bumps the
/// counter; disabling flips the flags but deletes nothing.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CardRecord {
    pub identity: IdentityHandle,
    pub health_id: HealthId,
    /// The current sealed token, wire form.
    pub token: String,
    /// Blake2b-256 of `token`. Disclosure resolution compares the presented
    /// token's digest against this; a rotated-away token no longer matches.
    pub token_digest: [u8; 32],
    /// Rendered scannable code (data URI).
    pub image: String,
    /// Emergency-access URL embedded in the code.
    pub url: String,
    pub snapshot: CardSnapshot,
    pub active: bool,
    pub revoked: bool,
    pub revoked_reason: Option<String>,
    pub revoked_at: Option<Timestamp>,
    pub regeneration_count: u32,
    pub generated_at: Timestamp,
    pub regenerated_at: Option<Timestamp>,
}

/// Storage contract for health access cards.
///
/// At most one card exists per identity; `upsert` replaces the whole record
/// atomically (single-document semantics).
pub trait CardStore: Send + Sync {
    fn find_by_identity(&self, identity: &IdentityHandle) -> Result<Option<CardRecord>, StoreError>;

    /// Lookup for the emergency path. Returns active cards only; inactive
    /// and absent are indistinguishable by design.
    fn find_active_by_health_id(&self, health_id: &HealthId) -> Result<Option<CardRecord>, StoreError>;

    fn upsert(&self, card: CardRecord) -> Result<(), StoreError>;
}
