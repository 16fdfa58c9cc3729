//! One-time credential storage.

use carelink_types::{CredentialPurpose, Subject, Timestamp};
use carelink_crypto::SecretDigest;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::StoreError;

/// Store-assigned opaque credential id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CredentialId(pub u64);

impl fmt::Display for CredentialId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cred-{}", self.0)
    }
}

/// A pending verification challenge, as persisted.
///
/// Holds the irreversible digest only — the raw code exists nowhere but in
/// the dispatched channel messages.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CredentialRecord {
    pub id: CredentialId,
    pub subject: Subject,
    pub secret_digest: SecretDigest,
    pub purpose: CredentialPurpose,
    pub expires_at: Timestamp,
    pub attempts: u32,
    pub max_attempts: u32,
    pub verified: bool,
    pub verified_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

impl CredentialRecord {
    /// Live means: unverified and unexpired. Only live credentials can be
    /// selected for verification.
    pub fn is_live(&self, now: Timestamp) -> bool {
        !self.verified && now < self.expires_at
    }
}

/// Fields of a credential at insertion time; the store assigns the id and
/// zeroes the counters.
#[derive(Clone, Debug)]
pub struct NewCredential {
    pub subject: Subject,
    pub secret_digest: SecretDigest,
    pub purpose: CredentialPurpose,
    pub expires_at: Timestamp,
    pub max_attempts: u32,
    pub created_at: Timestamp,
}

/// Storage contract for one-time credentials.
///
/// Implementations must provide per-record atomicity: `increment_attempts`
/// is an atomic increment-then-read, so two concurrent verification
/// attempts can never both observe the same pre-increment count.
pub trait CredentialStore: Send + Sync {
    /// Persist a new credential and return it with its assigned id.
    fn insert(&self, cred: NewCredential) -> Result<CredentialRecord, StoreError>;

    /// The most recently created live (unverified, unexpired) credential
    /// matching the subject on either identifier, scoped by purpose.
    fn latest_live(
        &self,
        subject: &Subject,
        purpose: CredentialPurpose,
        now: Timestamp,
    ) -> Result<Option<CredentialRecord>, StoreError>;

    /// Creation time of the most recent credential for (subject, purpose),
    /// regardless of its state. Drives the issuance cooldown.
    fn latest_created_at(
        &self,
        subject: &Subject,
        purpose: CredentialPurpose,
    ) -> Result<Option<Timestamp>, StoreError>;

    /// Expire every live credential for (subject, purpose), effective `now`.
    /// Issuance calls this before inserting, so at most one live credential
    /// exists per (subject, purpose) at any time.
    fn retire_live(
        &self,
        subject: &Subject,
        purpose: CredentialPurpose,
        now: Timestamp,
    ) -> Result<(), StoreError>;

    /// Atomically increment the attempt counter and return the new value.
    fn increment_attempts(&self, id: CredentialId) -> Result<u32, StoreError>;

    /// Mark a credential verified. A verified credential never matches
    /// `latest_live` again.
    fn mark_verified(&self, id: CredentialId, at: Timestamp) -> Result<(), StoreError>;
}
