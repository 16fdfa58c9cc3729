//! In-memory credential store.

use std::sync::Mutex;

use carelink_store::{
    CredentialId, CredentialRecord, CredentialStore, NewCredential, StoreError,
};
use carelink_types::{CredentialPurpose, Subject, Timestamp};

/// Credential storage backed by a mutex-guarded vector.
///
/// The vector stands in for a TTL-indexed collection: lookups skip expired
/// rows, and inserts opportunistically purge anything long past expiry.
#[derive(Default)]
pub struct MemoryCredentialStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    next_id: u64,
    rows: Vec<CredentialRecord>,
}

/// Rows are kept for a grace period past expiry so `latest_created_at`
/// still sees them for cooldown checks.
const PURGE_GRACE_SECS: u64 = 24 * 3600;

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Test hook: number of stored rows.
    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn insert(&self, cred: NewCredential) -> Result<CredentialRecord, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        inner
            .rows
            .retain(|r| !r.expires_at.has_expired(PURGE_GRACE_SECS, cred.created_at));

        inner.next_id += 1;
        let record = CredentialRecord {
            id: CredentialId(inner.next_id),
            subject: cred.subject,
            secret_digest: cred.secret_digest,
            purpose: cred.purpose,
            expires_at: cred.expires_at,
            attempts: 0,
            max_attempts: cred.max_attempts,
            verified: false,
            verified_at: None,
            created_at: cred.created_at,
        };
        inner.rows.push(record.clone());
        Ok(record)
    }

    fn latest_live(
        &self,
        subject: &Subject,
        purpose: CredentialPurpose,
        now: Timestamp,
    ) -> Result<Option<CredentialRecord>, StoreError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .rows
            .iter()
            .filter(|r| r.purpose == purpose && r.subject.overlaps(subject) && r.is_live(now))
            .max_by_key(|r| (r.created_at, r.id.0))
            .cloned())
    }

    fn latest_created_at(
        &self,
        subject: &Subject,
        purpose: CredentialPurpose,
    ) -> Result<Option<Timestamp>, StoreError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .rows
            .iter()
            .filter(|r| r.purpose == purpose && r.subject.overlaps(subject))
            .map(|r| r.created_at)
            .max())
    }

    fn retire_live(
        &self,
        subject: &Subject,
        purpose: CredentialPurpose,
        now: Timestamp,
    ) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().unwrap();
        for row in inner
            .rows
            .iter_mut()
            .filter(|r| r.purpose == purpose && r.subject.overlaps(subject) && r.is_live(now))
        {
            row.expires_at = now;
        }
        Ok(())
    }

    fn increment_attempts(&self, id: CredentialId) -> Result<u32, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        let row = inner
            .rows
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        row.attempts += 1;
        Ok(row.attempts)
    }

    fn mark_verified(&self, id: CredentialId, at: Timestamp) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().unwrap();
        let row = inner
            .rows
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        row.verified = true;
        row.verified_at = Some(at);
        Ok(())
    }
}
