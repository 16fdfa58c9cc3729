//! In-memory medical record store.

use std::collections::HashMap;
use std::sync::Mutex;

use carelink_store::{MedicalRecord, MedicalRecordStore, StoreError};
use carelink_types::IdentityHandle;

#[derive(Default)]
pub struct MemoryRecordStore {
    records: Mutex<HashMap<IdentityHandle, MedicalRecord>>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed or replace a record (test setup).
    pub fn put(&self, identity: IdentityHandle, record: MedicalRecord) {
        self.records.lock().unwrap().insert(identity, record);
    }
}

impl MedicalRecordStore for MemoryRecordStore {
    fn find_by_identity(
        &self,
        identity: &IdentityHandle,
    ) -> Result<Option<MedicalRecord>, StoreError> {
        Ok(self.records.lock().unwrap().get(identity).cloned())
    }
}
