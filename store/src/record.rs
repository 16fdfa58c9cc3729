//! Medical record storage (read-only to this engine).
//!
//! Each fact carries its origin: `verification` is present only when a
//! clinician attested the entry. The disclosure filter keys off that field
//! and nothing else.

use carelink_types::{IdentityHandle, Timestamp};
use serde::{Deserialize, Serialize};

use crate::StoreError;

/// Reference to the clinician who attested a fact.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClinicianRef {
    pub name: String,
    pub specialization: Option<String>,
}

/// Proof that a clinician verified a fact.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VerificationEvidence {
    pub clinician: ClinicianRef,
    pub verified_at: Timestamp,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DiseaseEntry {
    pub name: String,
    pub severity: Option<String>,
    pub diagnosed_at: Option<Timestamp>,
    /// `None` means self-reported only. Never disclosed anonymously.
    pub verification: Option<VerificationEvidence>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AllergyEntry {
    pub name: String,
    pub severity: Option<String>,
    pub reaction: Option<String>,
    pub verification: Option<VerificationEvidence>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PrescriptionEntry {
    pub medication: String,
    pub dosage: Option<String>,
    pub frequency: Option<String>,
    pub prescribed_by: Option<ClinicianRef>,
    pub prescribed_at: Option<Timestamp>,
    /// Inactive prescriptions are excluded from disclosure.
    pub active: bool,
}

/// A person's medical record, as the disclosure filter consumes it.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct MedicalRecord {
    pub diseases: Vec<DiseaseEntry>,
    pub allergies: Vec<AllergyEntry>,
    pub prescriptions: Vec<PrescriptionEntry>,
    pub last_verified_at: Option<Timestamp>,
    pub last_verified_by: Option<ClinicianRef>,
}

/// Read-only access to medical records. The engine never mutates these.
pub trait MedicalRecordStore: Send + Sync {
    fn find_by_identity(&self, identity: &IdentityHandle)
        -> Result<Option<MedicalRecord>, StoreError>;
}
