//! Abstract storage traits for the Carelink engine.
//!
//! The engine never talks to a database directly; it consumes these traits.
//! Every backend (the in-memory store, a document database in the
//! surrounding application) implements them. The contracts here carry the
//! concurrency guarantees the engine relies on — in particular the atomic
//! increment-then-read on credential attempts.

pub mod card;
pub mod credential;
pub mod directory;
pub mod error;
pub mod record;

pub use card::{CardRecord, CardSnapshot, CardStore};
pub use credential::{CredentialId, CredentialRecord, CredentialStore, NewCredential};
pub use directory::{ContactDirectory, Demographics, DirectorySet, EmergencyContact, IdentityDirectory};
pub use error::StoreError;
pub use record::{
    AllergyEntry, ClinicianRef, DiseaseEntry, MedicalRecord, MedicalRecordStore,
    PrescriptionEntry, VerificationEvidence,
};
