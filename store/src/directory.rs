//! Identity directories.
//!
//! Contact lookup is one capability implemented per role and selected by an
//! explicit [`ActorRole`] variant — there is no string-tag dispatch.

use carelink_types::{
    ActorRole, BirthDate, ContactValue, EmailAddress, IdentityHandle, IdentityRef, PhoneNumber,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::StoreError;

/// Emergency contact of a card holder.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmergencyContact {
    pub name: String,
    pub phone: PhoneNumber,
}

/// Demographic fields of a health identity, as the card and disclosure
/// paths consume them. Optional fields may simply not have been filled in
/// yet; eligibility checking reports which are missing.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Demographics {
    pub name: Option<String>,
    pub email: Option<EmailAddress>,
    pub phone: Option<PhoneNumber>,
    pub date_of_birth: Option<BirthDate>,
    pub gender: Option<String>,
    pub blood_type: Option<String>,
    pub emergency_contact: Option<EmergencyContact>,
    pub city: Option<String>,
    pub state: Option<String>,
}

/// Read access to identity demographics, keyed by opaque handle.
pub trait IdentityDirectory: Send + Sync {
    fn demographics(&self, identity: &IdentityHandle)
        -> Result<Option<Demographics>, StoreError>;
}

/// Resolve a normalized contact value to an identity.
///
/// One implementation exists per actor role; [`DirectorySet`] selects among
/// them.
pub trait ContactDirectory: Send + Sync {
    fn lookup_by_contact(&self, contact: &ContactValue)
        -> Result<Option<IdentityRef>, StoreError>;
}

/// The per-role contact directories, selected by explicit variant.
#[derive(Clone)]
pub struct DirectorySet {
    pub holders: Arc<dyn ContactDirectory>,
    pub clinicians: Arc<dyn ContactDirectory>,
    pub administrators: Arc<dyn ContactDirectory>,
}

impl DirectorySet {
    pub fn for_role(&self, role: ActorRole) -> &dyn ContactDirectory {
        match role {
            ActorRole::Holder => self.holders.as_ref(),
            ActorRole::Clinician => self.clinicians.as_ref(),
            ActorRole::Administrator => self.administrators.as_ref(),
        }
    }
}
