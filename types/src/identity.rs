//! Opaque identity handles.
//!
//! Tokens and disclosure paths never carry raw database keys; they carry
//! these opaque handles so internal storage structure is not leaked to
//! anonymous scanners.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An opaque reference to a health identity.
///
/// The surrounding application decides what goes inside (typically an
/// unguessable id minted at registration). The engine treats it as a key.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IdentityHandle(String);

impl IdentityHandle {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IdentityHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A Carelink health id, always prefixed with `clh_`.
///
/// Printed on the physical card and embedded in the capability token;
/// stable across card regenerations.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HealthId(String);

impl HealthId {
    /// The standard prefix for all Carelink health ids.
    pub const PREFIX: &'static str = "clh_";

    /// Wrap a raw health-id string.
    ///
    /// # Panics
    /// Panics if the string does not start with `clh_`.
    pub fn new(raw: impl Into<String>) -> Self {
        let s = raw.into();
        assert!(s.starts_with(Self::PREFIX), "health id must start with clh_");
        Self(s)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_valid(&self) -> bool {
        self.0.starts_with(Self::PREFIX) && self.0.len() > Self::PREFIX.len()
    }
}

impl fmt::Display for HealthId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The role of an actor in the system, used to pick the contact directory
/// that resolves a login identifier. An explicit variant, never a string tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActorRole {
    Holder,
    Clinician,
    Administrator,
}

impl ActorRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActorRole::Holder => "holder",
            ActorRole::Clinician => "clinician",
            ActorRole::Administrator => "administrator",
        }
    }
}

impl fmt::Display for ActorRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The result of a contact-directory lookup: which identity, in which role.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityRef {
    pub role: ActorRole,
    pub handle: IdentityHandle,
}
