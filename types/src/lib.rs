//! Fundamental types for the Carelink emergency-access engine.
//!
//! This crate defines the types shared across every other crate in the
//! workspace: contact identifiers (with their single normalization point),
//! identity handles, credential purposes, engine parameters, timestamps,
//! and the shared error taxonomy.

pub mod contact;
pub mod error;
pub mod identity;
pub mod params;
pub mod purpose;
pub mod time;

pub use contact::{ContactValue, EmailAddress, PhoneNumber, Subject};
pub use error::EngineError;
pub use identity::{ActorRole, HealthId, IdentityHandle, IdentityRef};
pub use params::EngineParams;
pub use purpose::CredentialPurpose;
pub use time::{BirthDate, Clock, SystemClock, Timestamp};
