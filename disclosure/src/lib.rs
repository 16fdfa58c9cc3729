//! Trust-gated emergency disclosure.
//!
//! An anonymous scanner presents a sealed token and receives a filtered
//! view of the holder's record: clinician-verified facts with provenance,
//! active prescriptions, and the card snapshot. Self-reported entries and
//! inactive prescriptions never leave the store. Every resolution path
//! that should not succeed fails with the same uniform error so a scanner
//! cannot distinguish "no such card" from "card disabled" from "token
//! rotated away".

pub mod filter;
pub mod resolver;

pub use filter::{
    filter_record, DisclosedAllergy, DisclosedDisease, DisclosedPrescription, DisclosedRecord,
};
pub use resolver::{Disclosure, DisclosureResolver};
