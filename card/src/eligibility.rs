//! Card eligibility.
//!
//! A card snapshot must be complete at generation time; the emergency path
//! renders it without a live profile join. Eligibility therefore requires
//! every snapshot field up front and reports exactly which ones are
//! missing so the holder can be told what to fill in.

use carelink_store::Demographics;
use serde::Serialize;

/// Outcome of an eligibility check.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct EligibilityReport {
    pub eligible: bool,
    /// Field names absent from the profile, in a fixed order.
    pub missing: Vec<&'static str>,
}

impl EligibilityReport {
    pub fn eligible() -> Self {
        Self {
            eligible: true,
            missing: Vec::new(),
        }
    }
}

/// Check whether a profile carries everything a card snapshot needs.
///
/// City and state are display niceties, not requirements.
pub fn check_eligibility(demographics: &Demographics) -> EligibilityReport {
    let mut missing = Vec::new();
    if demographics.name.is_none() {
        missing.push("name");
    }
    if demographics.date_of_birth.is_none() {
        missing.push("date_of_birth");
    }
    if demographics.gender.is_none() {
        missing.push("gender");
    }
    if demographics.blood_type.is_none() {
        missing.push("blood_type");
    }
    if demographics.emergency_contact.is_none() {
        missing.push("emergency_contact");
    }
    EligibilityReport {
        eligible: missing.is_empty(),
        missing,
    }
}
