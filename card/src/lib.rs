//! Health access card lifecycle.
//!
//! A card is the durable owner of the current emergency-access token. This
//! crate decides who may have a card (eligibility), generates and
//! regenerates cards (rotating the token each time), and disables them.
//! The card never deletes anything: disabling flips flags, regeneration
//! replaces the token in place and bumps a counter.

pub mod eligibility;
pub mod service;

pub use eligibility::{check_eligibility, EligibilityReport};
pub use service::{CardDisplay, CardService};
