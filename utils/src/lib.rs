//! Shared utilities for the Carelink engine.

pub mod masking;

pub use masking::{mask_code, mask_contact, mask_message};
