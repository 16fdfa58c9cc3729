//! One-time credential engine.
//!
//! Issuance mints a short-lived numeric code, stores only its digest, and
//! fans the plaintext out to every configured channel concurrently.
//! Verification is gated by the attempt governor and consumes an attempt
//! *before* comparing, so a crash mid-verification still fails closed.

pub mod engine;
pub mod governor;

pub use engine::{IssueReceipt, OtpEngine, VerifyReceipt};
pub use governor::Governor;
