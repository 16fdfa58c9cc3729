//! Engine parameters.
//!
//! Expiry, cooldown, and attempt budgets are configuration, not constants,
//! but they are enforced server-side regardless of anything a client sends.

use serde::{Deserialize, Serialize};

/// Tunable parameters for the emergency-access engine.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EngineParams {
    /// Length of generated one-time codes, in decimal digits.
    /// Clamped to a minimum of 6 so brute force is infeasible within the
    /// attempt ceiling.
    #[serde(default = "default_code_len")]
    pub otp_code_len: usize,

    /// One-time credential time-to-live in seconds.
    #[serde(default = "default_otp_expiry")]
    pub otp_expiry_secs: u64,

    /// Maximum verification attempts per credential.
    #[serde(default = "default_max_attempts")]
    pub otp_max_attempts: u32,

    /// Minimum interval between issuances per (subject, purpose), seconds.
    #[serde(default = "default_cooldown")]
    pub otp_cooldown_secs: u64,

    /// Per-channel send timeout in seconds; a timed-out channel counts as
    /// failed without affecting the others.
    #[serde(default = "default_channel_timeout")]
    pub channel_timeout_secs: u64,

    /// Capability-token validity window in seconds. The token represents a
    /// physical card, not a session: the default is ten years.
    #[serde(default = "default_token_validity")]
    pub token_validity_secs: u64,

    /// Country code assumed for phone numbers given without one.
    #[serde(default = "default_country_code")]
    pub default_country_code: String,

    /// Base URL embedded in the scannable emergency-access link.
    #[serde(default = "default_base_url")]
    pub emergency_base_url: String,
}

impl EngineParams {
    /// The effective code length (never below the 6-digit floor).
    pub fn effective_code_len(&self) -> usize {
        self.otp_code_len.max(6)
    }
}

impl Default for EngineParams {
    fn default() -> Self {
        Self {
            otp_code_len: default_code_len(),
            otp_expiry_secs: default_otp_expiry(),
            otp_max_attempts: default_max_attempts(),
            otp_cooldown_secs: default_cooldown(),
            channel_timeout_secs: default_channel_timeout(),
            token_validity_secs: default_token_validity(),
            default_country_code: default_country_code(),
            emergency_base_url: default_base_url(),
        }
    }
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_code_len() -> usize {
    6
}

fn default_otp_expiry() -> u64 {
    5 * 60
}

fn default_max_attempts() -> u32 {
    3
}

fn default_cooldown() -> u64 {
    60
}

fn default_channel_timeout() -> u64 {
    10
}

fn default_token_validity() -> u64 {
    // Ten years of 365.25 days.
    10 * 31_557_600
}

fn default_country_code() -> String {
    "+91".to_string()
}

fn default_base_url() -> String {
    "http://localhost:3000".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_policy() {
        let p = EngineParams::default();
        assert_eq!(p.otp_code_len, 6);
        assert_eq!(p.otp_expiry_secs, 300);
        assert_eq!(p.otp_max_attempts, 3);
        assert_eq!(p.otp_cooldown_secs, 60);
    }

    #[test]
    fn code_len_floor() {
        let p = EngineParams {
            otp_code_len: 4,
            ..EngineParams::default()
        };
        assert_eq!(p.effective_code_len(), 6);
    }
}
