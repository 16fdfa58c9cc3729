//! The shared error taxonomy.
//!
//! Every engine operation fails into one of these classes. The display
//! strings are what an unauthenticated caller may see; anything more
//! specific (which integrity check failed, whether a card was revoked or
//! never existed) is logged server-side only.

use thiserror::Error;

/// Error taxonomy for the emergency-access engine.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    /// Missing or malformed caller input. Surfaced verbatim.
    #[error("{0}")]
    Validation(String),

    /// Credential, token, or card absent, expired, or revoked.
    /// Deliberately indistinguishable, to avoid leaking state to an
    /// anonymous caller.
    #[error("not found, expired, or disabled")]
    NotFoundOrExpired,

    /// Wrong one-time code; the attempt was consumed.
    #[error("invalid code. {attempts_remaining} attempt(s) remaining")]
    InvalidCode { attempts_remaining: u32 },

    /// Cooldown or attempt-ceiling breach.
    #[error("{message}")]
    RateLimited {
        message: String,
        /// Seconds until a retry can succeed, when the breach is a cooldown.
        retry_after_secs: Option<u64>,
    },

    /// Signature or digest mismatch. Logged with detail at elevated
    /// severity; the caller only ever sees "invalid".
    #[error("invalid")]
    Integrity,

    /// A collaborator (store, directory) failed. Not retried internally.
    #[error("dependency failure: {0}")]
    Dependency(String),
}

impl EngineError {
    /// Cooldown breach with retry guidance.
    pub fn cooldown(retry_after_secs: u64) -> Self {
        EngineError::RateLimited {
            message: format!(
                "a code was issued recently; retry in {retry_after_secs}s"
            ),
            retry_after_secs: Some(retry_after_secs),
        }
    }

    /// Attempt ceiling reached; the credential is permanently unusable.
    pub fn attempts_exhausted(max_attempts: u32) -> Self {
        EngineError::RateLimited {
            message: format!(
                "maximum verification attempts ({max_attempts}) exceeded; request a new code"
            ),
            retry_after_secs: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integrity_display_leaks_nothing() {
        assert_eq!(EngineError::Integrity.to_string(), "invalid");
    }

    #[test]
    fn not_found_display_is_uniform() {
        assert_eq!(
            EngineError::NotFoundOrExpired.to_string(),
            "not found, expired, or disabled"
        );
    }

    #[test]
    fn invalid_code_states_remaining_budget() {
        let e = EngineError::InvalidCode {
            attempts_remaining: 0,
        };
        assert_eq!(e.to_string(), "invalid code. 0 attempt(s) remaining");
    }

    #[test]
    fn cooldown_carries_retry_hint() {
        match EngineError::cooldown(42) {
            EngineError::RateLimited {
                retry_after_secs, ..
            } => assert_eq!(retry_after_secs, Some(42)),
            other => panic!("unexpected: {other:?}"),
        }
    }
}
