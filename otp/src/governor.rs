//! Rate and attempt policy.
//!
//! Pure arithmetic over timestamps and counters; the engine supplies the
//! state, the governor decides. Both windows come from configuration but
//! are enforced here, server-side, regardless of client input.

use carelink_types::{EngineError, Timestamp};

/// Cooldown and attempt-ceiling policy for one-time credentials.
#[derive(Clone, Copy, Debug)]
pub struct Governor {
    cooldown_secs: u64,
    max_attempts: u32,
}

impl Governor {
    pub fn new(cooldown_secs: u64, max_attempts: u32) -> Self {
        Self {
            cooldown_secs,
            max_attempts,
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Reject issuance while the previous credential is inside the cooldown
    /// window.
    pub fn check_cooldown(
        &self,
        last_created: Option<Timestamp>,
        now: Timestamp,
    ) -> Result<(), EngineError> {
        let Some(created) = last_created else {
            return Ok(());
        };
        let elapsed = created.elapsed_since(now);
        if elapsed < self.cooldown_secs {
            return Err(EngineError::cooldown(self.cooldown_secs - elapsed));
        }
        Ok(())
    }

    /// Reject verification once the ceiling has been reached. The ceiling
    /// is strict: after `max_attempts` consumed attempts, even a correct
    /// code fails.
    pub fn check_ceiling(&self, attempts: u32) -> Result<(), EngineError> {
        if attempts >= self.max_attempts {
            return Err(EngineError::attempts_exhausted(self.max_attempts));
        }
        Ok(())
    }

    /// Attempts left after `consumed` have been spent.
    pub fn remaining(&self, consumed: u32) -> u32 {
        self.max_attempts.saturating_sub(consumed)
    }
}
