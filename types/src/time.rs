//! Timestamps and the injectable clock.
//!
//! Timestamps are Unix epoch seconds (UTC). Expiry and cooldown windows are
//! always evaluated server-side against an injected [`Clock`], never against
//! anything a caller supplies.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// A Unix timestamp in seconds since epoch (UTC).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(u64);

impl Timestamp {
    /// The epoch (time zero).
    pub const EPOCH: Self = Self(0);

    pub fn new(secs: u64) -> Self {
        Self(secs)
    }

    pub fn as_secs(&self) -> u64 {
        self.0
    }

    /// This timestamp shifted forward by `secs` (saturating).
    pub fn plus_secs(&self, secs: u64) -> Timestamp {
        Self(self.0.saturating_add(secs))
    }

    /// Seconds elapsed since this timestamp (relative to `now`).
    pub fn elapsed_since(&self, now: Timestamp) -> u64 {
        now.0.saturating_sub(self.0)
    }

    /// Whether this timestamp lies strictly in the past relative to `now`.
    pub fn is_past(&self, now: Timestamp) -> bool {
        self.0 < now.0
    }

    /// Whether this timestamp + duration has passed relative to `now`.
    pub fn has_expired(&self, duration_secs: u64, now: Timestamp) -> bool {
        now.0 >= self.0.saturating_add(duration_secs)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", self.0)
    }
}

/// A date of birth, as signed epoch seconds (people born before 1970 exist).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BirthDate(i64);

/// Seconds in a Julian year (365.25 days).
const SECS_PER_YEAR: i64 = 31_557_600;

impl BirthDate {
    pub fn from_unix_secs(secs: i64) -> Self {
        Self(secs)
    }

    pub fn as_secs(&self) -> i64 {
        self.0
    }

    /// Whole years elapsed between birth and `now`, floored, never negative.
    pub fn age_in_years(&self, now: Timestamp) -> u32 {
        let elapsed = (now.as_secs() as i64).saturating_sub(self.0).max(0);
        (elapsed / SECS_PER_YEAR) as u32
    }
}

/// Source of the current time, injected into every engine.
///
/// Production code uses [`SystemClock`]; tests use a deterministic clock
/// from `carelink-nullables`.
pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;
}

/// The real system clock.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system clock before Unix epoch")
            .as_secs();
        Timestamp::new(secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plus_secs_saturates() {
        let t = Timestamp::new(u64::MAX - 1);
        assert_eq!(t.plus_secs(100), Timestamp::new(u64::MAX));
    }

    #[test]
    fn has_expired_boundary() {
        let t = Timestamp::new(100);
        assert!(!t.has_expired(60, Timestamp::new(159)));
        assert!(t.has_expired(60, Timestamp::new(160)));
    }

    #[test]
    fn age_computed_in_floored_years() {
        let dob = BirthDate::from_unix_secs(0);
        let now = Timestamp::new((SECS_PER_YEAR as u64) * 30 + 1000);
        assert_eq!(dob.age_in_years(now), 30);
    }

    #[test]
    fn age_never_negative() {
        let dob = BirthDate::from_unix_secs(1_000_000);
        assert_eq!(dob.age_in_years(Timestamp::new(0)), 0);
    }

    #[test]
    fn pre_epoch_birth_date() {
        let dob = BirthDate::from_unix_secs(-SECS_PER_YEAR * 10);
        let now = Timestamp::new(SECS_PER_YEAR as u64 * 10);
        assert_eq!(dob.age_in_years(now), 20);
    }
}
