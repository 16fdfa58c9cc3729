//! Deterministic clock — time only advances when you tell it to.

use carelink_types::{Clock, Timestamp};
use std::sync::atomic::{AtomicU64, Ordering};

/// A settable clock for tests. Thread-safe so it can be shared across the
/// engines it is injected into.
pub struct NullClock {
    current: AtomicU64,
}

impl NullClock {
    pub fn new(initial_secs: u64) -> Self {
        Self {
            current: AtomicU64::new(initial_secs),
        }
    }

    /// Advance time by a number of seconds.
    pub fn advance(&self, secs: u64) {
        self.current.fetch_add(secs, Ordering::SeqCst);
    }

    /// Set the time to a specific value.
    pub fn set(&self, secs: u64) {
        self.current.store(secs, Ordering::SeqCst);
    }
}

impl Clock for NullClock {
    fn now(&self) -> Timestamp {
        Timestamp::new(self.current.load(Ordering::SeqCst))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advances_only_on_request() {
        let clock = NullClock::new(100);
        assert_eq!(clock.now(), Timestamp::new(100));
        clock.advance(60);
        assert_eq!(clock.now(), Timestamp::new(160));
        clock.set(10);
        assert_eq!(clock.now(), Timestamp::new(10));
    }
}
