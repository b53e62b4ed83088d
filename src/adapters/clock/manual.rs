//! Settable clock for tests.

use std::sync::atomic::{AtomicI64, Ordering};

use crate::domain::foundation::Timestamp;
use crate::ports::Clock;

/// A clock that only moves when told to.
///
/// Stores whole seconds since the epoch, which is the resolution every
/// scheduling rule works at.
#[derive(Debug)]
pub struct ManualClock {
    unix_secs: AtomicI64,
}

impl ManualClock {
    pub fn new(start: Timestamp) -> Self {
        Self {
            unix_secs: AtomicI64::new(start.as_unix_secs()),
        }
    }

    pub fn set(&self, at: Timestamp) {
        self.unix_secs.store(at.as_unix_secs(), Ordering::SeqCst);
    }

    pub fn advance_secs(&self, secs: i64) {
        self.unix_secs.fetch_add(secs, Ordering::SeqCst);
    }

    pub fn advance_minutes(&self, minutes: i64) {
        self.advance_secs(minutes * 60);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        let secs = self.unix_secs.load(Ordering::SeqCst);
        // Only values produced by `as_unix_secs` are ever stored.
        Timestamp::from_unix_secs(secs).unwrap_or_else(Timestamp::now)
    }
}
