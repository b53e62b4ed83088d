use crate::domain::foundation::Timestamp;
use crate::ports::Clock;

/// Reads the host's UTC wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }
}
