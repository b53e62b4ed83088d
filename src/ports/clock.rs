//! Clock port - Source of "now" for all time-dependent rules.
//!
//! Domain code never reads the system clock directly; handlers and the
//! reminder sweeper ask an injected `Clock` so boundary behaviour can be
//! tested deterministically.

use crate::domain::foundation::Timestamp;

/// Port for reading the current time.
pub trait Clock: Send + Sync {
    /// The current instant.
    fn now(&self) -> Timestamp;
}
