//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `clock` - System and manual clocks
//! - `notifications` - Reminder intent gateways (recording, tracing)
//! - `persistence` - Scheduling store implementations (in-memory)

pub mod clock;
pub mod notifications;
pub mod persistence;

pub use clock::{ManualClock, SystemClock};
pub use notifications::{InMemoryNotificationGateway, TracingNotificationGateway};
pub use persistence::InMemorySchedulingStore;
