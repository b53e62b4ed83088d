//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `Clock` - Source of the current time
//! - `SchedulingStore` - Persistence gateway for Session/LiveSession with
//!   atomic multi-aggregate commits
//! - `NotificationGateway` - Delivery of reminder intents

mod clock;
mod notification_gateway;
mod scheduling_store;

pub use clock::Clock;
pub use notification_gateway::{NotificationGateway, ReminderIntent};
pub use scheduling_store::{AggregateWrite, SchedulingStore, SessionWindowQuery, WriteBatch};
