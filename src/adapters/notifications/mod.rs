//! Notification gateway adapters.

mod in_memory;
mod tracing_gateway;

pub use in_memory::InMemoryNotificationGateway;
pub use tracing_gateway::TracingNotificationGateway;
