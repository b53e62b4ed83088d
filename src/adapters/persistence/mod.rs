//! Persistence adapters for the scheduling store port.

mod in_memory;

pub use in_memory::InMemorySchedulingStore;
