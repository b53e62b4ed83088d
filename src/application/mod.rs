//! Application layer - Commands, Queries, Handlers and the reminder scheduler.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Command handlers write through a single atomic batch; query handlers only read.

pub mod handlers;
pub mod reminders;

pub use handlers::*;
pub use reminders::{ReminderScheduler, ReminderSweeper, SweepReport, WindowRunner};
