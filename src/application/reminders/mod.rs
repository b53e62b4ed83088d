//! Reminder sweeps and the process-level scheduler that drives them.

mod scheduler;
mod sweeper;

pub use scheduler::{ReminderScheduler, WindowRunner};
pub use sweeper::{ReminderSweeper, SweepReport};
