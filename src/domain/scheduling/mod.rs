//! Scheduling domain module.
//!
//! Handles the lifecycle of a scheduled session: creation, participant
//! responses, confirmation, cancellation and rescheduling, plus the record
//! of reminder windows already notified.
//!
//! # Lifecycle
//!
//! `scheduled → confirmed → in_progress → completed`, with
//! `scheduled|confirmed → cancelled|rescheduled`. Terminal states have no
//! outgoing transitions.

mod aggregate;
mod errors;
mod kind;
mod participant;
mod reminder;
mod status;

pub use aggregate::{
    Session, SessionDraft, DEFAULT_RESCHEDULE_REASON, MAX_DURATION_MINUTES, MAX_TITLE_LENGTH,
    MIN_DURATION_MINUTES,
};
pub use errors::SchedulingError;
pub use kind::SessionKind;
pub use participant::{Participant, ResponseStatus};
pub use reminder::{ChannelHint, ReminderMarks, ReminderWindow, MAX_OFFSET_MINUTES};
pub use status::SessionStatus;
