//! Live session domain module.
//!
//! The real-time video room bound to a video-interview session, and the
//! join-eligibility policy that gates entry by wall-clock time.
//!
//! # Lifecycle
//!
//! `scheduled → waiting → active → ended`, with
//! `scheduled|waiting|active → cancelled` and `scheduled → rescheduled`.

mod aggregate;
mod eligibility;
mod participant;
mod settings;
mod status;

pub use aggregate::LiveSession;
pub use eligibility::{
    evaluate_join, evaluate_room_join, JoinEligibility, JoinPhase, JoinPolicy,
    DEFAULT_JOIN_LEAD_MINUTES, DEFAULT_LATE_JOIN_GRACE_MINUTES,
};
pub use participant::{LiveParticipant, LiveRole};
pub use settings::{LiveSessionSettings, MAX_ROOM_CAPACITY, MIN_ROOM_CAPACITY};
pub use status::LiveSessionStatus;
