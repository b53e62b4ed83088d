//! Session lifecycle status state machine.

use crate::domain::foundation::StateMachine;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a scheduled session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    /// Created, awaiting organizer confirmation.
    #[default]
    Scheduled,
    /// Organizer confirmed the session will take place.
    Confirmed,
    /// The meeting is underway.
    InProgress,
    /// The meeting took place and finished.
    Completed,
    /// Organizer called the session off.
    Cancelled,
    /// Superseded by a successor session in the reschedule chain.
    Rescheduled,
}

impl SessionStatus {
    /// Statuses eligible for reminders and rescheduling.
    pub const UPCOMING: [SessionStatus; 2] = [SessionStatus::Scheduled, SessionStatus::Confirmed];

    /// Returns true while the session has not started and is not terminal.
    pub fn is_upcoming(&self) -> bool {
        Self::UPCOMING.contains(self)
    }
}

impl StateMachine for SessionStatus {
    const ENTITY: &'static str = "session";

    fn can_transition_to(&self, target: &Self) -> bool {
        use SessionStatus::*;
        matches!(
            (self, target),
            (Scheduled, Confirmed)
                | (Confirmed, InProgress)
                | (InProgress, Completed)
                | (Scheduled, Cancelled)
                | (Confirmed, Cancelled)
                | (Scheduled, Rescheduled)
                | (Confirmed, Rescheduled)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use SessionStatus::*;
        match self {
            Scheduled => vec![Confirmed, Cancelled, Rescheduled],
            Confirmed => vec![InProgress, Cancelled, Rescheduled],
            InProgress => vec![Completed],
            Completed | Cancelled | Rescheduled => vec![],
        }
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SessionStatus::Scheduled => "scheduled",
            SessionStatus::Confirmed => "confirmed",
            SessionStatus::InProgress => "in_progress",
            SessionStatus::Completed => "completed",
            SessionStatus::Cancelled => "cancelled",
            SessionStatus::Rescheduled => "rescheduled",
        };
        write!(f, "{}", s)
    }
}
