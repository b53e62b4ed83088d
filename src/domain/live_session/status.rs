//! LiveSession status state machine.

use crate::domain::foundation::StateMachine;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a live video room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LiveSessionStatus {
    /// Room exists but nobody has opened it.
    #[default]
    Scheduled,
    /// Room opened, waiting for the host to start.
    Waiting,
    /// Call in progress.
    Active,
    /// Call finished.
    Ended,
    /// Room will never be used.
    Cancelled,
    /// Room superseded by a rescheduled successor.
    Rescheduled,
}

impl LiveSessionStatus {
    /// Statuses in which the room is still usable.
    pub fn is_open(&self) -> bool {
        matches!(
            self,
            LiveSessionStatus::Scheduled | LiveSessionStatus::Waiting | LiveSessionStatus::Active
        )
    }
}

impl StateMachine for LiveSessionStatus {
    const ENTITY: &'static str = "live_session";

    fn can_transition_to(&self, target: &Self) -> bool {
        use LiveSessionStatus::*;
        matches!(
            (self, target),
            (Scheduled, Waiting)
                | (Scheduled, Active)
                | (Waiting, Active)
                | (Waiting, Ended)
                | (Active, Ended)
                | (Scheduled, Cancelled)
                | (Waiting, Cancelled)
                | (Active, Cancelled)
                | (Scheduled, Rescheduled)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use LiveSessionStatus::*;
        match self {
            Scheduled => vec![Waiting, Active, Cancelled, Rescheduled],
            Waiting => vec![Active, Ended, Cancelled],
            Active => vec![Ended, Cancelled],
            Ended | Cancelled | Rescheduled => vec![],
        }
    }
}

impl fmt::Display for LiveSessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LiveSessionStatus::Scheduled => "scheduled",
            LiveSessionStatus::Waiting => "waiting",
            LiveSessionStatus::Active => "active",
            LiveSessionStatus::Ended => "ended",
            LiveSessionStatus::Cancelled => "cancelled",
            LiveSessionStatus::Rescheduled => "rescheduled",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use LiveSessionStatus::*;

    const ALL: [LiveSessionStatus; 6] = [Scheduled, Waiting, Active, Ended, Cancelled, Rescheduled];

    #[test]
    fn can_transition_to_is_consistent_with_valid_transitions() {
        for from in ALL {
            for to in ALL {
                assert_eq!(
                    from.can_transition_to(&to),
                    from.valid_transitions().contains(&to),
                    "{} -> {}",
                    from,
                    to
                );
            }
        }
    }

    #[test]
    fn open_statuses_are_exactly_the_non_terminal_ones() {
        for status in ALL {
            assert_eq!(status.is_open(), !status.is_terminal(), "{}", status);
        }
    }

    #[test]
    fn only_scheduled_can_be_rescheduled() {
        assert!(Scheduled.can_transition_to(&Rescheduled));
        assert!(!Waiting.can_transition_to(&Rescheduled));
        assert!(!Active.can_transition_to(&Rescheduled));
    }

    #[test]
    fn ended_cannot_be_cancelled() {
        assert!(!Ended.can_transition_to(&Cancelled));
    }
}
