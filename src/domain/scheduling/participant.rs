//! Invitee entries of a session and their responses.

use crate::domain::foundation::{Timestamp, UserId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An invitee's answer to a session invitation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ResponseStatus {
    #[default]
    Pending,
    Accepted,
    Declined,
    Tentative,
}

impl ResponseStatus {
    /// Whether an invitee may submit this status (pending is only ever a reset).
    pub fn is_answer(&self) -> bool {
        !matches!(self, ResponseStatus::Pending)
    }
}

impl fmt::Display for ResponseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ResponseStatus::Pending => "pending",
            ResponseStatus::Accepted => "accepted",
            ResponseStatus::Declined => "declined",
            ResponseStatus::Tentative => "tentative",
        };
        write!(f, "{}", s)
    }
}

/// One invitee of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub user_id: UserId,
    pub response_status: ResponseStatus,
    pub responded_at: Option<Timestamp>,
}

impl Participant {
    /// A freshly invited participant awaiting a response.
    pub fn invited(user_id: UserId) -> Self {
        Self {
            user_id,
            response_status: ResponseStatus::Pending,
            responded_at: None,
        }
    }

    /// Copy of this invitee with consent cleared, used when rescheduling.
    pub fn reinvited(&self) -> Self {
        Self::invited(self.user_id.clone())
    }

    pub fn has_accepted(&self) -> bool {
        self.response_status == ResponseStatus::Accepted
    }
}
