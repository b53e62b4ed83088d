//! Room membership entries.

use crate::domain::foundation::{Timestamp, UserId};
use serde::{Deserialize, Serialize};

/// Role of a member inside the room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LiveRole {
    Host,
    Participant,
}

/// One member of a live room.
///
/// Entries are never removed; join, leave and consent only update fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiveParticipant {
    pub user_id: UserId,
    pub role: LiveRole,
    pub joined_at: Option<Timestamp>,
    pub left_at: Option<Timestamp>,
    pub recording_consent: Option<bool>,
    pub consent_at: Option<Timestamp>,
}

impl LiveParticipant {
    pub fn new(user_id: UserId, role: LiveRole) -> Self {
        Self {
            user_id,
            role,
            joined_at: None,
            left_at: None,
            recording_consent: None,
            consent_at: None,
        }
    }

    /// Same member and role with join and consent state cleared.
    pub fn reset(&self) -> Self {
        Self::new(self.user_id.clone(), self.role)
    }

    /// Currently in the room.
    pub fn is_present(&self) -> bool {
        self.joined_at.is_some() && self.left_at.is_none()
    }

    pub(super) fn record_join(&mut self, now: Timestamp) {
        if self.joined_at.is_none() {
            self.joined_at = Some(now);
        }
        self.left_at = None;
    }

    pub(super) fn record_leave(&mut self, now: Timestamp) -> bool {
        if !self.is_present() {
            return false;
        }
        self.left_at = Some(now);
        true
    }

    pub(super) fn record_consent(&mut self, consent: bool, now: Timestamp) {
        self.recording_consent = Some(consent);
        self.consent_at = Some(now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(secs: i64) -> Timestamp {
        Timestamp::from_unix_secs(1_700_000_000 + secs).unwrap()
    }

    #[test]
    fn rejoin_keeps_first_join_and_clears_leave() {
        let mut p = LiveParticipant::new(UserId::new("candidate").unwrap(), LiveRole::Participant);
        p.record_join(ts(0));
        assert!(p.record_leave(ts(60)));
        assert!(!p.is_present());

        p.record_join(ts(120));
        assert_eq!(p.joined_at, Some(ts(0)));
        assert!(p.left_at.is_none());
        assert!(p.is_present());
    }

    #[test]
    fn leave_without_join_is_ignored() {
        let mut p = LiveParticipant::new(UserId::new("candidate").unwrap(), LiveRole::Participant);
        assert!(!p.record_leave(ts(0)));
        assert!(p.left_at.is_none());
    }

    #[test]
    fn reset_preserves_role() {
        let mut p = LiveParticipant::new(UserId::new("recruiter").unwrap(), LiveRole::Host);
        p.record_join(ts(0));
        p.record_consent(true, ts(0));

        let fresh = p.reset();
        assert_eq!(fresh.role, LiveRole::Host);
        assert!(fresh.joined_at.is_none());
        assert!(fresh.recording_consent.is_none());
    }
}
