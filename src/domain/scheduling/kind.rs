//! Kind of meeting a session represents.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Meeting format of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SessionKind {
    #[default]
    VideoInterview,
    PhoneCall,
    InPerson,
    Other,
}

impl SessionKind {
    /// Only video interviews get a live room.
    pub fn requires_live_session(&self) -> bool {
        matches!(self, SessionKind::VideoInterview)
    }
}

impl fmt::Display for SessionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SessionKind::VideoInterview => "video_interview",
            SessionKind::PhoneCall => "phone_call",
            SessionKind::InPerson => "in_person",
            SessionKind::Other => "other",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_video_interview_requires_live_session() {
        assert!(SessionKind::VideoInterview.requires_live_session());
        assert!(!SessionKind::PhoneCall.requires_live_session());
        assert!(!SessionKind::InPerson.requires_live_session());
        assert!(!SessionKind::Other.requires_live_session());
    }

    #[test]
    fn deserializes_from_snake_case_json() {
        let kind: SessionKind = serde_json::from_str("\"phone_call\"").unwrap();
        assert_eq!(kind, SessionKind::PhoneCall);
    }
}
