//! Live room defaults and join window configuration

use serde::Deserialize;

use crate::domain::live_session::{
    JoinPolicy, LiveSessionSettings, DEFAULT_JOIN_LEAD_MINUTES, DEFAULT_LATE_JOIN_GRACE_MINUTES,
    MAX_ROOM_CAPACITY, MIN_ROOM_CAPACITY,
};

use super::error::ValidationError;

/// Live session configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LiveSessionConfig {
    /// Minutes before the start at which joining opens
    #[serde(default = "default_join_lead")]
    pub join_lead_minutes: i64,

    /// Minutes after the end during which an active room still admits joins
    #[serde(default = "default_late_join_grace")]
    pub late_join_grace_minutes: i64,

    /// Capacity of newly created rooms
    #[serde(default = "default_max_participants")]
    pub max_participants: u8,

    /// Whether new rooms record by default
    #[serde(default)]
    pub recording_enabled: bool,

    /// Whether new rooms hold joiners in a waiting room
    #[serde(default = "default_true")]
    pub waiting_room_enabled: bool,
}

impl LiveSessionConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.join_lead_minutes < 0 {
            return Err(ValidationError::InvalidJoinLead);
        }
        if self.late_join_grace_minutes < 0 {
            return Err(ValidationError::InvalidLateJoinGrace);
        }
        if !(MIN_ROOM_CAPACITY..=MAX_ROOM_CAPACITY).contains(&self.max_participants) {
            return Err(ValidationError::InvalidRoomCapacity {
                min: MIN_ROOM_CAPACITY,
                max: MAX_ROOM_CAPACITY,
            });
        }
        Ok(())
    }

    pub fn join_policy(&self) -> JoinPolicy {
        JoinPolicy {
            lead_minutes: self.join_lead_minutes,
            late_join_grace_minutes: self.late_join_grace_minutes,
        }
    }

    /// Settings applied to rooms created without explicit settings.
    pub fn default_settings(&self) -> LiveSessionSettings {
        LiveSessionSettings {
            recording_enabled: self.recording_enabled,
            waiting_room_enabled: self.waiting_room_enabled,
            max_participants: self.max_participants,
            ..LiveSessionSettings::default()
        }
    }
}

impl Default for LiveSessionConfig {
    fn default() -> Self {
        Self {
            join_lead_minutes: default_join_lead(),
            late_join_grace_minutes: default_late_join_grace(),
            max_participants: default_max_participants(),
            recording_enabled: false,
            waiting_room_enabled: default_true(),
        }
    }
}

fn default_join_lead() -> i64 {
    DEFAULT_JOIN_LEAD_MINUTES
}

fn default_late_join_grace() -> i64 {
    DEFAULT_LATE_JOIN_GRACE_MINUTES
}

fn default_max_participants() -> u8 {
    MAX_ROOM_CAPACITY
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_domain_defaults() {
        let config = LiveSessionConfig::default();
        assert_eq!(config.join_policy(), JoinPolicy::default());
        assert_eq!(config.default_settings(), LiveSessionSettings::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_negative_windows() {
        let config = LiveSessionConfig {
            join_lead_minutes: -1,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidJoinLead));

        let config = LiveSessionConfig {
            late_join_grace_minutes: -1,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidLateJoinGrace));
    }

    #[test]
    fn test_rejects_capacity_out_of_range() {
        for max_participants in [0, 1, MAX_ROOM_CAPACITY + 1] {
            let config = LiveSessionConfig {
                max_participants,
                ..Default::default()
            };
            assert!(matches!(
                config.validate(),
                Err(ValidationError::InvalidRoomCapacity { .. })
            ));
        }
    }
}
