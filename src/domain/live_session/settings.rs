//! Room settings for a live session.

use crate::domain::foundation::ValidationError;
use serde::{Deserialize, Serialize};

/// Smallest allowed room capacity.
pub const MIN_ROOM_CAPACITY: u8 = 2;

/// Largest allowed room capacity.
pub const MAX_ROOM_CAPACITY: u8 = 10;

/// Per-room feature toggles and capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiveSessionSettings {
    pub recording_enabled: bool,
    pub waiting_room_enabled: bool,
    pub screen_share_enabled: bool,
    pub chat_enabled: bool,
    pub max_participants: u8,
}

impl LiveSessionSettings {
    /// # Errors
    ///
    /// - `OutOfRange` if `max_participants` is outside 2..=10
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(MIN_ROOM_CAPACITY..=MAX_ROOM_CAPACITY).contains(&self.max_participants) {
            return Err(ValidationError::out_of_range(
                "max_participants",
                i64::from(MIN_ROOM_CAPACITY),
                i64::from(MAX_ROOM_CAPACITY),
                i64::from(self.max_participants),
            ));
        }
        Ok(())
    }
}

impl Default for LiveSessionSettings {
    fn default() -> Self {
        Self {
            recording_enabled: false,
            waiting_room_enabled: true,
            screen_share_enabled: true,
            chat_enabled: true,
            max_participants: MAX_ROOM_CAPACITY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(LiveSessionSettings::default().validate().is_ok());
    }

    #[test]
    fn capacity_bounds_are_inclusive() {
        for capacity in [MIN_ROOM_CAPACITY, MAX_ROOM_CAPACITY] {
            let settings = LiveSessionSettings {
                max_participants: capacity,
                ..Default::default()
            };
            assert!(settings.validate().is_ok());
        }
        for capacity in [0, 1, 11] {
            let settings = LiveSessionSettings {
                max_participants: capacity,
                ..Default::default()
            };
            assert!(settings.validate().is_err(), "capacity {}", capacity);
        }
    }
}
