//! Reminder windows and the per-session record of windows already notified.

use crate::domain::foundation::{Timestamp, ValidationError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Delivery hint attached to a reminder intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ChannelHint {
    #[default]
    Email,
    Push,
    InApp,
}

impl fmt::Display for ChannelHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ChannelHint::Email => "email",
            ChannelHint::Push => "push",
            ChannelHint::InApp => "in_app",
        };
        write!(f, "{}", s)
    }
}

/// Longest supported reminder offset: 365 days.
pub const MAX_OFFSET_MINUTES: i64 = 365 * 24 * 60;

/// A named offset before a session's start at which one reminder fires.
///
/// The sweep for a window runs every `cadence_secs` and picks up sessions
/// starting in `[now + offset, now + offset + cadence)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderWindow {
    id: String,
    offset_minutes: i64,
    cadence_secs: i64,
    channel: ChannelHint,
}

impl ReminderWindow {
    /// Creates a window.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if `id` is blank
    /// - `OutOfRange` if the offset is not within 1 minute to 365 days, the
    ///   cadence is not positive, or the cadence is longer than the offset
    pub fn new(
        id: impl Into<String>,
        offset_minutes: i64,
        cadence_secs: i64,
        channel: ChannelHint,
    ) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ValidationError::empty_field("window_id"));
        }
        if !(1..=MAX_OFFSET_MINUTES).contains(&offset_minutes) {
            return Err(ValidationError::out_of_range(
                "offset_minutes",
                1,
                MAX_OFFSET_MINUTES,
                offset_minutes,
            ));
        }
        if cadence_secs <= 0 || cadence_secs > offset_minutes * 60 {
            return Err(ValidationError::out_of_range(
                "cadence_secs",
                1,
                offset_minutes * 60,
                cadence_secs,
            ));
        }
        Ok(Self {
            id,
            offset_minutes,
            cadence_secs,
            channel,
        })
    }

    /// The 24-hour reminder, swept hourly.
    pub fn day_before() -> Self {
        Self {
            id: "24h".to_string(),
            offset_minutes: 24 * 60,
            cadence_secs: 60 * 60,
            channel: ChannelHint::Email,
        }
    }

    /// The 15-minute reminder, swept every minute.
    pub fn quarter_hour_before() -> Self {
        Self {
            id: "15m".to_string(),
            offset_minutes: 15,
            cadence_secs: 60,
            channel: ChannelHint::Push,
        }
    }

    /// The standard pair of windows.
    pub fn defaults() -> Vec<Self> {
        vec![Self::day_before(), Self::quarter_hour_before()]
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn offset_minutes(&self) -> i64 {
        self.offset_minutes
    }

    pub fn cadence_secs(&self) -> i64 {
        self.cadence_secs
    }

    pub fn channel(&self) -> ChannelHint {
        self.channel
    }

    /// Half-open `[from, to)` range of start times due at `now`.
    pub fn bounds(&self, now: Timestamp) -> (Timestamp, Timestamp) {
        let from = now.plus_minutes(self.offset_minutes);
        (from, from.plus_secs(self.cadence_secs))
    }

    /// Whether a start time falls inside the range due at `now`.
    pub fn contains(&self, now: Timestamp, scheduled_at: Timestamp) -> bool {
        let (from, to) = self.bounds(now);
        scheduled_at >= from && scheduled_at < to
    }
}

/// Set of window ids a session has already been reminded for.
///
/// Only ever grows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReminderMarks(BTreeSet<String>);

impl ReminderMarks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, window_id: &str) -> bool {
        self.0.contains(window_id)
    }

    /// Adds a mark, returning false if it was already present.
    pub fn insert(&mut self, window_id: impl Into<String>) -> bool {
        self.0.insert(window_id.into())
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for ReminderMarks {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}
