//! Reminder scheduler configuration

use std::collections::HashSet;

use serde::Deserialize;

use crate::domain::scheduling::{ChannelHint, ReminderWindow, MAX_OFFSET_MINUTES};

use super::error::ValidationError;

/// One reminder window as written in configuration.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ReminderWindowConfig {
    pub id: String,
    pub offset_minutes: i64,
    pub cadence_secs: i64,
    #[serde(default)]
    pub channel: ChannelHint,
}

/// Scheduler configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SchedulerConfig {
    /// Run reminder sweeps in this process
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Reminder windows, each swept on its own cadence
    #[serde(default = "default_windows")]
    pub windows: Vec<ReminderWindowConfig>,
}

impl SchedulerConfig {
    /// Validate window definitions.
    ///
    /// Ids must be non-blank and unique. Offsets run from 1 minute to 365
    /// days; each cadence must be positive and no longer than its offset.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.enabled && self.windows.is_empty() {
            return Err(ValidationError::NoReminderWindows);
        }
        let mut seen = HashSet::new();
        for w in &self.windows {
            if w.id.trim().is_empty() {
                return Err(ValidationError::EmptyWindowId);
            }
            if !seen.insert(w.id.as_str()) {
                return Err(ValidationError::DuplicateWindowId(w.id.clone()));
            }
            if !(1..=MAX_OFFSET_MINUTES).contains(&w.offset_minutes) {
                return Err(ValidationError::InvalidWindowOffset(w.id.clone()));
            }
            if w.cadence_secs <= 0 || w.cadence_secs > w.offset_minutes * 60 {
                return Err(ValidationError::InvalidWindowCadence(w.id.clone()));
            }
        }
        Ok(())
    }

    /// Domain windows, in configured order.
    pub fn reminder_windows(&self) -> Result<Vec<ReminderWindow>, ValidationError> {
        self.validate()?;
        self.windows
            .iter()
            .map(|w| {
                ReminderWindow::new(w.id.clone(), w.offset_minutes, w.cadence_secs, w.channel)
                    .map_err(|_| ValidationError::InvalidWindowCadence(w.id.clone()))
            })
            .collect()
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            windows: default_windows(),
        }
    }
}

fn default_enabled() -> bool {
    true
}

fn default_windows() -> Vec<ReminderWindowConfig> {
    ReminderWindow::defaults()
        .into_iter()
        .map(|w| ReminderWindowConfig {
            id: w.id().to_string(),
            offset_minutes: w.offset_minutes(),
            cadence_secs: w.cadence_secs(),
            channel: w.channel(),
        })
        .collect()
}
