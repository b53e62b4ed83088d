//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Unknown log format: {0}")]
    InvalidLogFormat(String),

    #[error("No reminder windows configured")]
    NoReminderWindows,

    #[error("Reminder window id must not be empty")]
    EmptyWindowId,

    #[error("Duplicate reminder window id: {0}")]
    DuplicateWindowId(String),

    #[error("Reminder window {0} must have an offset between 1 minute and 365 days")]
    InvalidWindowOffset(String),

    #[error("Reminder window {0} must have a cadence between 1 second and its offset")]
    InvalidWindowCadence(String),

    #[error("Join lead time must not be negative")]
    InvalidJoinLead,

    #[error("Late join grace must not be negative")]
    InvalidLateJoinGrace,

    #[error("Room capacity must be between {min} and {max}")]
    InvalidRoomCapacity { min: u8, max: u8 },
}
