//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `INTERVIEW_SCHEDULER` prefix and nested values use `__` as separator.
//!
//! Reminder windows are a list, which environment variables express poorly, so
//! an optional `interview-scheduler.toml` in the working directory is read first
//! and environment variables override it.
//!
//! # Example
//!
//! ```no_run
//! use interview_scheduler::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("{} reminder windows", config.scheduler.windows.len());
//! ```

mod error;
mod live_session;
mod scheduler;
mod server;

pub use error::{ConfigError, ValidationError};
pub use live_session::LiveSessionConfig;
pub use scheduler::{ReminderWindowConfig, SchedulerConfig};
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Base name of the optional configuration file.
pub const CONFIG_FILE: &str = "interview-scheduler";

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields a runnable
/// configuration with the two standard reminder windows.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Environment and logging
    #[serde(default)]
    pub server: ServerConfig,

    /// Reminder windows and sweep switch
    #[serde(default)]
    pub scheduler: SchedulerConfig,

    /// Join window and room defaults
    #[serde(default)]
    pub live_session: LiveSessionConfig,
}

impl AppConfig {
    /// Load configuration from the optional file and environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads `interview-scheduler.toml` if present
    /// 3. Reads environment variables with `INTERVIEW_SCHEDULER` prefix
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `INTERVIEW_SCHEDULER__SERVER__LOG_FORMAT=json` -> `server.log_format = "json"`
    /// - `INTERVIEW_SCHEDULER__LIVE_SESSION__JOIN_LEAD_MINUTES=10` -> `live_session.join_lead_minutes = 10`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(config::File::with_name(CONFIG_FILE).required(false))
            .add_source(
                config::Environment::with_prefix("INTERVIEW_SCHEDULER")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for an unknown log format, a malformed
    /// reminder window, or out-of-range room defaults.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.scheduler.validate()?;
        self.live_session.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
