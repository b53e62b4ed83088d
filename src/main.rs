//! Reminder worker: runs the configured reminder windows until interrupted.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use interview_scheduler::adapters::{
    InMemorySchedulingStore, SystemClock, TracingNotificationGateway,
};
use interview_scheduler::application::{ReminderScheduler, ReminderSweeper};
use interview_scheduler::config::{AppConfig, ConfigError};

#[tokio::main]
async fn main() -> Result<(), ConfigError> {
    let config = AppConfig::load()?;
    init_tracing(&config);
    config.validate()?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        environment = ?config.server.environment,
        "interview scheduler starting"
    );

    if !config.scheduler.enabled {
        warn!("reminder scheduler disabled, nothing to run");
        return Ok(());
    }

    let windows = config.scheduler.reminder_windows()?;
    let store = Arc::new(InMemorySchedulingStore::new());
    let gateway = Arc::new(TracingNotificationGateway::new());
    let clock = Arc::new(SystemClock);
    let sweeper = Arc::new(ReminderSweeper::new(store, gateway, clock));
    let scheduler = ReminderScheduler::new(sweeper, windows);

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let running = tokio::spawn(scheduler.run(shutdown_rx));

    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for interrupt, shutting down");
    }
    info!("shutdown requested, waiting for in-flight sweeps");
    let _ = shutdown_tx.send(true);
    if let Err(e) = running.await {
        warn!(error = %e, "scheduler task ended abnormally");
    }

    info!("interview scheduler stopped");
    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    if config.server.json_logs() {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    }
}
