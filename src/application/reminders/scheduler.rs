//! Reminder scheduler - periodic sweeps, one task per reminder window.
//!
//! # Behavior
//!
//! Each window ticks on its own `tokio::time::interval` at the window's
//! cadence. A tick starts a sweep in its own task; if the previous sweep for
//! the same window is still running, the tick is skipped. Windows never wait
//! on each other.
//!
//! # Graceful Shutdown
//!
//! The scheduler listens on a `watch` channel. On shutdown no new sweep is
//! started and any in-flight sweep is allowed to finish.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, error, info};

use crate::domain::scheduling::ReminderWindow;

use super::sweeper::{ReminderSweeper, SweepReport};

/// Clears the busy flag when the sweep task finishes, panics included.
struct BusyGuard(Arc<AtomicBool>);

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Sweeps for a single window, at most one at a time.
#[derive(Clone)]
pub struct WindowRunner {
    sweeper: Arc<ReminderSweeper>,
    window: ReminderWindow,
    busy: Arc<AtomicBool>,
}

impl WindowRunner {
    pub fn new(sweeper: Arc<ReminderSweeper>, window: ReminderWindow) -> Self {
        Self {
            sweeper,
            window,
            busy: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn window(&self) -> &ReminderWindow {
        &self.window
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    /// Start a sweep unless one is already running for this window.
    pub fn try_start(&self) -> Option<JoinHandle<SweepReport>> {
        if self.busy.swap(true, Ordering::SeqCst) {
            debug!(window = %self.window.id(), "previous sweep still running, tick skipped");
            return None;
        }
        let guard = BusyGuard(self.busy.clone());
        let sweeper = self.sweeper.clone();
        let window = self.window.clone();
        Some(tokio::spawn(async move {
            let _guard = guard;
            sweeper.sweep(&window).await
        }))
    }

    /// Tick until `shutdown` flips to true or its sender is dropped.
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) {
        let cadence = Duration::from_secs(self.window.cadence_secs().unsigned_abs());
        let mut interval = time::interval(cadence);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut in_flight: Option<JoinHandle<SweepReport>> = None;

        info!(
            window = %self.window.id(),
            cadence_secs = self.window.cadence_secs(),
            "reminder window started"
        );

        loop {
            tokio::select! {
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
                _ = interval.tick() => {
                    if let Some(handle) = self.try_start() {
                        in_flight = Some(handle);
                    }
                }
            }
        }

        if let Some(handle) = in_flight {
            if let Err(e) = handle.await {
                error!(window = %self.window.id(), error = %e, "sweep task aborted");
            }
        }
        info!(window = %self.window.id(), "reminder window stopped");
    }
}

/// Owns one [`WindowRunner`] per configured window.
pub struct ReminderScheduler {
    runners: Vec<WindowRunner>,
}

impl ReminderScheduler {
    pub fn new(sweeper: Arc<ReminderSweeper>, windows: Vec<ReminderWindow>) -> Self {
        let runners = windows
            .into_iter()
            .map(|w| WindowRunner::new(sweeper.clone(), w))
            .collect();
        Self { runners }
    }

    pub fn runners(&self) -> &[WindowRunner] {
        &self.runners
    }

    /// Run every window until shutdown, then wait for in-flight sweeps.
    pub async fn run(self, shutdown: watch::Receiver<bool>) {
        let tasks: Vec<JoinHandle<()>> = self
            .runners
            .into_iter()
            .map(|runner| tokio::spawn(runner.run(shutdown.clone())))
            .collect();

        for result in join_all(tasks).await {
            if let Err(e) = result {
                error!(error = %e, "reminder window task failed");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{InMemorySchedulingStore, ManualClock};
    use crate::application::handlers::test_support::Fixture;
    use crate::domain::foundation::DomainError;
    use crate::domain::scheduling::{ChannelHint, SessionKind};
    use crate::ports::{NotificationGateway, ReminderIntent};
    use async_trait::async_trait;
    use std::sync::atomic::AtomicUsize;
    use tokio::sync::Semaphore;

    /// Gateway that blocks every emit until a permit is released.
    struct GatedGateway {
        gate: Semaphore,
        emitted: AtomicUsize,
    }

    #[async_trait]
    impl NotificationGateway for GatedGateway {
        async fn emit(&self, _intent: ReminderIntent) -> Result<(), DomainError> {
            let permit = self.gate.acquire().await.unwrap();
            permit.forget();
            self.emitted.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    fn sweeper_with(
        store: Arc<InMemorySchedulingStore>,
        clock: Arc<ManualClock>,
        gateway: Arc<GatedGateway>,
    ) -> Arc<ReminderSweeper> {
        Arc::new(ReminderSweeper::new(store, gateway, clock))
    }

    #[tokio::test]
    async fn overlapping_tick_is_skipped() {
        let fx = Fixture::new();
        fx.schedule(SessionKind::VideoInterview, 24 * 60).await;
        let gateway = Arc::new(GatedGateway {
            gate: Semaphore::new(0),
            emitted: AtomicUsize::new(0),
        });
        let runner = WindowRunner::new(
            sweeper_with(fx.store.clone(), fx.clock.clone(), gateway.clone()),
            ReminderWindow::day_before(),
        );

        let first = runner.try_start().unwrap();
        assert!(runner.is_busy());
        assert!(runner.try_start().is_none());

        gateway.gate.add_permits(1);
        let report = first.await.unwrap();
        assert_eq!(report.notified_sessions, 1);
        assert!(!runner.is_busy());

        let next = runner.try_start().unwrap().await.unwrap();
        assert_eq!(next.candidates, 0);
        assert_eq!(gateway.emitted.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn run_stops_on_shutdown_signal() {
        let fx = Fixture::new();
        let gateway = Arc::new(GatedGateway {
            gate: Semaphore::new(100),
            emitted: AtomicUsize::new(0),
        });
        let window = ReminderWindow::new("1m", 2, 1, ChannelHint::InApp).unwrap();
        let scheduler = ReminderScheduler::new(
            sweeper_with(fx.store.clone(), fx.clock.clone(), gateway),
            vec![window, ReminderWindow::quarter_hour_before()],
        );
        assert_eq!(scheduler.runners().len(), 2);

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let handle = tokio::spawn(scheduler.run(shutdown_rx));

        tokio::time::sleep(Duration::from_millis(50)).await;
        shutdown_tx.send(true).unwrap();

        let result = tokio::time::timeout(Duration::from_secs(2), handle).await;
        assert!(result.is_ok(), "scheduler should stop after shutdown");
    }

    #[tokio::test]
    async fn first_tick_sweeps_immediately() {
        let fx = Fixture::new();
        fx.schedule_accepted_video(24 * 60).await;
        let gateway = Arc::new(GatedGateway {
            gate: Semaphore::new(100),
            emitted: AtomicUsize::new(0),
        });
        let scheduler = ReminderScheduler::new(
            sweeper_with(fx.store.clone(), fx.clock.clone(), gateway.clone()),
            vec![ReminderWindow::day_before()],
        );

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let handle = tokio::spawn(scheduler.run(shutdown_rx));
        tokio::time::sleep(Duration::from_millis(100)).await;
        shutdown_tx.send(true).unwrap();
        handle.await.unwrap();

        assert_eq!(gateway.emitted.load(Ordering::SeqCst), 2);
    }
}
