//! Reminder sweeper - one pass over one reminder window.
//!
//! # Algorithm
//!
//! 1. Query video interviews that are scheduled or confirmed, start inside
//!    `[now + offset, now + offset + cadence)` and lack the window's mark.
//! 2. For each candidate, reload it and skip it if it is no longer upcoming,
//!    is already marked or its live room has closed.
//! 3. Emit one intent per recipient (organizer and accepted participants).
//! 4. Only after every emit succeeded, add the mark and commit.
//!
//! Failures are isolated per session: they are logged and counted, and the
//! sweep moves on. A session whose emit or mark failed stays unmarked and is
//! picked up again by the next pass while still inside the window. A crash
//! between emit and mark can repeat a reminder; it can never lose one.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::domain::foundation::{SessionId, Timestamp};
use crate::domain::scheduling::{
    ReminderWindow, SchedulingError, Session, SessionKind, SessionStatus,
};
use crate::ports::{
    Clock, NotificationGateway, ReminderIntent, SchedulingStore, SessionWindowQuery, WriteBatch,
};

/// Counters for one sweep of one window.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SweepReport {
    pub window: String,
    /// Sessions returned by the window query.
    pub candidates: usize,
    /// Sessions whose reminder went out and whose mark was stored.
    pub notified_sessions: usize,
    pub intents_emitted: usize,
    /// Sessions dropped on reload or for lacking an open live room.
    pub skipped: usize,
    pub failures: usize,
}

enum Outcome {
    Notified { intents: usize },
    Skipped,
}

/// Scans sessions due a reminder and hands intents to the gateway.
pub struct ReminderSweeper {
    store: Arc<dyn SchedulingStore>,
    gateway: Arc<dyn NotificationGateway>,
    clock: Arc<dyn Clock>,
}

impl ReminderSweeper {
    pub fn new(
        store: Arc<dyn SchedulingStore>,
        gateway: Arc<dyn NotificationGateway>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            gateway,
            clock,
        }
    }

    /// Run one pass for `window`. Never fails as a whole.
    pub async fn sweep(&self, window: &ReminderWindow) -> SweepReport {
        let now = self.clock.now();
        let (from, to) = window.bounds(now);
        let mut report = SweepReport {
            window: window.id().to_string(),
            ..Default::default()
        };

        let query = SessionWindowQuery {
            kind: SessionKind::VideoInterview,
            statuses: SessionStatus::UPCOMING.to_vec(),
            from,
            to,
            excluding_mark: Some(window.id().to_string()),
        };
        let candidates = match self.store.find_sessions_in_window(&query).await {
            Ok(found) => found,
            Err(e) => {
                error!(window = %window.id(), error = %e, "reminder window query failed");
                report.failures += 1;
                return report;
            }
        };
        report.candidates = candidates.len();

        for candidate in candidates {
            let session_id = *candidate.id();
            match self.remind(window, &session_id, now).await {
                Ok(Outcome::Notified { intents }) => {
                    report.notified_sessions += 1;
                    report.intents_emitted += intents;
                }
                Ok(Outcome::Skipped) => report.skipped += 1,
                Err(e) => {
                    warn!(
                        window = %window.id(),
                        session_id = %session_id,
                        error = %e,
                        "reminder failed, will retry next pass"
                    );
                    report.failures += 1;
                }
            }
        }

        info!(
            window = %report.window,
            candidates = report.candidates,
            notified_sessions = report.notified_sessions,
            intents_emitted = report.intents_emitted,
            skipped = report.skipped,
            failures = report.failures,
            "reminder sweep finished"
        );
        report
    }

    async fn remind(
        &self,
        window: &ReminderWindow,
        session_id: &SessionId,
        now: Timestamp,
    ) -> Result<Outcome, SchedulingError> {
        // Reload: the session may have moved on since the query
        let Some(session) = self.store.load_session(session_id).await? else {
            return Ok(Outcome::Skipped);
        };
        if !session.status().is_upcoming() || session.reminder_marks().contains(window.id()) {
            debug!(session_id = %session_id, status = %session.status(), "reminder no longer due");
            return Ok(Outcome::Skipped);
        }

        let Some(live_session_id) = session.live_session_id().copied() else {
            warn!(
                session_id = %session_id,
                "video interview has no live session, skipping reminder"
            );
            return Ok(Outcome::Skipped);
        };
        let Some(live) = self.store.load_live_session(&live_session_id).await? else {
            warn!(
                session_id = %session_id,
                live_session_id = %live_session_id,
                "linked live session missing, skipping reminder"
            );
            return Ok(Outcome::Skipped);
        };
        if !live.status().is_open() {
            warn!(
                session_id = %session_id,
                live_session_id = %live_session_id,
                live_status = %live.status(),
                "linked live session is closed, skipping reminder"
            );
            return Ok(Outcome::Skipped);
        }

        let recipients = session.reminder_recipients();
        for recipient_id in &recipients {
            self.gateway
                .emit(ReminderIntent {
                    recipient_id: recipient_id.clone(),
                    session_id: *session_id,
                    live_session_id,
                    window_id: window.id().to_string(),
                    offset_minutes: window.offset_minutes(),
                    channel_hint: window.channel(),
                    scheduled_at: session.scheduled_at(),
                    meeting_path: live.meeting_path(),
                })
                .await?;
        }

        self.mark(session, window, now).await?;
        Ok(Outcome::Notified {
            intents: recipients.len(),
        })
    }

    /// Store the window mark, retrying once from a fresh load on conflict.
    async fn mark(
        &self,
        mut session: Session,
        window: &ReminderWindow,
        now: Timestamp,
    ) -> Result<(), SchedulingError> {
        session.record_reminder(window.id(), now);
        match self
            .store
            .commit(WriteBatch::new().update_session(session.clone()))
            .await
        {
            Ok(()) => Ok(()),
            Err(e) => match SchedulingError::from(e) {
                SchedulingError::ConflictingWrite(_) => {
                    let Some(mut fresh) = self.store.load_session(session.id()).await? else {
                        return Ok(());
                    };
                    if !fresh.status().is_upcoming() {
                        debug!(
                            session_id = %fresh.id(),
                            "session changed while reminding, mark dropped"
                        );
                        return Ok(());
                    }
                    if fresh.record_reminder(window.id(), now) {
                        self.store
                            .commit(WriteBatch::new().update_session(fresh))
                            .await?;
                    }
                    Ok(())
                }
                other => Err(other),
            },
        }
    }
}
