//! RescheduleSessionHandler - Command handler for moving a session.
//!
//! Rescheduling never edits the session in place. It retires the old
//! session, creates a linked successor whose participants must answer
//! again, and swaps the live room for a fresh one. Up to four writes go out
//! in a single batch.

use std::sync::Arc;

use tracing::info;

use crate::domain::foundation::{SessionId, StateMachine, Timestamp, UserId};
use crate::domain::live_session::{LiveSession, LiveSessionStatus};
use crate::domain::scheduling::{SchedulingError, Session, SessionStatus};
use crate::ports::{Clock, SchedulingStore, WriteBatch};

use crate::application::handlers::loading::{load_linked_live_session, load_session};

/// Command to reschedule a session.
#[derive(Debug, Clone)]
pub struct RescheduleSessionCommand {
    pub session_id: SessionId,
    pub user_id: UserId,
    pub new_scheduled_at: Timestamp,
    /// Keeps the current duration if unset.
    pub new_duration_minutes: Option<u32>,
    pub reason: Option<String>,
}

/// Result of successful rescheduling.
#[derive(Debug, Clone)]
pub struct RescheduleSessionResult {
    /// The retired session, now `rescheduled`.
    pub previous: Session,
    /// The successor session.
    pub session: Session,
    /// The retired room, now `cancelled`.
    pub previous_live_session: Option<LiveSession>,
    /// The successor's room.
    pub live_session: Option<LiveSession>,
}

/// Handler for rescheduling sessions.
pub struct RescheduleSessionHandler {
    store: Arc<dyn SchedulingStore>,
    clock: Arc<dyn Clock>,
}

impl RescheduleSessionHandler {
    pub fn new(store: Arc<dyn SchedulingStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    pub async fn handle(
        &self,
        cmd: RescheduleSessionCommand,
    ) -> Result<RescheduleSessionResult, SchedulingError> {
        let now = self.clock.now();

        // 1. New start must be strictly in the future
        if !cmd.new_scheduled_at.is_after(&now) {
            return Err(SchedulingError::invalid_schedule(
                "Sessions must be rescheduled into the future",
            ));
        }

        // 2. Load and authorize
        let mut previous = load_session(self.store.as_ref(), &cmd.session_id).await?;
        previous.authorize_organizer(&cmd.user_id)?;
        if !previous.status().can_transition_to(&SessionStatus::Rescheduled) {
            return Err(SchedulingError::invalid_transition(
                "session",
                previous.status().to_string(),
                SessionStatus::Rescheduled.to_string(),
            ));
        }

        let mut previous_live = load_linked_live_session(self.store.as_ref(), &previous).await?;
        if let Some(live) = &previous_live {
            if matches!(
                live.status(),
                LiveSessionStatus::Active | LiveSessionStatus::Ended
            ) {
                return Err(SchedulingError::invalid_transition(
                    "live_session",
                    live.status().to_string(),
                    LiveSessionStatus::Cancelled.to_string(),
                ));
            }
        }

        // 3. Build the successor pair
        let mut session = previous.successor(cmd.new_scheduled_at, cmd.new_duration_minutes, now)?;
        let mut live_session = match &previous_live {
            Some(live) => {
                let next = live.successor_for(&session, now)?;
                session.attach_live_session(*next.id())?;
                Some(next)
            }
            None => None,
        };

        // 4. Retire the old pair
        previous.mark_rescheduled(*session.id(), cmd.reason, now)?;
        let mut batch = WriteBatch::new()
            .update_session(previous.clone())
            .insert_session(session.clone());

        let mut retired_room = false;
        if let Some(live) = previous_live.as_mut() {
            if live.status().is_open() {
                live.cancel(now)?;
                batch = batch.update_live_session(live.clone());
                retired_room = true;
            }
        }
        if let Some(next) = &live_session {
            batch = batch.insert_live_session(next.clone());
        }

        // 5. Persist everything or nothing
        self.store.commit(batch).await?;
        previous.bump_version();
        session.bump_version();
        if let Some(next) = live_session.as_mut() {
            next.bump_version();
        }
        if retired_room {
            if let Some(live) = previous_live.as_mut() {
                live.bump_version();
            }
        }

        info!(
            previous_session_id = %previous.id(),
            session_id = %session.id(),
            scheduled_at = %session.scheduled_at(),
            "session rescheduled"
        );

        Ok(RescheduleSessionResult {
            previous,
            session,
            previous_live_session: previous_live,
            live_session,
        })
    }
}
