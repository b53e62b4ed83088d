//! ScheduleSessionHandler - Command handler for booking a new session.

use std::sync::Arc;

use tracing::info;

use crate::domain::foundation::{Timestamp, UserId};
use crate::domain::live_session::{LiveSession, LiveSessionSettings};
use crate::domain::scheduling::{SchedulingError, Session, SessionDraft, SessionKind};
use crate::ports::{Clock, SchedulingStore, WriteBatch};

/// Command to schedule a session.
#[derive(Debug, Clone)]
pub struct ScheduleSessionCommand {
    pub organizer_id: UserId,
    pub kind: SessionKind,
    pub title: String,
    pub description: Option<String>,
    pub participant_ids: Vec<UserId>,
    pub scheduled_at: Timestamp,
    pub duration_minutes: u32,
    /// Room settings for video interviews; the handler default applies if unset.
    pub live_settings: Option<LiveSessionSettings>,
}

/// Result of successful scheduling.
#[derive(Debug, Clone)]
pub struct ScheduleSessionResult {
    pub session: Session,
    /// Present for video interviews.
    pub live_session: Option<LiveSession>,
}

/// Handler for scheduling sessions.
///
/// A video interview gets its live room in the same commit.
pub struct ScheduleSessionHandler {
    store: Arc<dyn SchedulingStore>,
    clock: Arc<dyn Clock>,
    default_settings: LiveSessionSettings,
}

impl ScheduleSessionHandler {
    pub fn new(
        store: Arc<dyn SchedulingStore>,
        clock: Arc<dyn Clock>,
        default_settings: LiveSessionSettings,
    ) -> Self {
        Self {
            store,
            clock,
            default_settings,
        }
    }

    pub async fn handle(
        &self,
        cmd: ScheduleSessionCommand,
    ) -> Result<ScheduleSessionResult, SchedulingError> {
        let now = self.clock.now();

        // 1. Build session (validates schedule, title, participants)
        let mut session = Session::schedule(
            SessionDraft {
                kind: cmd.kind,
                title: cmd.title,
                description: cmd.description,
                organizer_id: cmd.organizer_id,
                participant_ids: cmd.participant_ids,
                scheduled_at: cmd.scheduled_at,
                duration_minutes: cmd.duration_minutes,
            },
            now,
        )?;

        // 2. Create the room for video interviews
        let mut live_session = if session.kind().requires_live_session() {
            let settings = cmd.live_settings.unwrap_or(self.default_settings);
            let live = LiveSession::for_session(&session, settings, now)?;
            session.attach_live_session(*live.id())?;
            Some(live)
        } else {
            None
        };

        // 3. Persist together
        let mut batch = WriteBatch::new().insert_session(session.clone());
        if let Some(live) = &live_session {
            batch = batch.insert_live_session(live.clone());
        }
        self.store.commit(batch).await?;
        session.bump_version();
        if let Some(live) = live_session.as_mut() {
            live.bump_version();
        }

        info!(
            session_id = %session.id(),
            kind = %session.kind(),
            scheduled_at = %session.scheduled_at(),
            "session scheduled"
        );

        Ok(ScheduleSessionResult {
            session,
            live_session,
        })
    }
}
