//! EndLiveSessionHandler - Host ends the call.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::foundation::{LiveSessionId, UserId};
use crate::domain::live_session::LiveSession;
use crate::domain::scheduling::{SchedulingError, Session, SessionStatus};
use crate::ports::{Clock, SchedulingStore, WriteBatch};

use crate::application::handlers::loading::{load_live_session, load_owning_session};

/// Command to end a live room.
#[derive(Debug, Clone)]
pub struct EndLiveSessionCommand {
    pub live_session_id: LiveSessionId,
    pub user_id: UserId,
}

/// Result of ending a room.
#[derive(Debug, Clone)]
pub struct EndLiveSessionResult {
    pub live_session: LiveSession,
    /// The owning session, now `completed`.
    pub session: Option<Session>,
}

/// Handler for ending rooms. Room and session are written together.
///
/// The room of a session can only end while that session is in progress,
/// so a finished call never leaves its session upcoming.
pub struct EndLiveSessionHandler {
    store: Arc<dyn SchedulingStore>,
    clock: Arc<dyn Clock>,
}

impl EndLiveSessionHandler {
    pub fn new(store: Arc<dyn SchedulingStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    pub async fn handle(
        &self,
        cmd: EndLiveSessionCommand,
    ) -> Result<EndLiveSessionResult, SchedulingError> {
        let now = self.clock.now();

        let mut live = load_live_session(self.store.as_ref(), &cmd.live_session_id).await?;
        live.authorize_host(&cmd.user_id)?;
        let mut session = load_owning_session(self.store.as_ref(), &live).await?;

        live.end(now)?;
        let mut batch = WriteBatch::new().update_live_session(live.clone());

        let mut session_completed = false;
        if let Some(s) = session.as_mut() {
            if s.status() != SessionStatus::InProgress {
                warn!(
                    session_id = %s.id(),
                    status = %s.status(),
                    "refusing to end room of session that is not in progress"
                );
                return Err(SchedulingError::invalid_transition(
                    "session",
                    s.status().to_string(),
                    SessionStatus::Completed.to_string(),
                ));
            }
            s.complete(now)?;
            batch = batch.update_session(s.clone());
            session_completed = true;
        }

        self.store.commit(batch).await?;
        live.bump_version();
        if session_completed {
            if let Some(s) = session.as_mut() {
                s.bump_version();
            }
        }

        info!(
            live_session_id = %cmd.live_session_id,
            duration_seconds = live.duration_seconds().unwrap_or(0),
            session_completed,
            "live session ended"
        );
        Ok(EndLiveSessionResult {
            live_session: live,
            session,
        })
    }
}
