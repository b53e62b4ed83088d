//! CancelSessionHandler - Command handler for cancelling a session.
//!
//! Cancels the session and, if its live room is still open, the room too.
//! Both writes go out in one batch so no reader sees a cancelled session
//! with a joinable room.

use std::sync::Arc;

use tracing::info;

use crate::domain::foundation::{SessionId, UserId};
use crate::domain::live_session::LiveSession;
use crate::domain::scheduling::{SchedulingError, Session};
use crate::ports::{Clock, SchedulingStore, WriteBatch};

use crate::application::handlers::loading::{load_linked_live_session, load_session};

/// Command to cancel a session.
#[derive(Debug, Clone)]
pub struct CancelSessionCommand {
    pub session_id: SessionId,
    pub user_id: UserId,
    pub reason: Option<String>,
}

/// Result of successful cancellation.
#[derive(Debug, Clone)]
pub struct CancelSessionResult {
    pub session: Session,
    pub live_session: Option<LiveSession>,
}

/// Handler for cancelling sessions.
pub struct CancelSessionHandler {
    store: Arc<dyn SchedulingStore>,
    clock: Arc<dyn Clock>,
}

impl CancelSessionHandler {
    pub fn new(store: Arc<dyn SchedulingStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    pub async fn handle(
        &self,
        cmd: CancelSessionCommand,
    ) -> Result<CancelSessionResult, SchedulingError> {
        let now = self.clock.now();

        // 1. Load both aggregates
        let mut session = load_session(self.store.as_ref(), &cmd.session_id).await?;
        let mut live_session = load_linked_live_session(self.store.as_ref(), &session).await?;

        // 2. Cancel the session (authorizes organizer)
        session.cancel(&cmd.user_id, cmd.reason, now)?;

        // 3. Cascade to an open room
        let mut batch = WriteBatch::new().update_session(session.clone());
        let mut room_cancelled = false;
        if let Some(live) = live_session.as_mut() {
            if live.status().is_open() {
                live.cancel(now)?;
                batch = batch.update_live_session(live.clone());
                room_cancelled = true;
            }
        }

        // 4. Persist atomically
        self.store.commit(batch).await?;
        session.bump_version();
        if room_cancelled {
            if let Some(live) = live_session.as_mut() {
                live.bump_version();
            }
        }

        info!(
            session_id = %cmd.session_id,
            room_cancelled,
            "session cancelled"
        );

        Ok(CancelSessionResult {
            session,
            live_session,
        })
    }
}
