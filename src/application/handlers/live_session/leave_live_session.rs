//! LeaveLiveSessionHandler - A member leaves the room.

use std::sync::Arc;

use tracing::debug;

use crate::domain::foundation::{LiveSessionId, UserId};
use crate::domain::live_session::LiveSession;
use crate::domain::scheduling::SchedulingError;
use crate::ports::{Clock, SchedulingStore, WriteBatch};

use crate::application::handlers::loading::load_live_session;

#[derive(Debug, Clone)]
pub struct LeaveLiveSessionCommand {
    pub live_session_id: LiveSessionId,
    pub user_id: UserId,
}

/// Handler recording `left_at`. Leaving a room one is not in writes nothing.
pub struct LeaveLiveSessionHandler {
    store: Arc<dyn SchedulingStore>,
    clock: Arc<dyn Clock>,
}

impl LeaveLiveSessionHandler {
    pub fn new(store: Arc<dyn SchedulingStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    pub async fn handle(
        &self,
        cmd: LeaveLiveSessionCommand,
    ) -> Result<LiveSession, SchedulingError> {
        let mut live = load_live_session(self.store.as_ref(), &cmd.live_session_id).await?;

        if live.record_leave(&cmd.user_id, self.clock.now())? {
            self.store
                .commit(WriteBatch::new().update_live_session(live.clone()))
                .await?;
            live.bump_version();
            debug!(
                live_session_id = %cmd.live_session_id,
                user_id = %cmd.user_id,
                "member left room"
            );
        }
        Ok(live)
    }
}
