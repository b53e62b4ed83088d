//! ConfirmSessionHandler - Command handler for organizer confirmation.

use std::sync::Arc;

use tracing::info;

use crate::domain::foundation::{SessionId, UserId};
use crate::domain::scheduling::{SchedulingError, Session};
use crate::ports::{Clock, SchedulingStore, WriteBatch};

use crate::application::handlers::loading::load_session;

/// Command to confirm a scheduled session.
#[derive(Debug, Clone)]
pub struct ConfirmSessionCommand {
    pub session_id: SessionId,
    pub user_id: UserId,
}

/// Handler for confirming sessions. Touches the session only.
pub struct ConfirmSessionHandler {
    store: Arc<dyn SchedulingStore>,
    clock: Arc<dyn Clock>,
}

impl ConfirmSessionHandler {
    pub fn new(store: Arc<dyn SchedulingStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    pub async fn handle(&self, cmd: ConfirmSessionCommand) -> Result<Session, SchedulingError> {
        let mut session = load_session(self.store.as_ref(), &cmd.session_id).await?;

        session.confirm(&cmd.user_id, self.clock.now())?;

        self.store
            .commit(WriteBatch::new().update_session(session.clone()))
            .await?;
        session.bump_version();

        info!(session_id = %cmd.session_id, "session confirmed");
        Ok(session)
    }
}
