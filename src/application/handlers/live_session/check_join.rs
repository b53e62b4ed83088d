//! CheckJoinHandler - Query handler answering "can I enter the room now?".

use std::sync::Arc;

use crate::domain::foundation::{SessionId, UserId};
use crate::domain::live_session::{evaluate_join, JoinEligibility, JoinPolicy};
use crate::domain::scheduling::SchedulingError;
use crate::ports::{Clock, SchedulingStore};

use crate::application::handlers::loading::{load_linked_live_session, load_session};

/// Query for the caller's join eligibility on a session's room.
#[derive(Debug, Clone)]
pub struct CheckJoinQuery {
    pub session_id: SessionId,
    pub user_id: UserId,
}

/// Handler evaluating the join window. Never writes.
pub struct CheckJoinHandler {
    store: Arc<dyn SchedulingStore>,
    clock: Arc<dyn Clock>,
    policy: JoinPolicy,
}

impl CheckJoinHandler {
    pub fn new(store: Arc<dyn SchedulingStore>, clock: Arc<dyn Clock>, policy: JoinPolicy) -> Self {
        Self {
            store,
            clock,
            policy,
        }
    }

    pub async fn handle(&self, query: CheckJoinQuery) -> Result<JoinEligibility, SchedulingError> {
        let session = load_session(self.store.as_ref(), &query.session_id).await?;

        // Membership is checked before anything about the room
        session.authorize_member(&query.user_id)?;

        let live = load_linked_live_session(self.store.as_ref(), &session)
            .await?
            .ok_or_else(|| {
                SchedulingError::validation("live_session_id", "Session has no live room")
            })?;

        Ok(evaluate_join(
            &session,
            &live,
            &query.user_id,
            self.clock.now(),
            &self.policy,
        )?)
    }
}
