//! GetSessionHandler - Query handler for a session and its room.

use std::sync::Arc;

use crate::domain::foundation::{SessionId, UserId};
use crate::domain::live_session::{evaluate_join, JoinEligibility, JoinPolicy, LiveSession};
use crate::domain::scheduling::{SchedulingError, Session};
use crate::ports::{Clock, SchedulingStore};

use crate::application::handlers::loading::{load_linked_live_session, load_session};

/// Query to get a session by ID.
#[derive(Debug, Clone)]
pub struct GetSessionQuery {
    pub session_id: SessionId,
    pub user_id: UserId,
}

/// A session as seen by one of its members.
#[derive(Debug, Clone)]
pub struct SessionView {
    pub session: Session,
    pub live_session: Option<LiveSession>,
    /// Whether the caller may enter the room right now.
    pub join: Option<JoinEligibility>,
}

/// Handler for retrieving session details.
pub struct GetSessionHandler {
    store: Arc<dyn SchedulingStore>,
    clock: Arc<dyn Clock>,
    policy: JoinPolicy,
}

impl GetSessionHandler {
    pub fn new(store: Arc<dyn SchedulingStore>, clock: Arc<dyn Clock>, policy: JoinPolicy) -> Self {
        Self {
            store,
            clock,
            policy,
        }
    }

    pub async fn handle(&self, query: GetSessionQuery) -> Result<SessionView, SchedulingError> {
        let session = load_session(self.store.as_ref(), &query.session_id).await?;

        // Only organizer and participants may read
        session.authorize_member(&query.user_id)?;

        let live_session = load_linked_live_session(self.store.as_ref(), &session).await?;
        let join = match &live_session {
            Some(live) => Some(evaluate_join(
                &session,
                live,
                &query.user_id,
                self.clock.now(),
                &self.policy,
            )?),
            None => None,
        };

        Ok(SessionView {
            session,
            live_session,
            join,
        })
    }
}
