//! ListUpcomingSessionsHandler - Query handler for a user's agenda.

use std::sync::Arc;

use crate::domain::foundation::UserId;
use crate::domain::scheduling::{SchedulingError, Session, SessionStatus};
use crate::ports::{Clock, SchedulingStore};

/// Query for sessions the user organizes or is invited to.
#[derive(Debug, Clone)]
pub struct ListUpcomingSessionsQuery {
    pub user_id: UserId,
    pub limit: Option<usize>,
}

/// Handler listing scheduled or confirmed sessions that have not started,
/// soonest first.
pub struct ListUpcomingSessionsHandler {
    store: Arc<dyn SchedulingStore>,
    clock: Arc<dyn Clock>,
}

impl ListUpcomingSessionsHandler {
    pub fn new(store: Arc<dyn SchedulingStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    pub async fn handle(
        &self,
        query: ListUpcomingSessionsQuery,
    ) -> Result<Vec<Session>, SchedulingError> {
        let mut sessions = self
            .store
            .find_sessions_for_user(&query.user_id, &SessionStatus::UPCOMING, self.clock.now())
            .await?;

        sessions.sort_by_key(|s| s.scheduled_at());
        if let Some(limit) = query.limit {
            sessions.truncate(limit);
        }
        Ok(sessions)
    }
}
