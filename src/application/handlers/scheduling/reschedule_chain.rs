//! RescheduleChainHandler - Query handler for a session's history.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::error;

use crate::domain::foundation::{SessionId, UserId};
use crate::domain::scheduling::{SchedulingError, Session};
use crate::ports::SchedulingStore;

use crate::application::handlers::loading::load_session;

/// Query for every session that led up to `session_id`.
#[derive(Debug, Clone)]
pub struct RescheduleChainQuery {
    pub session_id: SessionId,
    pub user_id: UserId,
}

/// Walks `previous_session_id` links back to the original booking.
///
/// Returns the chain oldest first, ending with the requested session.
pub struct RescheduleChainHandler {
    store: Arc<dyn SchedulingStore>,
}

impl RescheduleChainHandler {
    pub fn new(store: Arc<dyn SchedulingStore>) -> Self {
        Self { store }
    }

    pub async fn handle(
        &self,
        query: RescheduleChainQuery,
    ) -> Result<Vec<Session>, SchedulingError> {
        let head = load_session(self.store.as_ref(), &query.session_id).await?;
        head.authorize_member(&query.user_id)?;

        let mut seen = HashSet::from([*head.id()]);
        let mut previous_id = head.previous_session_id().copied();
        let mut chain = vec![head];

        while let Some(id) = previous_id {
            if !seen.insert(id) {
                error!(session_id = %query.session_id, repeated = %id, "reschedule chain loops");
                return Err(SchedulingError::infrastructure(format!(
                    "Reschedule chain revisits session {}",
                    id
                )));
            }
            let session = load_session(self.store.as_ref(), &id).await?;
            previous_id = session.previous_session_id().copied();
            chain.push(session);
        }

        chain.reverse();
        Ok(chain)
    }
}
