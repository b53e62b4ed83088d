//! Aggregate lookups shared by the command and query handlers.

use crate::domain::foundation::{LiveSessionId, SessionId};
use crate::domain::live_session::LiveSession;
use crate::domain::scheduling::{SchedulingError, Session};
use crate::ports::SchedulingStore;

pub(crate) async fn load_session(
    store: &dyn SchedulingStore,
    id: &SessionId,
) -> Result<Session, SchedulingError> {
    store
        .load_session(id)
        .await?
        .ok_or_else(|| SchedulingError::session_not_found(*id))
}

pub(crate) async fn load_live_session(
    store: &dyn SchedulingStore,
    id: &LiveSessionId,
) -> Result<LiveSession, SchedulingError> {
    store
        .load_live_session(id)
        .await?
        .ok_or_else(|| SchedulingError::live_session_not_found(*id))
}

/// The room a session links to, if any. A dangling link is `NotFound`.
pub(crate) async fn load_linked_live_session(
    store: &dyn SchedulingStore,
    session: &Session,
) -> Result<Option<LiveSession>, SchedulingError> {
    match session.live_session_id() {
        Some(id) => load_live_session(store, id).await.map(Some),
        None => Ok(None),
    }
}

/// The session owning a room, if the room is not ad hoc.
pub(crate) async fn load_owning_session(
    store: &dyn SchedulingStore,
    live: &LiveSession,
) -> Result<Option<Session>, SchedulingError> {
    match live.session_id() {
        Some(id) => load_session(store, id).await.map(Some),
        None => Ok(None),
    }
}
