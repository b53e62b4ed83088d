//! StartLiveSessionHandler - Host starts the call.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::foundation::{LiveSessionId, UserId};
use crate::domain::live_session::LiveSession;
use crate::domain::scheduling::{SchedulingError, Session, SessionStatus};
use crate::ports::{Clock, SchedulingStore, WriteBatch};

use crate::application::handlers::loading::{load_live_session, load_owning_session};

/// Command to start a live room.
#[derive(Debug, Clone)]
pub struct StartLiveSessionCommand {
    pub live_session_id: LiveSessionId,
    pub user_id: UserId,
}

/// Result of starting a room.
#[derive(Debug, Clone)]
pub struct StartLiveSessionResult {
    pub live_session: LiveSession,
    /// The owning session, now `in_progress`.
    pub session: Option<Session>,
}

/// Handler for starting rooms.
///
/// A room that belongs to a session only opens once that session is
/// confirmed; both move together in one batch.
pub struct StartLiveSessionHandler {
    store: Arc<dyn SchedulingStore>,
    clock: Arc<dyn Clock>,
}

impl StartLiveSessionHandler {
    pub fn new(store: Arc<dyn SchedulingStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    pub async fn handle(
        &self,
        cmd: StartLiveSessionCommand,
    ) -> Result<StartLiveSessionResult, SchedulingError> {
        let now = self.clock.now();

        let mut live = load_live_session(self.store.as_ref(), &cmd.live_session_id).await?;
        live.authorize_host(&cmd.user_id)?;
        let mut session = load_owning_session(self.store.as_ref(), &live).await?;

        live.start(now)?;
        let mut batch = WriteBatch::new().update_live_session(live.clone());

        let mut session_begun = false;
        if let Some(s) = session.as_mut() {
            if s.status() != SessionStatus::Confirmed {
                warn!(
                    session_id = %s.id(),
                    status = %s.status(),
                    "refusing to start room of unconfirmed session"
                );
                return Err(SchedulingError::invalid_transition(
                    "session",
                    s.status().to_string(),
                    SessionStatus::InProgress.to_string(),
                ));
            }
            s.begin(now)?;
            batch = batch.update_session(s.clone());
            session_begun = true;
        }

        self.store.commit(batch).await?;
        live.bump_version();
        if session_begun {
            if let Some(s) = session.as_mut() {
                s.bump_version();
            }
        }

        info!(live_session_id = %cmd.live_session_id, session_begun, "live session started");
        Ok(StartLiveSessionResult {
            live_session: live,
            session,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::scheduling::{ConfirmSessionCommand, ConfirmSessionHandler};
    use crate::application::handlers::test_support::{candidate, organizer, Fixture};
    use crate::domain::live_session::LiveSessionStatus;
    use crate::domain::scheduling::SessionKind;

    #[tokio::test]
    async fn starting_moves_confirmed_session_in_progress() {
        let fx = Fixture::new();
        let scheduled = fx.schedule(SessionKind::VideoInterview, 5).await;
        ConfirmSessionHandler::new(fx.store.clone(), fx.clock.clone())
            .handle(ConfirmSessionCommand {
                session_id: *scheduled.session.id(),
                user_id: organizer(),
            })
            .await
            .unwrap();

        let result = StartLiveSessionHandler::new(fx.store.clone(), fx.clock.clone())
            .handle(StartLiveSessionCommand {
                live_session_id: *scheduled.live_session.unwrap().id(),
                user_id: organizer(),
            })
            .await
            .unwrap();

        assert_eq!(result.live_session.status(), LiveSessionStatus::Active);
        assert!(result.live_session.started_at().is_some());
        assert_eq!(result.session.unwrap().status(), SessionStatus::InProgress);
    }

    #[tokio::test]
    async fn unconfirmed_session_refuses_to_start() {
        let fx = Fixture::new();
        let scheduled = fx.schedule(SessionKind::VideoInterview, 5).await;
        let live_id = *scheduled.live_session.unwrap().id();
        let err = StartLiveSessionHandler::new(fx.store.clone(), fx.clock.clone())
            .handle(StartLiveSessionCommand {
                live_session_id: live_id,
                user_id: organizer(),
            })
            .await
            .unwrap_err();
        assert_eq!(
            err,
            SchedulingError::invalid_transition("session", "scheduled", "in_progress")
        );

        // Nothing was written.
        let live = fx.store.load_live_session(&live_id).await.unwrap().unwrap();
        assert_eq!(live.status(), LiveSessionStatus::Scheduled);
        assert!(live.started_at().is_none());
        let session = fx.store.load_session(scheduled.session.id()).await.unwrap().unwrap();
        assert_eq!(session.status(), SessionStatus::Scheduled);
    }

    #[tokio::test]
    async fn only_host_may_start() {
        let fx = Fixture::new();
        let scheduled = fx.schedule(SessionKind::VideoInterview, 5).await;
        let err = StartLiveSessionHandler::new(fx.store.clone(), fx.clock.clone())
            .handle(StartLiveSessionCommand {
                live_session_id: *scheduled.live_session.unwrap().id(),
                user_id: candidate(),
            })
            .await
            .unwrap_err();
        assert_eq!(err, SchedulingError::NotAuthorized);
    }

    #[tokio::test]
    async fn starting_twice_names_both_states() {
        let fx = Fixture::new();
        let scheduled = fx.schedule(SessionKind::VideoInterview, 5).await;
        ConfirmSessionHandler::new(fx.store.clone(), fx.clock.clone())
            .handle(ConfirmSessionCommand {
                session_id: *scheduled.session.id(),
                user_id: organizer(),
            })
            .await
            .unwrap();
        let handler = StartLiveSessionHandler::new(fx.store.clone(), fx.clock.clone());
        let cmd = StartLiveSessionCommand {
            live_session_id: *scheduled.live_session.unwrap().id(),
            user_id: organizer(),
        };
        handler.handle(cmd.clone()).await.unwrap();
        let err = handler.handle(cmd).await.unwrap_err();
        assert_eq!(
            err,
            SchedulingError::invalid_transition("live_session", "active", "active")
        );
    }
}
