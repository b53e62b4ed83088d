//! RespondToSessionHandler - Command handler for participant answers.

use std::sync::Arc;

use tracing::debug;

use crate::domain::foundation::{SessionId, UserId};
use crate::domain::scheduling::{ResponseStatus, SchedulingError, Session};
use crate::ports::{Clock, SchedulingStore, WriteBatch};

use crate::application::handlers::loading::load_session;

/// Command to accept, decline or tentatively accept an invitation.
#[derive(Debug, Clone)]
pub struct RespondToSessionCommand {
    pub session_id: SessionId,
    pub user_id: UserId,
    pub response: ResponseStatus,
}

/// Handler for participant responses.
pub struct RespondToSessionHandler {
    store: Arc<dyn SchedulingStore>,
    clock: Arc<dyn Clock>,
}

impl RespondToSessionHandler {
    pub fn new(store: Arc<dyn SchedulingStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    pub async fn handle(&self, cmd: RespondToSessionCommand) -> Result<Session, SchedulingError> {
        let mut session = load_session(self.store.as_ref(), &cmd.session_id).await?;

        session.respond(&cmd.user_id, cmd.response, self.clock.now())?;

        self.store
            .commit(WriteBatch::new().update_session(session.clone()))
            .await?;
        session.bump_version();

        debug!(
            session_id = %cmd.session_id,
            user_id = %cmd.user_id,
            response = %cmd.response,
            "participant responded"
        );
        Ok(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{candidate, organizer, Fixture};
    use crate::domain::scheduling::{SessionKind, SessionStatus};

    #[tokio::test]
    async fn records_answer_without_changing_status() {
        let fx = Fixture::new();
        let scheduled = fx.schedule(SessionKind::VideoInterview, 60).await;
        let handler = RespondToSessionHandler::new(fx.store.clone(), fx.clock.clone());

        let session = handler
            .handle(RespondToSessionCommand {
                session_id: *scheduled.session.id(),
                user_id: candidate(),
                response: ResponseStatus::Declined,
            })
            .await
            .unwrap();

        assert_eq!(session.status(), SessionStatus::Scheduled);
        assert_eq!(
            session.participant(&candidate()).unwrap().response_status,
            ResponseStatus::Declined
        );
    }

    #[tokio::test]
    async fn organizer_cannot_respond() {
        let fx = Fixture::new();
        let scheduled = fx.schedule(SessionKind::VideoInterview, 60).await;
        let handler = RespondToSessionHandler::new(fx.store.clone(), fx.clock.clone());

        let err = handler
            .handle(RespondToSessionCommand {
                session_id: *scheduled.session.id(),
                user_id: organizer(),
                response: ResponseStatus::Accepted,
            })
            .await
            .unwrap_err();
        assert_eq!(err, SchedulingError::NotAuthorized);
    }

    #[tokio::test]
    async fn missing_session_is_not_found() {
        let fx = Fixture::new();
        let handler = RespondToSessionHandler::new(fx.store.clone(), fx.clock.clone());
        let err = handler
            .handle(RespondToSessionCommand {
                session_id: SessionId::new(),
                user_id: candidate(),
                response: ResponseStatus::Accepted,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, SchedulingError::NotFound { entity: "session", .. }));
    }
}
