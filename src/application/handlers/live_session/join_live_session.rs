//! JoinLiveSessionHandler - A member enters the room.

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::foundation::{LiveSessionId, UserId};
use crate::domain::live_session::{
    evaluate_join, evaluate_room_join, JoinEligibility, JoinPolicy, LiveSession, LiveSessionStatus,
};
use crate::domain::scheduling::SchedulingError;
use crate::ports::{Clock, SchedulingStore, WriteBatch};

use crate::application::handlers::loading::{load_live_session, load_owning_session};

/// Command to enter a live room.
#[derive(Debug, Clone)]
pub struct JoinLiveSessionCommand {
    pub live_session_id: LiveSessionId,
    pub user_id: UserId,
}

/// Outcome of a join attempt.
///
/// An ineligible caller gets the eligibility back with `joined = false` and
/// nothing is written.
#[derive(Debug, Clone)]
pub struct JoinLiveSessionResult {
    pub live_session: LiveSession,
    pub eligibility: JoinEligibility,
    pub joined: bool,
}

/// Handler for joining rooms.
pub struct JoinLiveSessionHandler {
    store: Arc<dyn SchedulingStore>,
    clock: Arc<dyn Clock>,
    policy: JoinPolicy,
}

impl JoinLiveSessionHandler {
    pub fn new(store: Arc<dyn SchedulingStore>, clock: Arc<dyn Clock>, policy: JoinPolicy) -> Self {
        Self {
            store,
            clock,
            policy,
        }
    }

    pub async fn handle(
        &self,
        cmd: JoinLiveSessionCommand,
    ) -> Result<JoinLiveSessionResult, SchedulingError> {
        let now = self.clock.now();

        let mut live = load_live_session(self.store.as_ref(), &cmd.live_session_id).await?;
        let eligibility = match load_owning_session(self.store.as_ref(), &live).await? {
            Some(session) => evaluate_join(&session, &live, &cmd.user_id, now, &self.policy)?,
            None => evaluate_room_join(&live, &cmd.user_id, now, &self.policy)?,
        };

        if !eligibility.eligible {
            debug!(
                live_session_id = %cmd.live_session_id,
                user_id = %cmd.user_id,
                phase = ?eligibility.phase,
                "join refused"
            );
            return Ok(JoinLiveSessionResult {
                live_session: live,
                eligibility,
                joined: false,
            });
        }

        if live.status() == LiveSessionStatus::Scheduled {
            live.open_waiting_room(now)?;
        }
        live.record_join(&cmd.user_id, now)?;

        self.store
            .commit(WriteBatch::new().update_live_session(live.clone()))
            .await?;
        live.bump_version();

        info!(
            live_session_id = %cmd.live_session_id,
            user_id = %cmd.user_id,
            "member joined room"
        );
        Ok(JoinLiveSessionResult {
            live_session: live,
            eligibility,
            joined: true,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{candidate, organizer, stranger, Fixture};
    use crate::domain::live_session::JoinPhase;
    use crate::domain::scheduling::SessionKind;

    fn handler(fx: &Fixture) -> JoinLiveSessionHandler {
        JoinLiveSessionHandler::new(fx.store.clone(), fx.clock.clone(), JoinPolicy::default())
    }

    #[tokio::test]
    async fn first_join_opens_waiting_room() {
        let fx = Fixture::new();
        let scheduled = fx.schedule(SessionKind::VideoInterview, 5).await;
        let result = handler(&fx)
            .handle(JoinLiveSessionCommand {
                live_session_id: *scheduled.live_session.unwrap().id(),
                user_id: candidate(),
            })
            .await
            .unwrap();

        assert!(result.joined);
        assert_eq!(result.live_session.status(), LiveSessionStatus::Waiting);
        let entry = result.live_session.participant(&candidate()).unwrap();
        assert!(entry.is_present());
    }

    #[tokio::test]
    async fn early_join_is_refused_without_writing() {
        let fx = Fixture::new();
        let scheduled = fx.schedule(SessionKind::VideoInterview, 60).await;
        let commits_before = fx.store.commit_count();

        let result = handler(&fx)
            .handle(JoinLiveSessionCommand {
                live_session_id: *scheduled.live_session.unwrap().id(),
                user_id: organizer(),
            })
            .await
            .unwrap();

        assert!(!result.joined);
        assert_eq!(result.eligibility.phase, JoinPhase::Waiting);
        assert_eq!(result.live_session.status(), LiveSessionStatus::Scheduled);
        assert_eq!(fx.store.commit_count(), commits_before);
    }

    #[tokio::test]
    async fn stranger_is_rejected() {
        let fx = Fixture::new();
        let scheduled = fx.schedule(SessionKind::VideoInterview, 5).await;
        let err = handler(&fx)
            .handle(JoinLiveSessionCommand {
                live_session_id: *scheduled.live_session.unwrap().id(),
                user_id: stranger(),
            })
            .await
            .unwrap_err();
        assert_eq!(err, SchedulingError::NotAuthorized);
    }

    #[tokio::test]
    async fn rejoin_keeps_first_join_time() {
        let fx = Fixture::new();
        let scheduled = fx.schedule(SessionKind::VideoInterview, 5).await;
        let cmd = JoinLiveSessionCommand {
            live_session_id: *scheduled.live_session.unwrap().id(),
            user_id: candidate(),
        };
        let first = handler(&fx).handle(cmd.clone()).await.unwrap();
        let first_join = first.live_session.participant(&candidate()).unwrap().joined_at;

        fx.clock.advance_minutes(2);
        let second = handler(&fx).handle(cmd).await.unwrap();
        assert_eq!(
            second.live_session.participant(&candidate()).unwrap().joined_at,
            first_join
        );
    }
}
