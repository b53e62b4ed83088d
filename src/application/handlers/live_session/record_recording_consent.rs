//! RecordRecordingConsentHandler - A member agrees or refuses to be recorded.

use std::sync::Arc;

use tracing::info;

use crate::domain::foundation::{LiveSessionId, UserId};
use crate::domain::live_session::LiveSession;
use crate::domain::scheduling::SchedulingError;
use crate::ports::{Clock, SchedulingStore, WriteBatch};

use crate::application::handlers::loading::load_live_session;

#[derive(Debug, Clone)]
pub struct RecordRecordingConsentCommand {
    pub live_session_id: LiveSessionId,
    pub user_id: UserId,
    pub consent: bool,
}

pub struct RecordRecordingConsentHandler {
    store: Arc<dyn SchedulingStore>,
    clock: Arc<dyn Clock>,
}

impl RecordRecordingConsentHandler {
    pub fn new(store: Arc<dyn SchedulingStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    pub async fn handle(
        &self,
        cmd: RecordRecordingConsentCommand,
    ) -> Result<LiveSession, SchedulingError> {
        let mut live = load_live_session(self.store.as_ref(), &cmd.live_session_id).await?;

        live.record_consent(&cmd.user_id, cmd.consent, self.clock.now())?;

        self.store
            .commit(WriteBatch::new().update_live_session(live.clone()))
            .await?;
        live.bump_version();

        info!(
            live_session_id = %cmd.live_session_id,
            user_id = %cmd.user_id,
            consent = cmd.consent,
            all_consented = live.all_consented(),
            "recording consent recorded"
        );
        Ok(live)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::scheduling::{ScheduleSessionHandler, ScheduleSessionResult};
    use crate::application::handlers::test_support::{candidate, Fixture};
    use crate::domain::live_session::LiveSessionSettings;
    use crate::domain::scheduling::SessionKind;

    async fn schedule_recorded(fx: &Fixture) -> ScheduleSessionResult {
        let mut cmd = fx.schedule_command(SessionKind::VideoInterview, 60);
        cmd.live_settings = Some(LiveSessionSettings {
            recording_enabled: true,
            ..Default::default()
        });
        ScheduleSessionHandler::new(
            fx.store.clone(),
            fx.clock.clone(),
            LiveSessionSettings::default(),
        )
        .handle(cmd)
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn stores_consent_with_timestamp() {
        let fx = Fixture::new();
        let scheduled = schedule_recorded(&fx).await;
        let live = RecordRecordingConsentHandler::new(fx.store.clone(), fx.clock.clone())
            .handle(RecordRecordingConsentCommand {
                live_session_id: *scheduled.live_session.unwrap().id(),
                user_id: candidate(),
                consent: true,
            })
            .await
            .unwrap();
        let entry = live.participant(&candidate()).unwrap();
        assert_eq!(entry.recording_consent, Some(true));
        assert!(entry.consent_at.is_some());
        assert!(!live.all_consented());
    }

    #[tokio::test]
    async fn rejected_when_recording_disabled() {
        let fx = Fixture::new();
        let scheduled = fx.schedule(SessionKind::VideoInterview, 60).await;
        let err = RecordRecordingConsentHandler::new(fx.store.clone(), fx.clock.clone())
            .handle(RecordRecordingConsentCommand {
                live_session_id: *scheduled.live_session.unwrap().id(),
                user_id: candidate(),
                consent: true,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, SchedulingError::ValidationFailed { .. }));
    }
}
