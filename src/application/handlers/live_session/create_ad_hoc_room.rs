//! CreateAdHocRoomHandler - Open a room that is not tied to a booking.

use std::sync::Arc;

use tracing::info;

use crate::domain::foundation::UserId;
use crate::domain::live_session::{LiveSession, LiveSessionSettings};
use crate::domain::scheduling::SchedulingError;
use crate::ports::{Clock, SchedulingStore, WriteBatch};

#[derive(Debug, Clone)]
pub struct CreateAdHocRoomCommand {
    pub host_id: UserId,
    pub participant_ids: Vec<UserId>,
    pub settings: Option<LiveSessionSettings>,
}

/// Creates an unscheduled room; members may join immediately.
pub struct CreateAdHocRoomHandler {
    store: Arc<dyn SchedulingStore>,
    clock: Arc<dyn Clock>,
    default_settings: LiveSessionSettings,
}

impl CreateAdHocRoomHandler {
    pub fn new(
        store: Arc<dyn SchedulingStore>,
        clock: Arc<dyn Clock>,
        default_settings: LiveSessionSettings,
    ) -> Self {
        Self {
            store,
            clock,
            default_settings,
        }
    }

    pub async fn handle(
        &self,
        cmd: CreateAdHocRoomCommand,
    ) -> Result<LiveSession, SchedulingError> {
        let mut live = LiveSession::ad_hoc(
            cmd.host_id,
            cmd.participant_ids,
            cmd.settings.unwrap_or(self.default_settings),
            self.clock.now(),
        )?;

        self.store
            .commit(WriteBatch::new().insert_live_session(live.clone()))
            .await?;
        live.bump_version();

        info!(live_session_id = %live.id(), room = %live.meeting_path(), "ad hoc room created");
        Ok(live)
    }
}
