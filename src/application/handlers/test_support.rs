//! Fixtures shared by handler tests.

use std::sync::Arc;

use crate::adapters::{InMemorySchedulingStore, ManualClock};
use crate::domain::foundation::{Timestamp, UserId};
use crate::domain::live_session::LiveSessionSettings;
use crate::domain::scheduling::{ResponseStatus, SessionKind};

use super::scheduling::{
    RespondToSessionCommand, RespondToSessionHandler, ScheduleSessionCommand,
    ScheduleSessionHandler, ScheduleSessionResult,
};

pub fn start_time() -> Timestamp {
    Timestamp::from_unix_secs(1_700_000_000).unwrap()
}

pub fn organizer() -> UserId {
    UserId::new("recruiter").unwrap()
}

pub fn candidate() -> UserId {
    UserId::new("candidate").unwrap()
}

pub fn stranger() -> UserId {
    UserId::new("stranger").unwrap()
}

pub struct Fixture {
    pub store: Arc<InMemorySchedulingStore>,
    pub clock: Arc<ManualClock>,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            store: Arc::new(InMemorySchedulingStore::new()),
            clock: Arc::new(ManualClock::new(start_time())),
        }
    }

    pub fn schedule_command(
        &self,
        kind: SessionKind,
        starts_in_minutes: i64,
    ) -> ScheduleSessionCommand {
        ScheduleSessionCommand {
            organizer_id: organizer(),
            kind,
            title: "Backend interview".to_string(),
            description: None,
            participant_ids: vec![candidate()],
            scheduled_at: start_time().plus_minutes(starts_in_minutes),
            duration_minutes: 30,
            live_settings: None,
        }
    }

    pub async fn schedule(
        &self,
        kind: SessionKind,
        starts_in_minutes: i64,
    ) -> ScheduleSessionResult {
        ScheduleSessionHandler::new(
            self.store.clone(),
            self.clock.clone(),
            LiveSessionSettings::default(),
        )
        .handle(self.schedule_command(kind, starts_in_minutes))
        .await
        .unwrap()
    }

    /// Schedules a video interview the candidate has accepted.
    pub async fn schedule_accepted_video(&self, starts_in_minutes: i64) -> ScheduleSessionResult {
        let scheduled = self.schedule(SessionKind::VideoInterview, starts_in_minutes).await;
        RespondToSessionHandler::new(self.store.clone(), self.clock.clone())
            .handle(RespondToSessionCommand {
                session_id: *scheduled.session.id(),
                user_id: candidate(),
                response: ResponseStatus::Accepted,
            })
            .await
            .unwrap();
        scheduled
    }
}
