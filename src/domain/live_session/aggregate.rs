//! LiveSession aggregate entity.
//!
//! The real-time room bound to a video-interview session. The room knows its
//! owning session only by id; the session knows the room only by id.

use crate::domain::foundation::{
    DomainError, ErrorCode, LiveSessionId, RoomId, SessionId, StateMachine, Timestamp, UserId,
};
use crate::domain::scheduling::Session;
use serde::{Deserialize, Serialize};

use super::{LiveParticipant, LiveRole, LiveSessionSettings, LiveSessionStatus};

/// LiveSession aggregate.
///
/// # Invariants
///
/// - members include the owning session's organizer as host and every
///   session participant as participant
/// - members are never removed
/// - `duration_seconds == ended_at - started_at`, set once on end
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiveSession {
    id: LiveSessionId,
    room_id: RoomId,
    session_id: Option<SessionId>,
    host_id: UserId,
    participants: Vec<LiveParticipant>,
    status: LiveSessionStatus,
    scheduled_at: Option<Timestamp>,
    started_at: Option<Timestamp>,
    ended_at: Option<Timestamp>,
    duration_seconds: Option<i64>,
    settings: LiveSessionSettings,
    created_at: Timestamp,
    updated_at: Timestamp,
    version: u64,
}

impl LiveSession {
    /// Create the room for a video-interview session.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` for invalid settings, a session kind without a
    ///   live room, or more members than the room holds
    pub fn for_session(
        session: &Session,
        settings: LiveSessionSettings,
        now: Timestamp,
    ) -> Result<Self, DomainError> {
        if !session.kind().requires_live_session() {
            return Err(DomainError::validation(
                "kind",
                format!("A {} session has no live room", session.kind()),
            ));
        }

        let participants = std::iter::once(LiveParticipant::new(
            session.organizer_id().clone(),
            LiveRole::Host,
        ))
        .chain(
            session
                .participants()
                .iter()
                .map(|p| LiveParticipant::new(p.user_id.clone(), LiveRole::Participant)),
        )
        .collect();

        Self::build(
            Some(*session.id()),
            session.organizer_id().clone(),
            participants,
            Some(session.scheduled_at()),
            settings,
            now,
        )
    }

    /// Create an unscheduled room that can be joined immediately.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` for invalid settings or too many members
    pub fn ad_hoc(
        host_id: UserId,
        participant_ids: Vec<UserId>,
        settings: LiveSessionSettings,
        now: Timestamp,
    ) -> Result<Self, DomainError> {
        let mut participants = vec![LiveParticipant::new(host_id.clone(), LiveRole::Host)];
        for user_id in participant_ids {
            if !participants.iter().any(|p| p.user_id == user_id) {
                participants.push(LiveParticipant::new(user_id, LiveRole::Participant));
            }
        }
        Self::build(None, host_id, participants, None, settings, now)
    }

    /// Create the replacement room for a rescheduled session.
    ///
    /// Members are copied with roles preserved and join/consent state
    /// cleared; a fresh room id is issued.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if the new room would exceed capacity
    pub fn successor_for(&self, session: &Session, now: Timestamp) -> Result<Self, DomainError> {
        let mut participants: Vec<LiveParticipant> =
            self.participants.iter().map(LiveParticipant::reset).collect();
        for p in session.participants() {
            if !participants.iter().any(|m| m.user_id == p.user_id) {
                participants.push(LiveParticipant::new(p.user_id.clone(), LiveRole::Participant));
            }
        }

        Self::build(
            Some(*session.id()),
            self.host_id.clone(),
            participants,
            Some(session.scheduled_at()),
            self.settings,
            now,
        )
    }

    fn build(
        session_id: Option<SessionId>,
        host_id: UserId,
        participants: Vec<LiveParticipant>,
        scheduled_at: Option<Timestamp>,
        settings: LiveSessionSettings,
        now: Timestamp,
    ) -> Result<Self, DomainError> {
        settings.validate()?;
        if participants.len() > usize::from(settings.max_participants) {
            return Err(DomainError::validation(
                "participants",
                format!(
                    "Room holds {} members, {} invited",
                    settings.max_participants,
                    participants.len()
                ),
            ));
        }

        Ok(Self {
            id: LiveSessionId::new(),
            room_id: RoomId::new(),
            session_id,
            host_id,
            participants,
            status: LiveSessionStatus::Scheduled,
            scheduled_at,
            started_at: None,
            ended_at: None,
            duration_seconds: None,
            settings,
            created_at: now,
            updated_at: now,
            version: 0,
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &LiveSessionId {
        &self.id
    }

    pub fn room_id(&self) -> &RoomId {
        &self.room_id
    }

    pub fn session_id(&self) -> Option<&SessionId> {
        self.session_id.as_ref()
    }

    pub fn host_id(&self) -> &UserId {
        &self.host_id
    }

    pub fn participants(&self) -> &[LiveParticipant] {
        &self.participants
    }

    pub fn participant(&self, user_id: &UserId) -> Option<&LiveParticipant> {
        self.participants.iter().find(|p| &p.user_id == user_id)
    }

    pub fn status(&self) -> LiveSessionStatus {
        self.status
    }

    pub fn scheduled_at(&self) -> Option<Timestamp> {
        self.scheduled_at
    }

    pub fn started_at(&self) -> Option<Timestamp> {
        self.started_at
    }

    pub fn ended_at(&self) -> Option<Timestamp> {
        self.ended_at
    }

    pub fn duration_seconds(&self) -> Option<i64> {
        self.duration_seconds
    }

    pub fn settings(&self) -> &LiveSessionSettings {
        &self.settings
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// Relative link the front end resolves to the room.
    pub fn meeting_path(&self) -> String {
        format!("/video-interview/{}", self.room_id)
    }

    pub fn is_host(&self, user_id: &UserId) -> bool {
        &self.host_id == user_id
    }

    pub fn is_member(&self, user_id: &UserId) -> bool {
        self.participant(user_id).is_some()
    }

    /// # Errors
    ///
    /// - `Forbidden` if user is not the host
    pub fn authorize_host(&self, user_id: &UserId) -> Result<(), DomainError> {
        if self.is_host(user_id) {
            Ok(())
        } else {
            Err(DomainError::new(
                ErrorCode::Forbidden,
                "Only the host can perform this action",
            ))
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Transitions
    // ─────────────────────────────────────────────────────────────────────────

    /// Open the room so members can wait for the host.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` unless scheduled
    pub fn open_waiting_room(&mut self, now: Timestamp) -> Result<(), DomainError> {
        self.transition_to(LiveSessionStatus::Waiting, now)
    }

    /// Start the call.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` unless scheduled or waiting
    pub fn start(&mut self, now: Timestamp) -> Result<(), DomainError> {
        self.transition_to(LiveSessionStatus::Active, now)?;
        self.started_at = Some(now);
        Ok(())
    }

    /// End the call and derive its duration.
    ///
    /// A room ended from `waiting` never started and records zero seconds.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` unless active or waiting
    pub fn end(&mut self, now: Timestamp) -> Result<(), DomainError> {
        self.transition_to(LiveSessionStatus::Ended, now)?;
        self.ended_at = Some(now);
        self.duration_seconds = Some(
            self.started_at
                .map(|started| now.duration_since(&started).num_seconds().max(0))
                .unwrap_or(0),
        );
        Ok(())
    }

    /// # Errors
    ///
    /// - `InvalidStateTransition` unless scheduled, waiting or active
    pub fn cancel(&mut self, now: Timestamp) -> Result<(), DomainError> {
        self.transition_to(LiveSessionStatus::Cancelled, now)
    }

    /// # Errors
    ///
    /// - `InvalidStateTransition` unless scheduled
    pub fn mark_rescheduled(&mut self, now: Timestamp) -> Result<(), DomainError> {
        self.transition_to(LiveSessionStatus::Rescheduled, now)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Membership
    // ─────────────────────────────────────────────────────────────────────────

    /// # Errors
    ///
    /// - `Forbidden` if user is not a member
    /// - `InvalidStateTransition` once the room is closed
    pub fn record_join(&mut self, user_id: &UserId, now: Timestamp) -> Result<(), DomainError> {
        self.ensure_open("join")?;
        self.member_mut(user_id)?.record_join(now);
        self.updated_at = now;
        Ok(())
    }

    /// Returns false if the member was not in the room.
    ///
    /// # Errors
    ///
    /// - `Forbidden` if user is not a member
    pub fn record_leave(&mut self, user_id: &UserId, now: Timestamp) -> Result<bool, DomainError> {
        let left = self.member_mut(user_id)?.record_leave(now);
        if left {
            self.updated_at = now;
        }
        Ok(left)
    }

    /// # Errors
    ///
    /// - `Forbidden` if user is not a member
    /// - `ValidationFailed` if recording is disabled for this room
    /// - `InvalidStateTransition` once the room is closed
    pub fn record_consent(
        &mut self,
        user_id: &UserId,
        consent: bool,
        now: Timestamp,
    ) -> Result<(), DomainError> {
        if !self.settings.recording_enabled {
            return Err(DomainError::validation(
                "recording_consent",
                "Recording is disabled for this room",
            ));
        }
        self.ensure_open("consent")?;
        self.member_mut(user_id)?.record_consent(consent, now);
        self.updated_at = now;
        Ok(())
    }

    /// Every member who agreed to be recorded.
    pub fn all_consented(&self) -> bool {
        self.participants
            .iter()
            .all(|p| p.recording_consent == Some(true))
    }

    /// Advance the optimistic concurrency token.
    ///
    /// Called by persistence adapters when a write is committed.
    pub fn bump_version(&mut self) {
        self.version += 1;
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Private helpers
    // ─────────────────────────────────────────────────────────────────────────

    fn transition_to(
        &mut self,
        target: LiveSessionStatus,
        now: Timestamp,
    ) -> Result<(), DomainError> {
        self.status = self.status.transition_to(target)?;
        self.updated_at = now;
        Ok(())
    }

    fn ensure_open(&self, action: &str) -> Result<(), DomainError> {
        if self.status.is_open() {
            return Ok(());
        }
        Err(DomainError::new(
            ErrorCode::InvalidStateTransition,
            format!("Cannot {} a {} room", action, self.status),
        )
        .with_detail("entity", "live_session")
        .with_detail("current", self.status.to_string())
        .with_detail("requested", action))
    }

    fn member_mut(&mut self, user_id: &UserId) -> Result<&mut LiveParticipant, DomainError> {
        self.participants
            .iter_mut()
            .find(|p| &p.user_id == user_id)
            .ok_or_else(|| {
                DomainError::new(ErrorCode::Forbidden, "User is not a member of this room")
            })
    }
}
