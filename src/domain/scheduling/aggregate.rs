//! Session aggregate entity.
//!
//! A session is an agreed meeting between an organizer and one or more
//! participants. Video interviews additionally reference a LiveSession
//! aggregate by id.
//!
//! # Ownership
//!
//! Sessions reference their live room and their reschedule neighbours by ID
//! but do NOT own them. Cross-aggregate changes are coordinated by the
//! application layer and committed as one batch.

use crate::domain::foundation::{
    DomainError, ErrorCode, LiveSessionId, SessionId, StateMachine, Timestamp, UserId,
};
use serde::{Deserialize, Serialize};

use super::{Participant, ReminderMarks, ResponseStatus, SessionKind, SessionStatus};

/// Maximum length for session title.
pub const MAX_TITLE_LENGTH: usize = 200;

/// Shortest bookable session.
pub const MIN_DURATION_MINUTES: u32 = 15;

/// Longest bookable session.
pub const MAX_DURATION_MINUTES: u32 = 480;

/// Reason recorded on the origin session when none is supplied.
pub const DEFAULT_RESCHEDULE_REASON: &str = "rescheduled";

/// Input for scheduling a brand-new session.
#[derive(Debug, Clone)]
pub struct SessionDraft {
    pub kind: SessionKind,
    pub title: String,
    pub description: Option<String>,
    pub organizer_id: UserId,
    pub participant_ids: Vec<UserId>,
    pub scheduled_at: Timestamp,
    pub duration_minutes: u32,
}

/// Session aggregate.
///
/// # Invariants
///
/// - `ends_at == scheduled_at + duration_minutes`, recomputed on every change
/// - `duration_minutes` is within 15..=480
/// - participants are unique and never include the organizer
/// - `reminder_marks` only grows
/// - `cancelled`, `rescheduled` and `completed` are terminal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    id: SessionId,
    kind: SessionKind,
    title: String,
    description: Option<String>,
    organizer_id: UserId,
    participants: Vec<Participant>,
    scheduled_at: Timestamp,
    duration_minutes: u32,
    ends_at: Timestamp,
    status: SessionStatus,
    live_session_id: Option<LiveSessionId>,
    previous_session_id: Option<SessionId>,
    rescheduled_to_id: Option<SessionId>,
    reminder_marks: ReminderMarks,
    cancellation_reason: Option<String>,
    created_at: Timestamp,
    updated_at: Timestamp,
    /// Optimistic concurrency token, bumped by the store on every commit.
    version: u64,
}

impl Session {
    /// Schedule a new session.
    ///
    /// # Errors
    ///
    /// - `InvalidSchedule` if `scheduled_at` is not strictly after `now` or
    ///   the duration is outside 15..=480 minutes
    /// - `ValidationFailed` for a bad title or participant list
    pub fn schedule(draft: SessionDraft, now: Timestamp) -> Result<Self, DomainError> {
        Self::validate_title(&draft.title)?;
        Self::validate_schedule(draft.scheduled_at, draft.duration_minutes, now)?;
        let participants = Self::build_participants(&draft.organizer_id, draft.participant_ids)?;

        Ok(Self {
            id: SessionId::new(),
            kind: draft.kind,
            title: draft.title.trim().to_string(),
            description: draft.description,
            organizer_id: draft.organizer_id,
            participants,
            scheduled_at: draft.scheduled_at,
            duration_minutes: draft.duration_minutes,
            ends_at: Self::compute_ends_at(draft.scheduled_at, draft.duration_minutes),
            status: SessionStatus::Scheduled,
            live_session_id: None,
            previous_session_id: None,
            rescheduled_to_id: None,
            reminder_marks: ReminderMarks::new(),
            cancellation_reason: None,
            created_at: now,
            updated_at: now,
            version: 0,
        })
    }

    /// Build the successor of this session in a reschedule chain.
    ///
    /// Copies kind, title, description, organizer and participants (with
    /// every response reset to pending) and links back to this session.
    /// The duration defaults to this session's.
    ///
    /// # Errors
    ///
    /// - `InvalidSchedule` for a non-future start or out-of-range duration
    pub fn successor(
        &self,
        scheduled_at: Timestamp,
        duration_minutes: Option<u32>,
        now: Timestamp,
    ) -> Result<Self, DomainError> {
        let duration_minutes = duration_minutes.unwrap_or(self.duration_minutes);
        Self::validate_schedule(scheduled_at, duration_minutes, now)?;

        Ok(Self {
            id: SessionId::new(),
            kind: self.kind,
            title: self.title.clone(),
            description: self.description.clone(),
            organizer_id: self.organizer_id.clone(),
            participants: self.participants.iter().map(Participant::reinvited).collect(),
            scheduled_at,
            duration_minutes,
            ends_at: Self::compute_ends_at(scheduled_at, duration_minutes),
            status: SessionStatus::Scheduled,
            live_session_id: None,
            previous_session_id: Some(self.id),
            rescheduled_to_id: None,
            reminder_marks: ReminderMarks::new(),
            cancellation_reason: None,
            created_at: now,
            updated_at: now,
            version: 0,
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn kind(&self) -> SessionKind {
        self.kind
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn organizer_id(&self) -> &UserId {
        &self.organizer_id
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    /// Returns the participant entry for a user, if invited.
    pub fn participant(&self, user_id: &UserId) -> Option<&Participant> {
        self.participants.iter().find(|p| &p.user_id == user_id)
    }

    pub fn scheduled_at(&self) -> Timestamp {
        self.scheduled_at
    }

    pub fn duration_minutes(&self) -> u32 {
        self.duration_minutes
    }

    /// Derived end time, always `scheduled_at + duration_minutes`.
    pub fn ends_at(&self) -> Timestamp {
        self.ends_at
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn live_session_id(&self) -> Option<&LiveSessionId> {
        self.live_session_id.as_ref()
    }

    pub fn previous_session_id(&self) -> Option<&SessionId> {
        self.previous_session_id.as_ref()
    }

    pub fn rescheduled_to_id(&self) -> Option<&SessionId> {
        self.rescheduled_to_id.as_ref()
    }

    pub fn reminder_marks(&self) -> &ReminderMarks {
        &self.reminder_marks
    }

    pub fn cancellation_reason(&self) -> Option<&str> {
        self.cancellation_reason.as_deref()
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

    /// True once the session can no longer change status.
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Organizer followed by every participant who accepted.
    pub fn reminder_recipients(&self) -> Vec<UserId> {
        std::iter::once(self.organizer_id.clone())
            .chain(
                self.participants
                    .iter()
                    .filter(|p| p.has_accepted())
                    .map(|p| p.user_id.clone()),
            )
            .collect()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Authorization
    // ─────────────────────────────────────────────────────────────────────────

    pub fn is_organizer(&self, user_id: &UserId) -> bool {
        &self.organizer_id == user_id
    }

    pub fn is_participant(&self, user_id: &UserId) -> bool {
        self.participant(user_id).is_some()
    }

    /// Organizer or invited participant.
    pub fn is_member(&self, user_id: &UserId) -> bool {
        self.is_organizer(user_id) || self.is_participant(user_id)
    }

    /// # Errors
    ///
    /// - `Forbidden` if user is not the organizer
    pub fn authorize_organizer(&self, user_id: &UserId) -> Result<(), DomainError> {
        if self.is_organizer(user_id) {
            Ok(())
        } else {
            Err(DomainError::new(
                ErrorCode::Forbidden,
                "Only the organizer can perform this action",
            ))
        }
    }

    /// # Errors
    ///
    /// - `Forbidden` if user is neither organizer nor participant
    pub fn authorize_member(&self, user_id: &UserId) -> Result<(), DomainError> {
        if self.is_member(user_id) {
            Ok(())
        } else {
            Err(DomainError::new(
                ErrorCode::Forbidden,
                "User is not a member of this session",
            ))
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Organizer confirms the session.
    ///
    /// # Errors
    ///
    /// - `Forbidden` if `actor` is not the organizer
    /// - `InvalidStateTransition` unless currently scheduled
    pub fn confirm(&mut self, actor: &UserId, now: Timestamp) -> Result<(), DomainError> {
        self.authorize_organizer(actor)?;
        self.transition_to(SessionStatus::Confirmed, now)
    }

    /// Record a participant's answer. Never changes the session status.
    ///
    /// # Errors
    ///
    /// - `Forbidden` if `user_id` is not a listed participant
    /// - `ValidationFailed` if `response` is `pending`
    /// - `InvalidStateTransition` once the session has started or ended
    pub fn respond(
        &mut self,
        user_id: &UserId,
        response: ResponseStatus,
        now: Timestamp,
    ) -> Result<(), DomainError> {
        if !response.is_answer() {
            return Err(DomainError::validation(
                "response_status",
                "Response must be accepted, declined or tentative",
            ));
        }
        if !self.status.is_upcoming() {
            return Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                format!("Cannot respond to a {} session", self.status),
            )
            .with_detail("entity", "session")
            .with_detail("current", self.status.to_string())
            .with_detail("requested", "respond"));
        }

        let participant = self
            .participants
            .iter_mut()
            .find(|p| &p.user_id == user_id)
            .ok_or_else(|| {
                DomainError::new(
                    ErrorCode::Forbidden,
                    "Only invited participants can respond",
                )
            })?;

        participant.response_status = response;
        participant.responded_at = Some(now);
        self.updated_at = now;
        Ok(())
    }

    /// The meeting has begun.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` unless currently confirmed
    pub fn begin(&mut self, now: Timestamp) -> Result<(), DomainError> {
        self.transition_to(SessionStatus::InProgress, now)
    }

    /// The meeting has finished.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` unless currently in progress
    pub fn complete(&mut self, now: Timestamp) -> Result<(), DomainError> {
        self.transition_to(SessionStatus::Completed, now)
    }

    /// Organizer cancels the session.
    ///
    /// # Errors
    ///
    /// - `Forbidden` if `actor` is not the organizer
    /// - `InvalidStateTransition` unless scheduled or confirmed
    pub fn cancel(
        &mut self,
        actor: &UserId,
        reason: Option<String>,
        now: Timestamp,
    ) -> Result<(), DomainError> {
        self.authorize_organizer(actor)?;
        self.transition_to(SessionStatus::Cancelled, now)?;
        self.cancellation_reason = reason;
        Ok(())
    }

    /// Retire this session in favour of `successor`.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` unless scheduled or confirmed
    pub fn mark_rescheduled(
        &mut self,
        successor: SessionId,
        reason: Option<String>,
        now: Timestamp,
    ) -> Result<(), DomainError> {
        self.transition_to(SessionStatus::Rescheduled, now)?;
        self.rescheduled_to_id = Some(successor);
        self.cancellation_reason =
            Some(reason.unwrap_or_else(|| DEFAULT_RESCHEDULE_REASON.to_string()));
        Ok(())
    }

    /// Link the live room created for this session.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if this kind has no live room or one is already linked
    pub fn attach_live_session(
        &mut self,
        live_session_id: LiveSessionId,
    ) -> Result<(), DomainError> {
        if !self.kind.requires_live_session() {
            return Err(DomainError::validation(
                "live_session_id",
                format!("A {} session has no live room", self.kind),
            ));
        }
        if self.live_session_id.is_some() {
            return Err(DomainError::validation(
                "live_session_id",
                "Live room already attached",
            ));
        }
        self.live_session_id = Some(live_session_id);
        Ok(())
    }

    /// Record that the reminder for `window_id` went out.
    ///
    /// Returns false if it was already recorded.
    pub fn record_reminder(&mut self, window_id: &str, now: Timestamp) -> bool {
        let added = self.reminder_marks.insert(window_id);
        if added {
            self.updated_at = now;
        }
        added
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

    fn transition_to(&mut self, target: SessionStatus, now: Timestamp) -> Result<(), DomainError> {
        self.status = self.status.transition_to(target)?;
        self.updated_at = now;
        Ok(())
    }

    fn compute_ends_at(scheduled_at: Timestamp, duration_minutes: u32) -> Timestamp {
        scheduled_at.plus_minutes(i64::from(duration_minutes))
    }

    fn validate_schedule(
        scheduled_at: Timestamp,
        duration_minutes: u32,
        now: Timestamp,
    ) -> Result<(), DomainError> {
        if !scheduled_at.is_after(&now) {
            return Err(DomainError::new(
                ErrorCode::InvalidSchedule,
                "Sessions must be scheduled in the future",
            )
            .with_detail("field", "scheduled_at"));
        }
        if !(MIN_DURATION_MINUTES..=MAX_DURATION_MINUTES).contains(&duration_minutes) {
            return Err(DomainError::new(
                ErrorCode::InvalidSchedule,
                format!(
                    "Duration must be between {} and {} minutes, got {}",
                    MIN_DURATION_MINUTES, MAX_DURATION_MINUTES, duration_minutes
                ),
            )
            .with_detail("field", "duration_minutes"));
        }
        Ok(())
    }

    fn validate_title(title: &str) -> Result<(), DomainError> {
        let trimmed = title.trim();
        if trimmed.is_empty() {
            return Err(DomainError::validation("title", "Title cannot be empty"));
        }
        if trimmed.chars().count() > MAX_TITLE_LENGTH {
            return Err(DomainError::validation(
                "title",
                format!("Title must be {} characters or less", MAX_TITLE_LENGTH),
            ));
        }
        Ok(())
    }

    fn build_participants(
        organizer_id: &UserId,
        participant_ids: Vec<UserId>,
    ) -> Result<Vec<Participant>, DomainError> {
        let mut participants: Vec<Participant> = Vec::with_capacity(participant_ids.len());
        for user_id in participant_ids {
            if &user_id == organizer_id {
                return Err(DomainError::validation(
                    "participants",
                    "The organizer cannot also be a participant",
                ));
            }
            if !participants.iter().any(|p| p.user_id == user_id) {
                participants.push(Participant::invited(user_id));
            }
        }
        if participants.is_empty() {
            return Err(DomainError::validation(
                "participants",
                "At least one participant is required",
            ));
        }
        Ok(participants)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn now() -> Timestamp {
        Timestamp::from_unix_secs(1_700_000_000).unwrap()
    }

    fn organizer() -> UserId {
        UserId::new("recruiter").unwrap()
    }

    fn candidate() -> UserId {
        UserId::new("candidate").unwrap()
    }

    fn draft() -> SessionDraft {
        SessionDraft {
            kind: SessionKind::VideoInterview,
            title: "Backend interview".to_string(),
            description: Some("Round one".to_string()),
            organizer_id: organizer(),
            participant_ids: vec![candidate()],
            scheduled_at: now().plus_days(1),
            duration_minutes: 60,
        }
    }

    fn scheduled() -> Session {
        Session::schedule(draft(), now()).unwrap()
    }

    // Construction tests

    #[test]
    fn schedule_creates_scheduled_session_with_derived_end() {
        let session = scheduled();
        assert_eq!(session.status(), SessionStatus::Scheduled);
        assert_eq!(session.ends_at(), now().plus_days(1).plus_minutes(60));
        assert_eq!(session.participants().len(), 1);
        assert_eq!(session.version(), 0);
    }

    #[test]
    fn schedule_rejects_start_equal_to_now() {
        let mut d = draft();
        d.scheduled_at = now();
        let err = Session::schedule(d, now()).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidSchedule);
    }

    #[test]
    fn schedule_rejects_duration_out_of_bounds() {
        for minutes in [0, 14, 481] {
            let mut d = draft();
            d.duration_minutes = minutes;
            let err = Session::schedule(d, now()).unwrap_err();
            assert_eq!(err.code, ErrorCode::InvalidSchedule, "duration {}", minutes);
        }
    }

    #[test]
    fn schedule_accepts_duration_bounds() {
        for minutes in [MIN_DURATION_MINUTES, MAX_DURATION_MINUTES] {
            let mut d = draft();
            d.duration_minutes = minutes;
            assert!(Session::schedule(d, now()).is_ok());
        }
    }

    #[test]
    fn schedule_rejects_organizer_as_participant() {
        let mut d = draft();
        d.participant_ids.push(organizer());
        let err = Session::schedule(d, now()).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }

    #[test]
    fn schedule_requires_a_participant() {
        let mut d = draft();
        d.participant_ids.clear();
        assert!(Session::schedule(d, now()).is_err());
    }

    #[test]
    fn schedule_deduplicates_participants_in_order() {
        let mut d = draft();
        let other = UserId::new("panelist").unwrap();
        d.participant_ids = vec![candidate(), other.clone(), candidate()];
        let session = Session::schedule(d, now()).unwrap();
        let ids: Vec<_> = session.participants().iter().map(|p| p.user_id.clone()).collect();
        assert_eq!(ids, vec![candidate(), other]);
    }

    // Transition tests

    #[test]
    fn confirm_requires_organizer() {
        let mut session = scheduled();
        let err = session.confirm(&candidate(), now()).unwrap_err();
        assert_eq!(err.code, ErrorCode::Forbidden);
        session.confirm(&organizer(), now()).unwrap();
        assert_eq!(session.status(), SessionStatus::Confirmed);
    }

    #[test]
    fn confirm_twice_names_states() {
        let mut session = scheduled();
        session.confirm(&organizer(), now()).unwrap();
        let err = session.confirm(&organizer(), now()).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidStateTransition);
        assert_eq!(err.detail("current"), Some("confirmed"));
        assert_eq!(err.detail("requested"), Some("confirmed"));
    }

    #[test]
    fn respond_updates_only_that_participant() {
        let mut session = scheduled();
        session
            .respond(&candidate(), ResponseStatus::Accepted, now())
            .unwrap();
        let p = session.participant(&candidate()).unwrap();
        assert_eq!(p.response_status, ResponseStatus::Accepted);
        assert_eq!(p.responded_at, Some(now()));
        assert_eq!(session.status(), SessionStatus::Scheduled);
    }

    #[test]
    fn respond_rejects_non_participant() {
        let mut session = scheduled();
        let err = session
            .respond(&organizer(), ResponseStatus::Accepted, now())
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::Forbidden);
    }

    #[test]
    fn respond_rejects_pending() {
        let mut session = scheduled();
        let err = session
            .respond(&candidate(), ResponseStatus::Pending, now())
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }

    #[test]
    fn respond_after_cancel_names_the_attempt() {
        let mut session = scheduled();
        session.cancel(&organizer(), None, now()).unwrap();
        let err = session
            .respond(&candidate(), ResponseStatus::Accepted, now())
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidStateTransition);
        assert_eq!(err.detail("current"), Some("cancelled"));
        assert_eq!(err.detail("requested"), Some("respond"));
    }

    #[test]
    fn cancel_sets_reason_and_is_terminal() {
        let mut session = scheduled();
        session
            .cancel(&organizer(), Some("position filled".to_string()), now())
            .unwrap();
        assert_eq!(session.status(), SessionStatus::Cancelled);
        assert_eq!(session.cancellation_reason(), Some("position filled"));
        assert!(session.is_terminal());
        assert!(session.confirm(&organizer(), now()).is_err());
    }

    #[test]
    fn cancel_rejected_once_in_progress() {
        let mut session = scheduled();
        session.confirm(&organizer(), now()).unwrap();
        session.begin(now()).unwrap();
        let err = session.cancel(&organizer(), None, now()).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidStateTransition);
        assert_eq!(err.detail("current"), Some("in_progress"));
        assert_eq!(err.detail("requested"), Some("cancelled"));
    }

    #[test]
    fn full_lifecycle_completes() {
        let mut session = scheduled();
        session.confirm(&organizer(), now()).unwrap();
        session.begin(now()).unwrap();
        session.complete(now()).unwrap();
        assert_eq!(session.status(), SessionStatus::Completed);
        assert!(session.is_terminal());
    }

    #[test]
    fn mark_rescheduled_defaults_reason() {
        let mut session = scheduled();
        let next = SessionId::new();
        session.mark_rescheduled(next, None, now()).unwrap();
        assert_eq!(session.status(), SessionStatus::Rescheduled);
        assert_eq!(session.rescheduled_to_id(), Some(&next));
        assert_eq!(session.cancellation_reason(), Some(DEFAULT_RESCHEDULE_REASON));
    }

    #[test]
    fn successor_resets_consent_and_links_back() {
        let mut session = scheduled();
        session
            .respond(&candidate(), ResponseStatus::Accepted, now())
            .unwrap();
        session.record_reminder("24h", now());

        let next = session.successor(now().plus_days(2), None, now()).unwrap();
        assert_ne!(next.id(), session.id());
        assert_eq!(next.previous_session_id(), Some(session.id()));
        assert_eq!(next.duration_minutes(), 60);
        assert_eq!(next.title(), session.title());
        assert_eq!(next.description(), session.description());
        assert_eq!(
            next.participant(&candidate()).unwrap().response_status,
            ResponseStatus::Pending
        );
        assert!(next.reminder_marks().is_empty());
        assert!(next.live_session_id().is_none());
    }

    #[test]
    fn successor_rejects_past_start() {
        let session = scheduled();
        let err = session.successor(now().minus_minutes(1), None, now()).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidSchedule);
    }

    #[test]
    fn attach_live_session_only_for_video() {
        let mut d = draft();
        d.kind = SessionKind::PhoneCall;
        let mut call = Session::schedule(d, now()).unwrap();
        assert!(call.attach_live_session(LiveSessionId::new()).is_err());

        let mut video = scheduled();
        video.attach_live_session(LiveSessionId::new()).unwrap();
        assert!(video.attach_live_session(LiveSessionId::new()).is_err());
    }

    #[test]
    fn reminder_recipients_are_organizer_and_accepted() {
        let mut d = draft();
        let declined = UserId::new("declined").unwrap();
        d.participant_ids = vec![candidate(), declined.clone()];
        let mut session = Session::schedule(d, now()).unwrap();
        session
            .respond(&candidate(), ResponseStatus::Accepted, now())
            .unwrap();
        session
            .respond(&declined, ResponseStatus::Declined, now())
            .unwrap();

        assert_eq!(session.reminder_recipients(), vec![organizer(), candidate()]);
    }

    #[test]
    fn authorize_member_rejects_strangers() {
        let session = scheduled();
        assert!(session.authorize_member(&candidate()).is_ok());
        assert!(session.authorize_member(&organizer()).is_ok());
        let stranger = UserId::new("stranger").unwrap();
        assert_eq!(
            session.authorize_member(&stranger).unwrap_err().code,
            ErrorCode::Forbidden
        );
    }

    proptest! {
        #[test]
        fn ends_at_tracks_schedule_changes(
            first in MIN_DURATION_MINUTES..=MAX_DURATION_MINUTES,
            second in MIN_DURATION_MINUTES..=MAX_DURATION_MINUTES,
            shift_minutes in 1i64..100_000,
        ) {
            let mut d = draft();
            d.duration_minutes = first;
            let session = Session::schedule(d, now()).unwrap();
            prop_assert_eq!(
                session.ends_at(),
                session.scheduled_at().plus_minutes(i64::from(first))
            );

            let new_start = now().plus_minutes(shift_minutes);
            let moved = session.successor(new_start, Some(second), now()).unwrap();
            prop_assert_eq!(moved.ends_at(), new_start.plus_minutes(i64::from(second)));

            let kept = moved.successor(new_start.plus_minutes(30), None, now()).unwrap();
            prop_assert_eq!(kept.duration_minutes(), second);
            prop_assert_eq!(
                kept.ends_at(),
                kept.scheduled_at().plus_minutes(i64::from(second))
            );
        }
    }
}
