//! Scheduling store port (persistence gateway).
//!
//! Defines the contract for loading Session and LiveSession aggregates and
//! for committing changes to several of them at once.
//!
//! # Design
//!
//! - **Two aggregates, addressed by id**: a Session references its
//!   LiveSession by id only; lookups go through this port.
//! - **Atomic batches**: every command issues all of its writes as one
//!   `WriteBatch`. Implementations apply all of them or none.
//! - **Optimistic concurrency**: updates carry the version they were loaded
//!   at; a stale version fails the whole batch with `ConcurrentModification`.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, LiveSessionId, SessionId, Timestamp, UserId};
use crate::domain::live_session::LiveSession;
use crate::domain::scheduling::{Session, SessionKind, SessionStatus};

/// One aggregate change inside a batch.
#[derive(Debug, Clone, PartialEq)]
pub enum AggregateWrite {
    /// A session that must not already exist.
    InsertSession(Session),
    /// A previously loaded session; its version must still be current.
    UpdateSession(Session),
    /// A live room that must not already exist.
    InsertLiveSession(LiveSession),
    /// A previously loaded live room; its version must still be current.
    UpdateLiveSession(LiveSession),
}

impl AggregateWrite {
    /// Identifier of the written aggregate, for logging.
    pub fn describe(&self) -> String {
        match self {
            AggregateWrite::InsertSession(s) => format!("insert session {}", s.id()),
            AggregateWrite::UpdateSession(s) => format!("update session {}", s.id()),
            AggregateWrite::InsertLiveSession(l) => format!("insert live_session {}", l.id()),
            AggregateWrite::UpdateLiveSession(l) => format!("update live_session {}", l.id()),
        }
    }
}

/// Writes that commit together or not at all.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WriteBatch {
    writes: Vec<AggregateWrite>,
}

impl WriteBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_session(mut self, session: Session) -> Self {
        self.writes.push(AggregateWrite::InsertSession(session));
        self
    }

    pub fn update_session(mut self, session: Session) -> Self {
        self.writes.push(AggregateWrite::UpdateSession(session));
        self
    }

    pub fn insert_live_session(mut self, live: LiveSession) -> Self {
        self.writes.push(AggregateWrite::InsertLiveSession(live));
        self
    }

    pub fn update_live_session(mut self, live: LiveSession) -> Self {
        self.writes.push(AggregateWrite::UpdateLiveSession(live));
        self
    }

    pub fn writes(&self) -> &[AggregateWrite] {
        &self.writes
    }

    pub fn into_writes(self) -> Vec<AggregateWrite> {
        self.writes
    }

    pub fn len(&self) -> usize {
        self.writes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.writes.is_empty()
    }
}

/// Selection used by the reminder sweeper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionWindowQuery {
    pub kind: SessionKind,
    pub statuses: Vec<SessionStatus>,
    /// Inclusive lower bound on `scheduled_at`.
    pub from: Timestamp,
    /// Exclusive upper bound on `scheduled_at`.
    pub to: Timestamp,
    /// Sessions already carrying this reminder mark are excluded.
    pub excluding_mark: Option<String>,
}

impl SessionWindowQuery {
    /// Whether a session satisfies every clause of the query.
    ///
    /// Adapters without native query support can filter with this.
    pub fn matches(&self, session: &Session) -> bool {
        session.kind() == self.kind
            && self.statuses.contains(&session.status())
            && session.scheduled_at() >= self.from
            && session.scheduled_at() < self.to
            && self
                .excluding_mark
                .as_deref()
                .map_or(true, |mark| !session.reminder_marks().contains(mark))
    }
}

/// Repository port for scheduling aggregates.
#[async_trait]
pub trait SchedulingStore: Send + Sync {
    /// Find a session by its ID.
    ///
    /// Returns `None` if not found.
    async fn load_session(&self, id: &SessionId) -> Result<Option<Session>, DomainError>;

    /// Find a live room by its ID.
    ///
    /// Returns `None` if not found.
    async fn load_live_session(&self, id: &LiveSessionId)
        -> Result<Option<LiveSession>, DomainError>;

    /// Sessions matching a reminder window, ordered by `scheduled_at`.
    async fn find_sessions_in_window(
        &self,
        query: &SessionWindowQuery,
    ) -> Result<Vec<Session>, DomainError>;

    /// Sessions the user organizes or is invited to, with one of `statuses`
    /// and starting at or after `from`, ordered by `scheduled_at`.
    async fn find_sessions_for_user(
        &self,
        user_id: &UserId,
        statuses: &[SessionStatus],
        from: Timestamp,
    ) -> Result<Vec<Session>, DomainError>;

    /// Apply every write in the batch atomically.
    ///
    /// On success each stored aggregate's version is one higher than the
    /// version it was submitted with.
    ///
    /// # Errors
    ///
    /// - `ConcurrentModification` if any update is stale or any insert
    ///   collides; nothing is applied
    /// - `DatabaseError` on persistence failure; nothing is applied
    async fn commit(&self, batch: WriteBatch) -> Result<(), DomainError>;
}
