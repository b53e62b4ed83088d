//! In-memory scheduling store.
//!
//! Holds both aggregate maps behind a single lock so a batch is validated
//! and applied under one write guard. Used by the binary and by tests.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tokio::sync::RwLock;

use crate::domain::foundation::{
    DomainError, ErrorCode, LiveSessionId, SessionId, Timestamp, UserId,
};
use crate::domain::live_session::LiveSession;
use crate::domain::scheduling::{Session, SessionStatus};
use crate::ports::{AggregateWrite, SchedulingStore, SessionWindowQuery, WriteBatch};

#[derive(Default)]
struct StoreState {
    sessions: HashMap<SessionId, Session>,
    live_sessions: HashMap<LiveSessionId, LiveSession>,
}

/// Key used to detect an aggregate written twice in one batch.
#[derive(Hash, PartialEq, Eq)]
enum WriteKey {
    Session(SessionId),
    LiveSession(LiveSessionId),
}

/// In-memory implementation of [`SchedulingStore`].
///
/// Features:
/// - Optimistic version checks on every update
/// - All-or-nothing batch commits
/// - Fault injection for commit failures
pub struct InMemorySchedulingStore {
    state: RwLock<StoreState>,
    fail_commits: AtomicBool,
    commits: AtomicUsize,
}

impl InMemorySchedulingStore {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(StoreState::default()),
            fail_commits: AtomicBool::new(false),
            commits: AtomicUsize::new(0),
        }
    }

    // === Test Helpers ===

    /// Make every subsequent commit fail as an unavailable store would.
    ///
    /// The failure is a `DatabaseError`, surfaced to callers as
    /// `Infrastructure`. Version conflicts stay `ConcurrentModification`.
    pub fn fail_commits(&self, fail: bool) {
        self.fail_commits.store(fail, Ordering::SeqCst);
    }

    /// Number of batches applied so far.
    pub fn commit_count(&self) -> usize {
        self.commits.load(Ordering::SeqCst)
    }

    pub async fn session_count(&self) -> usize {
        self.state.read().await.sessions.len()
    }

    pub async fn live_session_count(&self) -> usize {
        self.state.read().await.live_sessions.len()
    }

    fn check_batch(state: &StoreState, writes: &[AggregateWrite]) -> Result<(), DomainError> {
        let mut seen = HashSet::new();
        for write in writes {
            let key = match write {
                AggregateWrite::InsertSession(s) | AggregateWrite::UpdateSession(s) => {
                    WriteKey::Session(*s.id())
                }
                AggregateWrite::InsertLiveSession(l) | AggregateWrite::UpdateLiveSession(l) => {
                    WriteKey::LiveSession(*l.id())
                }
            };
            if !seen.insert(key) {
                return Err(conflict(write, "aggregate written twice in one batch"));
            }

            let ok = match write {
                AggregateWrite::InsertSession(s) => !state.sessions.contains_key(s.id()),
                AggregateWrite::UpdateSession(s) => state
                    .sessions
                    .get(s.id())
                    .is_some_and(|stored| stored.version() == s.version()),
                AggregateWrite::InsertLiveSession(l) => !state.live_sessions.contains_key(l.id()),
                AggregateWrite::UpdateLiveSession(l) => state
                    .live_sessions
                    .get(l.id())
                    .is_some_and(|stored| stored.version() == l.version()),
            };
            if !ok {
                return Err(conflict(write, "stale version or duplicate insert"));
            }
        }
        Ok(())
    }
}

impl Default for InMemorySchedulingStore {
    fn default() -> Self {
        Self::new()
    }
}

fn conflict(write: &AggregateWrite, reason: &str) -> DomainError {
    DomainError::new(
        ErrorCode::ConcurrentModification,
        format!("{}: {}", write.describe(), reason),
    )
}

#[async_trait]
impl SchedulingStore for InMemorySchedulingStore {
    async fn load_session(&self, id: &SessionId) -> Result<Option<Session>, DomainError> {
        Ok(self.state.read().await.sessions.get(id).cloned())
    }

    async fn load_live_session(
        &self,
        id: &LiveSessionId,
    ) -> Result<Option<LiveSession>, DomainError> {
        Ok(self.state.read().await.live_sessions.get(id).cloned())
    }

    async fn find_sessions_in_window(
        &self,
        query: &SessionWindowQuery,
    ) -> Result<Vec<Session>, DomainError> {
        let state = self.state.read().await;
        let mut found: Vec<Session> = state
            .sessions
            .values()
            .filter(|s| query.matches(s))
            .cloned()
            .collect();
        found.sort_by_key(|s| (s.scheduled_at(), *s.id()));
        Ok(found)
    }

    async fn find_sessions_for_user(
        &self,
        user_id: &UserId,
        statuses: &[SessionStatus],
        from: Timestamp,
    ) -> Result<Vec<Session>, DomainError> {
        let state = self.state.read().await;
        let mut found: Vec<Session> = state
            .sessions
            .values()
            .filter(|s| s.is_member(user_id))
            .filter(|s| statuses.contains(&s.status()))
            .filter(|s| s.scheduled_at() >= from)
            .cloned()
            .collect();
        found.sort_by_key(|s| (s.scheduled_at(), *s.id()));
        Ok(found)
    }

    async fn commit(&self, batch: WriteBatch) -> Result<(), DomainError> {
        if self.fail_commits.load(Ordering::SeqCst) {
            return Err(DomainError::new(
                ErrorCode::DatabaseError,
                "Injected commit failure",
            ));
        }

        let mut state = self.state.write().await;
        Self::check_batch(&state, batch.writes())?;

        for write in batch.into_writes() {
            match write {
                AggregateWrite::InsertSession(mut s) | AggregateWrite::UpdateSession(mut s) => {
                    s.bump_version();
                    state.sessions.insert(*s.id(), s);
                }
                AggregateWrite::InsertLiveSession(mut l)
                | AggregateWrite::UpdateLiveSession(mut l) => {
                    l.bump_version();
                    state.live_sessions.insert(*l.id(), l);
                }
            }
        }
        self.commits.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
