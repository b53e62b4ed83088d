//! NotificationGateway port - Outbound reminder intents.
//!
//! The scheduling core only decides *that* someone should be reminded.
//! Delivery (email vs. push, retries, batching) belongs to the adapter.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, LiveSessionId, SessionId, Timestamp, UserId};
use crate::domain::scheduling::ChannelHint;

/// A request to remind one recipient about one upcoming session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderIntent {
    pub recipient_id: UserId,
    pub session_id: SessionId,
    pub live_session_id: LiveSessionId,
    /// Reminder window id, e.g. `24h`.
    pub window_id: String,
    pub offset_minutes: i64,
    pub channel_hint: ChannelHint,
    pub scheduled_at: Timestamp,
    pub meeting_path: String,
}

/// Port for handing reminder intents to the delivery system.
///
/// Implementations must treat each call independently; the sweeper emits
/// one intent per recipient and may re-emit after a crash.
#[async_trait]
pub trait NotificationGateway: Send + Sync {
    /// Accept one intent for delivery.
    async fn emit(&self, intent: ReminderIntent) -> Result<(), DomainError>;
}
