//! Notification gateway that writes each intent to the log.
//!
//! Stands in for a real delivery service when the scheduler runs on its
//! own; downstream log shippers can pick the intents up from JSON output.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::{NotificationGateway, ReminderIntent};

#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotificationGateway;

impl TracingNotificationGateway {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl NotificationGateway for TracingNotificationGateway {
    async fn emit(&self, intent: ReminderIntent) -> Result<(), DomainError> {
        let payload = serde_json::to_string(&intent).map_err(|e| {
            DomainError::new(
                ErrorCode::NotificationError,
                format!("Failed to encode reminder intent: {}", e),
            )
        })?;
        tracing::info!(
            recipient_id = %intent.recipient_id,
            session_id = %intent.session_id,
            live_session_id = %intent.live_session_id,
            window_id = %intent.window_id,
            channel = %intent.channel_hint,
            scheduled_at = %intent.scheduled_at,
            meeting_path = %intent.meeting_path,
            payload = %payload,
            "reminder intent emitted"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{LiveSessionId, SessionId, Timestamp, UserId};
    use crate::domain::scheduling::ChannelHint;

    #[tokio::test]
    async fn emit_always_succeeds() {
        let intent = ReminderIntent {
            recipient_id: UserId::new("candidate").unwrap(),
            session_id: SessionId::new(),
            live_session_id: LiveSessionId::new(),
            window_id: "15m".to_string(),
            offset_minutes: 15,
            channel_hint: ChannelHint::Push,
            scheduled_at: Timestamp::from_unix_secs(1_700_000_000).unwrap(),
            meeting_path: "/video-interview/room".to_string(),
        };
        assert!(TracingNotificationGateway::new().emit(intent).await.is_ok());
    }
}
