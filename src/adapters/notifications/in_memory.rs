//! In-memory notification gateway for testing.
//!
//! Captures every accepted intent for assertions and can be told to reject
//! intents for specific recipients.

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Mutex;

use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::ports::{NotificationGateway, ReminderIntent};

/// Recording notification gateway.
///
/// # Panics
///
/// Test helpers panic if the internal lock is poisoned.
#[derive(Default)]
pub struct InMemoryNotificationGateway {
    emitted: Mutex<Vec<ReminderIntent>>,
    failing_recipients: Mutex<HashSet<UserId>>,
}

impl InMemoryNotificationGateway {
    pub fn new() -> Self {
        Self::default()
    }

    // === Test Helpers ===

    /// Reject every future intent addressed to `recipient`.
    pub fn fail_for(&self, recipient: UserId) {
        self.failing_recipients
            .lock()
            .expect("InMemoryNotificationGateway: failing lock poisoned")
            .insert(recipient);
    }

    /// Accept intents for `recipient` again.
    pub fn recover(&self, recipient: &UserId) {
        self.failing_recipients
            .lock()
            .expect("InMemoryNotificationGateway: failing lock poisoned")
            .remove(recipient);
    }

    /// All accepted intents in emission order.
    pub fn emitted(&self) -> Vec<ReminderIntent> {
        self.emitted
            .lock()
            .expect("InMemoryNotificationGateway: emitted lock poisoned")
            .clone()
    }

    pub fn emitted_count(&self) -> usize {
        self.emitted().len()
    }

    /// Accepted intents for one reminder window.
    pub fn emitted_for_window(&self, window_id: &str) -> Vec<ReminderIntent> {
        self.emitted()
            .into_iter()
            .filter(|i| i.window_id == window_id)
            .collect()
    }

    pub fn clear(&self) {
        self.emitted
            .lock()
            .expect("InMemoryNotificationGateway: emitted lock poisoned")
            .clear();
    }
}

#[async_trait]
impl NotificationGateway for InMemoryNotificationGateway {
    async fn emit(&self, intent: ReminderIntent) -> Result<(), DomainError> {
        let failing = self
            .failing_recipients
            .lock()
            .map_err(|_| DomainError::new(ErrorCode::InternalError, "gateway lock poisoned"))?
            .contains(&intent.recipient_id);
        if failing {
            return Err(DomainError::new(
                ErrorCode::NotificationError,
                format!("Delivery refused for {}", intent.recipient_id),
            ));
        }

        self.emitted
            .lock()
            .map_err(|_| DomainError::new(ErrorCode::InternalError, "gateway lock poisoned"))?
            .push(intent);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{LiveSessionId, SessionId, Timestamp};
    use crate::domain::scheduling::ChannelHint;

    fn intent(recipient: &str) -> ReminderIntent {
        ReminderIntent {
            recipient_id: UserId::new(recipient).unwrap(),
            session_id: SessionId::new(),
            live_session_id: LiveSessionId::new(),
            window_id: "24h".to_string(),
            offset_minutes: 1440,
            channel_hint: ChannelHint::Email,
            scheduled_at: Timestamp::from_unix_secs(1_700_000_000).unwrap(),
            meeting_path: "/video-interview/abc".to_string(),
        }
    }

    #[tokio::test]
    async fn records_emitted_intents() {
        let gateway = InMemoryNotificationGateway::new();
        gateway.emit(intent("a")).await.unwrap();
        gateway.emit(intent("b")).await.unwrap();
        assert_eq!(gateway.emitted_count(), 2);
        assert_eq!(gateway.emitted_for_window("24h").len(), 2);
        assert!(gateway.emitted_for_window("15m").is_empty());
    }

    #[tokio::test]
    async fn failing_recipient_is_not_recorded() {
        let gateway = InMemoryNotificationGateway::new();
        gateway.fail_for(UserId::new("a").unwrap());
        let err = gateway.emit(intent("a")).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotificationError);
        assert_eq!(gateway.emitted_count(), 0);

        gateway.recover(&UserId::new("a").unwrap());
        gateway.emit(intent("a")).await.unwrap();
        assert_eq!(gateway.emitted_count(), 1);
    }
}
