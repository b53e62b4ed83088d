//! Scheduling command error types.
//!
//! # Error kinds
//!
//! | Error | Meaning |
//! |-------|---------|
//! | NotFound | Referenced Session/LiveSession absent |
//! | NotAuthorized | Caller is not organizer/participant as required |
//! | InvalidStateTransition | Illegal transition, names both states |
//! | InvalidSchedule | Start not strictly future, or duration out of range |
//! | ConflictingWrite | Batch rejected for a stale version; retry from a fresh load |
//! | ValidationFailed | Malformed command input |
//! | Infrastructure | Store or gateway unavailable; nothing was applied |

use crate::domain::foundation::{DomainError, ErrorCode, LiveSessionId, SessionId};

/// Errors returned by scheduling commands and queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchedulingError {
    /// Referenced aggregate does not exist.
    NotFound { entity: &'static str, id: String },
    /// Caller may not perform the operation.
    NotAuthorized,
    /// Illegal state transition.
    InvalidStateTransition {
        entity: String,
        current: String,
        requested: String,
    },
    /// Start time or duration rejected.
    InvalidSchedule(String),
    /// A batch carried a stale version; nothing was applied.
    ConflictingWrite(String),
    /// Validation failed.
    ValidationFailed { field: String, message: String },
    /// Store or gateway failure. A failed commit applied nothing.
    Infrastructure(String),
}

impl SchedulingError {
    pub fn session_not_found(id: SessionId) -> Self {
        SchedulingError::NotFound {
            entity: "session",
            id: id.to_string(),
        }
    }
    pub fn live_session_not_found(id: LiveSessionId) -> Self {
        SchedulingError::NotFound {
            entity: "live_session",
            id: id.to_string(),
        }
    }
    pub fn not_authorized() -> Self {
        SchedulingError::NotAuthorized
    }
    pub fn invalid_transition(
        entity: impl Into<String>,
        current: impl Into<String>,
        requested: impl Into<String>,
    ) -> Self {
        SchedulingError::InvalidStateTransition {
            entity: entity.into(),
            current: current.into(),
            requested: requested.into(),
        }
    }
    pub fn invalid_schedule(message: impl Into<String>) -> Self {
        SchedulingError::InvalidSchedule(message.into())
    }
    pub fn conflicting_write(message: impl Into<String>) -> Self {
        SchedulingError::ConflictingWrite(message.into())
    }
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        SchedulingError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }
    pub fn infrastructure(message: impl Into<String>) -> Self {
        SchedulingError::Infrastructure(message.into())
    }
    pub fn code(&self) -> ErrorCode {
        match self {
            SchedulingError::NotFound { entity, .. } if *entity == "live_session" => {
                ErrorCode::LiveSessionNotFound
            }
            SchedulingError::NotFound { .. } => ErrorCode::SessionNotFound,
            SchedulingError::NotAuthorized => ErrorCode::Forbidden,
            SchedulingError::InvalidStateTransition { .. } => ErrorCode::InvalidStateTransition,
            SchedulingError::InvalidSchedule(_) => ErrorCode::InvalidSchedule,
            SchedulingError::ConflictingWrite(_) => ErrorCode::ConcurrentModification,
            SchedulingError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            SchedulingError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }
    pub fn message(&self) -> String {
        match self {
            SchedulingError::NotFound { entity, id } => format!("{} not found: {}", entity, id),
            SchedulingError::NotAuthorized => "Permission denied".to_string(),
            SchedulingError::InvalidStateTransition {
                entity,
                current,
                requested,
            } => format!(
                "Invalid state transition for {}: {} -> {}",
                entity, current, requested
            ),
            SchedulingError::InvalidSchedule(msg) => format!("Invalid schedule: {}", msg),
            SchedulingError::ConflictingWrite(msg) => format!("Conflicting write: {}", msg),
            SchedulingError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            SchedulingError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for SchedulingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for SchedulingError {}

impl From<DomainError> for SchedulingError {
    fn from(err: DomainError) -> Self {
        let detail = |key: &str| err.detail(key).unwrap_or("unknown").to_string();
        match err.code {
            ErrorCode::SessionNotFound => SchedulingError::NotFound {
                entity: "session",
                id: detail("id"),
            },
            ErrorCode::LiveSessionNotFound => SchedulingError::NotFound {
                entity: "live_session",
                id: detail("id"),
            },
            ErrorCode::Forbidden => SchedulingError::NotAuthorized,
            ErrorCode::InvalidStateTransition => SchedulingError::InvalidStateTransition {
                entity: detail("entity"),
                current: detail("current"),
                requested: detail("requested"),
            },
            ErrorCode::InvalidSchedule => SchedulingError::InvalidSchedule(err.message),
            ErrorCode::ConcurrentModification => SchedulingError::ConflictingWrite(err.message),
            ErrorCode::ValidationFailed => SchedulingError::ValidationFailed {
                field: detail("field"),
                message: err.message,
            },
            ErrorCode::DatabaseError | ErrorCode::NotificationError | ErrorCode::InternalError => {
                SchedulingError::Infrastructure(err.to_string())
            }
        }
    }
}
