//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod live_session;
mod loading;
pub mod scheduling;

#[cfg(test)]
pub(crate) mod test_support;

pub use live_session::{
    CheckJoinHandler, CheckJoinQuery, CreateAdHocRoomCommand, CreateAdHocRoomHandler,
    EndLiveSessionCommand, EndLiveSessionHandler, EndLiveSessionResult, JoinLiveSessionCommand,
    JoinLiveSessionHandler, JoinLiveSessionResult, LeaveLiveSessionCommand,
    LeaveLiveSessionHandler, RecordRecordingConsentCommand, RecordRecordingConsentHandler,
    StartLiveSessionCommand, StartLiveSessionHandler, StartLiveSessionResult,
};
pub use scheduling::{
    CancelSessionCommand, CancelSessionHandler, CancelSessionResult, ConfirmSessionCommand,
    ConfirmSessionHandler, GetSessionHandler, GetSessionQuery, ListUpcomingSessionsHandler,
    ListUpcomingSessionsQuery, RescheduleChainHandler, RescheduleChainQuery,
    RescheduleSessionCommand, RescheduleSessionHandler, RescheduleSessionResult,
    RespondToSessionCommand, RespondToSessionHandler, ScheduleSessionCommand,
    ScheduleSessionHandler, ScheduleSessionResult, SessionView,
};
