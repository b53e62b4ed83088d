//! Live room command and query handlers.

mod check_join;
mod create_ad_hoc_room;
mod end_live_session;
mod join_live_session;
mod leave_live_session;
mod record_recording_consent;
mod start_live_session;

pub use check_join::{CheckJoinHandler, CheckJoinQuery};
pub use create_ad_hoc_room::{CreateAdHocRoomCommand, CreateAdHocRoomHandler};
pub use end_live_session::{EndLiveSessionCommand, EndLiveSessionHandler, EndLiveSessionResult};
pub use join_live_session::{JoinLiveSessionCommand, JoinLiveSessionHandler, JoinLiveSessionResult};
pub use leave_live_session::{LeaveLiveSessionCommand, LeaveLiveSessionHandler};
pub use record_recording_consent::{RecordRecordingConsentCommand, RecordRecordingConsentHandler};
pub use start_live_session::{
    StartLiveSessionCommand, StartLiveSessionHandler, StartLiveSessionResult,
};
