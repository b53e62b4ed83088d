//! Session command and query handlers.

mod cancel_session;
mod confirm_session;
mod get_session;
mod list_upcoming;
mod reschedule_chain;
mod reschedule_session;
mod respond_to_session;
mod schedule_session;

pub use cancel_session::{CancelSessionCommand, CancelSessionHandler, CancelSessionResult};
pub use confirm_session::{ConfirmSessionCommand, ConfirmSessionHandler};
pub use get_session::{GetSessionHandler, GetSessionQuery, SessionView};
pub use list_upcoming::{ListUpcomingSessionsHandler, ListUpcomingSessionsQuery};
pub use reschedule_chain::{RescheduleChainHandler, RescheduleChainQuery};
pub use reschedule_session::{
    RescheduleSessionCommand, RescheduleSessionHandler, RescheduleSessionResult,
};
pub use respond_to_session::{RespondToSessionCommand, RespondToSessionHandler};
pub use schedule_session::{ScheduleSessionCommand, ScheduleSessionHandler, ScheduleSessionResult};
