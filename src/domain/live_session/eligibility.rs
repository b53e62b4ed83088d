//! Join-eligibility policy for live rooms.
//!
//! Decides, from wall-clock time alone, whether a member may enter a room.
//! Rules are evaluated in order:
//!
//! 1. Closed rooms (ended, cancelled, rescheduled) are never joinable.
//! 2. Unscheduled (ad hoc) rooms are joinable immediately.
//! 3. Before `scheduled_at - lead`: waiting.
//! 4. From `scheduled_at - lead` through `ends_at`: joinable.
//! 5. After `ends_at` but no later than `scheduled_at + grace`, only if the
//!    call is active: joinable late.
//! 6. Otherwise: ended.
//!
//! Both boundaries are inclusive at their near edge.

use crate::domain::foundation::{DomainError, ErrorCode, Timestamp, UserId};
use crate::domain::scheduling::Session;
use serde::{Deserialize, Serialize};

use super::{LiveSession, LiveSessionStatus};

/// How early members may enter before the scheduled start.
pub const DEFAULT_JOIN_LEAD_MINUTES: i64 = 5;

/// How long after the scheduled start an active call still admits late joiners.
pub const DEFAULT_LATE_JOIN_GRACE_MINUTES: i64 = 60;

/// Tunable boundaries for the join window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinPolicy {
    pub lead_minutes: i64,
    pub late_join_grace_minutes: i64,
}

impl Default for JoinPolicy {
    fn default() -> Self {
        Self {
            lead_minutes: DEFAULT_JOIN_LEAD_MINUTES,
            late_join_grace_minutes: DEFAULT_LATE_JOIN_GRACE_MINUTES,
        }
    }
}

/// Where the room is relative to its join window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JoinPhase {
    /// Too early.
    Waiting,
    /// Joinable, call not yet running.
    Ready,
    /// Joinable, call running.
    Active,
    /// Window has passed or the call finished.
    Ended,
    /// Room was called off.
    Cancelled,
}

/// Outcome of a join check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinEligibility {
    pub eligible: bool,
    pub phase: JoinPhase,
    /// Whole minutes until the scheduled start, rounded up; negative once
    /// started, zero for unscheduled rooms.
    pub minutes_until_start: i64,
}

impl JoinEligibility {
    fn allowed(phase: JoinPhase, minutes_until_start: i64) -> Self {
        Self {
            eligible: true,
            phase,
            minutes_until_start,
        }
    }

    fn denied(phase: JoinPhase, minutes_until_start: i64) -> Self {
        Self {
            eligible: false,
            phase,
            minutes_until_start,
        }
    }
}

/// Evaluate whether `user_id` may enter `live` right now.
///
/// # Errors
///
/// - `Forbidden` if the user is neither the session organizer nor a listed
///   participant; checked before any time arithmetic
pub fn evaluate_join(
    session: &Session,
    live: &LiveSession,
    user_id: &UserId,
    now: Timestamp,
    policy: &JoinPolicy,
) -> Result<JoinEligibility, DomainError> {
    session.authorize_member(user_id)?;
    Ok(evaluate_window(live, session.ends_at(), now, policy))
}

/// Join check for a room that has no owning session.
///
/// Membership comes from the room itself. Such rooms are normally ad hoc and
/// therefore joinable as soon as they exist.
///
/// # Errors
///
/// - `Forbidden` if the user is not a member of the room
pub fn evaluate_room_join(
    live: &LiveSession,
    user_id: &UserId,
    now: Timestamp,
    policy: &JoinPolicy,
) -> Result<JoinEligibility, DomainError> {
    if !live.is_member(user_id) {
        return Err(DomainError::new(
            ErrorCode::Forbidden,
            "User is not a member of this room",
        ));
    }
    let ends_at = live.scheduled_at().unwrap_or(now);
    Ok(evaluate_window(live, ends_at, now, policy))
}

fn evaluate_window(
    live: &LiveSession,
    ends_at: Timestamp,
    now: Timestamp,
    policy: &JoinPolicy,
) -> JoinEligibility {
    let running_phase = if live.status() == LiveSessionStatus::Active {
        JoinPhase::Active
    } else {
        JoinPhase::Ready
    };

    let Some(scheduled_at) = live.scheduled_at() else {
        return match live.status() {
            LiveSessionStatus::Ended => JoinEligibility::denied(JoinPhase::Ended, 0),
            s if !s.is_open() => JoinEligibility::denied(JoinPhase::Cancelled, 0),
            _ => JoinEligibility::allowed(running_phase, 0),
        };
    };

    let minutes = minutes_until(scheduled_at, now);

    match live.status() {
        LiveSessionStatus::Ended => return JoinEligibility::denied(JoinPhase::Ended, minutes),
        LiveSessionStatus::Cancelled | LiveSessionStatus::Rescheduled => {
            return JoinEligibility::denied(JoinPhase::Cancelled, minutes)
        }
        _ => {}
    }

    let opens_at = scheduled_at.minus_minutes(policy.lead_minutes);
    let late_until = scheduled_at.plus_minutes(policy.late_join_grace_minutes);

    if now < opens_at {
        return JoinEligibility::denied(JoinPhase::Waiting, minutes);
    }
    if now <= ends_at {
        return JoinEligibility::allowed(running_phase, minutes);
    }
    if now <= late_until && live.status() == LiveSessionStatus::Active {
        return JoinEligibility::allowed(JoinPhase::Active, minutes);
    }
    JoinEligibility::denied(JoinPhase::Ended, minutes)
}

/// Signed minutes from `now` to `target`, rounded toward positive infinity.
fn minutes_until(target: Timestamp, now: Timestamp) -> i64 {
    let secs = target.duration_since(&now).num_seconds();
    secs.div_euclid(60) + i64::from(secs.rem_euclid(60) > 0)
}
