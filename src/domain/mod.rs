//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors, state machine trait)
//! - `scheduling` - Session aggregate, participant responses and reminder marks
//! - `live_session` - LiveSession aggregate and the join-eligibility policy

pub mod foundation;
pub mod live_session;
pub mod scheduling;
