//! Clock adapters.
//!
//! - `SystemClock` - wall clock for production
//! - `ManualClock` - settable clock for deterministic tests

mod manual;
mod system;

pub use manual::ManualClock;
pub use system::SystemClock;
