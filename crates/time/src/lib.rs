//! Virtual time for the simnet runtime.
//!
//! A [`Duration`] and a [`TimePoint`] are both integer counts at a fixed,
//! compile-time resolution (nanoseconds by default). Neither type has any
//! coupling to the wall clock: a [`TimePoint`] only ever advances because
//! something (the scheduler's run loop) explicitly sets it forward.

mod duration;
mod time_point;

pub use duration::Duration;
pub use time_point::TimePoint;

/// Ticks per second of the fixed resolution used by [`Duration`] and
/// [`TimePoint`]. One tick is one nanosecond.
pub const TICKS_PER_SECOND: i64 = 1_000_000_000;
