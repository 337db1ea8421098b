use crate::TICKS_PER_SECOND;
use std::fmt;
use std::ops::{Add, AddAssign, Div, Mul, Sub, SubAssign};

/// A span of virtual time expressed as an integer count of ticks at
/// [`TICKS_PER_SECOND`] resolution.
///
/// `Duration` carries no wall-clock meaning; it only ever participates in
/// arithmetic with other `Duration`s and [`TimePoint`](crate::TimePoint)s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Duration {
    ticks: i64,
}

impl Duration {
    /// A zero-length duration.
    pub const ZERO: Duration = Duration { ticks: 0 };

    /// Builds a duration from a raw tick count.
    pub const fn from_ticks(ticks: i64) -> Self {
        Self { ticks }
    }

    /// Builds a duration from whole seconds.
    pub const fn from_secs(secs: i64) -> Self {
        Self {
            ticks: secs * TICKS_PER_SECOND,
        }
    }

    /// Builds a duration from whole milliseconds.
    pub const fn from_millis(millis: i64) -> Self {
        Self {
            ticks: millis * (TICKS_PER_SECOND / 1_000),
        }
    }

    /// Builds a duration from whole microseconds.
    pub const fn from_micros(micros: i64) -> Self {
        Self {
            ticks: micros * (TICKS_PER_SECOND / 1_000_000),
        }
    }

    /// Builds a duration from whole nanoseconds.
    pub const fn from_nanos(nanos: i64) -> Self {
        Self { ticks: nanos }
    }

    /// Returns the raw tick count.
    pub const fn as_ticks(&self) -> i64 {
        self.ticks
    }

    /// Returns this duration in whole seconds, truncating any remainder.
    pub const fn as_secs(&self) -> i64 {
        self.ticks / TICKS_PER_SECOND
    }

    /// Returns `true` if this duration is exactly zero.
    pub const fn is_zero(&self) -> bool {
        self.ticks == 0
    }

    /// Returns `true` if this duration is zero or positive.
    pub const fn is_non_negative(&self) -> bool {
        self.ticks >= 0
    }
}

impl Add for Duration {
    type Output = Duration;
    fn add(self, rhs: Duration) -> Duration {
        Duration::from_ticks(self.ticks + rhs.ticks)
    }
}

impl Sub for Duration {
    type Output = Duration;
    fn sub(self, rhs: Duration) -> Duration {
        Duration::from_ticks(self.ticks - rhs.ticks)
    }
}

impl AddAssign for Duration {
    fn add_assign(&mut self, rhs: Duration) {
        self.ticks += rhs.ticks;
    }
}

impl SubAssign for Duration {
    fn sub_assign(&mut self, rhs: Duration) {
        self.ticks -= rhs.ticks;
    }
}

impl Mul<i64> for Duration {
    type Output = Duration;
    fn mul(self, rhs: i64) -> Duration {
        Duration::from_ticks(self.ticks * rhs)
    }
}

impl Div<i64> for Duration {
    type Output = Duration;
    fn div(self, rhs: i64) -> Duration {
        Duration::from_ticks(self.ticks / rhs)
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ns", self.ticks)
    }
}
