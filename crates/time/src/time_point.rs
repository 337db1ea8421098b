use crate::Duration;
use std::fmt;
use std::ops::{Add, Sub};

/// A single point in virtual time, expressed as an integer tick count at the
/// same fixed resolution as [`Duration`].
///
/// `TimePoint` never advances on its own: it only moves forward when a
/// caller (in practice, the scheduler's run loop) explicitly sets it to a
/// later value. Subtracting two time points yields a [`Duration`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimePoint {
    ticks: i64,
}

impl TimePoint {
    /// The origin of virtual time.
    pub const ZERO: TimePoint = TimePoint { ticks: 0 };

    /// Builds a time point from a raw tick count.
    pub const fn from_ticks(ticks: i64) -> Self {
        Self { ticks }
    }

    /// Returns the raw tick count.
    pub const fn as_ticks(&self) -> i64 {
        self.ticks
    }
}

impl Default for TimePoint {
    fn default() -> Self {
        TimePoint::ZERO
    }
}

impl Add<Duration> for TimePoint {
    type Output = TimePoint;
    fn add(self, rhs: Duration) -> TimePoint {
        TimePoint::from_ticks(self.ticks + rhs.as_ticks())
    }
}

impl Sub<Duration> for TimePoint {
    type Output = TimePoint;
    fn sub(self, rhs: Duration) -> TimePoint {
        TimePoint::from_ticks(self.ticks - rhs.as_ticks())
    }
}

impl Sub<TimePoint> for TimePoint {
    type Output = Duration;
    fn sub(self, rhs: TimePoint) -> Duration {
        Duration::from_ticks(self.ticks - rhs.ticks)
    }
}

impl fmt::Display for TimePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t={}", self.ticks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_by_duration() {
        let t = TimePoint::from_ticks(100);
        assert_eq!(t + Duration::from_ticks(50), TimePoint::from_ticks(150));
        assert_eq!(t - Duration::from_ticks(50), TimePoint::from_ticks(50));
    }

    #[test]
    fn difference_yields_duration() {
        let a = TimePoint::from_ticks(200);
        let b = TimePoint::from_ticks(80);
        assert_eq!(a - b, Duration::from_ticks(120));
    }

    #[test]
    fn ordering_is_monotone_friendly() {
        let mut t = TimePoint::ZERO;
        let next = t + Duration::from_secs(1);
        assert!(next >= t);
        t = next;
        assert_eq!(t, TimePoint::from_ticks(crate::TICKS_PER_SECOND));
    }
}
