//! Clock abstraction traits for platform-agnostic countdown timing.
//!
//! The knob never needs more than "how many milliseconds since that instant",
//! so a one-second RTC, a SysTick counter, or `embassy_time::Instant` can all
//! back these traits.

/// Trait for abstracting the clock collaborator.
pub trait TimeSource<I: TimeInstant> {
    /// Returns the current time instant.
    fn now(&self) -> I;
}

/// Trait abstraction for duration types.
pub trait TimeDuration: Copy + PartialEq {
    /// Zero duration constant.
    const ZERO: Self;

    /// Converts duration to milliseconds.
    fn as_millis(&self) -> u64;

    /// Creates duration from milliseconds.
    fn from_millis(millis: u64) -> Self;
}

/// Trait abstraction for instant types.
pub trait TimeInstant: Copy {
    /// Duration type for this instant.
    type Duration: TimeDuration;

    /// Calculates duration since an earlier instant.
    ///
    /// Implementations should saturate to zero if `earlier` is actually later;
    /// the knob does not defend against clock rollback beyond that.
    fn duration_since(&self, earlier: Self) -> Self::Duration;
}

/// Milliseconds elapsed between `earlier` and `now`.
#[inline]
pub(crate) fn millis_between<I: TimeInstant>(now: I, earlier: I) -> u64 {
    now.duration_since(earlier).as_millis()
}
