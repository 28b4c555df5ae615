//! Time abstraction traits for platform-agnostic timing.
//!
//! The sequencer never sleeps. It reads instants from a [`TimeSource`] and
//! measures everything as elapsed time since a recorded start, so instants
//! that wrap (32-bit millisecond counters) work as long as
//! [`TimeInstant::duration_since`] handles the wrap.

/// Trait for abstracting time sources.
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

    /// Saturating subtraction (returns ZERO on underflow).
    fn saturating_sub(self, other: Self) -> Self;
}

/// Trait abstraction for instant types.
pub trait TimeInstant: Copy {
    /// Duration type for this instant.
    type Duration: TimeDuration;

    /// Calculates duration since an earlier instant.
    fn duration_since(&self, earlier: Self) -> Self::Duration;
}

/// A one-shot countdown measured from the instant it was armed.
#[derive(Debug, Clone, Copy)]
pub struct Countdown<I: TimeInstant> {
    started: I,
    length_ms: u64,
}

impl<I: TimeInstant> Countdown<I> {
    /// Arms a countdown of `length_ms` starting at `now`.
    pub fn start(now: I, length_ms: u64) -> Self {
        Self {
            started: now,
            length_ms,
        }
    }

    /// Milliseconds elapsed since the countdown was armed.
    pub fn elapsed_ms(&self, now: I) -> u64 {
        now.duration_since(self.started).as_millis()
    }

    /// Returns true once the full length has elapsed.
    pub fn is_expired(&self, now: I) -> bool {
        self.elapsed_ms(now) >= self.length_ms
    }

    /// Time left before expiry, `ZERO` once expired.
    pub fn remaining(&self, now: I) -> I::Duration {
        I::Duration::from_millis(self.length_ms.saturating_sub(self.elapsed_ms(now)))
    }

    /// Total length in milliseconds.
    pub fn length_ms(&self) -> u64 {
        self.length_ms
    }
}
