//! Time source abstraction
//!
//! The engine only ever looks at differences between two timestamps, so the
//! counter is allowed to wrap at its native width.

/// Monotonic microsecond counter
///
/// Implementations must not block. The value wraps around at `u32::MAX`
/// (about 71.6 minutes), the same as an Arduino-style `micros()`.
pub trait MicrosClock {
    /// Current time in microseconds
    fn now_micros(&self) -> u32;
}

/// Microseconds elapsed between `earlier` and `now`
///
/// Uses wrapping subtraction so a counter overflow between the two samples
/// still yields the true (small) delta.
#[inline]
pub fn elapsed_micros(now: u32, earlier: u32) -> u32 {
    now.wrapping_sub(earlier)
}
