//! Millisecond timestamps shared by every scheduled component
//!
//! The tick interrupt counts milliseconds in a `u32`, which wraps after about
//! 49.7 days. All comparisons go through wrapping subtraction so a timer that
//! straddles the wrap still measures the right interval.

use ufmt::derive::uDebug;

/// A reading of the monotonic millisecond counter
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, uDebug)]
pub struct Instant(u32);

impl Instant {
    /// Counter value right after power-on or a post-sleep reset
    pub const ZERO: Instant = Instant(0);

    #[inline]
    pub const fn from_millis(ms: u32) -> Self {
        Instant(ms)
    }

    #[inline]
    pub const fn as_millis(self) -> u32 {
        self.0
    }

    /// Milliseconds from `earlier` to `self`, modulo 2^32
    #[inline]
    pub const fn elapsed_since(self, earlier: Instant) -> u32 {
        self.0.wrapping_sub(earlier.0)
    }

    /// True once at least `interval_ms` have passed since `earlier`
    #[inline]
    pub const fn has_elapsed(self, earlier: Instant, interval_ms: u32) -> bool {
        self.elapsed_since(earlier) >= interval_ms
    }

    #[inline]
    pub const fn offset(self, ms: u32) -> Instant {
        Instant(self.0.wrapping_add(ms))
    }
}
