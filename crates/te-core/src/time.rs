//! Logical time model.
//!
//! # Design
//!
//! Time is represented as a monotonically non-decreasing `Tick` counter
//! supplied by the caller.  The engine never reads a wall clock: all schedule
//! arithmetic is exact integer arithmetic on ticks, so comparisons are O(1)
//! and there is no floating-point drift.
//!
//! A tick has no intrinsic unit.  The conventional mapping for the game layer
//! is 1 tick = 1 in-game minute, and `GameClock` packages that convention
//! (tick counter plus minutes-per-tick) for callers that want human-readable
//! day/hour/minute output.  The scheduler itself only ever sees a bare
//! `Tick`.

use std::fmt;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute logical tick counter.
///
/// Stored as `u64`, which also makes "negative trigger tick" unrepresentable:
/// the invalid-argument class that a signed representation would have to
/// check at runtime is ruled out by the type.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Return the tick `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0 + n)
    }

    /// Ticks elapsed from `earlier` to `self`.
    ///
    /// # Panics
    /// Panics in debug mode if `earlier > self`.
    #[inline]
    pub fn since(self, earlier: Tick) -> u64 {
        self.0 - earlier.0
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl std::ops::Sub for Tick {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Tick) -> u64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── GameClock ─────────────────────────────────────────────────────────────────

/// Maps tick counts to in-game minutes for display purposes.
///
/// `GameClock` is a caller-side convenience: the engine accepts bare `Tick`
/// values and places no constraint on what a tick means.  Cheap to copy,
/// holds no heap data.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameClock {
    /// How many in-game minutes one tick represents.  Default: 1.
    pub minutes_per_tick: u32,
    /// The current tick — advanced by `GameClock::advance()` each iteration.
    pub current_tick: Tick,
}

impl Default for GameClock {
    fn default() -> Self {
        Self { minutes_per_tick: 1, current_tick: Tick::ZERO }
    }
}

impl GameClock {
    /// Create a clock at tick 0 with the given resolution.
    pub fn new(minutes_per_tick: u32) -> Self {
        Self { minutes_per_tick, current_tick: Tick::ZERO }
    }

    /// Advance the clock by one tick.
    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = Tick(self.current_tick.0 + 1);
    }

    /// Advance the clock by `n` ticks.
    #[inline]
    pub fn advance_by(&mut self, n: u64) {
        self.current_tick = Tick(self.current_tick.0 + n);
    }

    /// Elapsed in-game minutes since tick 0.
    #[inline]
    pub fn elapsed_minutes(&self) -> u64 {
        self.current_tick.0 * self.minutes_per_tick as u64
    }

    /// Break elapsed time into (day, hour, minute) components from session
    /// start.  Useful for human-readable logging without a datetime library.
    pub fn elapsed_dhm(&self) -> (u64, u32, u32) {
        let total_mins = self.elapsed_minutes();
        let days = total_mins / 1_440;
        let hours = ((total_mins % 1_440) / 60) as u32;
        let minutes = (total_mins % 60) as u32;
        (days, hours, minutes)
    }

    /// How many ticks span `mins` in-game minutes? (rounds up — an event
    /// scheduled "in 90 minutes" never fires early)
    #[inline]
    pub fn ticks_for_minutes(&self, mins: u64) -> u64 {
        mins.div_ceil(self.minutes_per_tick as u64)
    }

    #[inline]
    pub fn ticks_for_hours(&self, hours: u64) -> u64 {
        self.ticks_for_minutes(hours * 60)
    }
}

impl fmt::Display for GameClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (d, h, m) = self.elapsed_dhm();
        write!(f, "{} (day {} {:02}:{:02})", self.current_tick, d, h, m)
    }
}
