//! Time management for the simulation
//!
//! The simulation operates in discrete ticks (one simulated minute each).
//! Every tick advances a synthetic clock by a fixed number of time units
//! (seconds-equivalent), so waits are measured in clock units and reported
//! in whole minutes.

use serde::{Deserialize, Serialize};

/// Number of clock units that make up one reported minute of waiting.
pub const UNITS_PER_MINUTE: u64 = 60;

/// Convert an elapsed span of clock units into whole minutes.
pub fn units_to_minutes(units: u64) -> u64 {
    units / UNITS_PER_MINUTE
}

/// Manages simulation time as a tick counter plus a unit clock
///
/// # Example
/// ```
/// use triage_simulator_core_rs::SimClock;
///
/// let mut clock = SimClock::new(0, 60, 1440);
/// assert_eq!(clock.ticks_elapsed(), 0);
/// assert_eq!(clock.now(), 0);
///
/// let tick = clock.advance_tick();
/// assert_eq!(tick, 0);
/// assert_eq!(clock.now(), 60);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimClock {
    /// Ticks started since the run began
    ticks_elapsed: usize,
    /// Current clock reading in time units
    now: u64,
    /// Clock units added per tick
    units_per_tick: u64,
    /// Ticks making up one simulated day
    ticks_per_day: usize,
}

impl SimClock {
    /// Create a clock seeded at `start` units
    ///
    /// # Panics
    /// Panics if `ticks_per_day` is zero.
    pub fn new(start: u64, units_per_tick: u64, ticks_per_day: usize) -> Self {
        assert!(ticks_per_day > 0, "ticks_per_day must be positive");
        Self {
            ticks_elapsed: 0,
            now: start,
            units_per_tick,
            ticks_per_day,
        }
    }

    /// Start the next tick
    ///
    /// Moves the clock forward by `units_per_tick` and returns the index of
    /// the tick that just began (0-based).
    ///
    /// # Example
    /// ```
    /// use triage_simulator_core_rs::SimClock;
    ///
    /// let mut clock = SimClock::new(600, 60, 1440);
    /// assert_eq!(clock.advance_tick(), 0);
    /// assert_eq!(clock.advance_tick(), 1);
    /// assert_eq!(clock.now(), 720);
    /// ```
    pub fn advance_tick(&mut self) -> usize {
        let tick = self.ticks_elapsed;
        self.now += self.units_per_tick;
        self.ticks_elapsed += 1;
        tick
    }

    /// Number of ticks started so far
    pub fn ticks_elapsed(&self) -> usize {
        self.ticks_elapsed
    }

    /// Current clock reading in units
    pub fn now(&self) -> u64 {
        self.now
    }

    /// Whether a full day of ticks has been executed
    ///
    /// # Example
    /// ```
    /// use triage_simulator_core_rs::SimClock;
    ///
    /// let mut clock = SimClock::new(0, 60, 3);
    /// for _ in 0..3 {
    ///     clock.advance_tick();
    /// }
    /// assert!(clock.is_day_complete());
    /// ```
    pub fn is_day_complete(&self) -> bool {
        self.ticks_elapsed >= self.ticks_per_day
    }

    /// Ticks left before the day completes
    pub fn ticks_remaining(&self) -> usize {
        self.ticks_per_day.saturating_sub(self.ticks_elapsed)
    }

    pub fn ticks_per_day(&self) -> usize {
        self.ticks_per_day
    }

    pub fn units_per_tick(&self) -> u64 {
        self.units_per_tick
    }
}
