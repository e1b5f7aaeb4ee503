//! Simulation time model.
//!
//! # Design
//!
//! Every call to `World::update` is one `Tick`.  The tick counter is the
//! canonical ordering key (integer, exact); the elapsed simulated seconds are
//! accumulated separately because `update` accepts a variable `delta_time`:
//!
//!   elapsed_secs = Σ delta_time over all ticks so far
//!
//! Fixed-step runs (`World::run`) feed `SimConfig::tick_duration_secs` as the
//! delta every tick, in which case `elapsed_secs == tick * tick_duration_secs`.

use std::fmt;

use crate::{CoreError, CoreResult};

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter.
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

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Tracks the current tick and the simulated seconds elapsed so far.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// The tick that the next `update` will process.
    pub current_tick: Tick,
    /// Simulated seconds accumulated over all completed ticks.
    pub elapsed_secs: f64,
}

impl SimClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Close the current tick, which lasted `delta_secs`.
    #[inline]
    pub fn advance(&mut self, delta_secs: f32) {
        self.current_tick = Tick(self.current_tick.0 + 1);
        self.elapsed_secs += f64::from(delta_secs);
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.2} s)", self.current_tick, self.elapsed_secs)
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Fixed-step simulation configuration.
///
/// Typically loaded from a JSON file by the application crate and passed to
/// the world builder.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    /// Seconds of simulated time per tick in fixed-step runs.  Default: 1/30.
    pub tick_duration_secs: f32,

    /// Total ticks to simulate with `World::run`.
    pub total_ticks: u64,

    /// Emit an observer snapshot every N ticks.  0 disables snapshots.
    pub output_interval_ticks: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tick_duration_secs:    1.0 / 30.0,
            total_ticks:           0,
            output_interval_ticks: 1,
        }
    }
}

impl SimConfig {
    /// The tick at which a fixed-step run ends (exclusive upper bound).
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick(self.total_ticks)
    }

    /// Reject non-positive or non-finite tick durations.
    pub fn validate(&self) -> CoreResult<()> {
        if !(self.tick_duration_secs.is_finite() && self.tick_duration_secs > 0.0) {
            return Err(CoreError::Config(format!(
                "tick_duration_secs must be positive and finite, got {}",
                self.tick_duration_secs
            )));
        }
        Ok(())
    }

    /// `true` if a snapshot is due at `tick`.
    #[inline]
    pub fn snapshot_due(&self, tick: Tick) -> bool {
        self.output_interval_ticks > 0 && tick.0 % self.output_interval_ticks == 0
    }
}
