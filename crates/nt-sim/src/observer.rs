//! World observer trait for progress reporting and data collection.

use nt_core::Tick;

use crate::Agent;

/// Outcome counts for one tick.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TickSummary {
    pub tick:         Tick,
    /// Simulated seconds at the end of the tick, across every `dt` so far.
    pub elapsed_secs: f64,
    /// Live agents during the tick.
    pub agents:       usize,
    /// Agents whose tree returned `Running`.
    pub running:      usize,
    pub succeeded:    usize,
    pub failed:       usize,
    /// Agents with no behavior tree.
    pub idle:         usize,
    /// Agents with non-zero velocity after the tick.
    pub moving:       usize,
}

/// Callbacks invoked by [`World::run`][crate::World::run] at key points in
/// the tick loop.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example - progress printer
///
/// ```rust,ignore
/// struct Progress;
///
/// impl WorldObserver for Progress {
///     fn on_tick_end(&mut self, summary: &TickSummary) {
///         println!("{}: {} moving", summary.tick, summary.moving);
///     }
/// }
/// ```
pub trait WorldObserver {
    /// Called before perception is refreshed.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called after every agent has been updated.
    fn on_tick_end(&mut self, _summary: &TickSummary) {}

    /// Called every `config.output_interval_ticks` ticks, after the tick,
    /// with read-only access to all agents in spawn order.
    fn on_snapshot(&mut self, _tick: Tick, _agents: &[Agent]) {}

    /// Called once after the final tick of [`World::run`][crate::World::run].
    fn on_world_end(&mut self, _final_tick: Tick) {}
}

/// A [`WorldObserver`] that does nothing.
pub struct NoopObserver;

impl WorldObserver for NoopObserver {}
