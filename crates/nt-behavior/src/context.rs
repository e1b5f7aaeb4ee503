//! Per-tick inputs shared by every node, and the view handed to actions.

use nt_agent::AgentState;
use nt_core::{NodeId, Tick, Vec3};
use nt_spatial::{NavGrid, NavPath, PathFinder};

/// World inputs for one behavior tick.
///
/// Built once per tick by the simulation loop and shared immutably by every
/// agent's tree.  The grid borrow guarantees no obstacle mutation can happen
/// while trees are being ticked.
#[derive(Clone, Copy)]
pub struct TickContext<'a> {
    /// Tick being evaluated.
    pub tick: Tick,

    /// Seconds of simulated time covered by this tick.
    pub delta_time: f32,

    /// Shared navigation grid.
    pub grid: &'a NavGrid,

    /// Path engine used by `RequestPath`-style actions.
    pub pathfinder: &'a dyn PathFinder,
}

impl<'a> TickContext<'a> {
    #[inline]
    pub fn new(
        tick:       Tick,
        delta_time: f32,
        grid:       &'a NavGrid,
        pathfinder: &'a dyn PathFinder,
    ) -> Self {
        Self { tick, delta_time, grid, pathfinder }
    }
}

/// Everything an [`Action`][crate::Action] may read or write during one call.
pub struct ActionContext<'a> {
    /// The agent being ticked.  Actions may mutate it freely.
    pub agent: &'a mut AgentState,

    pub grid:       &'a NavGrid,
    pub pathfinder: &'a dyn PathFinder,
    pub delta_time: f32,
    pub tick:       Tick,

    /// Arena index of the action node being run.  Useful for keying
    /// node-private blackboard entries.
    pub node: NodeId,
}

impl ActionContext<'_> {
    /// Query a path from the agent's current position to `goal`.
    pub fn find_path(&self, goal: Vec3) -> NavPath {
        self.pathfinder.find_path(self.grid, self.agent.position, goal)
    }
}
