//! The `World` struct and its tick loop.

use std::sync::Arc;

use nt_behavior::{BehaviorTree, Status, TickContext};
use nt_core::{AgentId, CoreError, SimClock, SimConfig, Tick, Vec3};
use nt_spatial::{AStarPathFinder, NavGrid, PathFinder};
use tracing::{debug, trace};

use crate::perception::PerceptionSnapshot;
use crate::{Agent, AgentSpec, SimError, SimResult, TickSummary, WorldObserver};

// ── WorldStats ────────────────────────────────────────────────────────────────

/// Point-in-time telemetry.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldStats {
    /// The tick the next update will process.
    pub tick:            Tick,
    pub elapsed_secs:    f64,
    pub agent_count:     usize,
    pub grid_dimensions: [u32; 3],
    pub cell_size:       f32,
    pub cell_count:      usize,
    pub walkable_cells:  usize,
}

// ── World ─────────────────────────────────────────────────────────────────────

/// The simulation runner.
///
/// Each tick:
///
/// 1. **Perception**: freeze every agent's position in a
///    [`PerceptionSnapshot`] and compute each agent's sightings from it
///    (parallel with the `parallel` feature).
/// 2. **Behavior**: in spawn order, install the sightings and tick the
///    agent's tree with the shared grid and path finder.
/// 3. **Clock**: advance by the tick's delta.
///
/// The grid is borrowed immutably for the whole tick; obstacle edits go
/// through [`grid_mut`](Self::grid_mut) between ticks.
///
/// Create via [`WorldBuilder`][crate::WorldBuilder].
pub struct World<P: PathFinder = AStarPathFinder> {
    pub(crate) config:     SimConfig,
    pub(crate) clock:      SimClock,
    pub(crate) grid:       NavGrid,
    pub(crate) pathfinder: P,
    /// Sorted by id, which is also spawn order.
    pub(crate) agents:     Vec<Agent>,
    pub(crate) next_id:    u32,
}

impl<P: PathFinder> World<P> {
    // ── Agents ────────────────────────────────────────────────────────────

    /// Add an agent.  Ids are allocated monotonically and never reused.
    pub fn spawn(&mut self, spec: AgentSpec) -> SimResult<AgentId> {
        spec.validate()?;
        let id = AgentId(self.next_id);
        self.next_id = self
            .next_id
            .checked_add(1)
            .ok_or_else(|| SimError::Config("agent id space exhausted".into()))?;
        debug!(agent = %id, position = %spec.position, "spawn");
        self.agents.push(spec.into_agent(id));
        Ok(id)
    }

    /// Remove an agent, halting its tree first.
    pub fn despawn(&mut self, id: AgentId) -> SimResult<Agent> {
        let pos = self.position_of(id).ok_or(CoreError::AgentNotFound(id))?;
        let mut agent = self.agents.remove(pos);
        agent.clear_behavior_tree();
        debug!(agent = %id, "despawn");
        Ok(agent)
    }

    pub fn agent(&self, id: AgentId) -> Option<&Agent> {
        self.position_of(id).map(|i| &self.agents[i])
    }

    pub fn agent_mut(&mut self, id: AgentId) -> Option<&mut Agent> {
        self.position_of(id).map(|i| &mut self.agents[i])
    }

    /// All live agents in spawn order.
    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    /// Swap an agent's behavior tree, resetting its execution state.
    pub fn set_behavior_tree(&mut self, id: AgentId, tree: Arc<BehaviorTree>) -> SimResult<()> {
        let agent = self.agent_mut(id).ok_or(CoreError::AgentNotFound(id))?;
        agent.set_behavior_tree(tree);
        Ok(())
    }

    fn position_of(&self, id: AgentId) -> Option<usize> {
        self.agents.binary_search_by_key(&id, |a| a.id()).ok()
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn grid(&self) -> &NavGrid {
        &self.grid
    }

    /// Mutable grid access for obstacle edits between ticks.
    pub fn grid_mut(&mut self) -> &mut NavGrid {
        &mut self.grid
    }

    pub fn pathfinder(&self) -> &P {
        &self.pathfinder
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn clock(&self) -> &SimClock {
        &self.clock
    }

    /// The tick the next update will process.
    pub fn current_tick(&self) -> Tick {
        self.clock.current_tick
    }

    /// Shortest path on the world's grid with the world's path finder.
    pub fn find_path(&self, start: Vec3, goal: Vec3) -> Vec<Vec3> {
        self.pathfinder.find_path(&self.grid, start, goal).waypoints
    }

    pub fn stats(&self) -> WorldStats {
        WorldStats {
            tick:            self.clock.current_tick,
            elapsed_secs:    self.clock.elapsed_secs,
            agent_count:     self.agents.len(),
            grid_dimensions: self.grid.dimensions(),
            cell_size:       self.grid.cell_size(),
            cell_count:      self.grid.cell_count(),
            walkable_cells:  self.grid.walkable_count(),
        }
    }

    // ── Stepping ──────────────────────────────────────────────────────────

    /// Advance one tick of `delta_time` seconds.
    ///
    /// # Errors
    ///
    /// [`SimError::Config`] if `delta_time` is negative or not finite.
    pub fn update(&mut self, delta_time: f32) -> SimResult<TickSummary> {
        if !(delta_time.is_finite() && delta_time >= 0.0) {
            return Err(SimError::Config(format!("delta_time must be finite and >= 0, got {delta_time}")));
        }
        Ok(self.process_tick(delta_time))
    }

    /// Run fixed-step ticks from the current tick to `config.end_tick()`.
    ///
    /// Calls observer hooks at every tick boundary.  Use
    /// [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run<O: WorldObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        while self.clock.current_tick < self.config.end_tick() {
            self.step_observed(observer);
        }
        observer.on_world_end(self.clock.current_tick);
        Ok(())
    }

    /// Run exactly `n` fixed-step ticks (ignores `end_tick`).
    pub fn run_ticks<O: WorldObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            self.step_observed(observer);
        }
        Ok(())
    }

    fn step_observed<O: WorldObserver>(&mut self, observer: &mut O) {
        let now = self.clock.current_tick;
        observer.on_tick_start(now);
        let summary = self.process_tick(self.config.tick_duration_secs);
        observer.on_tick_end(&summary);
        if self.config.snapshot_due(now) {
            observer.on_snapshot(now, &self.agents);
        }
    }

    // ── Core tick processing ──────────────────────────────────────────────

    fn process_tick(&mut self, delta_time: f32) -> TickSummary {
        let now = self.clock.current_tick;

        // Phase 1: perception against a frozen start-of-tick snapshot.
        let snapshot = PerceptionSnapshot::capture(&self.agents);
        let sightings = snapshot.sightings_for_all(&self.agents);

        // Phase 2: behavior, sequential in spawn order.
        let ctx = TickContext::new(now, delta_time, &self.grid, &self.pathfinder);
        let mut summary = TickSummary { tick: now, agents: self.agents.len(), ..TickSummary::default() };
        for (agent, visible) in self.agents.iter_mut().zip(sightings) {
            match agent.update(visible, &ctx) {
                Some(Status::Running) => summary.running += 1,
                Some(Status::Success) => summary.succeeded += 1,
                Some(Status::Failure) => summary.failed += 1,
                None => summary.idle += 1,
            }
            if agent.state.velocity != Vec3::ZERO {
                summary.moving += 1;
            }
        }

        self.clock.advance(delta_time);
        summary.elapsed_secs = self.clock.elapsed_secs;
        trace!(
            tick = %now,
            agents = summary.agents,
            running = summary.running,
            failed = summary.failed,
            moving = summary.moving,
            "tick complete"
        );
        summary
    }
}
