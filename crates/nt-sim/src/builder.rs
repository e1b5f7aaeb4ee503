//! Fluent builder for constructing a [`World`].

use nt_core::{SimClock, SimConfig};
use nt_spatial::{AStarPathFinder, NavGrid, PathFinder};
use tracing::info;

use crate::{AgentSpec, SimResult, World};

/// Fluent builder for [`World<P>`].
///
/// # Required inputs
///
/// - [`SimConfig`] - tick duration, total ticks, snapshot interval
/// - [`NavGrid`] - the shared navigation grid
///
/// # Optional inputs (have defaults)
///
/// | Method            | Default                     |
/// |-------------------|-----------------------------|
/// | `.pathfinder(p)`  | `AStarPathFinder::default()`|
/// | `.agent(spec)`    | No agents                   |
///
/// # Example
///
/// ```rust,ignore
/// let mut world = WorldBuilder::new(config, grid)
///     .pathfinder(AStarPathFinder::new().with_max_expansions(50_000))
///     .agent(AgentSpec::at(start).with_tree(tree))
///     .build()?;
/// world.run(&mut NoopObserver)?;
/// ```
pub struct WorldBuilder<P: PathFinder = AStarPathFinder> {
    config:     SimConfig,
    grid:       NavGrid,
    pathfinder: P,
    agents:     Vec<AgentSpec>,
}

impl WorldBuilder<AStarPathFinder> {
    /// Create a builder with all required inputs.
    pub fn new(config: SimConfig, grid: NavGrid) -> Self {
        Self { config, grid, pathfinder: AStarPathFinder::default(), agents: Vec::new() }
    }
}

impl<P: PathFinder> WorldBuilder<P> {
    /// Use a different path finder.
    pub fn pathfinder<Q: PathFinder>(self, pathfinder: Q) -> WorldBuilder<Q> {
        WorldBuilder { config: self.config, grid: self.grid, pathfinder, agents: self.agents }
    }

    /// Queue an agent to spawn at build time.  Agents get ids in the order
    /// they are added.
    pub fn agent(mut self, spec: AgentSpec) -> Self {
        self.agents.push(spec);
        self
    }

    pub fn agents(mut self, specs: impl IntoIterator<Item = AgentSpec>) -> Self {
        self.agents.extend(specs);
        self
    }

    /// Validate the config and every agent spec, then spawn the agents.
    pub fn build(self) -> SimResult<World<P>> {
        self.config.validate()?;

        let mut world = World {
            config:     self.config,
            clock:      SimClock::new(),
            grid:       self.grid,
            pathfinder: self.pathfinder,
            agents:     Vec::with_capacity(self.agents.len()),
            next_id:    0,
        };
        for spec in self.agents {
            world.spawn(spec)?;
        }

        info!(
            agents = world.len(),
            cells = world.grid.cell_count(),
            walkable = world.grid.walkable_count(),
            total_ticks = world.config.total_ticks,
            "world built"
        );
        Ok(world)
    }
}
