//! `nt-sim` - agents, perception, and the tick loop for the navtree framework.
//!
//! # Tick loop
//!
//! ```text
//! for tick in 0..config.total_ticks:
//!   ① Perception - bulk-load all positions into an R-tree; every agent
//!                  collects the others inside its range and view cone
//!                  (parallel with the `parallel` feature).
//!   ② Behavior   - in spawn order: install sightings, tick the agent's
//!                  behavior tree against the shared grid.
//!   ③ Clock      - advance by tick_duration_secs.
//! ```
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Runs the perception pass on Rayon's thread pool.       |
//! | `serde`    | Serde derives on `TickSummary` and `WorldStats`.       |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use nt_behavior::{BehaviorTree, library};
//! use nt_sim::{AgentSpec, NoopObserver, WorldBuilder};
//!
//! let tree = Arc::new(BehaviorTree::new(library::patrol(waypoints))?);
//! let mut world = WorldBuilder::new(config, grid)
//!     .agent(AgentSpec::at(start).with_tree(tree))
//!     .build()?;
//! world.run(&mut NoopObserver)?;
//! ```

pub mod agent;
pub mod builder;
pub mod error;
pub mod observer;
pub mod perception;
pub mod world;


pub use agent::{Agent, AgentSpec};
pub use builder::WorldBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, TickSummary, WorldObserver};
pub use perception::PerceptionSnapshot;
pub use world::{World, WorldStats};
