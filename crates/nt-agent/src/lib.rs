//! `nt-agent` - per-agent state for the `navtree` framework.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`state`]       | `AgentState` (position, velocity, path, perception)       |
//! | [`blackboard`]  | `Blackboard`, `BlackboardValue` - per-agent scratch memory |
//! | [`motion`]      | `Locomotion`, `StepOutcome` - waypoint following          |
//! | [`perception`]  | `PerceptionConfig`, `Sighting`, visibility test           |
//!
//! `AgentState` is plain data: behavior-tree actions mutate it, the world's
//! perception pass fills `visible_agents`, and renderers read `position` /
//! `velocity`.  It owns no behavior tree; that binding lives in `nt-sim`.

pub mod blackboard;
pub mod motion;
pub mod perception;
pub mod state;

#[cfg(test)]
mod tests;

pub use blackboard::{Blackboard, BlackboardValue};
pub use motion::{Locomotion, StepOutcome};
pub use perception::{PerceptionConfig, Sighting};
pub use state::AgentState;
