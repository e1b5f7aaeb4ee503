//! `AgentState` - everything a behavior tree may read or write for one agent.

use nt_core::{AgentId, Vec3};

use crate::{Blackboard, Locomotion, PerceptionConfig, Sighting};

/// Mutable simulation state of one agent.
///
/// `position`, `velocity`, and `blackboard` are public and may be written by
/// any behavior action.  The current path is private so that the invariant
/// `current_path_index <= current_path.len()` always holds; an index equal to
/// the length means the agent has arrived.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentState {
    pub id:         AgentId,
    pub position:   Vec3,
    pub velocity:   Vec3,
    pub locomotion: Locomotion,
    pub perception: PerceptionConfig,

    /// Agents seen at the start of the current tick, nearest first.
    /// Written only by the world's perception pass.
    pub visible_agents: Vec<Sighting>,

    /// Free-form memory shared between behavior nodes across ticks.
    pub blackboard: Blackboard,

    current_path:       Vec<Vec3>,
    current_path_index: usize,
}

impl AgentState {
    pub fn new(id: AgentId, position: Vec3) -> Self {
        Self {
            id,
            position,
            velocity:           Vec3::ZERO,
            locomotion:         Locomotion::default(),
            perception:         PerceptionConfig::default(),
            visible_agents:     Vec::new(),
            blackboard:         Blackboard::new(),
            current_path:       Vec::new(),
            current_path_index: 0,
        }
    }

    // ── Path following ────────────────────────────────────────────────────

    /// Waypoints from the last successful path request.
    #[inline]
    pub fn current_path(&self) -> &[Vec3] {
        &self.current_path
    }

    /// Index of the next waypoint to reach, in `0..=current_path().len()`.
    #[inline]
    pub fn current_path_index(&self) -> usize {
        self.current_path_index
    }

    /// Replace the current path and restart it from the first waypoint.
    pub fn set_path(&mut self, path: Vec<Vec3>) {
        self.current_path = path;
        self.current_path_index = 0;
    }

    /// Drop the current path.
    pub fn clear_path(&mut self) {
        self.current_path.clear();
        self.current_path_index = 0;
    }

    /// `true` if there is a path with at least one waypoint left.
    #[inline]
    pub fn has_path(&self) -> bool {
        self.current_path_index < self.current_path.len()
    }

    /// `true` once every waypoint of a non-empty path has been reached.
    #[inline]
    pub fn has_arrived(&self) -> bool {
        !self.current_path.is_empty() && self.current_path_index == self.current_path.len()
    }

    /// The waypoint currently being approached.
    #[inline]
    pub fn next_waypoint(&self) -> Option<Vec3> {
        self.current_path.get(self.current_path_index).copied()
    }

    /// Final waypoint of the current path.
    #[inline]
    pub fn destination(&self) -> Option<Vec3> {
        self.current_path.last().copied()
    }

    /// Mark the current waypoint reached.  Saturates at `current_path().len()`.
    pub fn advance_waypoint(&mut self) {
        if self.current_path_index < self.current_path.len() {
            self.current_path_index += 1;
        }
    }

    // ── Perception ────────────────────────────────────────────────────────

    /// The nearest visible agent, if any.
    pub fn nearest_visible(&self) -> Option<&Sighting> {
        self.visible_agents.first()
    }

    /// `true` if `other` was seen at the start of this tick.
    pub fn can_see(&self, other: AgentId) -> bool {
        self.visible_agents.iter().any(|s| s.id == other)
    }
}
