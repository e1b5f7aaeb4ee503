//! `Agent` (state bound to a behavior tree) and `AgentSpec` (spawn recipe).

use std::sync::Arc;

use nt_agent::{AgentState, Blackboard, BlackboardValue, Locomotion, PerceptionConfig, Sighting};
use nt_behavior::{BehaviorTree, Status, TickContext, TreeState};
use nt_core::{AgentId, Vec3};
use tracing::debug;

use crate::{SimError, SimResult};

// ── AgentSpec ─────────────────────────────────────────────────────────────────

/// Everything needed to spawn an agent.
///
/// ```rust,ignore
/// let id = world.spawn(
///     AgentSpec::at(Vec3::new(1.5, 1.5, 0.5))
///         .with_tree(patrol_tree.clone())
///         .with_perception(PerceptionConfig { range: 8.0, field_of_view_deg: Some(120.0) }),
/// )?;
/// ```
#[derive(Clone, Debug, Default)]
pub struct AgentSpec {
    pub position:   Vec3,
    pub locomotion: Locomotion,
    pub perception: PerceptionConfig,
    pub tree:       Option<Arc<BehaviorTree>>,
    /// Initial blackboard contents.
    pub blackboard: Blackboard,
}

impl AgentSpec {
    pub fn at(position: Vec3) -> Self {
        Self { position, ..Self::default() }
    }

    pub fn with_tree(mut self, tree: Arc<BehaviorTree>) -> Self {
        self.tree = Some(tree);
        self
    }

    pub fn with_locomotion(mut self, locomotion: Locomotion) -> Self {
        self.locomotion = locomotion;
        self
    }

    pub fn with_perception(mut self, perception: PerceptionConfig) -> Self {
        self.perception = perception;
        self
    }

    pub fn with_entry(mut self, key: impl Into<String>, value: impl Into<BlackboardValue>) -> Self {
        self.blackboard.set(key, value);
        self
    }

    pub(crate) fn validate(&self) -> SimResult<()> {
        if !self.position.is_finite() {
            return Err(SimError::Config(format!("agent position {} is not finite", self.position)));
        }
        if !self.locomotion.is_valid() {
            return Err(SimError::Config(format!("invalid locomotion {:?}", self.locomotion)));
        }
        if !self.perception.is_valid() {
            return Err(SimError::Config(format!("invalid perception {:?}", self.perception)));
        }
        Ok(())
    }

    pub(crate) fn into_agent(self, id: AgentId) -> Agent {
        let mut state = AgentState::new(id, self.position);
        state.locomotion = self.locomotion;
        state.perception = self.perception;
        state.blackboard = self.blackboard;
        let mut agent = Agent::new(state);
        if let Some(tree) = self.tree {
            agent.set_behavior_tree(tree);
        }
        agent
    }
}

// ── Agent ─────────────────────────────────────────────────────────────────────

/// One simulated entity: its [`AgentState`] plus an optional shared tree and
/// the per-agent execution state for that tree.
#[derive(Debug)]
pub struct Agent {
    pub state:   AgentState,
    behavior:    Option<(Arc<BehaviorTree>, TreeState)>,
    last_status: Option<Status>,
}

impl Agent {
    pub fn new(state: AgentState) -> Self {
        Self { state, behavior: None, last_status: None }
    }

    #[inline]
    pub fn id(&self) -> AgentId {
        self.state.id
    }

    pub fn behavior_tree(&self) -> Option<&Arc<BehaviorTree>> {
        self.behavior.as_ref().map(|(tree, _)| tree)
    }

    pub fn tree_state(&self) -> Option<&TreeState> {
        self.behavior.as_ref().map(|(_, exec)| exec)
    }

    /// Root status from the most recent update, `None` before the first
    /// tick or when there is no tree.
    pub fn last_status(&self) -> Option<Status> {
        self.last_status
    }

    /// Replace the behavior tree.  The old tree is halted (running actions
    /// get their abort hook) and execution state starts fresh.
    pub fn set_behavior_tree(&mut self, tree: Arc<BehaviorTree>) {
        self.clear_behavior_tree();
        debug!(agent = %self.state.id, tree = %tree.id(), "behavior tree set");
        let exec = tree.new_state();
        self.behavior = Some((tree, exec));
    }

    /// Halt and drop the behavior tree, returning it.
    pub fn clear_behavior_tree(&mut self) -> Option<Arc<BehaviorTree>> {
        let (tree, mut exec) = self.behavior.take()?;
        tree.halt(&mut exec, &mut self.state);
        self.last_status = None;
        Some(tree)
    }

    /// Install this tick's sightings, then tick the behavior tree once.
    pub fn update(&mut self, visible: Vec<Sighting>, ctx: &TickContext<'_>) -> Option<Status> {
        self.state.visible_agents = visible;
        let (tree, exec) = self.behavior.as_mut()?;
        let status = tree.tick(exec, &mut self.state, ctx);
        self.last_status = Some(status);
        Some(status)
    }
}
