//! `BehaviorTree` (immutable arena) and `TreeState` (per-agent resume state).
//!
//! # Layout
//!
//! [`BehaviorTree::new`] flattens a [`Node`] tree in pre-order.  Node `i`
//! owns the contiguous index range `i..end[i]`, so resetting a subtree is a
//! linear sweep with no pointer chasing.
//!
//! # Resume state
//!
//! The tree itself is never mutated by a tick and may be shared (`Arc`) by
//! any number of agents.  Everything that must survive between ticks lives
//! in a [`TreeState`] of flat arrays indexed by [`NodeId`]:
//!
//! - `cursor`: for `Sequence`/`Selector`, the child position to resume at;
//!   for a repeater, the number of successful child runs so far.
//! - `running`: whether the node returned `Running` on its last tick.  Used
//!   to deliver [`Action::abort`] when a subtree is cut short.
//!
//! A composite that finishes (returns anything but `Running`) resets its
//! whole subtree, so the next activation starts from the top.

use std::fmt;
use std::sync::Arc;

use nt_agent::AgentState;
use nt_core::{NodeId, TreeId};
use tracing::debug;

use crate::node::{Decorator, Node, ParallelPolicy, Repeat};
use crate::{Action, ActionContext, BehaviorError, BehaviorResult, Condition, Status, TickContext};

// ── Arena ─────────────────────────────────────────────────────────────────────

enum Kind {
    Sequence,
    Selector,
    Parallel { success: ParallelPolicy, failure: ParallelPolicy },
    Decorator(Decorator),
    Condition(Arc<dyn Condition>),
    Action(Arc<dyn Action>),
}

struct Slot {
    name:     String,
    kind:     Kind,
    children: Vec<u32>,
    /// One past the last index of this node's subtree.
    end:      u32,
}

/// A validated, immutable behavior tree.
pub struct BehaviorTree {
    id:    TreeId,
    slots: Vec<Slot>,
}

impl BehaviorTree {
    /// Validate and flatten `root`.
    ///
    /// # Errors
    ///
    /// [`BehaviorError::MalformedTree`] if a decorator does not have exactly
    /// one child or a parallel has none.
    pub fn new(root: Node) -> BehaviorResult<Self> {
        let size = root.size();
        if u32::try_from(size).is_err() {
            return Err(BehaviorError::TooManyNodes(size));
        }
        let mut slots = Vec::with_capacity(size);
        flatten(root, &mut slots)?;
        Ok(Self { id: TreeId::next(), slots })
    }

    #[inline]
    pub fn id(&self) -> TreeId {
        self.id
    }

    /// Number of nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Always `false`: a tree has at least its root.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn node_name(&self, node: NodeId) -> Option<&str> {
        self.slots.get(node.index()).map(|s| s.name.as_str())
    }

    /// Arena ids of the direct children of `node`.
    pub fn children_of(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.slots
            .get(node.index())
            .map(|s| s.children.as_slice())
            .unwrap_or(&[])
            .iter()
            .map(|&c| NodeId(c))
    }

    /// Fresh execution state sized for this tree.
    pub fn new_state(&self) -> TreeState {
        TreeState {
            tree:    self.id,
            cursor:  vec![0; self.slots.len()],
            running: vec![false; self.slots.len()],
        }
    }

    /// Tick the root once.
    ///
    /// If `state` was created for a different tree it is discarded and
    /// rebuilt, so evaluation never sees stale resume indices.
    pub fn tick(&self, state: &mut TreeState, agent: &mut AgentState, ctx: &TickContext<'_>) -> Status {
        if state.tree != self.id {
            debug!(agent = %agent.id, stale = %state.tree, tree = %self.id, "resetting foreign tree state");
            *state = self.new_state();
        }
        self.tick_node(0, state, agent, ctx)
    }

    /// Abort every running action and rewind all composites.
    pub fn halt(&self, state: &mut TreeState, agent: &mut AgentState) {
        if state.tree == self.id {
            self.reset_subtree(0, state, agent);
        } else {
            *state = self.new_state();
        }
    }

    // ── Evaluation ────────────────────────────────────────────────────────

    fn tick_node(
        &self,
        idx:   usize,
        state: &mut TreeState,
        agent: &mut AgentState,
        ctx:   &TickContext<'_>,
    ) -> Status {
        let slot = &self.slots[idx];
        let status = match &slot.kind {
            Kind::Sequence => self.tick_ordered(idx, Status::Failure, state, agent, ctx),
            Kind::Selector => self.tick_ordered(idx, Status::Success, state, agent, ctx),
            Kind::Parallel { success, failure } => {
                self.tick_parallel(idx, *success, *failure, state, agent, ctx)
            }
            Kind::Decorator(kind) => self.tick_decorator(idx, *kind, state, agent, ctx),
            Kind::Condition(condition) => Status::from(condition.check(agent)),
            Kind::Action(action) => {
                let mut actx = ActionContext {
                    agent,
                    grid:       ctx.grid,
                    pathfinder: ctx.pathfinder,
                    delta_time: ctx.delta_time,
                    tick:       ctx.tick,
                    node:       NodeId(idx as u32),
                };
                action.run(&mut actx)
            }
        };
        state.running[idx] = status.is_running();
        status
    }

    /// Sequence (`stop_on = Failure`) and Selector (`stop_on = Success`).
    fn tick_ordered(
        &self,
        idx:     usize,
        stop_on: Status,
        state:   &mut TreeState,
        agent:   &mut AgentState,
        ctx:     &TickContext<'_>,
    ) -> Status {
        let children = &self.slots[idx].children;
        let start = state.cursor[idx] as usize;
        for (pos, &child) in children.iter().enumerate().skip(start) {
            match self.tick_node(child as usize, state, agent, ctx) {
                Status::Running => {
                    state.cursor[idx] = pos as u32;
                    return Status::Running;
                }
                s if s == stop_on => {
                    self.reset_subtree(idx, state, agent);
                    return s;
                }
                _ => {}
            }
        }
        self.reset_subtree(idx, state, agent);
        stop_on.invert()
    }

    fn tick_parallel(
        &self,
        idx:     usize,
        success: ParallelPolicy,
        failure: ParallelPolicy,
        state:   &mut TreeState,
        agent:   &mut AgentState,
        ctx:     &TickContext<'_>,
    ) -> Status {
        let children = &self.slots[idx].children;
        let (mut succeeded, mut failed) = (0usize, 0usize);
        for &child in children {
            match self.tick_node(child as usize, state, agent, ctx) {
                Status::Success => succeeded += 1,
                Status::Failure => failed += 1,
                Status::Running => {}
            }
        }

        let met = |policy: ParallelPolicy, count: usize| match policy {
            ParallelPolicy::RequireAll => count == children.len(),
            ParallelPolicy::RequireOne => count > 0,
        };
        let status = if met(success, succeeded) {
            Status::Success
        } else if met(failure, failed) || succeeded + failed == children.len() {
            Status::Failure
        } else {
            return Status::Running;
        };
        self.reset_subtree(idx, state, agent);
        status
    }

    fn tick_decorator(
        &self,
        idx:   usize,
        kind:  Decorator,
        state: &mut TreeState,
        agent: &mut AgentState,
        ctx:   &TickContext<'_>,
    ) -> Status {
        let child = self.slots[idx].children[0] as usize;
        let status = self.tick_node(child, state, agent, ctx);
        match kind {
            Decorator::Inverter => status.invert(),
            Decorator::Succeeder => {
                if status.is_running() { Status::Running } else { Status::Success }
            }
            Decorator::Repeater(repeat) => match status {
                Status::Running => Status::Running,
                Status::Failure => {
                    self.reset_subtree(idx, state, agent);
                    Status::Failure
                }
                Status::Success => {
                    let done = state.cursor[idx].saturating_add(1);
                    match repeat {
                        Repeat::Times(n) if done >= n => {
                            self.reset_subtree(idx, state, agent);
                            Status::Success
                        }
                        _ => {
                            state.cursor[idx] = done;
                            Status::Running
                        }
                    }
                }
            },
        }
    }

    /// Rewind `idx` and its descendants, aborting any running actions.
    fn reset_subtree(&self, idx: usize, state: &mut TreeState, agent: &mut AgentState) {
        let end = self.slots[idx].end as usize;
        for j in idx..end {
            if state.running[j] {
                if let Kind::Action(action) = &self.slots[j].kind {
                    action.abort(agent, NodeId(j as u32));
                }
                state.running[j] = false;
            }
            state.cursor[j] = 0;
        }
    }
}

fn flatten(node: Node, slots: &mut Vec<Slot>) -> BehaviorResult<u32> {
    let malformed = |reason: &str| BehaviorError::MalformedTree {
        node:   node.name().to_owned(),
        reason: reason.to_owned(),
    };
    match &node {
        Node::Decorator { children, .. } if children.len() != 1 => {
            return Err(malformed(&format!("decorator needs exactly one child, has {}", children.len())));
        }
        Node::Parallel { children, .. } if children.is_empty() => {
            return Err(malformed("parallel needs at least one child"));
        }
        _ => {}
    }

    let (name, kind, children) = match node {
        Node::Sequence { name, children } => (name, Kind::Sequence, children),
        Node::Selector { name, children } => (name, Kind::Selector, children),
        Node::Parallel { name, success, failure, children } => {
            (name, Kind::Parallel { success, failure }, children)
        }
        Node::Decorator { name, kind, children } => (name, Kind::Decorator(kind), children),
        Node::Condition { name, condition } => (name, Kind::Condition(condition), Vec::new()),
        Node::Action { name, action } => (name, Kind::Action(action), Vec::new()),
    };

    let idx = slots.len() as u32;
    slots.push(Slot { name, kind, children: Vec::new(), end: 0 });
    let child_ids = children
        .into_iter()
        .map(|child| flatten(child, slots))
        .collect::<BehaviorResult<Vec<_>>>()?;
    let end = slots.len() as u32;
    let slot = &mut slots[idx as usize];
    slot.children = child_ids;
    slot.end = end;
    Ok(idx)
}

impl fmt::Debug for BehaviorTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BehaviorTree")
            .field("id", &self.id)
            .field("nodes", &self.slots.iter().map(|s| s.name.as_str()).collect::<Vec<_>>())
            .finish()
    }
}

// ── TreeState ─────────────────────────────────────────────────────────────────

/// Per-agent execution state of one [`BehaviorTree`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeState {
    tree:    TreeId,
    cursor:  Vec<u32>,
    running: Vec<bool>,
}

impl TreeState {
    /// The tree this state was created for.
    #[inline]
    pub fn tree(&self) -> TreeId {
        self.tree
    }

    /// `true` if `node` returned `Running` on its last tick.
    pub fn is_running(&self, node: NodeId) -> bool {
        self.running.get(node.index()).copied().unwrap_or(false)
    }

    /// Resume position of a composite, or completed runs of a repeater.
    pub fn cursor(&self, node: NodeId) -> u32 {
        self.cursor.get(node.index()).copied().unwrap_or(0)
    }

    /// `true` if nothing is mid-flight.
    pub fn is_idle(&self) -> bool {
        !self.running.iter().any(|&r| r)
    }
}
