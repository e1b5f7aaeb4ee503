//! Standard navigation actions, conditions, and ready-made subtrees.
//!
//! Actions keep their progress on the agent (`current_path`,
//! `current_path_index`, blackboard entries) so the same tree can drive any
//! number of agents.

use nt_agent::{AgentState, StepOutcome};
use nt_core::{NodeId, Vec3};
use tracing::debug;

use crate::{Action, ActionContext, Node, Status};

/// Blackboard key holding the patrol cursor used by [`patrol`].
pub const PATROL_CURSOR_KEY: &str = "patrol.cursor";

// ── Targets ───────────────────────────────────────────────────────────────────

/// Where a [`RequestPath`] should lead.
#[derive(Debug, Clone, PartialEq)]
pub enum Target {
    /// A fixed world position.
    Point(Vec3),
    /// A position stored on the blackboard under this key.
    Blackboard(String),
    /// The nearest agent seen this tick.
    NearestVisible,
    /// `points[cursor % len]`, with the cursor an integer blackboard entry
    /// (absent means 0).  Advanced by [`AdvanceCursor`].
    Waypoints { cursor_key: String, points: Vec<Vec3> },
}

impl Target {
    /// Resolve against `agent`, or `None` if the target is unavailable.
    pub fn resolve(&self, agent: &AgentState) -> Option<Vec3> {
        match self {
            Target::Point(p) => Some(*p),
            Target::Blackboard(key) => agent.blackboard.get_position(key),
            Target::NearestVisible => agent.nearest_visible().map(|s| s.position),
            Target::Waypoints { cursor_key, points } => {
                if points.is_empty() {
                    return None;
                }
                let cursor = agent.blackboard.get_int(cursor_key).unwrap_or(0);
                let i = cursor.rem_euclid(points.len() as i64) as usize;
                Some(points[i])
            }
        }
    }
}

// ── Actions ───────────────────────────────────────────────────────────────────

/// Query a path to a [`Target`] and install it as the agent's current path.
///
/// `Success` on a non-empty path.  `Failure` if the target cannot be
/// resolved or no path exists; the previous path is left untouched.
#[derive(Debug, Clone)]
pub struct RequestPath {
    pub target: Target,
}

impl Action for RequestPath {
    fn run(&self, ctx: &mut ActionContext<'_>) -> Status {
        let Some(goal) = self.target.resolve(ctx.agent) else {
            return Status::Failure;
        };
        let path = ctx.find_path(goal);
        if path.is_empty() {
            debug!(agent = %ctx.agent.id, from = %ctx.agent.position, to = %goal, "no path");
            return Status::Failure;
        }
        ctx.agent.set_path(path.waypoints);
        Status::Success
    }
}

/// Move one tick along the current path.  `Some(true)` once the final
/// waypoint is reached, `Some(false)` while moving, `None` with no path.
/// Velocity is zero whenever the agent is not travelling.
fn follow_path(agent: &mut AgentState, dt: f32) -> Option<bool> {
    let Some(waypoint) = agent.next_waypoint() else {
        agent.velocity = Vec3::ZERO;
        return None;
    };
    let locomotion = agent.locomotion;
    if locomotion.step_toward(&mut agent.position, &mut agent.velocity, waypoint, dt) == StepOutcome::Arrived {
        agent.advance_waypoint();
    }
    if agent.has_arrived() {
        agent.velocity = Vec3::ZERO;
        return Some(true);
    }
    Some(false)
}

/// Follow the current path to its end.
///
/// `Failure` if the path is empty or already exhausted, `Running` while
/// waypoints remain, `Success` when the last one is reached.
#[derive(Debug, Clone, Copy, Default)]
pub struct MoveToWaypoint;

impl Action for MoveToWaypoint {
    fn run(&self, ctx: &mut ActionContext<'_>) -> Status {
        match follow_path(ctx.agent, ctx.delta_time) {
            None => Status::Failure,
            Some(true) => Status::Success,
            Some(false) => Status::Running,
        }
    }

    fn abort(&self, agent: &mut AgentState, _node: NodeId) {
        agent.velocity = Vec3::ZERO;
    }
}

/// One tick of path following that never reports `Running`: `Success` after
/// moving, `Failure` with no path.  For subtrees that replan every tick.
///
/// A fresh path starts at the center of the agent's own cell; that waypoint
/// is skipped so replanning every tick still makes progress.
#[derive(Debug, Clone, Copy, Default)]
pub struct StepAlongPath;

impl Action for StepAlongPath {
    fn run(&self, ctx: &mut ActionContext<'_>) -> Status {
        let agent = &mut *ctx.agent;
        if agent.current_path_index() == 0 && agent.current_path().len() > 1 {
            agent.advance_waypoint();
        }
        Status::from(follow_path(agent, ctx.delta_time).is_some())
    }
}

/// Zero the agent's velocity and fail.  Fallback branch for movement
/// subtrees that could not proceed this tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct Halt;

impl Action for Halt {
    fn run(&self, ctx: &mut ActionContext<'_>) -> Status {
        ctx.agent.velocity = Vec3::ZERO;
        Status::Failure
    }
}

/// Add one to an integer blackboard cursor, wrapping at `len`.
#[derive(Debug, Clone)]
pub struct AdvanceCursor {
    pub key: String,
    pub len: usize,
}

impl Action for AdvanceCursor {
    fn run(&self, ctx: &mut ActionContext<'_>) -> Status {
        if self.len == 0 {
            return Status::Failure;
        }
        let bb = &mut ctx.agent.blackboard;
        let next = (bb.get_int(&self.key).unwrap_or(0) + 1).rem_euclid(self.len as i64);
        bb.set(self.key.as_str(), next);
        Status::Success
    }
}

/// Stay `Running` for `seconds` of simulated time, then succeed.
///
/// Elapsed time is kept on the blackboard under a key derived from the node
/// id, and dropped on completion or abort.
#[derive(Debug, Clone, Copy)]
pub struct Wait {
    pub seconds: f64,
}

impl Wait {
    pub fn timer_key(node: NodeId) -> String {
        format!("wait.{}", node.0)
    }
}

impl Action for Wait {
    fn run(&self, ctx: &mut ActionContext<'_>) -> Status {
        let key = Wait::timer_key(ctx.node);
        let bb = &mut ctx.agent.blackboard;
        let elapsed = bb.get_float(&key).unwrap_or(0.0) + f64::from(ctx.delta_time);
        if elapsed >= self.seconds {
            bb.remove(&key);
            Status::Success
        } else {
            bb.set(key, elapsed);
            Status::Running
        }
    }

    fn abort(&self, agent: &mut AgentState, node: NodeId) {
        agent.blackboard.remove(&Wait::timer_key(node));
    }
}

// ── Node constructors ─────────────────────────────────────────────────────────

pub fn request_path(target: Target) -> Node {
    Node::action("request_path", RequestPath { target })
}

pub fn move_to_waypoint() -> Node {
    Node::action("move_to_waypoint", MoveToWaypoint)
}

pub fn wait(seconds: f64) -> Node {
    Node::action("wait", Wait { seconds })
}

/// Path exists and has waypoints left.
pub fn has_path() -> Node {
    Node::condition("has_path", |a: &AgentState| a.has_path())
}

/// The last waypoint of a non-empty path has been reached.
pub fn path_complete() -> Node {
    Node::condition("path_complete", |a: &AgentState| a.has_arrived())
}

pub fn sees_any_agent() -> Node {
    Node::condition("sees_any_agent", |a: &AgentState| !a.visible_agents.is_empty())
}

/// `true` when `key` holds `Bool(true)`.
pub fn blackboard_flag(key: impl Into<String>) -> Node {
    let key = key.into();
    let name = format!("flag:{key}");
    Node::condition(name, move |a: &AgentState| a.blackboard.get_bool(&key) == Some(true))
}

/// Visit `waypoints` in order forever, wrapping back to the first.
///
/// Each lap: plan to the waypoint under [`PATROL_CURSOR_KEY`], walk there,
/// bump the cursor.  Fails if a waypoint is unreachable.
pub fn patrol(waypoints: Vec<Vec3>) -> Node {
    let len = waypoints.len();
    let target = Target::Waypoints { cursor_key: PATROL_CURSOR_KEY.to_owned(), points: waypoints };
    Node::repeater(
        "patrol",
        0,
        Node::sequence(
            "patrol_leg",
            vec![
                request_path(target),
                move_to_waypoint(),
                Node::action("next_waypoint", AdvanceCursor { key: PATROL_CURSOR_KEY.to_owned(), len }),
            ],
        ),
    )
}

/// Head for the nearest visible agent, replanning every tick.  Fails, and
/// stops the agent, when nobody is in sight or no path exists.
pub fn chase() -> Node {
    Node::selector(
        "chase",
        vec![
            Node::sequence(
                "pursue",
                vec![
                    sees_any_agent(),
                    request_path(Target::NearestVisible),
                    Node::action("step_along_path", StepAlongPath),
                ],
            ),
            Node::action("halt", Halt),
        ],
    )
}
