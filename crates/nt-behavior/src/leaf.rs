//! The two leaf extension points: [`Action`] and [`Condition`].

use nt_agent::AgentState;
use nt_core::NodeId;

use crate::{ActionContext, Status};

/// A leaf that does work, possibly over several ticks.
///
/// Multi-tick actions keep their progress on the agent (path index,
/// blackboard timers), never in `self`: one tree may be shared by many
/// agents.  Any closure `Fn(&mut ActionContext) -> Status` is an action.
///
/// # Example
///
/// ```rust,ignore
/// let idle = Node::action("idle", |ctx: &mut ActionContext<'_>| {
///     ctx.agent.velocity = Vec3::ZERO;
///     Status::Success
/// });
/// ```
pub trait Action: Send + Sync {
    fn run(&self, ctx: &mut ActionContext<'_>) -> Status;

    /// Called when this action was `Running` and its subtree is reset
    /// before it finished: a parent completed, the tree was halted, or the
    /// agent's tree was swapped.  Drop any agent-resident scratch state here.
    ///
    /// Default: nothing to clean up.
    fn abort(&self, _agent: &mut AgentState, _node: NodeId) {}
}

impl<F> Action for F
where
    F: Fn(&mut ActionContext<'_>) -> Status + Send + Sync,
{
    fn run(&self, ctx: &mut ActionContext<'_>) -> Status {
        self(ctx)
    }
}

/// A side-effect-free predicate leaf.  Never returns `Running`.
pub trait Condition: Send + Sync {
    fn check(&self, agent: &AgentState) -> bool;
}

impl<F> Condition for F
where
    F: Fn(&AgentState) -> bool + Send + Sync,
{
    fn check(&self, agent: &AgentState) -> bool {
        self(agent)
    }
}
