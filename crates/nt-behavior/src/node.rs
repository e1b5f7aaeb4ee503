//! `Node` - the declarative, owned form of a behavior tree.
//!
//! A `Node` tree is what callers assemble; [`BehaviorTree::new`] validates
//! it and flattens it into an arena.  Because every node owns its children
//! the structure cannot contain cycles.
//!
//! [`BehaviorTree::new`]: crate::BehaviorTree::new

use std::fmt;
use std::sync::Arc;

use crate::{Action, Condition};

/// How a [`Node::Parallel`] turns child results into its own.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ParallelPolicy {
    /// Every child must report the outcome.
    RequireAll,
    /// One child reporting the outcome is enough.
    RequireOne,
}

/// How many successful child runs a repeater waits for.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Repeat {
    Forever,
    Times(u32),
}

/// Single-child wrappers.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Decorator {
    /// Swap `Success` and `Failure`.
    Inverter,
    /// Report `Success` whenever the child finishes.
    Succeeder,
    /// Rerun the child from the top after each success; fail as soon as one
    /// run fails.
    Repeater(Repeat),
}

/// One node of a behavior tree under construction.
pub enum Node {
    /// Run children in order until one fails.
    Sequence { name: String, children: Vec<Node> },

    /// Run children in order until one succeeds.
    Selector { name: String, children: Vec<Node> },

    /// Run every child every tick and aggregate by policy.  Success is
    /// checked before failure.
    Parallel {
        name:     String,
        success:  ParallelPolicy,
        failure:  ParallelPolicy,
        children: Vec<Node>,
    },

    /// Exactly one child, enforced at build time.
    Decorator {
        name:     String,
        kind:     Decorator,
        children: Vec<Node>,
    },

    Condition { name: String, condition: Arc<dyn Condition> },

    Action { name: String, action: Arc<dyn Action> },
}

impl Node {
    pub fn sequence(name: impl Into<String>, children: Vec<Node>) -> Node {
        Node::Sequence { name: name.into(), children }
    }

    pub fn selector(name: impl Into<String>, children: Vec<Node>) -> Node {
        Node::Selector { name: name.into(), children }
    }

    pub fn parallel(
        name:     impl Into<String>,
        success:  ParallelPolicy,
        failure:  ParallelPolicy,
        children: Vec<Node>,
    ) -> Node {
        Node::Parallel { name: name.into(), success, failure, children }
    }

    pub fn decorator(name: impl Into<String>, kind: Decorator, children: Vec<Node>) -> Node {
        Node::Decorator { name: name.into(), kind, children }
    }

    pub fn inverter(name: impl Into<String>, child: Node) -> Node {
        Node::decorator(name, Decorator::Inverter, vec![child])
    }

    pub fn succeeder(name: impl Into<String>, child: Node) -> Node {
        Node::decorator(name, Decorator::Succeeder, vec![child])
    }

    /// Repeat `child` `count` times; `0` repeats forever.
    pub fn repeater(name: impl Into<String>, count: u32, child: Node) -> Node {
        let repeat = if count == 0 { Repeat::Forever } else { Repeat::Times(count) };
        Node::decorator(name, Decorator::Repeater(repeat), vec![child])
    }

    pub fn condition(name: impl Into<String>, condition: impl Condition + 'static) -> Node {
        Node::Condition { name: name.into(), condition: Arc::new(condition) }
    }

    pub fn action(name: impl Into<String>, action: impl Action + 'static) -> Node {
        Node::Action { name: name.into(), action: Arc::new(action) }
    }

    pub fn name(&self) -> &str {
        match self {
            Node::Sequence { name, .. }
            | Node::Selector { name, .. }
            | Node::Parallel { name, .. }
            | Node::Decorator { name, .. }
            | Node::Condition { name, .. }
            | Node::Action { name, .. } => name,
        }
    }

    /// Direct children; empty for leaves.
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Sequence { children, .. }
            | Node::Selector { children, .. }
            | Node::Parallel { children, .. }
            | Node::Decorator { children, .. } => children,
            Node::Condition { .. } | Node::Action { .. } => &[],
        }
    }

    /// Total node count of this subtree, including `self`.
    pub fn size(&self) -> usize {
        1 + self.children().iter().map(Node::size).sum::<usize>()
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self {
            Node::Sequence { .. } => "Sequence",
            Node::Selector { .. } => "Selector",
            Node::Parallel { .. } => "Parallel",
            Node::Decorator { .. } => "Decorator",
            Node::Condition { .. } => "Condition",
            Node::Action { .. } => "Action",
        };
        let mut s = f.debug_struct(kind);
        s.field("name", &self.name());
        match self {
            Node::Parallel { success, failure, .. } => {
                s.field("success", success).field("failure", failure);
            }
            Node::Decorator { kind, .. } => {
                s.field("kind", kind);
            }
            _ => {}
        }
        if !self.children().is_empty() {
            s.field("children", &self.children());
        }
        s.finish()
    }
}
