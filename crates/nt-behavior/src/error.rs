use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum BehaviorError {
    /// The node structure cannot be evaluated (wrong decorator arity, empty
    /// parallel, ...).  Raised only when a tree is built.
    #[error("malformed behavior tree at node {node:?}: {reason}")]
    MalformedTree { node: String, reason: String },

    #[error("behavior tree has {0} nodes, more than a NodeId can address")]
    TooManyNodes(usize),
}

pub type BehaviorResult<T> = Result<T, BehaviorError>;
