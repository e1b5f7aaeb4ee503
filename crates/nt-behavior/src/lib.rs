//! `nt-behavior` - behavior trees for navtree agents.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                        |
//! |-------------|-----------------------------------------------------------------|
//! | [`node`]    | `Node` builder enum, `ParallelPolicy`, `Decorator`, `Repeat`    |
//! | [`tree`]    | `BehaviorTree` (flat arena), `TreeState` (per-agent resume data)|
//! | [`leaf`]    | `Action` and `Condition` traits                                 |
//! | [`context`] | `TickContext` (per-tick inputs), `ActionContext`                |
//! | [`library`] | `RequestPath`, `MoveToWaypoint`, `Wait`, conditions, `patrol`, `chase` |
//! | [`status`]  | `Status`                                                        |
//! | [`error`]   | `BehaviorError`, `BehaviorResult<T>`                            |
//!
//! # Design notes
//!
//! A tree is assembled as an owned [`Node`] hierarchy and frozen into a
//! [`BehaviorTree`].  The frozen tree holds no mutable state and is shared
//! between agents behind an `Arc`; each agent carries its own [`TreeState`].
//!
//! `Failure` is a normal outcome that composites branch on.  The only error
//! this crate returns is a malformed tree at build time.

pub mod context;
pub mod error;
pub mod leaf;
pub mod library;
pub mod node;
pub mod status;
pub mod tree;


pub use context::{ActionContext, TickContext};
pub use error::{BehaviorError, BehaviorResult};
pub use leaf::{Action, Condition};
pub use library::{Halt, MoveToWaypoint, RequestPath, StepAlongPath, Target, Wait};
pub use node::{Decorator, Node, ParallelPolicy, Repeat};
pub use status::Status;
pub use tree::{BehaviorTree, TreeState};
