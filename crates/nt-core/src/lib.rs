//! `nt-core` - foundational types for the `navtree` agent AI framework.
//!
//! This crate is a dependency of every other `nt-*` crate.  It has no `nt-*`
//! dependencies and only `thiserror` (plus optional `serde`) externally.
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `AgentId`, `NodeId`, `TreeId`                         |
//! | [`geo`]         | `Vec3` world-space vector                             |
//! | [`time`]        | `Tick`, `SimClock`, `SimConfig`                       |
//! | [`error`]       | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod geo;
pub mod ids;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use geo::Vec3;
pub use ids::{AgentId, NodeId, TreeId};
pub use time::{SimClock, SimConfig, Tick};
