//! `nt-spatial` - voxel navigation grid and shortest-path queries.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                 |
//! |----------------|----------------------------------------------------------|
//! | [`grid`]       | `NavGrid` (walkability bitmap), `CellCoord`              |
//! | [`pathfinder`] | `PathFinder` trait, `NavPath`, `AStarPathFinder`         |
//! | [`error`]      | `SpatialError`, `SpatialResult<T>`                       |
//!
//! # Failure model
//!
//! Building a grid with bad parameters is a configuration error and returns
//! `Err`.  A path query that cannot reach its goal is an ordinary outcome and
//! returns an empty [`NavPath`]; it never errors.
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public value types.     |

pub mod error;
pub mod grid;
pub mod pathfinder;

#[cfg(test)]
mod tests;

pub use error::{SpatialError, SpatialResult};
pub use grid::{CellCoord, MAX_CELLS, NavGrid};
pub use pathfinder::{AStarPathFinder, NavPath, OutOfBounds, PathFinder};
