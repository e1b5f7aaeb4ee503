//! Path query trait and the default A* implementation.
//!
//! # Pluggability
//!
//! Behavior-tree actions request paths through the [`PathFinder`] trait, so
//! applications can swap in hierarchical or flow-field planners without
//! touching the behavior layer.  [`AStarPathFinder`] is the default.
//!
//! # Cost units
//!
//! The search runs in cell units: each axis step costs 1 (the Euclidean
//! distance between adjacent cell centers) and the heuristic is the
//! Euclidean distance between cell coordinates.  With diagonals disallowed
//! the heuristic never overestimates, so returned paths are shortest.
//! [`NavPath::cost`] is reported in world units.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use nt_core::Vec3;
use rustc_hash::FxHashMap;
use tracing::{debug, warn};

use crate::grid::{CellCoord, NavGrid};

// ── NavPath ───────────────────────────────────────────────────────────────────

/// The result of a path query: cell centers from the start cell to the goal
/// cell, inclusive.  Empty when no path exists.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NavPath {
    /// Visited cells in order.
    pub cells: Vec<CellCoord>,
    /// World-space centers of `cells`.
    pub waypoints: Vec<Vec3>,
    /// Total traversal length in world units.
    pub cost: f32,
}

impl NavPath {
    /// The "no path" result.
    pub fn empty() -> Self {
        Self::default()
    }

    fn from_cells(grid: &NavGrid, cells: Vec<CellCoord>) -> Self {
        let waypoints = cells.iter().map(|&c| grid.cell_to_world(c)).collect();
        let cost = cells.len().saturating_sub(1) as f32 * grid.cell_size();
        Self { cells, waypoints, cost }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    /// Number of cell-to-cell moves (`len - 1`, or 0 for an empty path).
    #[inline]
    pub fn steps(&self) -> usize {
        self.cells.len().saturating_sub(1)
    }

    /// Final waypoint, if any.
    pub fn destination(&self) -> Option<Vec3> {
        self.waypoints.last().copied()
    }
}

// ── PathFinder trait ──────────────────────────────────────────────────────────

/// Pluggable shortest-path engine.
///
/// Implementations must be `Send + Sync`: the grid is shared read-only by all
/// agents during a tick and queries may run on worker threads.
pub trait PathFinder: Send + Sync {
    /// Plan a route from `start` to `goal` over `grid`.
    ///
    /// Returns [`NavPath::empty`] when the goal cannot be reached; this is a
    /// normal outcome, not an error.
    fn find_path(&self, grid: &NavGrid, start: Vec3, goal: Vec3) -> NavPath;
}

// ── AStarPathFinder ───────────────────────────────────────────────────────────

/// What to do with a query endpoint that falls outside the grid.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OutOfBounds {
    /// Report "no path".
    #[default]
    Reject,
    /// Snap the endpoint to the nearest in-bounds cell.
    Clamp,
}

/// A* over the 6-connected cell graph.
///
/// Ties on `f = g + h` are broken by insertion order (FIFO), so identical
/// queries on identical grids return identical paths.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AStarPathFinder {
    /// Endpoint handling for positions outside the grid.
    pub out_of_bounds: OutOfBounds,
    /// Abort the search as "no path" after this many node expansions.
    /// `None` lets the search run until the open set is exhausted.
    pub max_expansions: Option<usize>,
}

impl AStarPathFinder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_out_of_bounds(mut self, policy: OutOfBounds) -> Self {
        self.out_of_bounds = policy;
        self
    }

    pub fn with_max_expansions(mut self, cap: usize) -> Self {
        self.max_expansions = Some(cap);
        self
    }

    fn resolve(&self, grid: &NavGrid, pos: Vec3) -> Option<CellCoord> {
        let cell = grid.world_to_cell(pos);
        if grid.in_bounds(cell) {
            return Some(cell);
        }
        match self.out_of_bounds {
            OutOfBounds::Reject => None,
            OutOfBounds::Clamp => Some(grid.clamp_cell(cell)),
        }
    }
}

impl PathFinder for AStarPathFinder {
    fn find_path(&self, grid: &NavGrid, start: Vec3, goal: Vec3) -> NavPath {
        let (Some(from), Some(to)) = (self.resolve(grid, start), self.resolve(grid, goal)) else {
            debug!(%start, %goal, "no path: endpoint outside grid");
            return NavPath::empty();
        };
        if !grid.is_walkable(from) || !grid.is_walkable(to) {
            debug!(%from, %to, "no path: endpoint cell is blocked");
            return NavPath::empty();
        }

        match astar(grid, from, to, self.max_expansions) {
            Some(cells) => NavPath::from_cells(grid, cells),
            None => {
                debug!(%from, %to, "no path: goal unreachable");
                NavPath::empty()
            }
        }
    }
}

// ── A* internals ──────────────────────────────────────────────────────────────

/// Open-set entry.  Ordered so that `BinaryHeap` (a max-heap) pops the lowest
/// `f` first and, among equal `f`, the earliest-inserted entry.
#[derive(Copy, Clone, Debug)]
struct Open {
    f:    f32,
    seq:  u64,
    cell: usize,
}

impl Ord for Open {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f
            .total_cmp(&self.f)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Open {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Open {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Open {}

/// Per-cell search bookkeeping.  Only cells the search touches get an entry.
#[derive(Copy, Clone, Debug)]
struct Visit {
    g:      f32,
    parent: Option<usize>,
    closed: bool,
}

fn astar(
    grid:           &NavGrid,
    from:           CellCoord,
    to:             CellCoord,
    max_expansions: Option<usize>,
) -> Option<Vec<CellCoord>> {
    let start = grid.index_of(from)?;
    let goal = grid.index_of(to)?;

    let mut visits: FxHashMap<usize, Visit> = FxHashMap::default();
    let mut open: BinaryHeap<Open> = BinaryHeap::new();
    let mut seq: u64 = 0;
    let mut expansions: usize = 0;

    visits.insert(start, Visit { g: 0.0, parent: None, closed: false });
    open.push(Open { f: from.euclidean(to), seq, cell: start });

    while let Some(Open { cell, .. }) = open.pop() {
        let current = visits[&cell];
        // Stale duplicate of a cell already finalized via a cheaper entry.
        if current.closed {
            continue;
        }
        if cell == goal {
            return Some(reconstruct(grid, &visits, goal));
        }
        if let Some(v) = visits.get_mut(&cell) {
            v.closed = true;
        }

        expansions += 1;
        if let Some(cap) = max_expansions {
            if expansions > cap {
                warn!(%from, %to, cap, "A* expansion cap reached; treating as no path");
                return None;
            }
        }

        let coord = grid.coord_of(cell);
        for neighbor in grid.neighbors(coord) {
            let Some(ni) = grid.index_of(neighbor) else { continue };
            let tentative = current.g + 1.0;
            let improves = match visits.get(&ni) {
                Some(v) => !v.closed && tentative < v.g,
                None => true,
            };
            if improves {
                visits.insert(ni, Visit { g: tentative, parent: Some(cell), closed: false });
                seq += 1;
                open.push(Open { f: tentative + neighbor.euclidean(to), seq, cell: ni });
            }
        }
    }

    None
}

fn reconstruct(grid: &NavGrid, visits: &FxHashMap<usize, Visit>, goal: usize) -> Vec<CellCoord> {
    let mut cells = Vec::new();
    let mut cur = Some(goal);
    while let Some(i) = cur {
        cells.push(grid.coord_of(i));
        cur = visits.get(&i).and_then(|v| v.parent);
    }
    cells.reverse();
    cells
}
