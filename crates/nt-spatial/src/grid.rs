//! Voxel navigation grid.
//!
//! # Data layout
//!
//! The grid is an axis-aligned box of `dims[0] × dims[1] × dims[2]` cubic
//! cells anchored at `origin` (the minimum corner).  Walkability is a flat
//! `Vec<bool>` of *blocked* flags indexed in x-fastest order:
//!
//! ```text
//! index = x + dims[0] * (y + dims[1] * z)
//! ```
//!
//! Unmarked cells are walkable.  Coordinates outside `dims` are never
//! walkable; [`NavGrid::in_bounds`] is the explicit check.
//!
//! # Coordinate transforms
//!
//! [`NavGrid::world_to_cell`] and [`NavGrid::cell_to_world`] are total: they
//! always return a value, even for positions far outside the grid.  Callers
//! that care about bounds test the result with `in_bounds` or clamp it with
//! `clamp_cell`.

use nt_core::Vec3;
use tracing::info;

use crate::{SpatialError, SpatialResult};

/// Upper bound on `cell_count()` accepted by the constructors.
pub const MAX_CELLS: usize = 10_000_000;

/// The six axis-aligned unit steps, in the fixed order used for neighbor
/// expansion (+x, −x, +y, −y, +z, −z).
const STEPS: [(i32, i32, i32); 6] = [
    (1, 0, 0),
    (-1, 0, 0),
    (0, 1, 0),
    (0, -1, 0),
    (0, 0, 1),
    (0, 0, -1),
];

// ── CellCoord ─────────────────────────────────────────────────────────────────

/// Integer coordinates of one grid cell.  May lie outside the grid.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellCoord {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl CellCoord {
    #[inline]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// The cell one step away along `(dx, dy, dz)`.
    #[inline]
    pub fn offset(self, dx: i32, dy: i32, dz: i32) -> CellCoord {
        CellCoord::new(
            self.x.saturating_add(dx),
            self.y.saturating_add(dy),
            self.z.saturating_add(dz),
        )
    }

    /// Number of unit steps between two cells when only axis moves are allowed.
    #[inline]
    pub fn manhattan(self, other: CellCoord) -> u64 {
        u64::from(self.x.abs_diff(other.x))
            + u64::from(self.y.abs_diff(other.y))
            + u64::from(self.z.abs_diff(other.z))
    }

    /// Straight-line distance in cell units.
    #[inline]
    pub fn euclidean(self, other: CellCoord) -> f32 {
        let dx = (self.x - other.x) as f32;
        let dy = (self.y - other.y) as f32;
        let dz = (self.z - other.z) as f32;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}

impl std::fmt::Display for CellCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}, {}]", self.x, self.y, self.z)
    }
}

// ── NavGrid ───────────────────────────────────────────────────────────────────

/// A fixed-size 3-D walkability grid.
///
/// Created once at scene-load time; mutated only through the obstacle and
/// `set_walkable` methods; never resized.
#[derive(Clone, Debug)]
pub struct NavGrid {
    origin:        Vec3,
    cell_size:     f32,
    dims:          [u32; 3],
    blocked:       Vec<bool>,
    blocked_count: usize,
}

impl NavGrid {
    /// Allocate a grid covering the box `[min_corner, max_corner]`.
    ///
    /// Each axis gets `ceil(extent / cell_size)` cells (at least one, so a
    /// flat box still yields a single layer).  All cells start walkable.
    ///
    /// # Errors
    ///
    /// - [`SpatialError::InvalidCellSize`] if `cell_size <= 0` or not finite.
    /// - [`SpatialError::InvalidBounds`] if a corner is not finite or
    ///   `max_corner < min_corner` on any axis.
    /// - [`SpatialError::TooManyCells`] if the grid would exceed [`MAX_CELLS`].
    pub fn generate(min_corner: Vec3, max_corner: Vec3, cell_size: f32) -> SpatialResult<Self> {
        if !(cell_size.is_finite() && cell_size > 0.0) {
            return Err(SpatialError::InvalidCellSize(cell_size));
        }
        if !min_corner.is_finite() || !max_corner.is_finite() {
            return Err(SpatialError::InvalidBounds(format!(
                "corners must be finite, got {min_corner} .. {max_corner}"
            )));
        }

        let extent = max_corner - min_corner;
        let mut cells = [0f64; 3];
        for (axis, len) in extent.to_array().into_iter().enumerate() {
            if len < 0.0 {
                return Err(SpatialError::InvalidBounds(format!(
                    "max corner {max_corner} is below min corner {min_corner}"
                )));
            }
            // Small tolerance so an extent that is an exact multiple of the
            // cell size does not gain an extra layer from float rounding.
            cells[axis] = (f64::from(len) / f64::from(cell_size) - 1e-4).ceil().max(1.0);
        }
        if cells.iter().any(|&c| c > f64::from(u32::MAX)) {
            // Saturating float-to-int cast.
            return Err(SpatialError::TooManyCells {
                requested: cells.iter().product::<f64>() as u128,
                limit:     MAX_CELLS,
            });
        }
        let dims = cells.map(|c| c as u32);

        Self::with_dimensions(min_corner, cell_size, dims)
    }

    /// Allocate a grid of exactly `dims` cells with its minimum corner at
    /// `origin`.
    pub fn with_dimensions(origin: Vec3, cell_size: f32, dims: [u32; 3]) -> SpatialResult<Self> {
        if !(cell_size.is_finite() && cell_size > 0.0) {
            return Err(SpatialError::InvalidCellSize(cell_size));
        }
        if !origin.is_finite() {
            return Err(SpatialError::InvalidBounds(format!("origin {origin} is not finite")));
        }
        if dims.contains(&0) {
            return Err(SpatialError::InvalidBounds(format!(
                "every dimension must be at least 1, got {dims:?}"
            )));
        }

        let requested = dims.iter().map(|&d| u128::from(d)).product::<u128>();
        if requested > MAX_CELLS as u128 {
            return Err(SpatialError::TooManyCells { requested, limit: MAX_CELLS });
        }

        info!(
            dims = ?dims,
            cell_size,
            origin = %origin,
            cells = requested,
            "navigation grid generated"
        );

        Ok(Self {
            origin,
            cell_size,
            dims,
            blocked: vec![false; requested as usize],
            blocked_count: 0,
        })
    }

    // ── Dimensions ────────────────────────────────────────────────────────

    #[inline]
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    #[inline]
    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Cell counts along x, y, z.
    #[inline]
    pub fn dimensions(&self) -> [u32; 3] {
        self.dims
    }

    #[inline]
    pub fn cell_count(&self) -> usize {
        self.blocked.len()
    }

    pub fn walkable_count(&self) -> usize {
        self.cell_count() - self.blocked_count
    }

    /// World-space maximum corner of the gridded box.
    pub fn max_corner(&self) -> Vec3 {
        self.origin
            + Vec3::new(
                self.dims[0] as f32 * self.cell_size,
                self.dims[1] as f32 * self.cell_size,
                self.dims[2] as f32 * self.cell_size,
            )
    }

    // ── Coordinate transforms ─────────────────────────────────────────────

    /// Cell containing `pos`.  Total: positions outside the grid map to
    /// out-of-bounds coordinates rather than failing.
    pub fn world_to_cell(&self, pos: Vec3) -> CellCoord {
        let rel = pos - self.origin;
        // `as i32` saturates for huge values and maps NaN to 0.
        CellCoord::new(
            (rel.x / self.cell_size).floor() as i32,
            (rel.y / self.cell_size).floor() as i32,
            (rel.z / self.cell_size).floor() as i32,
        )
    }

    /// World-space center of `cell`.
    pub fn cell_to_world(&self, cell: CellCoord) -> Vec3 {
        self.origin
            + Vec3::new(
                (cell.x as f32 + 0.5) * self.cell_size,
                (cell.y as f32 + 0.5) * self.cell_size,
                (cell.z as f32 + 0.5) * self.cell_size,
            )
    }

    #[inline]
    pub fn in_bounds(&self, cell: CellCoord) -> bool {
        cell.x >= 0
            && cell.y >= 0
            && cell.z >= 0
            && (cell.x as u32) < self.dims[0]
            && (cell.y as u32) < self.dims[1]
            && (cell.z as u32) < self.dims[2]
    }

    /// Nearest in-bounds cell to `cell`.
    pub fn clamp_cell(&self, cell: CellCoord) -> CellCoord {
        let clamp = |v: i32, dim: u32| v.clamp(0, dim as i32 - 1);
        CellCoord::new(
            clamp(cell.x, self.dims[0]),
            clamp(cell.y, self.dims[1]),
            clamp(cell.z, self.dims[2]),
        )
    }

    /// Flat index of `cell`, or `None` when out of bounds.
    #[inline]
    pub fn index_of(&self, cell: CellCoord) -> Option<usize> {
        if !self.in_bounds(cell) {
            return None;
        }
        let [dx, dy, _] = self.dims;
        Some(cell.x as usize + dx as usize * (cell.y as usize + dy as usize * cell.z as usize))
    }

    /// Inverse of [`index_of`](Self::index_of).
    #[inline]
    pub fn coord_of(&self, index: usize) -> CellCoord {
        let dx = self.dims[0] as usize;
        let dy = self.dims[1] as usize;
        CellCoord::new(
            (index % dx) as i32,
            ((index / dx) % dy) as i32,
            (index / (dx * dy)) as i32,
        )
    }

    // ── Walkability ───────────────────────────────────────────────────────

    /// `true` if `cell` is inside the grid and not blocked.
    #[inline]
    pub fn is_walkable(&self, cell: CellCoord) -> bool {
        self.index_of(cell).is_some_and(|i| !self.blocked[i])
    }

    /// Set one cell's walkability.  Returns `false` (and changes nothing) if
    /// `cell` is out of bounds.
    pub fn set_walkable(&mut self, cell: CellCoord, walkable: bool) -> bool {
        match self.index_of(cell) {
            Some(i) => {
                self.set_blocked_at(i, !walkable);
                true
            }
            None => false,
        }
    }

    /// Mark every cell whose center lies within `radius` of `pos` as
    /// non-walkable.  Returns how many cells changed state; repeating the
    /// call returns 0 and leaves the grid unchanged.
    pub fn mark_obstacle(&mut self, pos: Vec3, radius: f32) -> usize {
        self.paint_sphere(pos, radius, true)
    }

    /// Make every cell whose center lies within `radius` of `pos` walkable
    /// again.  Returns how many cells changed state.
    pub fn clear_obstacle(&mut self, pos: Vec3, radius: f32) -> usize {
        self.paint_sphere(pos, radius, false)
    }

    /// In-bounds walkable cells adjacent to `cell` along one axis, in the
    /// fixed order +x, −x, +y, −y, +z, −z.
    pub fn neighbors(&self, cell: CellCoord) -> impl Iterator<Item = CellCoord> + '_ {
        STEPS
            .iter()
            .map(move |&(dx, dy, dz)| cell.offset(dx, dy, dz))
            .filter(|&n| self.is_walkable(n))
    }

    /// Shortest path between two world positions using the default
    /// [`AStarPathFinder`](crate::AStarPathFinder).  Empty when no path exists.
    pub fn find_path(&self, start: Vec3, goal: Vec3) -> Vec<Vec3> {
        use crate::PathFinder;
        crate::AStarPathFinder::default().find_path(self, start, goal).waypoints
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn set_blocked_at(&mut self, index: usize, blocked: bool) -> bool {
        if self.blocked[index] == blocked {
            return false;
        }
        self.blocked[index] = blocked;
        if blocked {
            self.blocked_count += 1;
        } else {
            self.blocked_count -= 1;
        }
        true
    }

    fn paint_sphere(&mut self, pos: Vec3, radius: f32, blocked: bool) -> usize {
        if !(radius.is_finite() && radius >= 0.0) || !pos.is_finite() {
            return 0;
        }
        let r = Vec3::new(radius, radius, radius);
        let lo = self.clamp_cell(self.world_to_cell(pos - r));
        let hi = self.clamp_cell(self.world_to_cell(pos + r));
        let r2 = radius * radius;

        let mut changed = 0;
        for z in lo.z..=hi.z {
            for y in lo.y..=hi.y {
                for x in lo.x..=hi.x {
                    let cell = CellCoord::new(x, y, z);
                    if self.cell_to_world(cell).distance_squared(pos) > r2 {
                        continue;
                    }
                    if let Some(i) = self.index_of(cell) {
                        if self.set_blocked_at(i, blocked) {
                            changed += 1;
                        }
                    }
                }
            }
        }
        changed
    }
}
