//! Unit tests for nt-spatial.
//!
//! All tests use hand-built or seeded random grids; no scene files.

#[cfg(test)]
mod helpers {
    use std::collections::VecDeque;

    use nt_core::Vec3;

    use crate::{CellCoord, NavGrid};

    /// Flat 10×10×1 grid with unit cells anchored at the origin.
    pub fn flat_10x10() -> NavGrid {
        NavGrid::generate(Vec3::ZERO, Vec3::new(10.0, 10.0, 1.0), 1.0).unwrap()
    }

    /// `flat_10x10` with a wall at x = 5 covering y = 0..=8 (gap at y = 9).
    pub fn walled_10x10() -> NavGrid {
        let mut grid = flat_10x10();
        for y in 0..=8 {
            let center = grid.cell_to_world(CellCoord::new(5, y, 0));
            grid.mark_obstacle(center, 0.1);
        }
        grid
    }

    /// Brute-force BFS step count between two cells, `None` if disconnected.
    pub fn bfs_steps(grid: &NavGrid, from: CellCoord, to: CellCoord) -> Option<usize> {
        if !grid.is_walkable(from) || !grid.is_walkable(to) {
            return None;
        }
        let mut dist = vec![usize::MAX; grid.cell_count()];
        let mut queue = VecDeque::new();
        dist[grid.index_of(from)?] = 0;
        queue.push_back(from);
        while let Some(cell) = queue.pop_front() {
            let d = dist[grid.index_of(cell)?];
            if cell == to {
                return Some(d);
            }
            for n in grid.neighbors(cell) {
                let ni = grid.index_of(n)?;
                if dist[ni] == usize::MAX {
                    dist[ni] = d + 1;
                    queue.push_back(n);
                }
            }
        }
        None
    }

    /// Every consecutive pair of cells differs by exactly one axis step.
    pub fn assert_unit_steps(cells: &[CellCoord]) {
        for pair in cells.windows(2) {
            assert_eq!(pair[0].manhattan(pair[1]), 1, "non-unit step {} → {}", pair[0], pair[1]);
        }
    }
}

// ── Grid construction ─────────────────────────────────────────────────────────

#[cfg(test)]
mod construction {
    use nt_core::Vec3;

    use crate::{MAX_CELLS, NavGrid, SpatialError};

    #[test]
    fn dimensions_from_bounds() {
        let grid = super::helpers::flat_10x10();
        assert_eq!(grid.dimensions(), [10, 10, 1]);
        assert_eq!(grid.cell_count(), 100);
        assert_eq!(grid.walkable_count(), 100);
        assert_eq!(grid.max_corner(), Vec3::new(10.0, 10.0, 1.0));
    }

    #[test]
    fn partial_cells_round_up() {
        let grid = NavGrid::generate(Vec3::ZERO, Vec3::new(2.5, 1.0, 0.0), 1.0).unwrap();
        // 2.5 → 3 cells; zero extent still yields one layer.
        assert_eq!(grid.dimensions(), [3, 1, 1]);
    }

    #[test]
    fn zero_cell_size_rejected() {
        let err = NavGrid::generate(Vec3::ZERO, Vec3::new(1.0, 1.0, 1.0), 0.0).unwrap_err();
        assert_eq!(err, SpatialError::InvalidCellSize(0.0));
        assert!(NavGrid::generate(Vec3::ZERO, Vec3::new(1.0, 1.0, 1.0), -1.0).is_err());
        assert!(NavGrid::generate(Vec3::ZERO, Vec3::new(1.0, 1.0, 1.0), f32::NAN).is_err());
    }

    #[test]
    fn inverted_bounds_rejected() {
        let err = NavGrid::generate(Vec3::new(5.0, 0.0, 0.0), Vec3::ZERO, 1.0).unwrap_err();
        assert!(matches!(err, SpatialError::InvalidBounds(_)));
    }

    #[test]
    fn oversized_grid_rejected() {
        let err = NavGrid::generate(Vec3::ZERO, Vec3::new(1000.0, 1000.0, 1000.0), 0.1).unwrap_err();
        assert!(matches!(err, SpatialError::TooManyCells { limit, .. } if limit == MAX_CELLS));
    }

    #[test]
    fn axis_overflow_reports_total_cells() {
        // 1e10 cells along x alone overflows u32; 2 × 3 cells on the other axes.
        let err = NavGrid::generate(Vec3::ZERO, Vec3::new(1.0e10, 2.0, 3.0), 1.0).unwrap_err();
        assert_eq!(err, SpatialError::TooManyCells { requested: 60_000_000_000, limit: MAX_CELLS });
    }

    #[test]
    fn with_dimensions_rejects_zero_axis() {
        assert!(NavGrid::with_dimensions(Vec3::ZERO, 1.0, [4, 0, 1]).is_err());
        assert!(NavGrid::with_dimensions(Vec3::ZERO, 1.0, [4, 4, 1]).is_ok());
    }
}

// ── Coordinate transforms ─────────────────────────────────────────────────────

#[cfg(test)]
mod transforms {
    use nt_core::Vec3;

    use crate::{CellCoord, NavGrid};

    #[test]
    fn world_to_cell_floors() {
        let grid = NavGrid::generate(Vec3::new(-2.0, 0.0, 0.0), Vec3::new(2.0, 4.0, 1.0), 0.5).unwrap();
        assert_eq!(grid.world_to_cell(Vec3::new(-2.0, 0.0, 0.0)), CellCoord::new(0, 0, 0));
        assert_eq!(grid.world_to_cell(Vec3::new(-1.74, 0.6, 0.2)), CellCoord::new(0, 1, 0));
        assert_eq!(grid.world_to_cell(Vec3::new(0.0, 3.99, 0.99)), CellCoord::new(4, 7, 1));
    }

    #[test]
    fn cell_to_world_is_center() {
        let grid = super::helpers::flat_10x10();
        assert_eq!(grid.cell_to_world(CellCoord::new(2, 3, 0)), Vec3::new(2.5, 3.5, 0.5));
        // Round trip through the center lands in the same cell.
        let c = CellCoord::new(7, 1, 0);
        assert_eq!(grid.world_to_cell(grid.cell_to_world(c)), c);
    }

    #[test]
    fn transforms_are_total_out_of_bounds() {
        let grid = super::helpers::flat_10x10();
        let far = grid.world_to_cell(Vec3::new(-50.0, 200.0, 0.5));
        assert_eq!(far, CellCoord::new(-50, 200, 0));
        assert!(!grid.in_bounds(far));
        assert_eq!(grid.clamp_cell(far), CellCoord::new(0, 9, 0));
    }

    #[test]
    fn index_round_trip() {
        let grid = NavGrid::with_dimensions(Vec3::ZERO, 1.0, [3, 4, 5]).unwrap();
        for i in 0..grid.cell_count() {
            let c = grid.coord_of(i);
            assert_eq!(grid.index_of(c), Some(i));
        }
        assert_eq!(grid.index_of(CellCoord::new(3, 0, 0)), None);
    }
}

// ── Obstacles ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod obstacles {
    use nt_core::Vec3;

    use crate::CellCoord;

    #[test]
    fn mark_uses_cell_centers() {
        let mut grid = super::helpers::flat_10x10();
        // Radius 1.0 around the center of (4,4) covers it and its 4 planar neighbors.
        let changed = grid.mark_obstacle(Vec3::new(4.5, 4.5, 0.5), 1.0);
        assert_eq!(changed, 5);
        assert!(!grid.is_walkable(CellCoord::new(4, 4, 0)));
        assert!(!grid.is_walkable(CellCoord::new(5, 4, 0)));
        assert!(grid.is_walkable(CellCoord::new(5, 5, 0)));
        assert_eq!(grid.walkable_count(), 95);
    }

    #[test]
    fn mark_is_idempotent() {
        let mut once = super::helpers::flat_10x10();
        once.mark_obstacle(Vec3::new(3.0, 3.0, 0.5), 1.5);

        let mut twice = super::helpers::flat_10x10();
        twice.mark_obstacle(Vec3::new(3.0, 3.0, 0.5), 1.5);
        assert_eq!(twice.mark_obstacle(Vec3::new(3.0, 3.0, 0.5), 1.5), 0);

        for i in 0..once.cell_count() {
            let c = once.coord_of(i);
            assert_eq!(once.is_walkable(c), twice.is_walkable(c));
        }
    }

    #[test]
    fn clear_restores_walkability() {
        let mut grid = super::helpers::flat_10x10();
        let marked = grid.mark_obstacle(Vec3::new(6.0, 2.0, 0.5), 2.0);
        assert!(marked > 0);
        assert_eq!(grid.clear_obstacle(Vec3::new(6.0, 2.0, 0.5), 2.0), marked);
        assert_eq!(grid.walkable_count(), grid.cell_count());
    }

    #[test]
    fn out_of_bounds_is_never_walkable() {
        let grid = super::helpers::flat_10x10();
        assert!(!grid.is_walkable(CellCoord::new(-1, 0, 0)));
        assert!(!grid.is_walkable(CellCoord::new(0, 10, 0)));
        assert!(!grid.is_walkable(CellCoord::new(0, 0, 1)));
    }

    #[test]
    fn obstacle_outside_grid_changes_nothing() {
        let mut grid = super::helpers::flat_10x10();
        assert_eq!(grid.mark_obstacle(Vec3::new(100.0, 100.0, 0.5), 2.0), 0);
        assert_eq!(grid.mark_obstacle(Vec3::new(5.0, 5.0, 0.5), -1.0), 0);
        assert_eq!(grid.walkable_count(), 100);
    }

    #[test]
    fn set_walkable_single_cell() {
        let mut grid = super::helpers::flat_10x10();
        assert!(grid.set_walkable(CellCoord::new(1, 1, 0), false));
        assert!(!grid.is_walkable(CellCoord::new(1, 1, 0)));
        assert!(!grid.set_walkable(CellCoord::new(11, 1, 0), false));
        assert_eq!(grid.walkable_count(), 99);
    }

    #[test]
    fn neighbors_skip_blocked_and_edges() {
        let mut grid = super::helpers::flat_10x10();
        grid.set_walkable(CellCoord::new(1, 0, 0), false);
        let n: Vec<_> = grid.neighbors(CellCoord::new(0, 0, 0)).collect();
        assert_eq!(n, vec![CellCoord::new(0, 1, 0)]);
    }
}

// ── A* pathfinding ────────────────────────────────────────────────────────────

#[cfg(test)]
mod pathfinding {
    use nt_core::Vec3;
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    use super::helpers::{assert_unit_steps, bfs_steps, flat_10x10, walled_10x10};
    use crate::{AStarPathFinder, CellCoord, NavGrid, OutOfBounds, PathFinder};

    #[test]
    fn straight_line_on_open_grid() {
        let grid = flat_10x10();
        let path = AStarPathFinder::new().find_path(&grid, Vec3::ZERO, Vec3::new(9.0, 0.0, 0.0));
        assert_eq!(path.steps(), 9);
        assert_eq!(path.cells.first(), Some(&CellCoord::new(0, 0, 0)));
        assert_eq!(path.cells.last(), Some(&CellCoord::new(9, 0, 0)));
        assert_eq!(path.cost, 9.0);
        assert_unit_steps(&path.cells);
    }

    #[test]
    fn same_cell_is_single_waypoint() {
        let grid = flat_10x10();
        let path = AStarPathFinder::new().find_path(&grid, Vec3::new(3.2, 3.2, 0.1), Vec3::new(3.8, 3.9, 0.9));
        assert_eq!(path.len(), 1);
        assert_eq!(path.destination(), Some(Vec3::new(3.5, 3.5, 0.5)));
    }

    #[test]
    fn routes_through_gap_in_wall() {
        let grid = walled_10x10();
        let path = grid.find_path(Vec3::ZERO, Vec3::new(9.0, 0.0, 0.0));
        assert!(!path.is_empty());

        let cells: Vec<_> = path.iter().map(|&p| grid.world_to_cell(p)).collect();
        assert_unit_steps(&cells);
        // The only crossing of x = 5 is at y = 9.
        assert!(cells.contains(&CellCoord::new(5, 9, 0)));
        for c in &cells {
            assert!(grid.is_walkable(*c));
        }
        // 9 up, 9 across, 9 down, longer than the 9-step straight line and minimal.
        assert_eq!(cells.len() - 1, 27);
        assert_eq!(
            bfs_steps(&grid, CellCoord::new(0, 0, 0), CellCoord::new(9, 0, 0)),
            Some(27)
        );
    }

    #[test]
    fn walled_off_goal_is_empty() {
        let mut grid = walled_10x10();
        grid.set_walkable(CellCoord::new(5, 9, 0), false);
        let path = AStarPathFinder::new().find_path(&grid, Vec3::ZERO, Vec3::new(9.0, 0.0, 0.0));
        assert!(path.is_empty());
        assert_eq!(path.steps(), 0);
    }

    #[test]
    fn blocked_endpoint_is_empty() {
        let grid = walled_10x10();
        let goal = grid.cell_to_world(CellCoord::new(5, 3, 0));
        assert!(grid.find_path(Vec3::ZERO, goal).is_empty());
        assert!(grid.find_path(goal, Vec3::ZERO).is_empty());
    }

    #[test]
    fn out_of_bounds_rejected_by_default() {
        let grid = flat_10x10();
        let path = AStarPathFinder::new().find_path(&grid, Vec3::ZERO, Vec3::new(25.0, 0.0, 0.0));
        assert!(path.is_empty());
    }

    #[test]
    fn out_of_bounds_clamp_policy() {
        let grid = flat_10x10();
        let finder = AStarPathFinder::new().with_out_of_bounds(OutOfBounds::Clamp);
        let path = finder.find_path(&grid, Vec3::new(-4.0, 0.0, 0.0), Vec3::new(25.0, 0.0, 0.0));
        assert_eq!(path.cells.first(), Some(&CellCoord::new(0, 0, 0)));
        assert_eq!(path.cells.last(), Some(&CellCoord::new(9, 0, 0)));
    }

    #[test]
    fn expansion_cap_reports_no_path() {
        let grid = walled_10x10();
        let finder = AStarPathFinder::new().with_max_expansions(5);
        assert!(finder.find_path(&grid, Vec3::ZERO, Vec3::new(9.0, 0.0, 0.0)).is_empty());
    }

    #[test]
    fn vertical_moves_in_3d() {
        let mut grid = NavGrid::with_dimensions(Vec3::ZERO, 1.0, [3, 1, 3]).unwrap();
        // Block the middle column on the bottom two layers; force a climb.
        grid.set_walkable(CellCoord::new(1, 0, 0), false);
        grid.set_walkable(CellCoord::new(1, 0, 1), false);
        let path = AStarPathFinder::new().find_path(
            &grid,
            grid.cell_to_world(CellCoord::new(0, 0, 0)),
            grid.cell_to_world(CellCoord::new(2, 0, 0)),
        );
        assert_unit_steps(&path.cells);
        assert!(path.cells.contains(&CellCoord::new(1, 0, 2)));
        assert_eq!(path.steps(), 6);
    }

    #[test]
    fn deterministic_across_calls() {
        let grid = walled_10x10();
        let finder = AStarPathFinder::new();
        let a = finder.find_path(&grid, Vec3::new(1.0, 1.0, 0.0), Vec3::new(8.0, 4.0, 0.0));
        let b = finder.find_path(&grid, Vec3::new(1.0, 1.0, 0.0), Vec3::new(8.0, 4.0, 0.0));
        assert_eq!(a, b);
        assert_eq!(
            a.waypoints.iter().map(|p| p.to_array().map(f32::to_bits)).collect::<Vec<_>>(),
            b.waypoints.iter().map(|p| p.to_array().map(f32::to_bits)).collect::<Vec<_>>(),
        );
    }

    #[test]
    fn matches_bfs_on_random_grids() {
        let mut rng = SmallRng::seed_from_u64(7);
        let finder = AStarPathFinder::new();

        for _ in 0..200 {
            let dims = [rng.gen_range(2..8), rng.gen_range(2..8), rng.gen_range(1..3)];
            let mut grid = NavGrid::with_dimensions(Vec3::ZERO, 1.0, dims).unwrap();
            for i in 0..grid.cell_count() {
                if rng.gen_bool(0.3) {
                    let c = grid.coord_of(i);
                    grid.set_walkable(c, false);
                }
            }
            let from = grid.coord_of(rng.gen_range(0..grid.cell_count()));
            let to = grid.coord_of(rng.gen_range(0..grid.cell_count()));

            let path = finder.find_path(&grid, grid.cell_to_world(from), grid.cell_to_world(to));
            match bfs_steps(&grid, from, to) {
                Some(steps) => {
                    assert_eq!(path.steps(), steps, "grid {dims:?}: {from} → {to}");
                    assert_eq!(path.cells.first(), Some(&from));
                    assert_eq!(path.cells.last(), Some(&to));
                    assert_unit_steps(&path.cells);
                }
                None => assert!(path.is_empty(), "grid {dims:?}: {from} → {to} should be unreachable"),
            }
        }
    }
}
