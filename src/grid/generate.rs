//! Grid construction: procedural maps and externally supplied tile matrices.
//!
//! Both paths mark two 3x3 deployment corners: bottom-left for the player
//! side and top-right for the enemy side. Corner cells are always walkable.

use tracing::{debug, warn};

use super::search::shortest_path;
use super::{Grid, GridPos, SpawnZone};
use crate::core::CombatRng;
use crate::error::GridError;

/// Side length of a spawn corner.
pub const SPAWN_CORNER: usize = 3;

/// Attempts at drawing a map whose corners connect.
const MAX_ATTEMPTS: usize = 16;

impl Grid {
    /// Generate a map with random obstacles.
    ///
    /// Each non-spawn cell becomes an obstacle with probability
    /// `obstacle_ratio`. Layouts that cut the two spawn corners apart are
    /// redrawn; if every attempt fails the map is returned obstacle-free.
    #[must_use]
    pub fn generate(rows: usize, cols: usize, obstacle_ratio: f64, rng: &mut CombatRng) -> Grid {
        let base = Grid::new(rows, cols).with_spawn_corners();

        for attempt in 0..MAX_ATTEMPTS {
            let mut grid = base.clone();
            for row in 0..rows {
                for col in 0..cols {
                    let pos = GridPos::new(row, col);
                    let is_spawn = grid.cell(pos).is_some_and(|c| c.spawn_zone.is_some());
                    if !is_spawn && rng.gen_bool(obstacle_ratio) {
                        grid = grid.with_walkable(pos, false);
                    }
                }
            }
            if grid.corners_connected() {
                debug!(rows, cols, attempt, "generated grid");
                return grid;
            }
        }

        warn!(rows, cols, obstacle_ratio, "no connected layout found, using open grid");
        base
    }

    /// Build a map from a walkability matrix (`true` = walkable).
    ///
    /// The matrix must be exactly `rows x cols`. Spawn corners are forced
    /// walkable whatever the matrix says.
    pub fn from_tiles(rows: usize, cols: usize, tiles: &[Vec<bool>]) -> Result<Grid, GridError> {
        if rows == 0 || cols == 0 {
            return Err(GridError::Empty);
        }
        let mismatch = |got_cols: usize| GridError::DimensionMismatch {
            expected_rows: rows,
            expected_cols: cols,
            rows: tiles.len(),
            cols: got_cols,
        };
        if tiles.len() != rows {
            return Err(mismatch(tiles.first().map_or(0, Vec::len)));
        }
        if let Some(bad) = tiles.iter().find(|r| r.len() != cols) {
            return Err(mismatch(bad.len()));
        }

        let mut grid = Grid::new(rows, cols);
        for (row, line) in tiles.iter().enumerate() {
            for (col, &walkable) in line.iter().enumerate() {
                if !walkable {
                    grid = grid.with_walkable(GridPos::new(row, col), false);
                }
            }
        }
        Ok(grid.with_spawn_corners())
    }

    /// Use the supplied matrix when it is well formed, otherwise generate.
    pub fn from_tiles_or_generate(
        rows: usize,
        cols: usize,
        tiles: Option<&[Vec<bool>]>,
        obstacle_ratio: f64,
        rng: &mut CombatRng,
    ) -> Grid {
        match tiles.map(|t| Grid::from_tiles(rows, cols, t)) {
            Some(Ok(grid)) => grid,
            Some(Err(err)) => {
                warn!(%err, "rejected supplied tiles, falling back to generation");
                Grid::generate(rows, cols, obstacle_ratio, rng)
            }
            None => Grid::generate(rows, cols, obstacle_ratio, rng),
        }
    }

    /// Mark (and force walkable) the two deployment corners.
    ///
    /// On grids too small for disjoint corners the player side wins overlaps.
    #[must_use]
    pub fn with_spawn_corners(&self) -> Grid {
        let rows = self.rows();
        let cols = self.cols();
        let size_r = SPAWN_CORNER.min(rows);
        let size_c = SPAWN_CORNER.min(cols);
        let mut grid = self.clone();

        for row in 0..size_r {
            for col in cols - size_c..cols {
                let pos = GridPos::new(row, col);
                grid = grid.with_walkable(pos, true).with_spawn_zone(pos, Some(SpawnZone::Enemy));
            }
        }
        for row in rows - size_r..rows {
            for col in 0..size_c {
                let pos = GridPos::new(row, col);
                grid = grid.with_walkable(pos, true).with_spawn_zone(pos, Some(SpawnZone::Player));
            }
        }
        grid
    }

    fn corners_connected(&self) -> bool {
        let player = GridPos::new(self.rows() - 1, 0);
        let enemy = GridPos::new(0, self.cols() - 1);
        shortest_path(self, player, enemy).is_some()
    }
}
