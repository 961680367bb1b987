//! Knockback.

use crate::grid::{Direction, Grid, GridPos};

/// Where a unit at `from` ends up when pushed `distance` cells along `dir`.
///
/// The push moves one cell at a time and stops before the first cell that is
/// outside the grid, an obstacle, or occupied.
#[must_use]
pub fn push_destination(grid: &Grid, from: GridPos, dir: Direction, distance: u32) -> GridPos {
    let mut pos = from;
    for _ in 0..distance {
        match pos.step(dir) {
            Some(next) if grid.is_free(next) => pos = next,
            _ => break,
        }
    }
    pos
}
