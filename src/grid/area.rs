//! Area-of-effect geometry.
//!
//! | Shape    | Cells                                                   |
//! |----------|---------------------------------------------------------|
//! | `Single` | the center                                              |
//! | `Circle` | every cell within Manhattan distance `size`             |
//! | `Cross`  | the center plus four axis arms of length `size`         |
//! | `Line`   | the center plus `size` cells along the cast direction   |
//!
//! Every shape is clipped to the grid. Walkability and occupancy are not
//! considered here; resolution decides what an affected cell means.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::{Direction, Grid, GridPos};

/// Geometric pattern of a skill's area.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AreaType {
    /// One cell.
    #[default]
    Single,
    /// Plus-shaped arms.
    Cross,
    /// Manhattan diamond.
    Circle,
    /// Piercing line away from the caster.
    Line,
}

/// Cells covered by an area centered on `center`.
///
/// `dir` is only read by `Line`; a `Line` without a direction covers just the
/// center.
#[must_use]
pub fn aoe_cells(
    grid: &Grid,
    center: GridPos,
    area_type: AreaType,
    area_size: u32,
    dir: Option<Direction>,
) -> BTreeSet<GridPos> {
    let mut cells = BTreeSet::new();
    if !grid.in_bounds(center) {
        return cells;
    }
    cells.insert(center);

    match area_type {
        AreaType::Single => {}
        AreaType::Circle => {
            let r = area_size as usize;
            let row_lo = center.row.saturating_sub(r);
            let col_lo = center.col.saturating_sub(r);
            for row in row_lo..=(center.row + r).min(grid.rows() - 1) {
                for col in col_lo..=(center.col + r).min(grid.cols() - 1) {
                    let pos = GridPos::new(row, col);
                    if center.distance(pos) <= area_size {
                        cells.insert(pos);
                    }
                }
            }
        }
        AreaType::Cross => {
            for dir in Direction::ALL {
                extend_arm(grid, center, dir, area_size, &mut cells);
            }
        }
        AreaType::Line => {
            if let Some(dir) = dir {
                extend_arm(grid, center, dir, area_size, &mut cells);
            }
        }
    }

    cells
}

fn extend_arm(grid: &Grid, from: GridPos, dir: Direction, length: u32, out: &mut BTreeSet<GridPos>) {
    let mut current = from;
    for _ in 0..length {
        match current.step(dir) {
            Some(next) if grid.in_bounds(next) => {
                out.insert(next);
                current = next;
            }
            _ => break,
        }
    }
}
