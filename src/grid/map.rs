//! Grid storage and copy-on-write mutation.
//!
//! Cells live in an `im::Vector` in row-major order, so cloning a `Grid` is
//! O(1) and every mutation returns a new grid that shares structure with the
//! old one. Callers decide when a mutated grid replaces the committed one;
//! readers holding the previous value never observe a half-applied change.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::{GridCell, GridPos, Highlight, SpawnZone};
use crate::core::EntityId;

/// Rectangular battle map with fixed dimensions.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vector<GridCell>,
}

impl Grid {
    /// Create a grid with every cell walkable and empty.
    ///
    /// # Panics
    ///
    /// Panics if `rows` or `cols` is zero.
    #[must_use]
    pub fn new(rows: usize, cols: usize) -> Self {
        assert!(rows > 0 && cols > 0, "Grid must have at least one row and one column");

        let cells = (0..rows)
            .flat_map(|row| (0..cols).map(move |col| GridCell::new(GridPos::new(row, col))))
            .collect();

        Self { rows, cols, cells }
    }

    /// Number of rows.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    fn index(&self, pos: GridPos) -> usize {
        pos.row * self.cols + pos.col
    }

    /// Check if a position lies on the grid.
    #[must_use]
    pub fn in_bounds(&self, pos: GridPos) -> bool {
        pos.row < self.rows && pos.col < self.cols
    }

    /// Get a cell, or `None` if out of bounds.
    #[must_use]
    pub fn cell(&self, pos: GridPos) -> Option<&GridCell> {
        if self.in_bounds(pos) {
            self.cells.get(self.index(pos))
        } else {
            None
        }
    }

    /// Iterate over all cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = &GridCell> {
        self.cells.iter()
    }

    /// Check if a cell is in bounds and walkable.
    #[must_use]
    pub fn is_walkable(&self, pos: GridPos) -> bool {
        self.cell(pos).is_some_and(|c| c.walkable)
    }

    /// Check if a cell can be entered (walkable and unoccupied).
    #[must_use]
    pub fn is_free(&self, pos: GridPos) -> bool {
        self.cell(pos).is_some_and(GridCell::is_free)
    }

    /// Entity standing on a cell.
    #[must_use]
    pub fn occupant(&self, pos: GridPos) -> Option<EntityId> {
        self.cell(pos).and_then(|c| c.occupant)
    }

    /// Find the cell an entity occupies.
    #[must_use]
    pub fn position_of(&self, entity: EntityId) -> Option<GridPos> {
        self.cells.iter().find(|c| c.occupant == Some(entity)).map(|c| c.pos)
    }

    /// Free cells of a spawn zone, row-major.
    #[must_use]
    pub fn spawn_cells(&self, zone: SpawnZone) -> Vec<GridPos> {
        self.cells
            .iter()
            .filter(|c| c.spawn_zone == Some(zone) && c.is_free())
            .map(|c| c.pos)
            .collect()
    }

    fn with_cell(&self, pos: GridPos, update: impl FnOnce(&mut GridCell)) -> Grid {
        assert!(self.in_bounds(pos), "Position {pos} is outside the {}x{} grid", self.rows, self.cols);

        let mut next = self.clone();
        let idx = next.index(pos);
        if let Some(cell) = next.cells.get_mut(idx) {
            update(cell);
        }
        next
    }

    // === Mutation (returns a new grid) ===

    /// Set a cell's walkability.
    #[must_use]
    pub fn with_walkable(&self, pos: GridPos, walkable: bool) -> Grid {
        self.with_cell(pos, |c| {
            assert!(walkable || c.occupant.is_none(), "Cannot block occupied cell {pos}");
            c.walkable = walkable;
        })
    }

    /// Mark a cell as a spawn cell.
    #[must_use]
    pub fn with_spawn_zone(&self, pos: GridPos, zone: Option<SpawnZone>) -> Grid {
        self.with_cell(pos, |c| c.spawn_zone = zone)
    }

    /// Place an entity on a free cell.
    ///
    /// # Panics
    ///
    /// Panics if the cell is out of bounds, blocked, or already occupied.
    #[must_use]
    pub fn place_occupant(&self, pos: GridPos, entity: EntityId) -> Grid {
        self.with_cell(pos, |c| {
            assert!(c.walkable, "Cannot place {entity} on obstacle {pos}");
            assert!(c.occupant.is_none(), "Cell {pos} is already occupied");
            c.occupant = Some(entity);
        })
    }

    /// Move the occupant of `from` to the free cell `to`.
    ///
    /// # Panics
    ///
    /// Panics if `from` is empty or `to` cannot be entered.
    #[must_use]
    pub fn move_occupant(&self, from: GridPos, to: GridPos) -> Grid {
        let entity = self
            .occupant(from)
            .unwrap_or_else(|| panic!("No occupant to move at {from}"));
        if from == to {
            return self.clone();
        }
        self.remove_occupant(from).place_occupant(to, entity)
    }

    /// Clear a cell's occupant.
    #[must_use]
    pub fn remove_occupant(&self, pos: GridPos) -> Grid {
        self.with_cell(pos, |c| c.occupant = None)
    }

    /// Drop every highlight.
    #[must_use]
    pub fn clear_highlights(&self) -> Grid {
        if self.cells.iter().all(|c| c.highlight.is_none()) {
            return self.clone();
        }
        let mut next = self.clone();
        for cell in next.cells.iter_mut() {
            cell.highlight = None;
        }
        next
    }

    /// Highlight a set of cells. Out-of-bounds positions are ignored.
    #[must_use]
    pub fn highlight_cells(&self, cells: impl IntoIterator<Item = GridPos>, highlight: Highlight) -> Grid {
        let mut next = self.clone();
        for pos in cells {
            if next.in_bounds(pos) {
                let idx = next.index(pos);
                if let Some(cell) = next.cells.get_mut(idx) {
                    cell.highlight = Some(highlight);
                }
            }
        }
        next
    }
}
