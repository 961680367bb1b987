//! Grid coordinates and axis directions.

use serde::{Deserialize, Serialize};

/// A cell coordinate. Row 0 is the top edge, column 0 the left edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GridPos {
    /// Row index.
    pub row: usize,
    /// Column index.
    pub col: usize,
}

impl GridPos {
    /// Create a position.
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Manhattan distance to another cell.
    #[must_use]
    pub fn distance(self, other: GridPos) -> u32 {
        (self.row.abs_diff(other.row) + self.col.abs_diff(other.col)) as u32
    }

    /// Offset by a signed delta, or `None` if it would leave the first quadrant.
    #[must_use]
    pub fn offset(self, d_row: i64, d_col: i64) -> Option<GridPos> {
        let row = usize::try_from(self.row as i64 + d_row).ok()?;
        let col = usize::try_from(self.col as i64 + d_col).ok()?;
        Some(GridPos { row, col })
    }

    /// Step one cell in `dir`.
    #[must_use]
    pub fn step(self, dir: Direction) -> Option<GridPos> {
        let (d_row, d_col) = dir.delta();
        self.offset(d_row, d_col)
    }
}

impl std::fmt::Display for GridPos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// One of the four axis directions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Towards row 0.
    Up,
    /// Away from row 0.
    Down,
    /// Towards column 0.
    Left,
    /// Away from column 0.
    Right,
}

impl Direction {
    /// All directions in neighbor order.
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    /// `(row, col)` delta of one step.
    #[must_use]
    pub const fn delta(self) -> (i64, i64) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }

    /// Snap the vector `from -> to` onto its dominant axis.
    ///
    /// Ties between the axes favor the row axis. Returns `None` when both
    /// points coincide.
    ///
    /// ```
    /// use grid_tactics::grid::{Direction, GridPos};
    ///
    /// let from = GridPos::new(2, 2);
    /// assert_eq!(Direction::between(from, GridPos::new(0, 3)), Some(Direction::Up));
    /// assert_eq!(Direction::between(from, GridPos::new(3, 3)), Some(Direction::Down));
    /// assert_eq!(Direction::between(from, GridPos::new(2, 0)), Some(Direction::Left));
    /// assert_eq!(Direction::between(from, from), None);
    /// ```
    #[must_use]
    pub fn between(from: GridPos, to: GridPos) -> Option<Direction> {
        let d_row = to.row as i64 - from.row as i64;
        let d_col = to.col as i64 - from.col as i64;
        if d_row == 0 && d_col == 0 {
            return None;
        }
        if d_row.abs() >= d_col.abs() {
            Some(if d_row < 0 { Direction::Up } else { Direction::Down })
        } else {
            Some(if d_col < 0 { Direction::Left } else { Direction::Right })
        }
    }
}
