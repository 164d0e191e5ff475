//! Cell addressing for the grid interaction layer.
//!
//! Column 0 is the row-number gutter and is never addressable. The add-column
//! sentinel sits past the last data column; it is clickable (to append
//! columns) but never a navigation or edit target.

use serde::{Deserialize, Serialize};

/// Index of the row-number gutter column.
pub const GUTTER_COL: usize = 0;

/// First addressable data column; everything left of it is the gutter.
pub const FIRST_DATA_COL: usize = 1;

/// Coordinate of a single cell.
///
/// `row` is a 0-based display row (materialized rows followed by placeholder
/// slots). `col` is a 0-based display column; any addressable cell has
/// `col >= FIRST_DATA_COL`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellAddress {
    pub row: usize,
    pub col: usize,
}

impl CellAddress {
    #[inline]
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl std::fmt::Display for CellAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// A navigation intent from keyboard input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// (row delta, col delta) for one step.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }
}

/// Addressable extent of the grid: rows `[0, total_rows)`, data columns
/// `[FIRST_DATA_COL, last_data_col]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridBounds {
    pub total_rows: usize,
    pub last_data_col: usize,
}

impl GridBounds {
    pub fn new(total_rows: usize, last_data_col: usize) -> Self {
        Self { total_rows, last_data_col }
    }

    /// Clamp an arbitrary address into the addressable range.
    pub fn clamp(&self, addr: CellAddress) -> CellAddress {
        let max_row = self.total_rows.saturating_sub(1);
        CellAddress {
            row: addr.row.min(max_row),
            col: addr.col.max(FIRST_DATA_COL).min(self.last_data_col),
        }
    }

    /// One step from `addr` in `direction`, clamped at the edges. Navigation
    /// past an edge is a no-op on that axis; it never wraps.
    pub fn step(&self, addr: CellAddress, direction: Direction) -> CellAddress {
        let addr = self.clamp(addr);
        let (dr, dc) = direction.delta();
        let row = (addr.row as i32 + dr)
            .max(0)
            .min(self.total_rows as i32 - 1) as usize;
        let col = (addr.col as i32 + dc)
            .max(FIRST_DATA_COL as i32)
            .min(self.last_data_col as i32) as usize;
        CellAddress::new(row, col)
    }

    pub fn contains(&self, addr: CellAddress) -> bool {
        addr.row < self.total_rows
            && addr.col >= FIRST_DATA_COL
            && addr.col <= self.last_data_col
    }
}
