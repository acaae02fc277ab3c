//! Game board representation
//!
//! Row 0 is the top of the well, rows grow downward.

use crate::tetromino::TetrominoType;
use serde::Serialize;

/// Standard board dimensions
pub const BOARD_WIDTH: usize = 10;
pub const BOARD_HEIGHT: usize = 20;

/// A cell on the board - either empty or filled by a piece kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Cell {
    #[default]
    Empty,
    Filled(TetrominoType),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn is_filled(&self) -> bool {
        matches!(self, Cell::Filled(_))
    }

    /// The piece kind that produced this cell, if any
    pub fn owner(&self) -> Option<TetrominoType> {
        match self {
            Cell::Filled(owner) => Some(*owner),
            Cell::Empty => None,
        }
    }
}

/// One board row
pub type Row = [Cell; BOARD_WIDTH];

/// The game board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// Grid stored as [row][col]
    cells: [Row; BOARD_HEIGHT],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [[Cell::Empty; BOARD_WIDTH]; BOARD_HEIGHT],
        }
    }

    /// Get the cell at (x, y), `None` when out of bounds
    pub fn cell(&self, x: usize, y: usize) -> Option<Cell> {
        self.cells.get(y).and_then(|row| row.get(x)).copied()
    }

    /// Whether the cell at (x, y) is filled.
    ///
    /// Callers bounds-check first; an out-of-range cell reads as empty.
    pub fn is_occupied(&self, x: usize, y: usize) -> bool {
        self.cell(x, y).is_some_and(|cell| cell.is_filled())
    }

    /// Fill the cell at (x, y) with an owner tag
    pub(crate) fn set_owner(&mut self, x: usize, y: usize, owner: TetrominoType) {
        if let Some(cell) = self.cells.get_mut(y).and_then(|row| row.get_mut(x)) {
            *cell = Cell::Filled(owner);
        }
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, row: usize) -> bool {
        self.cells
            .get(row)
            .is_some_and(|cells| cells.iter().all(|cell| cell.is_filled()))
    }

    /// Delete `row`, shift every row above it down by one and clear row 0
    pub(crate) fn remove_row_and_shift_down(&mut self, row: usize) {
        if row >= BOARD_HEIGHT {
            return;
        }
        self.cells.copy_within(0..row, 1);
        self.cells[0] = [Cell::Empty; BOARD_WIDTH];
    }

    /// All rows, top to bottom
    pub fn rows(&self) -> &[Row; BOARD_HEIGHT] {
        &self.cells
    }

    /// Check if the board is completely empty
    pub fn is_empty(&self) -> bool {
        self.cells
            .iter()
            .all(|row| row.iter().all(|cell| cell.is_empty()))
    }

    /// Number of filled cells (useful for invariants in tests and logs)
    pub fn filled_count(&self) -> usize {
        self.cells
            .iter()
            .map(|row| row.iter().filter(|cell| cell.is_filled()).count())
            .sum()
    }

    #[cfg(test)]
    pub(crate) fn fill_row_except(&mut self, row: usize, gap: Option<usize>, owner: TetrominoType) {
        for x in 0..BOARD_WIDTH {
            if Some(x) != gap {
                self.set_owner(x, row, owner);
            }
        }
    }
}
