//! Active falling piece
//!
//! A piece never validates its own moves; the session asks
//! [`crate::collision::is_legal`] before committing a candidate.

use crate::board::BOARD_WIDTH;
use crate::tetromino::{Shape, TetrominoType};

/// Spawn anchor, shared by every kind
pub const SPAWN_X: i32 = BOARD_WIDTH as i32 / 2 - 2;
pub const SPAWN_Y: i32 = 0;

/// An active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    kind: TetrominoType,
    /// Top-left corner of the shape matrix in board coordinates
    x: i32,
    y: i32,
    shape: Shape,
}

impl Piece {
    /// Create a new piece at the spawn anchor
    pub fn new(kind: TetrominoType) -> Self {
        Self::at(kind, SPAWN_X, SPAWN_Y)
    }

    /// Create a piece with its matrix anchored at (x, y)
    pub fn at(kind: TetrominoType, x: i32, y: i32) -> Self {
        Self {
            kind,
            x,
            y,
            shape: kind.shape(),
        }
    }

    pub fn kind(&self) -> TetrominoType {
        self.kind
    }

    /// Owner tag written into the board when this piece locks
    pub fn owner(&self) -> TetrominoType {
        self.kind
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn y(&self) -> i32 {
        self.y
    }

    /// Move the anchor by (dx, dy)
    pub fn translate(&mut self, dx: i32, dy: i32) {
        self.x += dx;
        self.y += dy;
    }

    /// Turn the matrix clockwise in place.
    ///
    /// The turn happens inside the matrix's own box, so most kinds visibly
    /// shift when rotated.
    pub fn rotate(&mut self) {
        self.shape = self.shape.rotated_cw();
    }

    /// Copy of this piece moved by (dx, dy)
    pub fn translated(&self, dx: i32, dy: i32) -> Self {
        let mut next = *self;
        next.translate(dx, dy);
        next
    }

    /// Copy of this piece turned clockwise
    pub fn rotated(&self) -> Self {
        let mut next = *self;
        next.rotate();
        next
    }

    /// Absolute (x, y) board positions of the filled cells
    pub fn blocks(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.shape
            .filled()
            .map(move |(i, j)| (self.x + j as i32, self.y + i as i32))
    }
}
