//! Tetromino definitions and shapes
//!
//! All 7 pieces as small square matrices. Rotation is a plain matrix turn,
//! so every matrix is square.

use serde::{Deserialize, Serialize};

/// Largest matrix side (the I piece)
pub const MAX_SHAPE_SIDE: usize = 4;

/// The 7 tetromino types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TetrominoType {
    I, // long bar
    O, // square
    T,
    S,
    Z,
    J,
    L,
}

impl TetrominoType {
    /// Get all tetromino types in table order
    pub fn all() -> [TetrominoType; 7] {
        [
            TetrominoType::I,
            TetrominoType::O,
            TetrominoType::T,
            TetrominoType::S,
            TetrominoType::Z,
            TetrominoType::J,
            TetrominoType::L,
        ]
    }

    /// Get the canonical (spawn orientation) shape matrix
    pub fn shape(&self) -> Shape {
        match self {
            TetrominoType::I => Shape::from_rows(&[
                &[0, 0, 0, 0],
                &[1, 1, 1, 1],
                &[0, 0, 0, 0],
                &[0, 0, 0, 0],
            ]),
            TetrominoType::O => Shape::from_rows(&[&[1, 1], &[1, 1]]),
            TetrominoType::T => Shape::from_rows(&[&[0, 1, 0], &[1, 1, 1], &[0, 0, 0]]),
            TetrominoType::S => Shape::from_rows(&[&[0, 1, 1], &[1, 1, 0], &[0, 0, 0]]),
            TetrominoType::Z => Shape::from_rows(&[&[1, 1, 0], &[0, 1, 1], &[0, 0, 0]]),
            TetrominoType::J => Shape::from_rows(&[&[1, 0, 0], &[1, 1, 1], &[0, 0, 0]]),
            TetrominoType::L => Shape::from_rows(&[&[0, 0, 1], &[1, 1, 1], &[0, 0, 0]]),
        }
    }

    /// Single-letter name, handy for logs
    pub fn letter(&self) -> char {
        match self {
            TetrominoType::I => 'I',
            TetrominoType::O => 'O',
            TetrominoType::T => 'T',
            TetrominoType::S => 'S',
            TetrominoType::Z => 'Z',
            TetrominoType::J => 'J',
            TetrominoType::L => 'L',
        }
    }
}

/// A square occupancy matrix of side 2..=4
///
/// Stored in a fixed 4x4 array; only the top-left `side` x `side` block is
/// meaningful and everything outside it stays empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Shape {
    side: usize,
    cells: [[bool; MAX_SHAPE_SIDE]; MAX_SHAPE_SIDE],
}

impl Shape {
    fn from_rows(rows: &[&[u8]]) -> Self {
        let side = rows.len();
        debug_assert!(side <= MAX_SHAPE_SIDE);
        let mut cells = [[false; MAX_SHAPE_SIDE]; MAX_SHAPE_SIDE];
        for (i, row) in rows.iter().enumerate() {
            debug_assert_eq!(row.len(), side, "shape matrices must be square");
            for (j, &v) in row.iter().enumerate() {
                cells[i][j] = v != 0;
            }
        }
        Self { side, cells }
    }

    /// Side length of the matrix
    pub fn side(&self) -> usize {
        self.side
    }

    /// Whether the cell at (row, col) is filled
    pub fn is_filled(&self, row: usize, col: usize) -> bool {
        row < self.side && col < self.side && self.cells[row][col]
    }

    /// Turn the matrix 90 degrees clockwise: `new[j][N-1-i] = old[i][j]`
    pub fn rotated_cw(&self) -> Self {
        let n = self.side;
        let mut cells = [[false; MAX_SHAPE_SIDE]; MAX_SHAPE_SIDE];
        for i in 0..n {
            for j in 0..n {
                cells[j][n - 1 - i] = self.cells[i][j];
            }
        }
        Self { side: n, cells }
    }

    /// Iterate (row, col) of every filled cell
    pub fn filled(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.side)
            .flat_map(move |i| (0..self.side).map(move |j| (i, j)))
            .filter(|&(i, j)| self.cells[i][j])
    }

    /// Rows of the matrix as owned vectors (for display and serialization)
    pub fn to_rows(&self) -> Vec<Vec<bool>> {
        (0..self.side)
            .map(|i| self.cells[i][..self.side].to_vec())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_shape_has_four_cells() {
        for kind in TetrominoType::all() {
            assert_eq!(kind.shape().filled().count(), 4, "{:?}", kind);
        }
    }

    #[test]
    fn test_shape_sides() {
        assert_eq!(TetrominoType::I.shape().side(), 4);
        assert_eq!(TetrominoType::O.shape().side(), 2);
        for kind in [
            TetrominoType::T,
            TetrominoType::S,
            TetrominoType::Z,
            TetrominoType::J,
            TetrominoType::L,
        ] {
            assert_eq!(kind.shape().side(), 3);
        }
    }

    #[test]
    fn test_rotation_keeps_side() {
        for kind in TetrominoType::all() {
            let mut shape = kind.shape();
            for _ in 0..4 {
                let turned = shape.rotated_cw();
                assert_eq!(turned.side(), shape.side());
                assert_eq!(turned.filled().count(), 4);
                shape = turned;
            }
        }
    }

    #[test]
    fn test_four_rotations_are_identity() {
        for kind in TetrominoType::all() {
            let shape = kind.shape();
            let back = shape.rotated_cw().rotated_cw().rotated_cw().rotated_cw();
            assert_eq!(back, shape, "{:?}", kind);
        }
    }

    #[test]
    fn test_t_rotation_matrix() {
        // 010    010
        // 111 -> 011
        // 000    010
        let turned = TetrominoType::T.shape().rotated_cw();
        assert_eq!(
            turned.to_rows(),
            vec![
                vec![false, true, false],
                vec![false, true, true],
                vec![false, true, false],
            ]
        );
    }

    #[test]
    fn test_i_rotation_moves_to_column_two() {
        let turned = TetrominoType::I.shape().rotated_cw();
        let cells: Vec<_> = turned.filled().collect();
        assert_eq!(cells, vec![(0, 2), (1, 2), (2, 2), (3, 2)]);
    }
}
