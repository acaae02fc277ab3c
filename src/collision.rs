//! Placement legality

use crate::board::{Board, BOARD_HEIGHT, BOARD_WIDTH};
use crate::piece::Piece;

/// Whether `piece` fits on `board`.
///
/// Side walls and the floor are hard. Cells above row 0 are allowed and never
/// tested against the board. Pure, so it can be probed freely.
pub fn is_legal(piece: &Piece, board: &Board) -> bool {
    piece.blocks().all(|(x, y)| {
        if x < 0 || x >= BOARD_WIDTH as i32 || y >= BOARD_HEIGHT as i32 {
            return false;
        }
        y < 0 || !board.is_occupied(x as usize, y as usize)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tetromino::TetrominoType;

    #[test]
    fn test_spawn_is_legal_on_empty_board() {
        let board = Board::new();
        for kind in TetrominoType::all() {
            assert!(is_legal(&Piece::new(kind), &board), "{:?}", kind);
        }
    }

    #[test]
    fn test_walls_and_floor() {
        let board = Board::new();
        let o = Piece::new(TetrominoType::O);
        // O covers columns x..x+1 and rows y..y+1
        assert!(!is_legal(&Piece::at(TetrominoType::O, -1, 5), &board));
        assert!(is_legal(&Piece::at(TetrominoType::O, 0, 5), &board));
        assert!(!is_legal(&Piece::at(TetrominoType::O, 9, 5), &board));
        assert!(is_legal(&Piece::at(TetrominoType::O, 8, 5), &board));
        assert!(is_legal(&Piece::at(TetrominoType::O, 3, 18), &board));
        assert!(!is_legal(&Piece::at(TetrominoType::O, 3, 19), &board));
        assert!(is_legal(&o, &board));
    }

    #[test]
    fn test_empty_matrix_cells_may_leave_the_board() {
        let board = Board::new();
        // I spawn matrix only fills row 1, so rows 2 and 3 may hang below the floor
        assert!(is_legal(&Piece::at(TetrominoType::I, 0, 18), &board));
        assert!(!is_legal(&Piece::at(TetrominoType::I, 0, 19), &board));
        // A turned T leaves its left column empty, so it may hang past the left wall
        let turned = Piece::at(TetrominoType::T, -1, 5).rotated();
        assert!(is_legal(&turned, &board));
    }

    #[test]
    fn test_above_top_is_allowed() {
        let mut board = Board::new();
        board.set_owner(4, 0, TetrominoType::Z);
        let high = Piece::at(TetrominoType::O, 3, -2);
        assert!(is_legal(&high, &board));
        let touching = Piece::at(TetrominoType::O, 3, -1);
        assert!(!is_legal(&touching, &board));
    }

    #[test]
    fn test_settled_cells_block() {
        let mut board = Board::new();
        board.set_owner(4, 10, TetrominoType::J);
        assert!(!is_legal(&Piece::at(TetrominoType::O, 3, 9), &board));
        assert!(is_legal(&Piece::at(TetrominoType::O, 5, 9), &board));
    }

    #[test]
    fn test_probe_has_no_side_effects() {
        let mut board = Board::new();
        board.set_owner(0, 19, TetrominoType::S);
        let before = board.clone();
        let piece = Piece::new(TetrominoType::T);
        let _ = is_legal(&piece, &board);
        let _ = is_legal(&piece.translated(0, 30), &board);
        assert_eq!(board, before);
        assert_eq!(piece, Piece::new(TetrominoType::T));
    }
}
