//! Locking pieces into the board and clearing full rows

use crate::board::{Board, BOARD_HEIGHT};
use crate::piece::Piece;

/// Merge `piece` into `board` and compact every full row.
///
/// Returns the number of rows cleared (0..=4).
pub fn lock(piece: &Piece, board: &mut Board) -> u32 {
    for (x, y) in piece.blocks() {
        if y >= 0 && x >= 0 {
            board.set_owner(x as usize, y as usize, piece.owner());
        }
    }
    clear_full_rows(board)
}

/// Remove full rows bottom-up and return how many were removed
fn clear_full_rows(board: &mut Board) -> u32 {
    let mut cleared = 0;
    let mut row = BOARD_HEIGHT;
    while row > 0 {
        let y = row - 1;
        if board.is_row_full(y) {
            board.remove_row_and_shift_down(y);
            cleared += 1;
            // the row that fell into `y` has to be checked too
            continue;
        }
        row -= 1;
    }
    cleared
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Cell, Row, BOARD_WIDTH};
    use crate::tetromino::TetrominoType;

    #[test]
    fn test_lock_without_clear() {
        let mut board = Board::new();
        let piece = Piece::at(TetrominoType::T, 0, 18);
        assert_eq!(lock(&piece, &mut board), 0);
        assert_eq!(board.filled_count(), 4);
        assert_eq!(board.cell(1, 18), Some(Cell::Filled(TetrominoType::T)));
        assert_eq!(board.cell(0, 19), Some(Cell::Filled(TetrominoType::T)));
    }

    #[test]
    fn test_cells_above_top_are_dropped() {
        let mut board = Board::new();
        let piece = Piece::at(TetrominoType::O, 4, -1);
        assert_eq!(lock(&piece, &mut board), 0);
        assert_eq!(board.filled_count(), 2);
        assert!(board.is_occupied(4, 0));
        assert!(board.is_occupied(5, 0));
    }

    #[test]
    fn test_single_row_scenario() {
        // Row 19 full except columns 0..2, O piece fills 0..2 of rows 18 and 19
        let mut board = Board::new();
        for x in 2..BOARD_WIDTH {
            board.set_owner(x, 19, TetrominoType::I);
        }
        board.set_owner(7, 17, TetrominoType::L);
        let piece = Piece::at(TetrominoType::O, 0, 18);

        let mut merged = board.clone();
        for (x, y) in piece.blocks() {
            merged.set_owner(x as usize, y as usize, TetrominoType::O);
        }
        let row_18: Row = merged.rows()[18];

        let cleared = lock(&piece, &mut board);
        assert_eq!(cleared, 1);
        assert_eq!(board.rows()[19], row_18);
        assert_eq!(board.cell(7, 18), Some(Cell::Filled(TetrominoType::L)));
        assert!(!board.is_row_full(19));
    }

    #[test]
    fn test_completing_gap_with_vertical_i() {
        let mut board = Board::new();
        for y in 16..20 {
            board.fill_row_except(y, Some(9), TetrominoType::Z);
        }
        board.set_owner(0, 15, TetrominoType::S);
        // turned I occupies column x + 2
        let piece = Piece::at(TetrominoType::I, 7, 16).rotated();
        assert_eq!(lock(&piece, &mut board), 4);
        assert_eq!(board.filled_count(), 1);
        assert_eq!(board.cell(0, 19), Some(Cell::Filled(TetrominoType::S)));
    }

    #[test]
    fn test_non_adjacent_rows() {
        let mut board = Board::new();
        board.fill_row_except(19, Some(1), TetrominoType::J);
        for x in 2..BOARD_WIDTH {
            board.set_owner(x, 18, TetrominoType::J);
            if x > 2 {
                board.set_owner(x, 17, TetrominoType::J);
            }
        }
        board.set_owner(0, 17, TetrominoType::J);
        board.set_owner(5, 16, TetrominoType::T);
        let marker_row = board.rows()[16];

        //   100      011
        //   111  ->  010
        //   000      010
        let piece = Piece::at(TetrominoType::J, 0, 17).rotated();
        let blocks: Vec<_> = piece.blocks().collect();
        assert_eq!(blocks, vec![(1, 17), (2, 17), (1, 18), (1, 19)]);

        // rows 19 and 17 become full, row 18 keeps its gap in column 0
        let cleared = lock(&piece, &mut board);
        assert_eq!(cleared, 2);

        let mut expected_bottom = [Cell::Filled(TetrominoType::J); BOARD_WIDTH];
        expected_bottom[0] = Cell::Empty;
        assert_eq!(board.rows()[19], expected_bottom);
        assert_eq!(board.rows()[18], marker_row);
        // nine cells left in the bottom row plus the marker
        assert_eq!(board.filled_count(), BOARD_WIDTH);
        assert!((0..BOARD_HEIGHT).all(|y| !board.is_row_full(y)));
    }

    #[test]
    fn test_rows_above_keep_order() {
        let mut board = Board::new();
        for (y, kind) in [(12, TetrominoType::S), (13, TetrominoType::Z), (14, TetrominoType::L)] {
            board.set_owner(y % BOARD_WIDTH, y, kind);
        }
        board.fill_row_except(19, Some(4), TetrominoType::I);
        board.fill_row_except(18, Some(4), TetrominoType::I);
        let above: Vec<Row> = board.rows()[..18].to_vec();

        // turned I fills column x + 2 over rows y..y+4
        let piece = Piece::at(TetrominoType::I, 2, 16).rotated();
        assert_eq!(lock(&piece, &mut board), 2);

        // rows 16 and 17 gained a cell from the piece; everything else shifted by two
        let after: Vec<Row> = board.rows()[2..].to_vec();
        for y in 0..16 {
            assert_eq!(after[y], above[y], "row {}", y);
        }
        assert!(board.rows()[0].iter().all(|c| c.is_empty()));
        assert!(board.rows()[1].iter().all(|c| c.is_empty()));
    }
}
