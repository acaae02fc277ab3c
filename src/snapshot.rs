//! Read-only session view for renderers
//!
//! A snapshot is a plain value: it copies what a renderer needs and holds no
//! reference back into the session.

use crate::board::{Board, Cell, Row, BOARD_HEIGHT};
use crate::game::{Game, GameState};
use crate::piece::Piece;
use crate::randomizer::PieceSource;
use crate::tetromino::TetrominoType;
use serde::Serialize;

/// The falling piece as seen by a renderer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PieceView {
    pub kind: TetrominoType,
    pub x: i32,
    pub y: i32,
    /// Current (rotated) matrix, row-major
    pub matrix: Vec<Vec<bool>>,
}

impl PieceView {
    fn of(piece: &Piece) -> Self {
        Self {
            kind: piece.kind(),
            x: piece.x(),
            y: piece.y(),
            matrix: piece.shape().to_rows(),
        }
    }

    /// Absolute positions of the filled cells
    pub fn blocks(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.matrix.iter().enumerate().flat_map(move |(i, row)| {
            row.iter()
                .enumerate()
                .filter(|&(_, &filled)| filled)
                .map(move |(j, _)| (self.x + j as i32, self.y + i as i32))
        })
    }
}

/// Everything a renderer needs to draw one session
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    /// Settled cells, top row first
    pub board: [Row; BOARD_HEIGHT],
    pub piece: PieceView,
    /// Landing preview, absent once the game is over
    pub ghost: Option<PieceView>,
    pub score: u64,
    pub level: u32,
    pub lines: u32,
    pub state: GameState,
}

impl Snapshot {
    pub(crate) fn capture<S: PieceSource>(game: &Game<S>) -> Self {
        let board: &Board = game.board();
        let ghost = match game.state() {
            GameState::GameOver => None,
            _ => Some(PieceView::of(&game.ghost())),
        };
        Self {
            board: *board.rows(),
            piece: PieceView::of(game.current_piece()),
            ghost,
            score: game.score().points,
            level: game.score().level,
            lines: game.score().lines,
            state: game.state(),
        }
    }

    /// Cell at (x, y) of the settled board
    pub fn cell(&self, x: usize, y: usize) -> Cell {
        self.board
            .get(y)
            .and_then(|row| row.get(x))
            .copied()
            .unwrap_or_default()
    }
}
