//! BLOCKFALL - a falling-block puzzle engine
//!
//! The engine is synchronous and single-threaded: a driver feeds each
//! [`Game`] commands and gravity ticks, reads [`Snapshot`]s and reacts to
//! [`GameEvent`]s. Terminal drawing, keyboard decoding and sound live in the
//! binary.

pub mod board;
pub mod collision;
pub mod game;
pub mod input;
pub mod lock;
pub mod piece;
pub mod randomizer;
pub mod score;
pub mod settings;
pub mod snapshot;
pub mod tetromino;
pub mod versus;

pub use board::{Board, Cell, BOARD_HEIGHT, BOARD_WIDTH};
pub use game::{Command, Game, GameEvent, GameState};
pub use piece::Piece;
pub use randomizer::{PieceSource, Randomizer, Sequence};
pub use score::{Score, ScoringRule};
pub use snapshot::{PieceView, Snapshot};
pub use tetromino::TetrominoType;
