//! Core game state and logic
//!
//! A [`Game`] is one session: it owns the board, the falling piece and the
//! score, and advances only when the driver issues a [`Command`] or calls
//! [`Game::tick`]. Illegal moves are dropped without any error.

use crate::board::Board;
use crate::collision::is_legal;
use crate::lock::lock;
use crate::piece::Piece;
use crate::randomizer::{PieceSource, Randomizer};
use crate::score::{Score, ScoringRule};
use crate::snapshot::Snapshot;
use serde::Serialize;
use tracing::{debug, info};

/// Session state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GameState {
    Active,
    Paused,
    GameOver,
}

/// Commands the driver can issue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    MoveLeft,
    MoveRight,
    SoftDrop,
    Rotate,
    HardDrop,
    Pause,
    Resume,
    Quit,
}

/// Things that happened inside the session that a driver may want to react
/// to (sound, flashes, logs)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    LinesCleared(u32),
    GameOver,
}

/// The main game struct
#[derive(Debug, Clone)]
pub struct Game<S = Randomizer> {
    board: Board,
    current: Piece,
    score: Score,
    state: GameState,
    source: S,
    events: Vec<GameEvent>,
}

impl Game<Randomizer> {
    /// Create a new game with a random seed
    pub fn new(rule: ScoringRule) -> Self {
        Self::with_source(Randomizer::new(), rule)
    }

    /// Create a new game whose piece sequence is fixed by `seed`
    pub fn with_seed(seed: u64, rule: ScoringRule) -> Self {
        Self::with_source(Randomizer::with_seed(seed), rule)
    }
}

impl Default for Game<Randomizer> {
    fn default() -> Self {
        Self::new(ScoringRule::default())
    }
}

impl<S: PieceSource> Game<S> {
    /// Create a new game drawing pieces from `source`.
    ///
    /// The first piece is spawned immediately; if it does not fit the game
    /// starts in [`GameState::GameOver`].
    pub fn with_source(source: S, rule: ScoringRule) -> Self {
        Self::on_board(Board::new(), source, rule)
    }

    /// Like [`Game::with_source`], starting from a prepared board
    pub fn on_board(board: Board, mut source: S, rule: ScoringRule) -> Self {
        let current = Piece::new(source.next_kind());
        let mut game = Self {
            board,
            current,
            score: Score::new(rule),
            state: GameState::Active,
            source,
            events: Vec::new(),
        };
        debug!("spawned {}", current.kind().letter());
        if !is_legal(&game.current, &game.board) {
            game.end("no room for the first piece");
        }
        game
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_piece(&self) -> &Piece {
        &self.current
    }

    pub fn score(&self) -> &Score {
        &self.score
    }

    /// Apply a single command
    pub fn issue_command(&mut self, command: Command) {
        match self.state {
            GameState::Active => match command {
                Command::MoveLeft => self.try_replace(self.current.translated(-1, 0)),
                Command::MoveRight => self.try_replace(self.current.translated(1, 0)),
                Command::SoftDrop => self.try_replace(self.current.translated(0, 1)),
                Command::Rotate => self.try_replace(self.current.rotated()),
                Command::HardDrop => self.hard_drop(),
                Command::Pause => {
                    debug!("paused");
                    self.state = GameState::Paused;
                }
                Command::Quit => self.end("quit"),
                Command::Resume => {}
            },
            GameState::Paused => match command {
                Command::Resume => {
                    debug!("resumed");
                    self.state = GameState::Active;
                }
                Command::Quit => self.end("quit while paused"),
                _ => {}
            },
            GameState::GameOver => {}
        }
    }

    /// One gravity step
    pub fn tick(&mut self) {
        if self.state != GameState::Active {
            return;
        }
        let lowered = self.current.translated(0, 1);
        if is_legal(&lowered, &self.board) {
            self.current = lowered;
        } else {
            self.lock_piece();
        }
    }

    /// Where the current piece would land if dropped straight down
    pub fn ghost(&self) -> Piece {
        drop_position(&self.current, &self.board)
    }

    /// Read-only view for renderers
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(self)
    }

    /// Drain events produced since the last call
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    fn try_replace(&mut self, candidate: Piece) {
        if is_legal(&candidate, &self.board) {
            self.current = candidate;
        }
    }

    /// Move to the landing position; locking waits for the next tick
    fn hard_drop(&mut self) {
        self.current = drop_position(&self.current, &self.board);
    }

    /// Lock the current piece and spawn next
    fn lock_piece(&mut self) {
        let lines = lock(&self.current, &mut self.board);
        debug!(
            "locked {} at ({}, {}), cleared {}",
            self.current.kind().letter(),
            self.current.x(),
            self.current.y(),
            lines
        );

        if lines > 0 {
            if self.score.apply_clear(lines) {
                info!("level up: {}", self.score.level);
            }
            self.events.push(GameEvent::LinesCleared(lines));
        }

        self.current = Piece::new(self.source.next_kind());
        if !is_legal(&self.current, &self.board) {
            self.end("top out");
            return;
        }
        debug!("spawned {}", self.current.kind().letter());
    }

    fn end(&mut self, reason: &str) {
        info!(
            "game over ({}): score={} level={} lines={}",
            reason, self.score.points, self.score.level, self.score.lines
        );
        self.state = GameState::GameOver;
        self.events.push(GameEvent::GameOver);
    }
}

/// Slide `piece` down while it stays legal
fn drop_position(piece: &Piece, board: &Board) -> Piece {
    let mut landed = *piece;
    loop {
        let next = landed.translated(0, 1);
        if !is_legal(&next, board) {
            return landed;
        }
        landed = next;
    }
}
