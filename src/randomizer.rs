//! Piece selection
//!
//! Sessions draw their pieces through [`PieceSource`] so tests and two-player
//! matches can control the sequence. The default source picks uniformly with
//! replacement; there is no bag.

use crate::tetromino::TetrominoType;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Anything that can hand out the next piece kind
pub trait PieceSource {
    fn next_kind(&mut self) -> TetrominoType;
}

/// Seedable uniform randomizer
#[derive(Debug, Clone)]
pub struct Randomizer {
    rng: ChaCha8Rng,
    seed: u64,
}

impl Randomizer {
    /// Create a randomizer with a fixed seed
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create a randomizer seeded from the thread RNG
    pub fn new() -> Self {
        Self::with_seed(rand::random())
    }

    /// Seed this randomizer was created with
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl Default for Randomizer {
    fn default() -> Self {
        Self::new()
    }
}

impl PieceSource for Randomizer {
    fn next_kind(&mut self) -> TetrominoType {
        let kinds = TetrominoType::all();
        kinds[self.rng.gen_range(0..kinds.len())]
    }
}

/// Scripted source that cycles through a fixed list of kinds
#[derive(Debug, Clone)]
pub struct Sequence {
    kinds: Vec<TetrominoType>,
    next: usize,
}

impl Sequence {
    /// Panics if `kinds` is empty.
    pub fn new(kinds: impl Into<Vec<TetrominoType>>) -> Self {
        let kinds = kinds.into();
        assert!(!kinds.is_empty(), "a piece sequence needs at least one kind");
        Self { kinds, next: 0 }
    }
}

impl PieceSource for Sequence {
    fn next_kind(&mut self) -> TetrominoType {
        let kind = self.kinds[self.next];
        self.next = (self.next + 1) % self.kinds.len();
        kind
    }
}

impl<S: PieceSource + ?Sized> PieceSource for Box<S> {
    fn next_kind(&mut self) -> TetrominoType {
        (**self).next_kind()
    }
}
