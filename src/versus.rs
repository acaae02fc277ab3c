//! Local two-player mode
//!
//! Two independent sessions behind one keyboard. The sessions share nothing;
//! both are seeded alike so the players get the same piece sequence.

use crate::game::{Game, GameEvent, GameState};
use crate::input::{Player, Routed};
use crate::randomizer::{PieceSource, Randomizer};
use crate::score::ScoringRule;

/// How a finished match ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Winner(Player),
    Draw,
}

/// Two sessions driven side by side
#[derive(Debug, Clone)]
pub struct Versus<S = Randomizer> {
    games: [Game<S>; 2],
}

impl Versus<Randomizer> {
    /// Both players draw from identically seeded randomizers
    pub fn with_seed(seed: u64, rule: ScoringRule) -> Self {
        Self::from_games(Game::with_seed(seed, rule), Game::with_seed(seed, rule))
    }
}

impl<S: PieceSource> Versus<S> {
    pub fn from_games(one: Game<S>, two: Game<S>) -> Self {
        Self { games: [one, two] }
    }

    pub fn game(&self, player: Player) -> &Game<S> {
        &self.games[player.index()]
    }

    /// Apply a routed action to its player's session
    pub fn apply(&mut self, routed: Routed) {
        let game = &mut self.games[routed.player.index()];
        if let Some(command) = routed.action.resolve(game.state()) {
            game.issue_command(command);
        }
    }

    /// Gravity step for one player
    pub fn tick(&mut self, player: Player) {
        self.games[player.index()].tick();
    }

    /// Drain both players' events, tagged by player
    pub fn take_events(&mut self) -> Vec<(Player, GameEvent)> {
        let mut events = Vec::new();
        for player in [Player::One, Player::Two] {
            events.extend(
                self.games[player.index()]
                    .take_events()
                    .into_iter()
                    .map(|event| (player, event)),
            );
        }
        events
    }

    /// Result once either player is out; `None` while both still play
    pub fn outcome(&self) -> Option<Outcome> {
        let over = |player: Player| self.game(player).state() == GameState::GameOver;
        let outcome = match (over(Player::One), over(Player::Two)) {
            (false, false) => return None,
            (true, false) => Outcome::Winner(Player::Two),
            (false, true) => Outcome::Winner(Player::One),
            (true, true) => {
                let one = self.game(Player::One).score().points;
                let two = self.game(Player::Two).score().points;
                match one.cmp(&two) {
                    std::cmp::Ordering::Greater => Outcome::Winner(Player::One),
                    std::cmp::Ordering::Less => Outcome::Winner(Player::Two),
                    std::cmp::Ordering::Equal => Outcome::Draw,
                }
            }
        };
        Some(outcome)
    }
}
