//! Keyboard dispatch
//!
//! Turns terminal key events into per-player actions. One dispatcher serves
//! both players: movement keys go to their owner, pause and quit go to every
//! session. In single-player mode both key sets drive player one.

use crate::game::{Command, GameState};
use crate::settings::{KeyBindings, PlayerKeys};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, ModifierKeyCode};
use tracing::warn;

/// Which session a key belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    One,
    Two,
}

impl Player {
    pub fn index(&self) -> usize {
        match self {
            Player::One => 0,
            Player::Two => 1,
        }
    }
}

/// What a key asks a session to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Command(Command),
    /// Pause when active, resume when paused
    TogglePause,
}

impl Action {
    /// Resolve against a session's state. `None` when there is nothing to do.
    pub fn resolve(self, state: GameState) -> Option<Command> {
        match (self, state) {
            (Action::Command(command), _) => Some(command),
            (Action::TogglePause, GameState::Active) => Some(Command::Pause),
            (Action::TogglePause, GameState::Paused) => Some(Command::Resume),
            (Action::TogglePause, GameState::GameOver) => None,
        }
    }
}

/// An action addressed to one player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Routed {
    pub player: Player,
    pub action: Action,
}

#[derive(Debug, Clone, Default)]
struct PlayerCodes {
    move_left: Vec<KeyCode>,
    move_right: Vec<KeyCode>,
    soft_drop: Vec<KeyCode>,
    rotate: Vec<KeyCode>,
    hard_drop: Vec<KeyCode>,
}

impl PlayerCodes {
    fn from_settings(keys: &PlayerKeys) -> Self {
        Self {
            move_left: parse_keys(&keys.move_left),
            move_right: parse_keys(&keys.move_right),
            soft_drop: parse_keys(&keys.soft_drop),
            rotate: parse_keys(&keys.rotate),
            hard_drop: parse_keys(&keys.hard_drop),
        }
    }

    fn command_for(&self, code: &KeyCode) -> Option<Command> {
        if self.move_left.contains(code) {
            Some(Command::MoveLeft)
        } else if self.move_right.contains(code) {
            Some(Command::MoveRight)
        } else if self.soft_drop.contains(code) {
            Some(Command::SoftDrop)
        } else if self.rotate.contains(code) {
            Some(Command::Rotate)
        } else if self.hard_drop.contains(code) {
            Some(Command::HardDrop)
        } else {
            None
        }
    }
}

/// Shared input dispatcher
#[derive(Debug, Clone)]
pub struct Dispatcher {
    one: PlayerCodes,
    two: PlayerCodes,
    pause: Vec<KeyCode>,
    quit: Vec<KeyCode>,
    versus: bool,
}

impl Dispatcher {
    /// Build a dispatcher from key settings
    pub fn new(keys: &KeyBindings, versus: bool) -> Self {
        Self {
            one: PlayerCodes::from_settings(&keys.player_one),
            two: PlayerCodes::from_settings(&keys.player_two),
            pause: parse_keys(&keys.pause),
            quit: parse_keys(&keys.quit),
            versus,
        }
    }

    fn players(&self) -> &'static [Player] {
        if self.versus {
            &[Player::One, Player::Two]
        } else {
            &[Player::One]
        }
    }

    fn broadcast(&self, action: Action) -> Vec<Routed> {
        self.players()
            .iter()
            .map(|&player| Routed { player, action })
            .collect()
    }

    /// Route a key press. Unbound keys produce nothing.
    pub fn dispatch(&self, key: KeyEvent) -> Vec<Routed> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return self.broadcast(Action::Command(Command::Quit));
        }

        let code = normalize_key(key.code);

        if self.quit.contains(&code) {
            return self.broadcast(Action::Command(Command::Quit));
        }
        if self.pause.contains(&code) {
            return self.broadcast(Action::TogglePause);
        }

        if let Some(command) = self.one.command_for(&code) {
            return vec![Routed {
                player: Player::One,
                action: Action::Command(command),
            }];
        }
        if let Some(command) = self.two.command_for(&code) {
            let player = if self.versus { Player::Two } else { Player::One };
            return vec![Routed {
                player,
                action: Action::Command(command),
            }];
        }

        Vec::new()
    }
}

/// Parse a key string into a KeyCode
fn parse_key(s: &str) -> Option<KeyCode> {
    let code = match s.to_lowercase().as_str() {
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "space" => KeyCode::Char(' '),
        "enter" | "return" => KeyCode::Enter,
        "tab" => KeyCode::Tab,
        "backspace" => KeyCode::Backspace,
        "esc" | "escape" => KeyCode::Esc,
        "shift" => KeyCode::Modifier(ModifierKeyCode::LeftShift),
        "ctrl" | "control" => KeyCode::Modifier(ModifierKeyCode::LeftControl),
        "alt" => KeyCode::Modifier(ModifierKeyCode::LeftAlt),
        other => {
            let mut chars = other.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => KeyCode::Char(c),
                _ => return None,
            }
        }
    };
    Some(code)
}

/// Parse a list of key strings, skipping ones we don't understand
fn parse_keys(keys: &[String]) -> Vec<KeyCode> {
    keys.iter()
        .filter_map(|s| {
            let code = parse_key(s);
            if code.is_none() {
                warn!("unknown key binding {:?}", s);
            }
            code
        })
        .collect()
}

/// Normalize key codes for consistent handling
fn normalize_key(code: KeyCode) -> KeyCode {
    match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn routed(player: Player, command: Command) -> Vec<Routed> {
        vec![Routed {
            player,
            action: Action::Command(command),
        }]
    }

    #[test]
    fn test_parse_key() {
        assert_eq!(parse_key("Space"), Some(KeyCode::Char(' ')));
        assert_eq!(parse_key("LEFT"), Some(KeyCode::Left));
        assert_eq!(parse_key("Esc"), Some(KeyCode::Esc));
        assert_eq!(parse_key("W"), Some(KeyCode::Char('w')));
        assert_eq!(parse_key("nonsense"), None);
        assert_eq!(parse_key(""), None);
    }

    #[test]
    fn test_versus_routing() {
        let dispatcher = Dispatcher::new(&KeyBindings::default(), true);
        assert_eq!(
            dispatcher.dispatch(press(KeyCode::Char('a'))),
            routed(Player::One, Command::MoveLeft)
        );
        assert_eq!(
            dispatcher.dispatch(press(KeyCode::Char(' '))),
            routed(Player::One, Command::HardDrop)
        );
        assert_eq!(
            dispatcher.dispatch(press(KeyCode::Left)),
            routed(Player::Two, Command::MoveLeft)
        );
        assert_eq!(
            dispatcher.dispatch(press(KeyCode::Enter)),
            routed(Player::Two, Command::HardDrop)
        );
        assert_eq!(
            dispatcher.dispatch(press(KeyCode::Up)),
            routed(Player::Two, Command::Rotate)
        );
    }

    #[test]
    fn test_single_player_takes_both_key_sets() {
        let dispatcher = Dispatcher::new(&KeyBindings::default(), false);
        assert_eq!(
            dispatcher.dispatch(press(KeyCode::Right)),
            routed(Player::One, Command::MoveRight)
        );
        assert_eq!(
            dispatcher.dispatch(press(KeyCode::Char('D'))),
            routed(Player::One, Command::MoveRight)
        );
    }

    #[test]
    fn test_global_keys_reach_everyone() {
        let dispatcher = Dispatcher::new(&KeyBindings::default(), true);
        let pause = dispatcher.dispatch(press(KeyCode::Char('p')));
        assert_eq!(pause.len(), 2);
        assert!(pause.iter().all(|r| r.action == Action::TogglePause));

        let quit = dispatcher.dispatch(press(KeyCode::Esc));
        assert_eq!(
            quit.iter().map(|r| r.player).collect::<Vec<_>>(),
            vec![Player::One, Player::Two]
        );
        assert!(quit.iter().all(|r| r.action == Action::Command(Command::Quit)));

        let ctrl_c = dispatcher.dispatch(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(ctrl_c.len(), 2);
    }

    #[test]
    fn test_toggle_pause_resolves_by_state() {
        assert_eq!(Action::TogglePause.resolve(GameState::Active), Some(Command::Pause));
        assert_eq!(Action::TogglePause.resolve(GameState::Paused), Some(Command::Resume));
        assert_eq!(Action::TogglePause.resolve(GameState::GameOver), None);
        assert_eq!(
            Action::Command(Command::Rotate).resolve(GameState::Paused),
            Some(Command::Rotate)
        );
    }

    #[test]
    fn test_unbound_key_is_ignored() {
        let dispatcher = Dispatcher::new(&KeyBindings::default(), true);
        assert!(dispatcher.dispatch(press(KeyCode::Char('z'))).is_empty());
        assert!(dispatcher.dispatch(press(KeyCode::F(5))).is_empty());
    }

    #[test]
    fn test_custom_bindings() {
        let mut keys = KeyBindings::default();
        keys.player_one.rotate = vec!["x".to_string(), "bogus-key".to_string()];
        let dispatcher = Dispatcher::new(&keys, false);
        assert_eq!(
            dispatcher.dispatch(press(KeyCode::Char('x'))),
            routed(Player::One, Command::Rotate)
        );
        assert!(dispatcher.dispatch(press(KeyCode::Char('w'))).is_empty());
    }
}
