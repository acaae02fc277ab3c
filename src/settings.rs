//! Settings persistence using TOML
//!
//! Stored in ~/.config/blockfall/settings.toml (or platform equivalent).
//! Every section falls back to defaults, so a partial file is fine.

use crate::score::ScoringRule;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

/// Errors from reading or writing the settings file
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("could not determine config directory")]
    NoConfigDir,

    #[error("settings io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid settings file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Game settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Keybindings
    pub keys: KeyBindings,
    /// Visual settings
    pub visual: VisualSettings,
    /// Gameplay settings
    pub gameplay: GameplaySettings,
    /// Audio settings
    pub audio: AudioSettings,
}

/// Key bindings (stored as strings for easy editing)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    /// Player one; also drives the only session in single-player mode
    pub player_one: PlayerKeys,
    /// Player two in versus mode
    pub player_two: PlayerKeys,
    /// Pause/resume toggle, sent to every session
    #[serde(deserialize_with = "deserialize_keys", serialize_with = "serialize_keys")]
    pub pause: Vec<String>,
    /// Quit, sent to every session
    #[serde(deserialize_with = "deserialize_keys", serialize_with = "serialize_keys")]
    pub quit: Vec<String>,
}

/// Per-player movement keys. Each action can have one or more keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerKeys {
    #[serde(deserialize_with = "deserialize_keys", serialize_with = "serialize_keys")]
    pub move_left: Vec<String>,
    #[serde(deserialize_with = "deserialize_keys", serialize_with = "serialize_keys")]
    pub move_right: Vec<String>,
    #[serde(deserialize_with = "deserialize_keys", serialize_with = "serialize_keys")]
    pub soft_drop: Vec<String>,
    #[serde(deserialize_with = "deserialize_keys", serialize_with = "serialize_keys")]
    pub rotate: Vec<String>,
    #[serde(deserialize_with = "deserialize_keys", serialize_with = "serialize_keys")]
    pub hard_drop: Vec<String>,
}

/// Deserialize keys as either a single string or array of strings
fn deserialize_keys<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(key) => vec![key],
        OneOrMany::Many(keys) => keys,
    })
}

/// Serialize keys: single key as string, multiple as array
fn serialize_keys<S>(keys: &[String], serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    match keys {
        [single] => serializer.serialize_str(single),
        many => serializer.collect_seq(many),
    }
}

/// Visual settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualSettings {
    /// Ghost piece visibility
    pub show_ghost: bool,
    /// Block style: "solid", "bracket", "round"
    pub block_style: String,
}

/// Gameplay settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameplaySettings {
    /// Points and level formula
    pub scoring: ScoringRule,
    /// Gravity interval at level 1, in milliseconds; divided by the level
    pub base_tick_ms: u64,
    /// Fixed piece-sequence seed; random when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

/// Audio settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    pub enabled: bool,
    /// SFX volume (0-100)
    pub sfx_volume: u32,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            player_one: PlayerKeys {
                move_left: vec!["a".to_string()],
                move_right: vec!["d".to_string()],
                soft_drop: vec!["s".to_string()],
                rotate: vec!["w".to_string()],
                hard_drop: vec!["Space".to_string()],
            },
            player_two: PlayerKeys::default(),
            pause: vec!["p".to_string()],
            quit: vec!["q".to_string(), "Esc".to_string()],
        }
    }
}

impl Default for PlayerKeys {
    fn default() -> Self {
        Self {
            move_left: vec!["Left".to_string()],
            move_right: vec!["Right".to_string()],
            soft_drop: vec!["Down".to_string()],
            rotate: vec!["Up".to_string()],
            hard_drop: vec!["Enter".to_string()],
        }
    }
}

impl Default for VisualSettings {
    fn default() -> Self {
        Self {
            show_ghost: true,
            block_style: "solid".to_string(),
        }
    }
}

impl Default for GameplaySettings {
    fn default() -> Self {
        Self {
            scoring: ScoringRule::Linear,
            base_tick_ms: 200,
            seed: None,
        }
    }
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            sfx_volume: 50,
        }
    }
}

impl Settings {
    /// Get the config directory path
    fn config_dir() -> Option<PathBuf> {
        ProjectDirs::from("com", "blockfall", "blockfall")
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Get the default settings file path
    pub fn settings_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("settings.toml"))
    }

    /// Load settings from the default location, or fall back to defaults
    pub fn load() -> Self {
        match Self::settings_path() {
            Some(path) => Self::load_or_default(&path),
            None => Self::default(),
        }
    }

    /// Load settings from `path`; a missing or broken file yields defaults
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            debug!("no settings at {}, using defaults", path.display());
            return Self::default();
        }
        match Self::load_from(path) {
            Ok(settings) => settings,
            Err(e) => {
                warn!("ignoring settings at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Load settings from `path`
    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let contents = fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Save settings to the default location
    pub fn save(&self) -> Result<(), SettingsError> {
        let path = Self::settings_path().ok_or(SettingsError::NoConfigDir)?;
        self.save_to(&path)
    }

    /// Save settings to `path`, creating parent directories as needed
    pub fn save_to(&self, path: &Path) -> Result<(), SettingsError> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }
}

impl GameplaySettings {
    /// Gravity interval at level 1
    pub fn base_tick(&self) -> Duration {
        Duration::from_millis(self.base_tick_ms.max(1))
    }
}

impl VisualSettings {
    /// Get the (block, ghost) characters based on style
    pub fn block_chars(&self) -> (&'static str, &'static str) {
        match self.block_style.as_str() {
            "bracket" => ("[]", ".."),
            "round" => ("()", ".."),
            _ => ("██", "░░"), // "solid" or default
        }
    }
}
