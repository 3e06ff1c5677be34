//! Game settings and configuration
//!
//! Loaded from JSON on native builds. Everything that can be wrong with a
//! configuration is caught here, before a combatant is ever constructed.

use std::collections::BTreeMap;
use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::ai::DifficultyProfile;

/// Configuration failures
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("binding table is missing required action `{0}`")]
    MissingBinding(ControlAction),
    #[error("key `{key}` is bound to both `{first}` and `{second}`")]
    DuplicateBinding {
        key: String,
        first: ControlAction,
        second: ControlAction,
    },
    #[error("arena {width}x{height} is too small for margin {margin}")]
    InvalidArena { width: f32, height: f32, margin: f32 },
    #[error("unknown difficulty `{0}` (expected easy, medium or hard)")]
    UnknownDifficulty(String),
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse settings: {0}")]
    Json(#[from] serde_json::Error),
}

/// AI difficulty levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" | "1" => Some(Difficulty::Easy),
            "medium" | "med" | "2" => Some(Difficulty::Medium),
            "hard" | "3" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Parse a difficulty name, reporting unknown names as a config error
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        Self::from_str(s).ok_or_else(|| ConfigError::UnknownDifficulty(s.to_string()))
    }

    /// Next level, wrapping from hard back to easy
    pub fn next(&self) -> Self {
        match self {
            Difficulty::Easy => Difficulty::Medium,
            Difficulty::Medium => Difficulty::Hard,
            Difficulty::Hard => Difficulty::Easy,
        }
    }

    /// Fixed tuning for this level
    pub fn profile(&self) -> DifficultyProfile {
        match self {
            Difficulty::Easy => DifficultyProfile {
                reaction_delay_ms: 800,
                move_speed: 2.0,
                attack_range: 60.0,
                force_push_chance: 0.01,
                dodge_chance: 0.3,
            },
            Difficulty::Medium => DifficultyProfile {
                reaction_delay_ms: 400,
                move_speed: 4.0,
                attack_range: 80.0,
                force_push_chance: 0.02,
                dodge_chance: 0.5,
            },
            Difficulty::Hard => DifficultyProfile {
                reaction_delay_ms: 200,
                move_speed: 6.0,
                attack_range: 100.0,
                force_push_chance: 0.03,
                dodge_chance: 0.7,
            },
        }
    }
}

/// Semantic actions a human combatant can bind keys to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlAction {
    Up,
    Down,
    Left,
    Right,
    Activate,
    Attack,
    Force,
    ToggleTarget,
}

impl ControlAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ControlAction::Up => "up",
            ControlAction::Down => "down",
            ControlAction::Left => "left",
            ControlAction::Right => "right",
            ControlAction::Activate => "activate",
            ControlAction::Attack => "attack",
            ControlAction::Force => "force",
            ControlAction::ToggleTarget => "toggle_target",
        }
    }
}

impl std::fmt::Display for ControlAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw binding table as it appears in configuration
pub type BindingTable = BTreeMap<ControlAction, String>;

/// Validated key bindings for one human combatant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBindings {
    pub up: String,
    pub down: String,
    pub left: String,
    pub right: String,
    pub activate: String,
    pub attack: String,
    pub force: String,
    /// Targeting toggle is optional; without it the mode is fixed
    pub toggle_target: Option<String>,
}

impl KeyBindings {
    /// Validate a binding table: every required action bound, no key reused
    pub fn from_table(table: &BindingTable) -> Result<Self, ConfigError> {
        let mut seen: BTreeMap<&str, ControlAction> = BTreeMap::new();
        for (action, key) in table {
            if let Some(first) = seen.insert(key.as_str(), *action) {
                return Err(ConfigError::DuplicateBinding {
                    key: key.clone(),
                    first,
                    second: *action,
                });
            }
        }

        let required = |action: ControlAction| {
            table
                .get(&action)
                .cloned()
                .ok_or(ConfigError::MissingBinding(action))
        };

        Ok(Self {
            up: required(ControlAction::Up)?,
            down: required(ControlAction::Down)?,
            left: required(ControlAction::Left)?,
            right: required(ControlAction::Right)?,
            activate: required(ControlAction::Activate)?,
            attack: required(ControlAction::Attack)?,
            force: required(ControlAction::Force)?,
            toggle_target: table.get(&ControlAction::ToggleTarget).cloned(),
        })
    }

    /// WASD layout used by the left fighter
    pub fn left_default() -> Self {
        Self {
            up: "W".into(),
            down: "S".into(),
            left: "A".into(),
            right: "D".into(),
            activate: "SPACE".into(),
            attack: "LSHIFT".into(),
            force: "Q".into(),
            toggle_target: Some("T".into()),
        }
    }

    /// Arrow-key layout used by the right fighter
    pub fn right_default() -> Self {
        Self {
            up: "UP".into(),
            down: "DOWN".into(),
            left: "LEFT".into(),
            right: "RIGHT".into(),
            activate: "RCTRL".into(),
            attack: "RSHIFT".into(),
            force: "RETURN".into(),
            toggle_target: Some("P".into()),
        }
    }

    /// Back to the raw table form (for saving defaults)
    pub fn to_table(&self) -> BindingTable {
        let mut table = BindingTable::new();
        table.insert(ControlAction::Up, self.up.clone());
        table.insert(ControlAction::Down, self.down.clone());
        table.insert(ControlAction::Left, self.left.clone());
        table.insert(ControlAction::Right, self.right.clone());
        table.insert(ControlAction::Activate, self.activate.clone());
        table.insert(ControlAction::Attack, self.attack.clone());
        table.insert(ControlAction::Force, self.force.clone());
        if let Some(toggle) = &self.toggle_target {
            table.insert(ControlAction::ToggleTarget, toggle.clone());
        }
        table
    }
}

/// Rectangular arena; fighters are kept `margin` away from every edge
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
    pub margin: f32,
}

impl Default for Arena {
    fn default() -> Self {
        Self {
            width: ARENA_WIDTH,
            height: ARENA_HEIGHT,
            margin: ARENA_MARGIN,
        }
    }
}

impl Arena {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let ok = self.margin >= 0.0
            && self.width.is_finite()
            && self.height.is_finite()
            && self.width > 2.0 * self.margin
            && self.height > 2.0 * self.margin;
        if ok {
            Ok(())
        } else {
            Err(ConfigError::InvalidArena {
                width: self.width,
                height: self.height,
                margin: self.margin,
            })
        }
    }

    /// Clamp a position into the playable interior
    pub fn clamp(&self, pos: Vec2) -> Vec2 {
        Vec2::new(
            pos.x.clamp(self.margin, self.width - self.margin),
            pos.y.clamp(self.margin, self.height - self.margin),
        )
    }

    pub fn contains(&self, pos: Vec2) -> bool {
        pos.x >= self.margin
            && pos.x <= self.width - self.margin
            && pos.y >= self.margin
            && pos.y <= self.height - self.margin
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Match settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Starting AI difficulty
    pub difficulty: Difficulty,
    pub arena: Arena,
    /// Spawn points (restart returns fighters here)
    pub left_spawn: Vec2,
    pub right_spawn: Vec2,
    /// Right fighter is driven by the AI
    pub right_is_ai: bool,
    pub left_controls: BindingTable,
    pub right_controls: BindingTable,
}

impl Default for Settings {
    fn default() -> Self {
        let arena = Arena::default();
        Self {
            difficulty: Difficulty::Medium,
            arena,
            left_spawn: Vec2::new(200.0, arena.height / 2.0),
            right_spawn: Vec2::new(arena.width - 200.0, arena.height / 2.0),
            right_is_ai: true,
            left_controls: KeyBindings::left_default().to_table(),
            right_controls: KeyBindings::right_default().to_table(),
        }
    }
}

impl Settings {
    /// Parse and validate settings from JSON
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.as_ref().display());
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check arena and both binding tables
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.arena.validate()?;
        self.left_bindings()?;
        self.right_bindings()?;
        for spawn in [self.left_spawn, self.right_spawn] {
            if !self.arena.contains(spawn) {
                log::warn!("Spawn point {spawn} lies outside the arena and will be clamped");
            }
        }
        Ok(())
    }

    pub fn left_bindings(&self) -> Result<KeyBindings, ConfigError> {
        KeyBindings::from_table(&self.left_controls)
    }

    pub fn right_bindings(&self) -> Result<KeyBindings, ConfigError> {
        KeyBindings::from_table(&self.right_controls)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_from_str() {
        assert_eq!(Difficulty::from_str("EASY"), Some(Difficulty::Easy));
        assert_eq!(Difficulty::from_str("med"), Some(Difficulty::Medium));
        assert_eq!(Difficulty::from_str("3"), Some(Difficulty::Hard));
        assert!(matches!(
            Difficulty::parse("nightmare"),
            Err(ConfigError::UnknownDifficulty(_))
        ));
    }

    #[test]
    fn test_difficulty_cycles() {
        let mut d = Difficulty::Easy;
        for expected in [Difficulty::Medium, Difficulty::Hard, Difficulty::Easy] {
            d = d.next();
            assert_eq!(d, expected);
        }
    }

    #[test]
    fn test_profiles_scale_with_difficulty() {
        let easy = Difficulty::Easy.profile();
        let hard = Difficulty::Hard.profile();
        assert!(easy.reaction_delay_ms > hard.reaction_delay_ms);
        assert!(easy.move_speed < hard.move_speed);
        assert_eq!(Difficulty::Medium.profile().attack_range, 80.0);
    }

    #[test]
    fn test_missing_binding_fails_fast() {
        let mut table = KeyBindings::left_default().to_table();
        table.remove(&ControlAction::Attack);
        let err = KeyBindings::from_table(&table).unwrap_err();
        assert!(matches!(err, ConfigError::MissingBinding(ControlAction::Attack)));
    }

    #[test]
    fn test_toggle_binding_is_optional() {
        let mut table = KeyBindings::right_default().to_table();
        table.remove(&ControlAction::ToggleTarget);
        let bindings = KeyBindings::from_table(&table).unwrap();
        assert_eq!(bindings.toggle_target, None);
    }

    #[test]
    fn test_duplicate_key_rejected() {
        let mut table = KeyBindings::left_default().to_table();
        table.insert(ControlAction::Force, "W".into());
        assert!(matches!(
            KeyBindings::from_table(&table),
            Err(ConfigError::DuplicateBinding { .. })
        ));
    }

    #[test]
    fn test_arena_clamp_and_validation() {
        let arena = Arena::default();
        assert_eq!(arena.clamp(Vec2::new(-50.0, 900.0)), Vec2::new(20.0, 780.0));
        assert!(arena.contains(Vec2::new(600.0, 400.0)));
        let narrow = Arena {
            width: 30.0,
            ..arena
        };
        assert!(matches!(narrow.validate(), Err(ConfigError::InvalidArena { .. })));
    }

    #[test]
    fn test_settings_json_defaults_fill_in() {
        let settings = Settings::from_json(r#"{ "difficulty": "hard" }"#).unwrap();
        assert_eq!(settings.difficulty, Difficulty::Hard);
        assert_eq!(settings.left_spawn, Vec2::new(200.0, 400.0));
        assert_eq!(settings.right_spawn, Vec2::new(1000.0, 400.0));

        let json = settings.to_json().unwrap();
        let again = Settings::from_json(&json).unwrap();
        assert_eq!(again.left_controls, settings.left_controls);
    }

    #[test]
    fn test_settings_rejects_incomplete_controls() {
        let json = r#"{ "left_controls": { "up": "W" } }"#;
        assert!(matches!(
            Settings::from_json(json),
            Err(ConfigError::MissingBinding(ControlAction::Down))
        ));
    }
}
