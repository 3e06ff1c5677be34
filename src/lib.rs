//! Plasma Duel - A two-fighter plasma blade arcade duel
//!
//! Core modules:
//! - `sim`: Simulation core (weapons, combatants, AI, match loop)
//! - `renderer`: Draw-list generation from read-only simulation state
//! - `platform`: Clock and input adapter contracts
//! - `settings`: Arena, bindings and difficulty configuration

pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::{ConfigError, Difficulty, Settings};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Reference arena dimensions
    pub const ARENA_WIDTH: f32 = 1200.0;
    pub const ARENA_HEIGHT: f32 = 800.0;
    /// Distance kept between a fighter and every arena edge
    pub const ARENA_MARGIN: f32 = 20.0;

    /// Time advanced by one frame (60 FPS), used for cooldown countdowns
    pub const FRAME_MS: u64 = 16;

    /// Fighter defaults
    pub const MAX_HEALTH: u32 = 100;
    pub const FIGHTER_SPEED: f32 = 5.0;
    pub const FIGHTER_RADIUS: f32 = 15.0;
    /// Damage is ignored for this long after taking a hit
    pub const INVULNERABLE_MS: u64 = 500;

    /// Blade defaults
    pub const BLADE_LENGTH: f32 = 80.0;
    pub const BLADE_DAMAGE: u32 = 10;
    /// Blade tip must come within this distance of the defender
    pub const BLADE_HIT_RADIUS: f32 = 30.0;
    /// Minimum time between two hits landed by the same attacker
    pub const STRIKE_COOLDOWN_MS: u64 = 200;
    /// Swing amplitude ramp (per update) and cap
    pub const SWING_RAMP: f32 = 0.3;
    pub const SWING_DECAY: f32 = 0.1;
    pub const SWING_MAX: f32 = 0.8;
    /// Oscillation frequency of a swinging blade (radians per ms); f64 so the
    /// phase stays exact for long-running clocks
    pub const SWING_FREQUENCY: f64 = 0.02;

    // Force push
    pub const FORCE_PUSH_RANGE: f32 = 150.0;
    pub const FORCE_PUSH_STRENGTH: f32 = 30.0;
    pub const FORCE_PUSH_DAMAGE: u32 = 5;
    pub const FORCE_PUSH_COOLDOWN_MS: u64 = 2000;

    // AI
    /// Opponent closer than this may trigger a dodge
    pub const AI_DODGE_DISTANCE: f32 = 40.0;
    /// Per-axis deadband while approaching (avoids jitter at point-blank range)
    pub const AI_APPROACH_DEADBAND: f32 = 5.0;
    pub const AI_DODGE_SPEED_FACTOR: f32 = 1.5;

    /// Difficulty changes are ignored for this long after the previous one
    pub const DIFFICULTY_DEBOUNCE_MS: u64 = 500;
}

/// RGB color
pub type Color = [u8; 3];

/// Palette
pub mod colors {
    use super::Color;

    pub const BLACK: Color = [0, 0, 0];
    pub const WHITE: Color = [255, 255, 255];
    pub const RED: Color = [255, 0, 0];
    pub const BLUE: Color = [0, 100, 255];
    pub const GREEN: Color = [0, 255, 0];
    pub const YELLOW: Color = [255, 255, 0];
    pub const PURPLE: Color = [128, 0, 128];
}

/// Unit vector pointing from `from` to `to`, or `None` when the points coincide
#[inline]
pub fn direction_between(from: Vec2, to: Vec2) -> Option<Vec2> {
    let delta = to - from;
    let distance = delta.length();
    if distance > 0.0 {
        Some(delta / distance)
    } else {
        None
    }
}

/// Convert polar (r, theta) around `origin` to cartesian (x, y)
#[inline]
pub fn polar_offset(origin: Vec2, r: f32, theta: f32) -> Vec2 {
    origin + Vec2::new(r * theta.cos(), r * theta.sin())
}
