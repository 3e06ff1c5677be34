//! Control sources
//!
//! A combatant does not care who is driving it. Each frame its controller
//! turns the situation (and, for humans, the held keys) into an `Intent`,
//! and the combatant applies that intent the same way for every source.

use glam::Vec2;

use super::rng::RandomSource;
use crate::platform::FrameInput;
use crate::settings::{Difficulty, KeyBindings};

/// When the blade hit check runs within a combatant update
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StrikePhase {
    /// No hit check this frame
    #[default]
    None,
    /// Swing at the opponent and check for a hit before moving
    BeforeMove,
    /// Check for a hit after the blade has been aimed, if the blade is active
    AfterAim,
}

/// What a controller wants its combatant to do this frame
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Intent {
    /// Displacement to apply before clamping to the arena
    pub movement: Vec2,
    /// New blade state; `None` keeps the current one
    pub blade_active: Option<bool>,
    /// Blade swings while aimed this frame
    pub swinging: bool,
    /// Trigger force push (ignored while on cooldown)
    pub force_push: bool,
    /// Flip between auto-target and pointer aiming
    pub toggle_target: bool,
    pub strike: StrikePhase,
}

/// Read-only view of the situation handed to a controller
#[derive(Debug, Clone, Copy)]
pub struct ControlContext<'a> {
    pub now_ms: u64,
    pub position: Vec2,
    /// Base movement speed of the combatant
    pub speed: f32,
    /// Force push cooldown has run out
    pub force_ready: bool,
    pub opponent_position: Vec2,
    pub opponent_blade_active: bool,
    pub input: &'a FrameInput,
}

impl ControlContext<'_> {
    /// Offset from this combatant to the opponent
    pub fn offset_to_opponent(&self) -> Vec2 {
        self.opponent_position - self.position
    }
}

/// Capability that produces a per-frame intent
pub trait Controller {
    fn intent(&mut self, ctx: &ControlContext<'_>, rng: &mut dyn RandomSource) -> Intent;

    /// Apply a new difficulty level (no-op for humans)
    fn set_difficulty(&mut self, _difficulty: Difficulty) {}

    /// Movement speed this controller imposes on its fighter, if any
    fn move_speed(&self) -> Option<f32> {
        None
    }

    fn is_ai(&self) -> bool {
        false
    }
}

/// Keyboard-driven controller
#[derive(Debug, Clone)]
pub struct HumanController {
    bindings: KeyBindings,
    /// Toggle key was held last frame
    toggle_held: bool,
}

impl HumanController {
    pub fn new(bindings: KeyBindings) -> Self {
        Self {
            bindings,
            toggle_held: false,
        }
    }

    pub fn bindings(&self) -> &KeyBindings {
        &self.bindings
    }

    /// Edge-triggered toggle: one press flips exactly once
    fn poll_toggle(&mut self, input: &FrameInput) -> bool {
        let Some(key) = &self.bindings.toggle_target else {
            return false;
        };

        if input.is_held(key) {
            if self.toggle_held {
                false
            } else {
                self.toggle_held = true;
                true
            }
        } else {
            self.toggle_held = false;
            false
        }
    }
}

impl Controller for HumanController {
    fn intent(&mut self, ctx: &ControlContext<'_>, _rng: &mut dyn RandomSource) -> Intent {
        let input = ctx.input;
        let keys = &self.bindings;

        let mut movement = Vec2::ZERO;
        if input.is_held(&keys.up) {
            movement.y -= ctx.speed;
        }
        if input.is_held(&keys.down) {
            movement.y += ctx.speed;
        }
        if input.is_held(&keys.left) {
            movement.x -= ctx.speed;
        }
        if input.is_held(&keys.right) {
            movement.x += ctx.speed;
        }

        let swinging = input.is_held(&keys.attack);
        let blade_active = input.is_held(&keys.activate) || swinging;
        let force_push = input.is_held(&keys.force);
        let toggle_target = self.poll_toggle(input);

        Intent {
            movement,
            blade_active: Some(blade_active),
            swinging,
            force_push,
            toggle_target,
            strike: if swinging {
                StrikePhase::AfterAim
            } else {
                StrikePhase::None
            },
        }
    }
}
