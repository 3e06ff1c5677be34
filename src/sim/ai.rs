//! Rule-based AI opponent
//!
//! A small state machine. The current action is re-evaluated once per
//! reaction interval; in between, the previous action keeps executing every
//! frame. Force push is a one-shot: it fires once and hands over to `Attack`
//! for the rest of the decision window.

use std::f32::consts::FRAC_PI_2;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::controller::{ControlContext, Controller, Intent, StrikePhase};
use super::rng::RandomSource;
use crate::consts::*;
use crate::settings::Difficulty;

/// Tuning for one difficulty level
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyProfile {
    /// Minimum time between two decisions
    pub reaction_delay_ms: u64,
    pub move_speed: f32,
    pub attack_range: f32,
    pub force_push_chance: f32,
    pub dodge_chance: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AiAction {
    #[default]
    Idle,
    Approach,
    Dodge,
    Attack,
    ForcePush,
    Circle,
}

impl AiAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            AiAction::Idle => "idle",
            AiAction::Approach => "approach",
            AiAction::Dodge => "dodge",
            AiAction::Attack => "attack",
            AiAction::ForcePush => "force_push",
            AiAction::Circle => "circle",
        }
    }
}

/// What the AI sees when it makes a decision
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Situation {
    pub distance: f32,
    pub opponent_blade_active: bool,
    pub force_ready: bool,
}

#[derive(Debug, Clone)]
pub struct AiController {
    difficulty: Difficulty,
    profile: DifficultyProfile,
    action: AiAction,
    /// Action that replaces a one-shot action once it has executed
    follow_up: Option<AiAction>,
    last_decision_at: Option<u64>,
}

impl AiController {
    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            profile: difficulty.profile(),
            action: AiAction::Idle,
            follow_up: None,
            last_decision_at: None,
        }
    }

    pub fn action(&self) -> AiAction {
        self.action
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn profile(&self) -> &DifficultyProfile {
        &self.profile
    }

    pub fn last_decision_at(&self) -> Option<u64> {
        self.last_decision_at
    }

    /// A new decision is due once the reaction delay has fully elapsed
    pub fn decision_due(&self, now_ms: u64) -> bool {
        match self.last_decision_at {
            None => true,
            Some(at) => now_ms.saturating_sub(at) > self.profile.reaction_delay_ms,
        }
    }

    /// Pick an action for the given situation.
    ///
    /// Rules are checked in priority order. Random draws happen only where a
    /// rule reaches its chance test, so a scripted source sees them in order.
    pub fn decide(&self, situation: &Situation, rng: &mut dyn RandomSource) -> AiAction {
        let profile = &self.profile;
        let distance = situation.distance;

        if distance > profile.attack_range {
            AiAction::Approach
        } else if distance < AI_DODGE_DISTANCE
            && situation.opponent_blade_active
            && rng.roll() < profile.dodge_chance
        {
            AiAction::Dodge
        } else if distance <= profile.attack_range {
            if rng.roll() < profile.force_push_chance && situation.force_ready {
                AiAction::ForcePush
            } else {
                AiAction::Attack
            }
        } else {
            // NaN distance
            AiAction::Circle
        }
    }

    fn reevaluate(&mut self, ctx: &ControlContext<'_>, rng: &mut dyn RandomSource) {
        let situation = Situation {
            distance: ctx.offset_to_opponent().length(),
            opponent_blade_active: ctx.opponent_blade_active,
            force_ready: ctx.force_ready,
        };
        let next = self.decide(&situation, rng);
        if next != self.action {
            log::debug!(
                "AI {} -> {} at distance {:.1}",
                self.action.as_str(),
                next.as_str(),
                situation.distance
            );
        }

        self.action = next;
        self.follow_up = (next == AiAction::ForcePush).then_some(AiAction::Attack);
        self.last_decision_at = Some(ctx.now_ms);
    }

    /// Movement and blade handling for the current action
    fn execute(&self, ctx: &ControlContext<'_>) -> Intent {
        let speed = self.profile.move_speed;
        let offset = ctx.offset_to_opponent();
        let distance = offset.length();

        let mut intent = Intent::default();
        match self.action {
            AiAction::Idle => {}
            AiAction::Approach => {
                if offset.x.abs() > AI_APPROACH_DEADBAND {
                    intent.movement.x = if offset.x > 0.0 { speed } else { -speed };
                }
                if offset.y.abs() > AI_APPROACH_DEADBAND {
                    intent.movement.y = if offset.y > 0.0 { speed } else { -speed };
                }
                intent.blade_active = Some(true);
            }
            AiAction::Dodge => {
                if distance > 0.0 {
                    intent.movement = -(offset / distance) * speed * AI_DODGE_SPEED_FACTOR;
                }
                intent.blade_active = Some(true);
            }
            AiAction::Attack => {
                intent.blade_active = Some(true);
                intent.strike = StrikePhase::BeforeMove;
            }
            AiAction::ForcePush => {
                intent.force_push = true;
            }
            AiAction::Circle => {
                let angle = offset.y.atan2(offset.x) + FRAC_PI_2;
                intent.movement = Vec2::new(angle.cos(), angle.sin()) * speed;
                intent.blade_active = Some(true);
            }
        }
        intent
    }
}

impl Controller for AiController {
    fn intent(&mut self, ctx: &ControlContext<'_>, rng: &mut dyn RandomSource) -> Intent {
        if self.decision_due(ctx.now_ms) {
            self.reevaluate(ctx, rng);
        }

        let mut intent = self.execute(ctx);

        if let Some(next) = self.follow_up.take() {
            self.action = next;
        }
        intent.swinging = self.action == AiAction::Attack;
        intent
    }

    fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
        self.profile = difficulty.profile();
    }

    fn move_speed(&self) -> Option<f32> {
        Some(self.profile.move_speed)
    }

    fn is_ai(&self) -> bool {
        true
    }
}
