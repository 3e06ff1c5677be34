//! Match state
//!
//! Two combatants in one arena, the win condition, restart and difficulty
//! selection. Per-frame advancement lives in `tick`.

use glam::Vec2;

use super::ai::AiController;
use super::combatant::{Combatant, Fighter, PushOutcome};
use super::controller::{ControlContext, Controller, HumanController, Intent};
use super::rng::RandomSource;
use crate::colors;
use crate::consts::DIFFICULTY_DEBOUNCE_MS;
use crate::settings::{Arena, ConfigError, Difficulty, Settings};

/// Which fighter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// Current phase of the match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchPhase {
    Playing,
    GameOver { winner: Side },
}

/// Match-level requests coming from outside the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchCommand {
    /// Start over (only honoured once the match is over)
    Restart,
    SetDifficulty(Difficulty),
}

impl MatchCommand {
    /// Match keys: R restarts, 1/2/3 select easy/medium/hard
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "R" => Some(MatchCommand::Restart),
            "1" | "2" | "3" => Difficulty::from_str(key).map(MatchCommand::SetDifficulty),
            _ => None,
        }
    }
}

/// Something noteworthy that happened during a frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DuelEvent {
    BladeHit { attacker: Side, damage: u32 },
    ForcePush { by: Side, outcome: Option<PushOutcome> },
    MatchOver { winner: Side },
    Restarted,
    DifficultyChanged(Difficulty),
}

/// Either kind of control source, for matches configured at runtime
#[derive(Debug, Clone)]
pub enum Pilot {
    Human(HumanController),
    Ai(AiController),
}

impl Controller for Pilot {
    fn intent(&mut self, ctx: &ControlContext<'_>, rng: &mut dyn RandomSource) -> Intent {
        match self {
            Pilot::Human(human) => human.intent(ctx, rng),
            Pilot::Ai(ai) => ai.intent(ctx, rng),
        }
    }

    fn set_difficulty(&mut self, difficulty: Difficulty) {
        if let Pilot::Ai(ai) = self {
            ai.set_difficulty(difficulty);
        }
    }

    fn move_speed(&self) -> Option<f32> {
        match self {
            Pilot::Human(human) => human.move_speed(),
            Pilot::Ai(ai) => ai.move_speed(),
        }
    }

    fn is_ai(&self) -> bool {
        matches!(self, Pilot::Ai(_))
    }
}

/// A match between two combatants
#[derive(Debug, Clone)]
pub struct Duel<L, R> {
    pub(crate) arena: Arena,
    pub(crate) left: Combatant<L>,
    pub(crate) right: Combatant<R>,
    pub(crate) phase: MatchPhase,
    difficulty: Difficulty,
    difficulty_changed_at: Option<u64>,
}

impl Duel<Pilot, Pilot> {
    /// Build the configured match: a human on the left, human or AI on the right
    pub fn from_settings(settings: &Settings) -> Result<Self, ConfigError> {
        settings.arena.validate()?;
        let arena = settings.arena;

        let left = Combatant::new(
            Fighter::new(arena.clamp(settings.left_spawn), colors::BLUE).with_auto_target(false),
            Pilot::Human(HumanController::new(settings.left_bindings()?)),
        );
        let right_pilot = if settings.right_is_ai {
            Pilot::Ai(AiController::new(settings.difficulty))
        } else {
            Pilot::Human(HumanController::new(settings.right_bindings()?))
        };
        let right = Combatant::new(
            Fighter::new(arena.clamp(settings.right_spawn), colors::RED),
            right_pilot,
        );

        Ok(Duel::new(arena, left, right, settings.difficulty))
    }
}

impl<L: Controller, R: Controller> Duel<L, R> {
    pub fn new(
        arena: Arena,
        mut left: Combatant<L>,
        mut right: Combatant<R>,
        difficulty: Difficulty,
    ) -> Self {
        left.set_difficulty(difficulty);
        right.set_difficulty(difficulty);
        log::info!(
            "Duel starting: {} vs {} ({})",
            if left.controller().is_ai() { "AI" } else { "human" },
            if right.controller().is_ai() { "AI" } else { "human" },
            difficulty.as_str()
        );

        Self {
            arena,
            left,
            right,
            phase: MatchPhase::Playing,
            difficulty,
            difficulty_changed_at: None,
        }
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    pub fn left(&self) -> &Combatant<L> {
        &self.left
    }

    pub fn right(&self) -> &Combatant<R> {
        &self.right
    }

    pub fn fighter(&self, side: Side) -> &Fighter {
        match side {
            Side::Left => self.left.fighter(),
            Side::Right => self.right.fighter(),
        }
    }

    pub fn is_ai(&self, side: Side) -> bool {
        match side {
            Side::Left => self.left.controller().is_ai(),
            Side::Right => self.right.controller().is_ai(),
        }
    }

    pub fn phase(&self) -> MatchPhase {
        self.phase
    }

    pub fn is_over(&self) -> bool {
        matches!(self.phase, MatchPhase::GameOver { .. })
    }

    pub fn winner(&self) -> Option<Side> {
        match self.phase {
            MatchPhase::GameOver { winner } => Some(winner),
            MatchPhase::Playing => None,
        }
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Display name of a side ("Player" or "AI (HARD)")
    pub fn name(&self, side: Side) -> String {
        if self.is_ai(side) {
            format!("AI ({})", self.difficulty.as_str().to_uppercase())
        } else {
            match side {
                Side::Left => "Player".to_string(),
                Side::Right => "Player 2".to_string(),
            }
        }
    }

    /// Change difficulty unless the previous change was too recent
    pub fn set_difficulty(&mut self, difficulty: Difficulty, now_ms: u64) -> bool {
        let debounced = self
            .difficulty_changed_at
            .is_some_and(|at| now_ms.saturating_sub(at) <= DIFFICULTY_DEBOUNCE_MS);
        if debounced {
            return false;
        }

        self.difficulty = difficulty;
        self.difficulty_changed_at = Some(now_ms);
        self.left.set_difficulty(difficulty);
        self.right.set_difficulty(difficulty);
        log::info!("AI difficulty set to {}", difficulty.as_str());
        true
    }

    /// Both fighters back to spawn with full health, match back in play
    pub fn restart(&mut self) {
        self.left.fighter_mut().reset();
        self.right.fighter_mut().reset();
        self.phase = MatchPhase::Playing;
        log::info!("Match restarted");
    }

    /// Apply an external command; returns the resulting event if it took effect
    pub fn apply(&mut self, command: MatchCommand, now_ms: u64) -> Option<DuelEvent> {
        match command {
            MatchCommand::Restart if self.is_over() => {
                self.restart();
                Some(DuelEvent::Restarted)
            }
            MatchCommand::Restart => None,
            MatchCommand::SetDifficulty(difficulty) => self
                .set_difficulty(difficulty, now_ms)
                .then_some(DuelEvent::DifficultyChanged(difficulty)),
        }
    }

    pub fn positions(&self) -> (Vec2, Vec2) {
        (self.left.fighter().position(), self.right.fighter().position())
    }
}
