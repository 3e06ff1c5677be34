//! Fighters and the rules that let them hurt each other
//!
//! `Fighter` is the controller-independent body: position, health, blade,
//! timers. `Combatant` pairs a fighter with whatever drives it.

use glam::Vec2;

use super::controller::{ControlContext, Controller, StrikePhase};
use super::rng::RandomSource;
use super::weapon::Weapon;
use crate::consts::*;
use crate::platform::FrameInput;
use crate::settings::{Arena, Difficulty};
use crate::{Color, direction_between};

/// Result of a force push that reached its target
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PushOutcome {
    /// How far the target was moved (after clamping to the arena)
    pub displacement: Vec2,
    /// Health actually removed (0 while the target is invulnerable)
    pub damage: u32,
}

/// What happened during one combatant update
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct UpdateReport {
    /// Health removed from the opponent by the blade
    pub blade_damage: Option<u32>,
    /// Force push was triggered this frame
    pub force_push_fired: bool,
    /// Force push reached the opponent
    pub push: Option<PushOutcome>,
}

#[derive(Debug, Clone)]
pub struct Fighter {
    position: Vec2,
    spawn: Vec2,
    color: Color,
    health: u32,
    max_health: u32,
    speed: f32,
    weapon: Weapon,
    /// When damage was last taken (drives invulnerability)
    damage_taken_at: Option<u64>,
    /// When this fighter's blade last connected (drives the strike cooldown)
    last_strike_at: Option<u64>,
    invulnerable_ms: u64,
    /// Remaining force push cooldown
    force_cooldown_ms: u64,
    /// Aim at the opponent instead of the pointer
    auto_target: bool,
}

impl Fighter {
    pub fn new(spawn: Vec2, color: Color) -> Self {
        Self {
            position: spawn,
            spawn,
            color,
            health: MAX_HEALTH,
            max_health: MAX_HEALTH,
            speed: FIGHTER_SPEED,
            weapon: Weapon::new(spawn, color),
            damage_taken_at: None,
            last_strike_at: None,
            invulnerable_ms: INVULNERABLE_MS,
            force_cooldown_ms: 0,
            auto_target: true,
        }
    }

    pub fn with_auto_target(mut self, auto_target: bool) -> Self {
        self.auto_target = auto_target;
        self
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn spawn(&self) -> Vec2 {
        self.spawn
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn health(&self) -> u32 {
        self.health
    }

    pub fn max_health(&self) -> u32 {
        self.max_health
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn weapon(&self) -> &Weapon {
        &self.weapon
    }

    pub fn auto_target(&self) -> bool {
        self.auto_target
    }

    pub fn force_cooldown_ms(&self) -> u64 {
        self.force_cooldown_ms
    }

    pub fn damage_taken_at(&self) -> Option<u64> {
        self.damage_taken_at
    }

    pub fn last_strike_at(&self) -> Option<u64> {
        self.last_strike_at
    }

    pub fn is_defeated(&self) -> bool {
        self.health == 0
    }

    pub fn is_invulnerable(&self, now_ms: u64) -> bool {
        self.damage_taken_at
            .is_some_and(|at| now_ms.saturating_sub(at) < self.invulnerable_ms)
    }

    /// Remove `amount` health unless invulnerable. Returns the health lost.
    pub fn take_damage(&mut self, amount: u32, now_ms: u64) -> u32 {
        if self.is_invulnerable(now_ms) {
            return 0;
        }
        let lost = amount.min(self.health);
        self.health -= lost;
        self.damage_taken_at = Some(now_ms);
        lost
    }

    fn strike_ready(&self, now_ms: u64) -> bool {
        self.last_strike_at
            .is_none_or(|at| now_ms.saturating_sub(at) > STRIKE_COOLDOWN_MS)
    }

    /// Blade hit check against `defender`.
    ///
    /// A hit needs the blade tip within `BLADE_HIT_RADIUS` of the defender and
    /// the attacker's own strike cooldown to have elapsed. The cooldown
    /// restarts on every hit, even one the defender's invulnerability absorbs.
    pub fn strike(&mut self, defender: &mut Fighter, now_ms: u64) -> Option<u32> {
        let tip = self.weapon.tip_from(self.position);
        if tip.distance(defender.position) >= BLADE_HIT_RADIUS || !self.strike_ready(now_ms) {
            return None;
        }

        let damage = defender.take_damage(BLADE_DAMAGE, now_ms);
        self.last_strike_at = Some(now_ms);
        log::debug!("Blade hit for {damage} (defender at {})", defender.health);
        Some(damage)
    }

    /// Shove a nearby `target` away and hurt it. `None` when out of range.
    pub fn force_push(
        &self,
        target: &mut Fighter,
        now_ms: u64,
        arena: &Arena,
    ) -> Option<PushOutcome> {
        let distance = self.position.distance(target.position);
        if distance >= FORCE_PUSH_RANGE {
            return None;
        }
        let direction = direction_between(self.position, target.position)?;

        let before = target.position;
        target.position = arena.clamp(before + direction * FORCE_PUSH_STRENGTH);
        let damage = target.take_damage(FORCE_PUSH_DAMAGE, now_ms);
        log::debug!("Force push at distance {distance:.1}, damage {damage}");

        Some(PushOutcome {
            displacement: target.position - before,
            damage,
        })
    }

    /// Back to spawn with full health
    pub fn reset(&mut self) {
        self.health = self.max_health;
        self.position = self.spawn;
    }

    fn tick_cooldowns(&mut self) {
        self.force_cooldown_ms = self.force_cooldown_ms.saturating_sub(FRAME_MS);
    }
}

/// A fighter together with its control source
#[derive(Debug, Clone)]
pub struct Combatant<C> {
    fighter: Fighter,
    controller: C,
}

impl<C: Controller> Combatant<C> {
    pub fn new(fighter: Fighter, controller: C) -> Self {
        let mut combatant = Self { fighter, controller };
        combatant.sync_speed();
        combatant
    }

    /// Forward a difficulty change to the controller and adopt its speed
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.controller.set_difficulty(difficulty);
        self.sync_speed();
    }

    fn sync_speed(&mut self) {
        if let Some(speed) = self.controller.move_speed() {
            self.fighter.speed = speed;
        }
    }

    pub fn fighter(&self) -> &Fighter {
        &self.fighter
    }

    pub fn fighter_mut(&mut self) -> &mut Fighter {
        &mut self.fighter
    }

    pub fn controller(&self) -> &C {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut C {
        &mut self.controller
    }

    /// Advance one frame against `opponent`.
    ///
    /// Stages, in order: optional early swing, movement and arena clamp,
    /// force push, blade aim, optional late hit check, cooldown countdown.
    pub fn update(
        &mut self,
        opponent: &mut Fighter,
        input: &FrameInput,
        now_ms: u64,
        arena: &Arena,
        rng: &mut dyn RandomSource,
    ) -> UpdateReport {
        let me = &mut self.fighter;
        let ctx = ControlContext {
            now_ms,
            position: me.position,
            speed: me.speed,
            force_ready: me.force_cooldown_ms == 0,
            opponent_position: opponent.position,
            opponent_blade_active: opponent.weapon.active,
            input,
        };
        let intent = self.controller.intent(&ctx, rng);
        let mut report = UpdateReport::default();

        if let Some(active) = intent.blade_active {
            me.weapon.active = active;
        }
        if intent.toggle_target {
            me.auto_target = !me.auto_target;
            log::debug!("Auto-target {}", if me.auto_target { "on" } else { "off" });
        }

        if intent.strike == StrikePhase::BeforeMove {
            let aim = aim_point(me, opponent, input);
            me.weapon.update(me.position, aim, true, now_ms);
            report.blade_damage = me.strike(opponent, now_ms);
        }

        me.position = arena.clamp(me.position + intent.movement);

        if intent.force_push && me.force_cooldown_ms == 0 {
            report.force_push_fired = true;
            report.push = me.force_push(opponent, now_ms, arena);
            me.force_cooldown_ms = FORCE_PUSH_COOLDOWN_MS;
        }

        let aim = aim_point(me, opponent, input);
        me.weapon.update(me.position, aim, intent.swinging, now_ms);

        if intent.strike == StrikePhase::AfterAim && me.weapon.active {
            report.blade_damage = me.strike(opponent, now_ms);
        }

        me.tick_cooldowns();
        report
    }
}

fn aim_point(me: &Fighter, opponent: &Fighter, input: &FrameInput) -> Vec2 {
    if me.auto_target {
        opponent.position
    } else {
        input.pointer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::KeyBindings;
    use crate::sim::controller::HumanController;
    use crate::sim::rng::ScriptedRolls;

    fn fighter_at(x: f32, y: f32) -> Fighter {
        Fighter::new(Vec2::new(x, y), crate::colors::BLUE)
    }

    /// Attacker with its blade aimed along +x, tip at (180, 100)
    fn aimed_attacker() -> Fighter {
        let mut attacker = fighter_at(100.0, 100.0);
        attacker
            .weapon
            .update(attacker.position, Vec2::new(500.0, 100.0), false, 0);
        attacker.weapon.active = true;
        attacker
    }

    #[test]
    fn test_invulnerability_window() {
        let mut fighter = fighter_at(0.0, 0.0);
        assert_eq!(fighter.take_damage(10, 1000), 10);
        assert_eq!(fighter.take_damage(10, 1499), 0);
        assert_eq!(fighter.health(), 90);
        assert!(!fighter.is_invulnerable(1500));
        assert_eq!(fighter.take_damage(10, 1500), 10);
        assert_eq!(fighter.health(), 80);
    }

    #[test]
    fn test_health_never_below_zero() {
        let mut fighter = fighter_at(0.0, 0.0);
        fighter.health = 3;
        assert_eq!(fighter.take_damage(10, 0), 3);
        assert_eq!(fighter.health(), 0);
        assert!(fighter.is_defeated());
    }

    #[test]
    fn test_strike_in_range_and_cooldown() {
        let mut attacker = aimed_attacker();
        // Defender 20 units beyond the tip
        let mut defender = fighter_at(200.0, 100.0);

        assert_eq!(attacker.strike(&mut defender, 1000), Some(10));
        assert_eq!(defender.health(), 90);
        assert_eq!(attacker.last_strike_at(), Some(1000));

        assert_eq!(attacker.strike(&mut defender, 1150), None);
        assert_eq!(defender.health(), 90);

        // Fresh defender, so only the attacker's cooldown is in play:
        // it needs strictly more than 200ms
        let mut fresh = fighter_at(200.0, 100.0);
        assert_eq!(attacker.strike(&mut fresh, 1200), None);
        assert_eq!(attacker.strike(&mut fresh, 1201), Some(10));
        assert_eq!(fresh.health(), 90);
        assert_eq!(attacker.last_strike_at(), Some(1201));
    }

    #[test]
    fn test_strike_absorbed_still_starts_cooldown() {
        let mut attacker = aimed_attacker();
        let mut defender = fighter_at(200.0, 100.0);
        defender.take_damage(1, 1000);

        assert_eq!(attacker.strike(&mut defender, 1300), Some(0));
        assert_eq!(attacker.last_strike_at(), Some(1300));
        assert_eq!(defender.health(), 99);
    }

    #[test]
    fn test_strike_out_of_reach() {
        let mut attacker = aimed_attacker();
        let mut defender = fighter_at(211.0, 100.0);
        assert_eq!(attacker.strike(&mut defender, 1000), None);
        assert_eq!(defender.health(), MAX_HEALTH);
    }

    #[test]
    fn test_force_push_displaces_and_damages() {
        let arena = Arena::default();
        let pusher = fighter_at(400.0, 400.0);
        let mut target = fighter_at(500.0, 400.0);

        let outcome = pusher.force_push(&mut target, 1000, &arena).unwrap();
        assert_eq!(target.position(), Vec2::new(530.0, 400.0));
        assert_eq!(outcome.displacement, Vec2::new(30.0, 0.0));
        assert_eq!(outcome.damage, 5);
        assert_eq!(target.health(), 95);
    }

    #[test]
    fn test_force_push_moves_invulnerable_target_without_damage() {
        let arena = Arena::default();
        let pusher = fighter_at(400.0, 400.0);
        let mut target = fighter_at(500.0, 400.0);
        target.take_damage(1, 1000);

        let outcome = pusher.force_push(&mut target, 1300, &arena).unwrap();
        assert_eq!(outcome.displacement, Vec2::new(30.0, 0.0));
        assert_eq!(outcome.damage, 0);
        assert_eq!(target.health(), 99);
        assert_eq!(target.damage_taken_at(), Some(1000));
    }

    #[test]
    fn test_force_push_out_of_range() {
        let arena = Arena::default();
        let pusher = fighter_at(400.0, 400.0);
        let mut target = fighter_at(550.0, 400.0);
        assert!(pusher.force_push(&mut target, 1000, &arena).is_none());
        assert_eq!(target.position(), Vec2::new(550.0, 400.0));
    }

    #[test]
    fn test_force_push_keeps_target_in_arena() {
        let arena = Arena::default();
        let pusher = fighter_at(1100.0, 400.0);
        let mut target = fighter_at(1170.0, 400.0);
        pusher.force_push(&mut target, 1000, &arena).unwrap();
        assert_eq!(target.position().x, 1180.0);
    }

    #[test]
    fn test_human_update_moves_and_clamps() {
        let arena = Arena::default();
        let mut human = Combatant::new(
            fighter_at(22.0, 400.0),
            HumanController::new(KeyBindings::left_default()),
        );
        let mut opponent = fighter_at(1000.0, 400.0);
        let mut rng = ScriptedRolls::new([0.5]);
        let input = FrameInput::default().with_key("A");

        human.update(&mut opponent, &input, 1000, &arena, &mut rng);
        assert_eq!(human.fighter().position(), Vec2::new(20.0, 400.0));
    }

    #[test]
    fn test_human_force_push_sets_cooldown() {
        let arena = Arena::default();
        let mut human = Combatant::new(
            fighter_at(400.0, 400.0),
            HumanController::new(KeyBindings::left_default()),
        );
        let mut opponent = fighter_at(500.0, 400.0);
        let mut rng = ScriptedRolls::new([0.5]);
        let input = FrameInput::default().with_key("Q");

        let report = human.update(&mut opponent, &input, 1000, &arena, &mut rng);
        assert!(report.force_push_fired);
        assert!(report.push.is_some());
        assert_eq!(human.fighter().force_cooldown_ms(), FORCE_PUSH_COOLDOWN_MS - FRAME_MS);

        // Still cooling down: holding the key does nothing
        let report = human.update(&mut opponent, &input, 1016, &arena, &mut rng);
        assert!(!report.force_push_fired);
        assert_eq!(opponent.health(), 95);
    }

    #[test]
    fn test_force_push_cooldown_rearms() {
        let arena = Arena::default();
        let mut human = Combatant::new(
            fighter_at(400.0, 400.0),
            HumanController::new(KeyBindings::left_default()),
        );
        let mut opponent = fighter_at(500.0, 400.0);
        let mut rng = ScriptedRolls::new([0.5]);
        let push = FrameInput::default().with_key("Q");
        let idle = FrameInput::default();

        let mut now = 1000;
        assert!(human.update(&mut opponent, &push, now, &arena, &mut rng).force_push_fired);

        // Counts down on key-free frames too: 2000ms / 16ms per frame
        let frames = FORCE_PUSH_COOLDOWN_MS.div_ceil(FRAME_MS) - 1;
        for _ in 0..frames {
            now += FRAME_MS;
            human.update(&mut opponent, &idle, now, &arena, &mut rng);
        }
        assert_eq!(human.fighter().force_cooldown_ms(), 0);

        now += FRAME_MS;
        let report = human.update(&mut opponent, &push, now, &arena, &mut rng);
        assert!(report.force_push_fired);
        assert!(report.push.is_some());
    }

    #[test]
    fn test_ai_fighter_moves_at_profile_speed() {
        let mut ai = Combatant::new(
            fighter_at(400.0, 400.0),
            crate::sim::ai::AiController::new(Difficulty::Hard),
        );
        assert_eq!(ai.fighter().speed(), 6.0);

        ai.set_difficulty(Difficulty::Easy);
        assert_eq!(ai.fighter().speed(), 2.0);

        let human = Combatant::new(
            fighter_at(400.0, 400.0),
            HumanController::new(KeyBindings::left_default()),
        );
        assert_eq!(human.fighter().speed(), FIGHTER_SPEED);
    }

    #[test]
    fn test_human_pointer_aim_and_toggle() {
        let arena = Arena::default();
        let mut human = Combatant::new(
            fighter_at(400.0, 400.0).with_auto_target(false),
            HumanController::new(KeyBindings::left_default()),
        );
        let mut opponent = fighter_at(800.0, 400.0);
        let mut rng = ScriptedRolls::new([0.5]);

        let input = FrameInput::new(Vec2::new(400.0, 100.0));
        human.update(&mut opponent, &input, 1000, &arena, &mut rng);
        assert!((human.fighter().weapon().angle() + std::f32::consts::FRAC_PI_2).abs() < 1e-6);

        let input = input.with_key("T");
        human.update(&mut opponent, &input, 1016, &arena, &mut rng);
        assert!(human.fighter().auto_target());
        assert!(human.fighter().weapon().angle().abs() < 1e-6);
    }

    #[test]
    fn test_human_swing_hits_opponent() {
        let arena = Arena::default();
        let mut human = Combatant::new(
            fighter_at(400.0, 400.0),
            HumanController::new(KeyBindings::left_default()),
        );
        // Swing phase is zero at t=0, so the tip lands on the opponent
        let mut opponent = fighter_at(480.0, 400.0);
        let mut rng = ScriptedRolls::new([0.5]);
        let input = FrameInput::default().with_key("LSHIFT");

        let report = human.update(&mut opponent, &input, 0, &arena, &mut rng);
        assert!(human.fighter().weapon().is_active());
        assert_eq!(report.blade_damage, Some(10));
        assert_eq!(opponent.health(), 90);
    }

    #[test]
    fn test_reset_restores_spawn_and_health() {
        let mut fighter = fighter_at(200.0, 400.0);
        fighter.take_damage(40, 0);
        fighter.position = Vec2::new(700.0, 100.0);
        fighter.reset();
        assert_eq!(fighter.health(), MAX_HEALTH);
        assert_eq!(fighter.position(), Vec2::new(200.0, 400.0));
    }
}
