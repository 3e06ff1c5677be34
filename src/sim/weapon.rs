//! Plasma blade
//!
//! A line segment anchored at the wielder. The blade aims at a target point
//! and, while swinging, oscillates around that aim with an amplitude that
//! ramps up each update and decays once the swing stops.

use glam::Vec2;

use crate::consts::*;
use crate::{Color, polar_offset};

#[derive(Debug, Clone)]
pub struct Weapon {
    /// Wielder position (blade origin)
    origin: Vec2,
    color: Color,
    length: f32,
    /// Current blade angle (radians)
    angle: f32,
    /// Aim direction without swing oscillation
    base_angle: f32,
    /// Oscillation amplitude, 0..=SWING_MAX
    swing_speed: f32,
    /// Inactive blades neither hit nor render
    pub active: bool,
}

impl Weapon {
    pub fn new(origin: Vec2, color: Color) -> Self {
        Self {
            origin,
            color,
            length: BLADE_LENGTH,
            angle: 0.0,
            base_angle: 0.0,
            swing_speed: 0.0,
            active: false,
        }
    }

    /// Re-anchor at the wielder, aim at `target`, and advance the swing
    pub fn update(&mut self, wielder: Vec2, target: Vec2, swinging: bool, now_ms: u64) {
        self.origin = wielder;

        let delta = target - wielder;
        self.base_angle = delta.y.atan2(delta.x);

        if swinging {
            self.swing_speed = (self.swing_speed + SWING_RAMP).min(SWING_MAX);
            let phase = (now_ms as f64 * SWING_FREQUENCY).sin() as f32;
            self.angle = self.base_angle + phase * self.swing_speed;
        } else {
            self.swing_speed = (self.swing_speed - SWING_DECAY).max(0.0);
            self.angle = self.base_angle;
        }
    }

    /// End point of the blade
    pub fn tip(&self) -> Vec2 {
        self.tip_from(self.origin)
    }

    /// End point of the blade if it were held at `holder`
    pub fn tip_from(&self, holder: Vec2) -> Vec2 {
        polar_offset(holder, self.length, self.angle)
    }

    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn base_angle(&self) -> f32 {
        self.base_angle
    }

    pub fn swing_speed(&self) -> f32 {
        self.swing_speed
    }

    pub fn length(&self) -> f32 {
        self.length
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_aims_at_target() {
        let mut blade = Weapon::new(Vec2::ZERO, [0, 100, 255]);
        blade.update(Vec2::new(10.0, 10.0), Vec2::new(10.0, 50.0), false, 0);
        assert!((blade.angle() - FRAC_PI_2).abs() < 1e-6);
        assert!((blade.tip() - Vec2::new(10.0, 90.0)).length() < 1e-4);
    }

    #[test]
    fn test_swing_ramps_to_cap() {
        let mut blade = Weapon::new(Vec2::ZERO, [255, 0, 0]);
        blade.update(Vec2::ZERO, Vec2::X, true, 100);
        assert!((blade.swing_speed() - 0.3).abs() < 1e-6);
        blade.update(Vec2::ZERO, Vec2::X, true, 116);
        assert!((blade.swing_speed() - 0.6).abs() < 1e-6);
        blade.update(Vec2::ZERO, Vec2::X, true, 132);
        assert_eq!(blade.swing_speed(), SWING_MAX);

        let expected = (132.0_f64 * SWING_FREQUENCY).sin() as f32 * SWING_MAX;
        assert!((blade.angle() - expected).abs() < 1e-5);
    }

    #[test]
    fn test_swing_phase_exact_on_long_clocks() {
        let mut blade = Weapon::new(Vec2::ZERO, [255, 0, 0]);
        for _ in 0..3 {
            blade.update(Vec2::ZERO, Vec2::X, true, 0);
        }

        let start = 100_000_000_u64;
        let mut angles = Vec::new();
        for t in start..start + 10 {
            blade.update(Vec2::ZERO, Vec2::X, true, t);
            let expected = (t as f64 * 0.02).sin() as f32 * SWING_MAX;
            assert!((blade.angle() - expected).abs() < 1e-5);
            angles.push(blade.angle());
        }
        angles.dedup();
        assert_eq!(angles.len(), 10);
    }

    #[test]
    fn test_swing_decays_and_snaps_to_aim() {
        let mut blade = Weapon::new(Vec2::ZERO, [255, 0, 0]);
        blade.update(Vec2::ZERO, Vec2::X, true, 40);
        blade.update(Vec2::ZERO, Vec2::Y, false, 56);
        assert!((blade.swing_speed() - 0.2).abs() < 1e-6);
        assert_eq!(blade.angle(), blade.base_angle());

        for t in 0..5 {
            blade.update(Vec2::ZERO, Vec2::Y, false, 72 + t * 16);
        }
        assert_eq!(blade.swing_speed(), 0.0);
    }
}
