//! Draw commands for fighters, blades and the HUD

use glam::Vec2;

use super::{Anchor, DrawCmd, FONT_LABEL};
use crate::Color;
use crate::colors::*;
use crate::consts::FIGHTER_RADIUS;
use crate::sim::{Fighter, Side, Weapon};

/// Health bar geometry
pub const HEALTH_BAR_WIDTH: f32 = 200.0;
pub const HEALTH_BAR_HEIGHT: f32 = 20.0;
pub const HUD_INSET: f32 = 50.0;

/// Glow is this much brighter than the blade, per channel
const GLOW_BOOST: u8 = 50;
const GLOW_LAYERS: u32 = 5;
/// Hit flash toggles every this many milliseconds
const FLASH_PERIOD_MS: u64 = 100;

/// Label shown under a fighter's health bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HudLabel {
    Auto,
    Pointer,
    Ai,
}

impl HudLabel {
    pub fn text(&self) -> &'static str {
        match self {
            HudLabel::Auto => "AUTO",
            HudLabel::Pointer => "MOUSE",
            HudLabel::Ai => "AI",
        }
    }

    fn color(&self) -> Color {
        match self {
            HudLabel::Ai => RED,
            _ => YELLOW,
        }
    }
}

/// Brightened version of `color` for the blade glow
fn glow_color(color: Color) -> Color {
    color.map(|c| c.saturating_add(GLOW_BOOST))
}

/// Blade with layered glow and hilt; nothing when the blade is off
pub fn blade(weapon: &Weapon) -> Vec<DrawCmd> {
    if !weapon.is_active() {
        return Vec::new();
    }

    let from = weapon.origin();
    let to = weapon.tip();
    let glow = glow_color(weapon.color());

    let mut cmds = Vec::with_capacity(GLOW_LAYERS as usize + 3);
    // Widest layer first so narrower ones paint over it
    for layer in (1..=GLOW_LAYERS).rev() {
        cmds.push(DrawCmd::Line {
            from,
            to,
            color: glow,
            width: layer as f32 * 2.0,
        });
    }
    cmds.push(DrawCmd::Line {
        from,
        to,
        color: weapon.color(),
        width: 4.0,
    });

    cmds.push(DrawCmd::Circle {
        center: from,
        radius: 8.0,
        color: WHITE,
    });
    cmds.push(DrawCmd::Circle {
        center: from,
        radius: 6.0,
        color: BLACK,
    });
    cmds
}

/// Body ring; flashes white while invulnerable
pub fn fighter_body(fighter: &Fighter, now_ms: u64) -> Vec<DrawCmd> {
    let flashing = fighter.is_invulnerable(now_ms) && (now_ms / FLASH_PERIOD_MS) % 2 == 1;
    let color = if flashing { WHITE } else { fighter.color() };

    vec![
        DrawCmd::Circle {
            center: fighter.position(),
            radius: FIGHTER_RADIUS,
            color,
        },
        DrawCmd::Circle {
            center: fighter.position(),
            radius: FIGHTER_RADIUS - 2.0,
            color: BLACK,
        },
    ]
}

/// Top-left corner of a side's health bar
pub fn hud_origin(side: Side, arena_width: f32) -> Vec2 {
    match side {
        Side::Left => Vec2::new(HUD_INSET, HUD_INSET),
        Side::Right => Vec2::new(arena_width - HEALTH_BAR_WIDTH - HUD_INSET, HUD_INSET),
    }
}

/// Health bar, force push cooldown bar and control label
pub fn hud(fighter: &Fighter, side: Side, label: HudLabel, arena_width: f32) -> Vec<DrawCmd> {
    let origin = hud_origin(side, arena_width);
    let bar = Vec2::new(HEALTH_BAR_WIDTH, HEALTH_BAR_HEIGHT);
    let health_ratio = fighter.health() as f32 / fighter.max_health() as f32;

    let mut cmds = vec![
        DrawCmd::Rect {
            min: origin,
            size: bar,
            color: RED,
            outline: None,
        },
        DrawCmd::Rect {
            min: origin,
            size: Vec2::new(HEALTH_BAR_WIDTH * health_ratio, HEALTH_BAR_HEIGHT),
            color: GREEN,
            outline: None,
        },
        DrawCmd::Rect {
            min: origin,
            size: bar,
            color: WHITE,
            outline: Some(2.0),
        },
    ];

    if fighter.force_cooldown_ms() > 0 {
        let ratio =
            fighter.force_cooldown_ms() as f32 / crate::consts::FORCE_PUSH_COOLDOWN_MS as f32;
        cmds.push(DrawCmd::Rect {
            min: origin + Vec2::new(0.0, 25.0),
            size: Vec2::new(HEALTH_BAR_WIDTH * ratio, 10.0),
            color: PURPLE,
            outline: None,
        });
    }

    cmds.push(DrawCmd::Text {
        pos: origin + Vec2::new(0.0, 40.0),
        text: label.text().to_string(),
        color: label.color(),
        size: FONT_LABEL,
        anchor: Anchor::TopLeft,
    });
    cmds
}
