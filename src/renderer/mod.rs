//! Rendering module
//!
//! Turns read-only match state into a flat list of primitive draw commands.
//! Any backend that can draw lines, circles, rectangles and text can replay
//! the list; nothing here mutates the simulation.

pub mod shapes;

use glam::Vec2;

use crate::Color;
use crate::colors::*;
use crate::sim::{Controller, Duel, MatchPhase, Side};

/// Where a text label is anchored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    TopLeft,
    Center,
}

/// A single primitive draw request
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    /// Clear the whole frame
    Clear(Color),
    Line {
        from: Vec2,
        to: Vec2,
        color: Color,
        width: f32,
    },
    Circle {
        center: Vec2,
        radius: f32,
        color: Color,
    },
    /// Axis-aligned rectangle; `outline` is the border width, `None` fills it
    Rect {
        min: Vec2,
        size: Vec2,
        color: Color,
        outline: Option<f32>,
    },
    Text {
        pos: Vec2,
        text: String,
        color: Color,
        size: f32,
        anchor: Anchor,
    },
}

/// Font sizes
pub const FONT_LABEL: f32 = 24.0;
pub const FONT_SMALL: f32 = 36.0;
pub const FONT_LARGE: f32 = 74.0;

/// Build the full frame for the current match state
pub fn draw_duel<L: Controller, R: Controller>(duel: &Duel<L, R>, now_ms: u64) -> Vec<DrawCmd> {
    let mut cmds = vec![DrawCmd::Clear(BLACK)];
    let arena = duel.arena();

    match duel.phase() {
        MatchPhase::Playing => {
            for side in [Side::Left, Side::Right] {
                let fighter = duel.fighter(side);
                cmds.extend(shapes::fighter_body(fighter, now_ms));
                cmds.extend(shapes::blade(fighter.weapon()));

                let label = if duel.is_ai(side) {
                    shapes::HudLabel::Ai
                } else if fighter.auto_target() {
                    shapes::HudLabel::Auto
                } else {
                    shapes::HudLabel::Pointer
                };
                cmds.extend(shapes::hud(fighter, side, label, arena.width));
            }

            let lines = [
                "Player: WASD to move, SPACE to activate sword, SHIFT to attack, \
                 Q for force push, T to toggle targeting"
                    .to_string(),
                format!(
                    "AI Difficulty: {} - Press 1/2/3 to change (Easy/Medium/Hard)",
                    duel.difficulty().as_str().to_uppercase()
                ),
            ];
            for (i, line) in lines.into_iter().enumerate() {
                cmds.push(DrawCmd::Text {
                    pos: Vec2::new(10.0, arena.height - 60.0 + i as f32 * 25.0),
                    text: line,
                    color: WHITE,
                    size: FONT_SMALL,
                    anchor: Anchor::TopLeft,
                });
            }
        }
        MatchPhase::GameOver { winner } => {
            let center = arena.center();
            let lines = [
                ("GAME OVER".to_string(), WHITE, FONT_LARGE, -50.0),
                (format!("{} Wins!", duel.name(winner)), YELLOW, FONT_LARGE, 0.0),
                (
                    "Press R to restart or ESC to quit".to_string(),
                    WHITE,
                    FONT_SMALL,
                    50.0,
                ),
            ];
            for (text, color, size, dy) in lines {
                cmds.push(DrawCmd::Text {
                    pos: center + Vec2::new(0.0, dy),
                    text,
                    color,
                    size,
                    anchor: Anchor::Center,
                });
            }
        }
    }

    cmds
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::MatchCommand;

    fn texts(cmds: &[DrawCmd]) -> Vec<&str> {
        cmds.iter()
            .filter_map(|c| match c {
                DrawCmd::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_playing_frame_labels() {
        let duel = Duel::from_settings(&Settings::default()).unwrap();
        let cmds = draw_duel(&duel, 0);
        assert_eq!(cmds[0], DrawCmd::Clear(BLACK));

        let labels = texts(&cmds);
        assert!(labels.contains(&"MOUSE"));
        assert!(labels.contains(&"AI"));
        assert!(labels.iter().any(|t| t.contains("AI Difficulty: MEDIUM")));
    }

    #[test]
    fn test_game_over_frame() {
        let mut duel = Duel::from_settings(&Settings::default()).unwrap();
        let mut rng = crate::sim::rng::seeded(3);
        duel.set_difficulty(crate::Difficulty::Hard, 0);
        duel.left.fighter_mut().take_damage(crate::consts::MAX_HEALTH, 0);
        let now = 1000;
        crate::sim::tick(&mut duel, &Default::default(), now, &mut rng);
        assert!(duel.is_over());

        let cmds = draw_duel(&duel, now);
        let labels = texts(&cmds);
        assert!(labels.contains(&"GAME OVER"));
        assert!(labels.contains(&"AI (HARD) Wins!"));

        duel.apply(MatchCommand::Restart, now);
        assert!(!texts(&draw_duel(&duel, now)).contains(&"GAME OVER"));
    }
}
