//! Per-frame simulation tick
//!
//! Core game loop step. The left fighter updates first against the right
//! fighter's previous state; the right fighter then reacts to the left
//! fighter's fresh state. The win check runs after both updates.

use super::combatant::UpdateReport;
use super::controller::Controller;
use super::rng::RandomSource;
use super::state::{Duel, DuelEvent, MatchPhase, Side};
use crate::platform::FrameInput;

/// Advance the match by one frame at time `now_ms`
pub fn tick<L: Controller, R: Controller>(
    duel: &mut Duel<L, R>,
    input: &FrameInput,
    now_ms: u64,
    rng: &mut dyn RandomSource,
) -> Vec<DuelEvent> {
    let mut events = Vec::new();
    if duel.is_over() {
        return events;
    }

    let report = duel
        .left
        .update(duel.right.fighter_mut(), input, now_ms, &duel.arena, rng);
    collect(&mut events, Side::Left, report);

    let report = duel
        .right
        .update(duel.left.fighter_mut(), input, now_ms, &duel.arena, rng);
    collect(&mut events, Side::Right, report);

    let winner = if duel.left.fighter().is_defeated() {
        Some(Side::Right)
    } else if duel.right.fighter().is_defeated() {
        Some(Side::Left)
    } else {
        None
    };

    if let Some(winner) = winner {
        duel.phase = MatchPhase::GameOver { winner };
        log::info!("{} wins", duel.name(winner));
        events.push(DuelEvent::MatchOver { winner });
    }

    events
}

fn collect(events: &mut Vec<DuelEvent>, side: Side, report: UpdateReport) {
    if report.force_push_fired {
        events.push(DuelEvent::ForcePush {
            by: side,
            outcome: report.push,
        });
    }
    if let Some(damage) = report.blade_damage {
        events.push(DuelEvent::BladeHit {
            attacker: side,
            damage,
        });
    }
}
