//! Plasma Duel entry point
//!
//! Runs a headless AI-vs-AI exhibition match on a stepped clock and logs
//! what happens. Usage: `plasma-duel [easy|medium|hard] [settings.json]`

use std::process::ExitCode;

use plasma_duel::consts::FRAME_MS;
use plasma_duel::platform::{Clock, FrameInput, SteppedClock, SystemClock};
use plasma_duel::renderer::draw_duel;
use plasma_duel::sim::{AiController, Combatant, Duel, DuelEvent, Fighter, rng, tick};
use plasma_duel::{ConfigError, Difficulty, Settings, colors};

/// Give up on a match that runs longer than this (ten minutes of game time)
const MATCH_LIMIT_MS: u64 = 600_000;

fn load(args: &[String]) -> Result<Settings, ConfigError> {
    let mut settings = match args.get(1) {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    if let Some(difficulty) = args.first() {
        settings.difficulty = Difficulty::parse(difficulty)?;
    }
    Ok(settings)
}

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Plasma Duel (headless) starting...");

    let args: Vec<String> = std::env::args().skip(1).collect();
    let settings = match load(&args) {
        Ok(settings) => settings,
        Err(e) => {
            log::error!("Invalid configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let arena = settings.arena;
    let mut duel = Duel::new(
        arena,
        Combatant::new(
            Fighter::new(arena.clamp(settings.left_spawn), colors::BLUE),
            AiController::new(settings.difficulty),
        ),
        Combatant::new(
            Fighter::new(arena.clamp(settings.right_spawn), colors::RED),
            AiController::new(settings.difficulty),
        ),
        settings.difficulty,
    );

    let wall = SystemClock::new();
    let mut clock = SteppedClock::starting_at(0);
    let mut rng = rng::session();
    let input = FrameInput::default();
    let mut hits = [0u32; 2];

    while !duel.is_over() && clock.now_ms() < MATCH_LIMIT_MS {
        let now = clock.now_ms();
        for event in tick(&mut duel, &input, now, &mut rng) {
            match event {
                DuelEvent::BladeHit { attacker, damage } => {
                    hits[attacker as usize] += 1;
                    log::debug!("[{}ms] {:?} hits for {}", now, attacker, damage);
                }
                DuelEvent::ForcePush { by, outcome } => {
                    log::debug!("[{}ms] {:?} force push: {:?}", now, by, outcome);
                }
                other => log::debug!("[{}ms] {:?}", now, other),
            }
        }
        clock.advance(FRAME_MS);
    }

    let frame = draw_duel(&duel, clock.now_ms());
    log::debug!(
        "Simulated {} frames in {}ms, final frame has {} draw commands",
        clock.now_ms() / FRAME_MS,
        wall.now_ms(),
        frame.len()
    );

    match duel.winner() {
        Some(winner) => {
            log::info!(
                "{:?} side wins after {:.1}s with {} health left (blade hits: left {}, right {})",
                winner,
                clock.now_ms() as f32 / 1000.0,
                duel.fighter(winner).health(),
                hits[0],
                hits[1]
            );
            ExitCode::SUCCESS
        }
        None => {
            log::warn!("No winner after {}s", MATCH_LIMIT_MS / 1000);
            ExitCode::SUCCESS
        }
    }
}
