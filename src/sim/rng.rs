//! Random source injected into AI decisions
//!
//! Sessions use a PCG generator seeded from OS entropy; tests seed it
//! explicitly or script the exact draws with `ScriptedRolls`.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Uniform random draws in [0, 1)
pub trait RandomSource {
    fn roll(&mut self) -> f32;
}

impl RandomSource for Pcg32 {
    fn roll(&mut self) -> f32 {
        self.random::<f32>()
    }
}

/// Generator with a fixed seed (reproducible)
pub fn seeded(seed: u64) -> Pcg32 {
    Pcg32::seed_from_u64(seed)
}

/// Generator for a play session (no seeding contract)
pub fn session() -> Pcg32 {
    let seed: u64 = rand::random();
    log::debug!("Session RNG seed {seed}");
    seeded(seed)
}

/// Replays a fixed list of draws, then repeats the last one
#[cfg(test)]
#[derive(Debug, Clone)]
pub struct ScriptedRolls {
    rolls: Vec<f32>,
    next: usize,
}

#[cfg(test)]
impl ScriptedRolls {
    pub fn new(rolls: impl Into<Vec<f32>>) -> Self {
        Self {
            rolls: rolls.into(),
            next: 0,
        }
    }

    /// Number of draws taken so far
    pub fn drawn(&self) -> usize {
        self.next
    }
}

#[cfg(test)]
impl RandomSource for ScriptedRolls {
    fn roll(&mut self) -> f32 {
        let value = self
            .rolls
            .get(self.next)
            .or_else(|| self.rolls.last())
            .copied()
            .unwrap_or(0.0);
        self.next += 1;
        value
    }
}
