//! Simulation module
//!
//! All gameplay logic lives here. This module stays pure:
//! - Time comes in as explicit millisecond timestamps
//! - Randomness comes in through `RandomSource`
//! - Left fighter always updates before the right fighter
//! - No rendering or platform dependencies

pub mod ai;
pub mod combatant;
pub mod controller;
pub mod rng;
pub mod state;
pub mod tick;
pub mod weapon;

pub use ai::{AiAction, AiController, DifficultyProfile, Situation};
pub use combatant::{Combatant, Fighter, PushOutcome, UpdateReport};
pub use controller::{ControlContext, Controller, HumanController, Intent, StrikePhase};
pub use rng::RandomSource;
pub use state::{Duel, DuelEvent, MatchCommand, MatchPhase, Pilot, Side};
pub use tick::tick;
pub use weapon::Weapon;
