//! Platform abstraction layer
//!
//! The simulation never talks to a window or an OS clock directly. Instead:
//! - `Clock` supplies a monotonic millisecond timestamp per frame
//! - `FrameInput` is the per-frame snapshot of held keys and pointer position

use std::collections::HashSet;
use std::time::Instant;

use glam::Vec2;

/// Monotonic millisecond time source
pub trait Clock {
    /// Milliseconds since the clock started
    fn now_ms(&self) -> u64;
}

/// Wall clock backed by `Instant`
#[derive(Debug, Clone)]
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}

/// Manually advanced clock for headless runs and tests
#[derive(Debug, Clone, Default)]
pub struct SteppedClock {
    now: u64,
}

impl SteppedClock {
    pub fn starting_at(now: u64) -> Self {
        Self { now }
    }

    /// Advance by `ms` milliseconds
    pub fn advance(&mut self, ms: u64) {
        self.now += ms;
    }
}

impl Clock for SteppedClock {
    fn now_ms(&self) -> u64 {
        self.now
    }
}

/// Input snapshot for a single frame
#[derive(Debug, Clone, Default)]
pub struct FrameInput {
    /// Names of currently held keys (matching the binding tables)
    pub held: HashSet<String>,
    /// Pointer position in arena coordinates
    pub pointer: Vec2,
}

impl FrameInput {
    pub fn new(pointer: Vec2) -> Self {
        Self {
            held: HashSet::new(),
            pointer,
        }
    }

    /// Builder helper: mark `key` as held
    pub fn with_key(mut self, key: &str) -> Self {
        self.held.insert(key.to_string());
        self
    }

    pub fn press(&mut self, key: &str) {
        self.held.insert(key.to_string());
    }

    pub fn release(&mut self, key: &str) {
        self.held.remove(key);
    }

    #[inline]
    pub fn is_held(&self, key: &str) -> bool {
        self.held.contains(key)
    }
}
