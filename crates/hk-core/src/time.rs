//! Simulation time model.
//!
//! # Design
//!
//! The crowd advances in variable-length steps supplied by the host (one per
//! rendered frame) or in fixed steps of `CrowdConfig::fixed_dt`.  Two numbers
//! describe "now":
//!
//!   - `Tick` — how many steps have completed (exact, integer).
//!   - `elapsed_secs` — the sum of every step's `dt` (accumulated in `f64` so
//!     long runs do not drift the way an `f32` sum would).

use std::fmt;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute step counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Return the tick `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0 + n)
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── StepClock ─────────────────────────────────────────────────────────────────

/// Tracks completed steps and accumulated simulated seconds.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StepClock {
    /// The tick currently being (or about to be) processed.
    pub current_tick: Tick,
    /// Simulated seconds elapsed since tick 0.
    pub elapsed_secs: f64,
}

impl StepClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one completed step of `dt` seconds.
    #[inline]
    pub fn advance(&mut self, dt: f32) {
        self.current_tick = self.current_tick + 1;
        self.elapsed_secs += dt as f64;
    }
}

impl fmt::Display for StepClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.2}s)", self.current_tick, self.elapsed_secs)
    }
}
