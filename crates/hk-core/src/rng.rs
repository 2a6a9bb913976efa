//! Deterministic simulation-level RNG.
//!
//! The crowd draws random numbers in exactly two places: initial placement
//! (sequential, at build time) and target re-assignment (sequential, after the
//! per-agent pass).  Neither runs on a worker thread, so one seeded `SmallRng`
//! is enough and runs stay reproducible with or without the `parallel`
//! feature.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::Vec2;

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Simulation-level RNG.
///
/// Used only in single-threaded contexts.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Derive a child `SimRng` with a different seed offset, e.g. to give the
    /// target policy its own stream independent of placement.
    pub fn child(&mut self, offset: u64) -> SimRng {
        let child_seed: u64 = self.0.r#gen::<u64>() ^ offset.wrapping_mul(MIXING_CONSTANT);
        SimRng(SmallRng::seed_from_u64(child_seed))
    }

    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// Uniform point inside the square `[-half_extent, half_extent]²`.
    ///
    /// A zero `half_extent` yields the origin.
    pub fn point_in_square(&mut self, half_extent: f32) -> Vec2 {
        if half_extent <= 0.0 {
            return Vec2::ZERO;
        }
        Vec2::new(
            self.0.gen_range(-half_extent..=half_extent),
            self.0.gen_range(-half_extent..=half_extent),
        )
    }
}
