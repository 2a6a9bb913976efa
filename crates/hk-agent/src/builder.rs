//! Fluent builder for constructing an `AgentStore`.
//!
//! # Usage
//!
//! ```rust
//! use hk_agent::AgentStoreBuilder;
//! use hk_core::{SimRng, Vec2};
//!
//! let mut rng = SimRng::new(42);
//! let store = AgentStoreBuilder::new(3, /*half_extent=*/ 10.0)
//!     .positions(vec![Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0), Vec2::new(2.0, 0.0)])
//!     .build(&mut rng)
//!     .unwrap();
//!
//! assert_eq!(store.count, 3);
//! // Targets were not supplied, so every agent got a random one.
//! assert_eq!(store.moving_count(), 3);
//! ```

use hk_core::{SimRng, Vec2};

use crate::{AgentError, AgentResult, AgentStore};

/// Fluent builder for [`AgentStore`].
///
/// Anything not supplied explicitly is drawn uniformly from the field square,
/// positions first, then targets, from the same `SimRng` so a seed fully
/// determines the initial crowd.
pub struct AgentStoreBuilder {
    count:       usize,
    half_extent: f32,
    positions:   Option<Vec<Vec2>>,
    targets:     Option<Vec<Option<Vec2>>>,
}

impl AgentStoreBuilder {
    /// Create a builder for `count` agents inside
    /// `[-half_extent, half_extent]²`.
    pub fn new(count: usize, half_extent: f32) -> Self {
        Self {
            count,
            half_extent,
            positions: None,
            targets:   None,
        }
    }

    /// Explicit initial positions (must be length `count`, all finite).
    /// Values outside the field are clamped onto it.
    pub fn positions(mut self, positions: Vec<Vec2>) -> Self {
        self.positions = Some(positions);
        self
    }

    /// Explicit initial targets (must be length `count`); `None` entries start
    /// idle.
    pub fn targets(mut self, targets: Vec<Option<Vec2>>) -> Self {
        self.targets = Some(targets);
        self
    }

    /// Validate lengths, fill in random placement, and construct the store.
    pub fn build(self, rng: &mut SimRng) -> AgentResult<AgentStore> {
        let half = self.half_extent;

        let positions = match self.positions {
            Some(p) => {
                check_len(self.count, p.len(), "initial positions")?;
                check_finite(p.iter().copied().map(Some), "initial positions")?;
                p.into_iter().map(|v| v.clamp_square(half)).collect()
            }
            None => (0..self.count).map(|_| rng.point_in_square(half)).collect(),
        };

        let targets = match self.targets {
            Some(t) => {
                check_len(self.count, t.len(), "initial targets")?;
                check_finite(t.iter().copied(), "initial targets")?;
                t.into_iter().map(|o| o.map(|v| v.clamp_square(half))).collect()
            }
            None => (0..self.count).map(|_| Some(rng.point_in_square(half))).collect(),
        };

        Ok(AgentStore::new(positions, targets))
    }
}

fn check_len(expected: usize, got: usize, what: &'static str) -> AgentResult<()> {
    if expected == got {
        Ok(())
    } else {
        Err(AgentError::AgentCountMismatch { expected, got, what })
    }
}

fn check_finite(values: impl Iterator<Item = Option<Vec2>>, what: &'static str) -> AgentResult<()> {
    match values.enumerate().find(|(_, v)| v.is_some_and(|v| !v.is_finite())) {
        Some((index, _)) => Err(AgentError::NonFinite { what, index }),
        None => Ok(()),
    }
}
