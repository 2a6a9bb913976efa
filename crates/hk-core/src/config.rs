//! Crowd configuration.
//!
//! Typically loaded from a JSON file by the application crate (with the
//! `serde` feature) and handed to `hk_crowd::CrowdBuilder`, which calls
//! [`CrowdConfig::validate`] before anything is allocated.

use crate::{CoreError, CoreResult};

/// Lower bound on the spatial-grid cell size.  Keeps the grid from exploding
/// into millions of cells when `gap` is tiny.
pub const MIN_CELL_SIZE: f32 = 0.25;

/// Upper bound on the number of grid cells (`dim * dim`).  Larger fields need
/// a larger `gap`.
pub const MAX_GRID_CELLS: usize = 1 << 24;

/// What happens to an agent whose target was cleared (arrival or stuck).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RetargetMode {
    /// The agent stays idle until the host calls `set_target`.
    #[default]
    Idle,
    /// A new uniformly random target inside the field is assigned in the same
    /// tick the old one was cleared.
    Random,
}

/// All construction parameters of a crowd.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CrowdConfig {
    /// Side length of the square domain, centred on the origin.
    pub field_size: f32,

    /// Number of agents.  Fixed for the lifetime of the crowd.
    pub agent_count: usize,

    /// Speed cap in units per second.
    pub max_speed: f32,

    /// Minimum comfortable inter-agent distance.  Also drives the grid cell
    /// size (`gap / 2`) and the arrival radius (`gap / 2`).
    pub gap: f32,

    /// Scale of the repulsion contribution.
    pub separation_force: f32,

    /// Speed below which a not-yet-arrived agent counts as possibly stuck.
    pub stop_speed_threshold: f32,

    /// Seconds an agent must stay below `stop_speed_threshold` before its
    /// target is dropped.
    pub stuck_time_to_stop: f32,

    /// Step length used by `Crowd::step` and `Crowd::run_ticks`.
    pub fixed_dt: f32,

    /// Re-assignment policy for cleared targets.
    pub retarget: RetargetMode,

    /// Master RNG seed.  The same seed always produces identical runs.
    pub seed: u64,
}

impl Default for CrowdConfig {
    fn default() -> Self {
        Self {
            field_size:           50.0,
            agent_count:          100,
            max_speed:            3.5,
            gap:                  1.2,
            separation_force:     6.0,
            stop_speed_threshold: 0.05,
            stuck_time_to_stop:   1.5,
            fixed_dt:             1.0 / 60.0,
            retarget:             RetargetMode::Idle,
            seed:                 42,
        }
    }
}

impl CrowdConfig {
    /// Half the field size: positions live in `[-half_extent, half_extent]`.
    #[inline]
    pub fn half_extent(&self) -> f32 {
        self.field_size * 0.5
    }

    /// Grid cell size: `max(gap / 2, MIN_CELL_SIZE)`.
    #[inline]
    pub fn cell_size(&self) -> f32 {
        (self.gap * 0.5).max(MIN_CELL_SIZE)
    }

    /// Reject configurations the tick algorithm cannot run on.
    ///
    /// Every check names the offending field so a bad JSON file is easy to fix.
    pub fn validate(&self) -> CoreResult<()> {
        fn positive(name: &str, v: f32) -> CoreResult<()> {
            if v.is_finite() && v > 0.0 {
                Ok(())
            } else {
                Err(CoreError::Config(format!("{name} must be finite and > 0, got {v}")))
            }
        }
        fn non_negative(name: &str, v: f32) -> CoreResult<()> {
            if v.is_finite() && v >= 0.0 {
                Ok(())
            } else {
                Err(CoreError::Config(format!("{name} must be finite and >= 0, got {v}")))
            }
        }

        positive("field_size", self.field_size)?;
        positive("gap", self.gap)?;
        positive("fixed_dt", self.fixed_dt)?;
        non_negative("max_speed", self.max_speed)?;
        non_negative("separation_force", self.separation_force)?;
        non_negative("stop_speed_threshold", self.stop_speed_threshold)?;
        non_negative("stuck_time_to_stop", self.stuck_time_to_stop)?;

        let dim = (self.field_size as f64 / self.cell_size() as f64).ceil();
        if dim * dim > MAX_GRID_CELLS as f64 {
            return Err(CoreError::Config(format!(
                "field_size {} with gap {} needs a {dim}x{dim} grid (limit {MAX_GRID_CELLS} cells); \
                 increase gap or reduce field_size",
                self.field_size, self.gap,
            )));
        }

        if self.agent_count == 0 {
            return Err(CoreError::Config("agent_count must be > 0".into()));
        }
        if u32::try_from(self.agent_count).is_err() {
            return Err(CoreError::Config(format!(
                "agent_count {} exceeds the AgentId range",
                self.agent_count
            )));
        }
        Ok(())
    }
}
