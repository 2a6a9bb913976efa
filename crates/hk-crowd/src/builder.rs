//! Fluent builder for constructing a [`Crowd`].

use hk_agent::AgentStoreBuilder;
use hk_core::{CrowdConfig, RetargetMode, SimRng, StepClock, Vec2};
use hk_grid::SpatialGrid;

use crate::steer::SteerParams;
use crate::{Crowd, CrowdResult, TargetPolicy};

/// Seed offset for the policy's RNG stream, so re-targeting draws never shift
/// initial placement.
const POLICY_STREAM: u64 = 1;

/// Fluent builder for [`Crowd<P>`].
///
/// # Required inputs
///
/// - [`CrowdConfig`], validated in [`build`](Self::build).
///
/// # Optional inputs (have defaults)
///
/// | Method                 | Default                                      |
/// |------------------------|----------------------------------------------|
/// | `.policy(p)`           | `config.retarget` (a [`RetargetMode`])       |
/// | `.positions(v)`        | Uniform random inside the field              |
/// | `.targets(v)`          | Uniform random inside the field, all active  |
///
/// # Example
///
/// ```rust,ignore
/// let mut crowd = CrowdBuilder::new(config)
///     .positions(spawn_points)
///     .policy(|_, _, ctx: &RetargetContext, rng: &mut SimRng| {
///         Some(rng.point_in_square(ctx.half_extent))
///     })
///     .build()?;
/// ```
pub struct CrowdBuilder<P: TargetPolicy> {
    config:    CrowdConfig,
    policy:    P,
    positions: Option<Vec<Vec2>>,
    targets:   Option<Vec<Option<Vec2>>>,
}

impl CrowdBuilder<RetargetMode> {
    /// Create a builder whose policy is `config.retarget`.
    pub fn new(config: CrowdConfig) -> Self {
        let policy = config.retarget;
        Self {
            config,
            policy,
            positions: None,
            targets:   None,
        }
    }
}

impl<P: TargetPolicy> CrowdBuilder<P> {
    /// Replace the re-targeting policy.
    pub fn policy<Q: TargetPolicy>(self, policy: Q) -> CrowdBuilder<Q> {
        CrowdBuilder {
            config:    self.config,
            policy,
            positions: self.positions,
            targets:   self.targets,
        }
    }

    /// Supply the initial position of each agent (must be length
    /// `agent_count`).
    pub fn positions(mut self, positions: Vec<Vec2>) -> Self {
        self.positions = Some(positions);
        self
    }

    /// Supply the initial target of each agent (must be length
    /// `agent_count`).  `None` starts the agent idle.
    pub fn targets(mut self, targets: Vec<Option<Vec2>>) -> Self {
        self.targets = Some(targets);
        self
    }

    /// Validate the config and inputs, place agents, build the grid, and
    /// return a ready-to-tick [`Crowd`].
    pub fn build(self) -> CrowdResult<Crowd<P>> {
        self.config.validate()?;

        let mut rng = SimRng::new(self.config.seed);

        let mut agents = AgentStoreBuilder::new(self.config.agent_count, self.config.half_extent());
        if let Some(p) = self.positions {
            agents = agents.positions(p);
        }
        if let Some(t) = self.targets {
            agents = agents.targets(t);
        }
        let agents = agents.build(&mut rng)?;

        let mut grid = SpatialGrid::new(self.config.field_size, self.config.cell_size())?;
        grid.rebuild(&agents.position);

        log::debug!(
            "crowd built: {} agents, {}x{} grid (cell {:.3})",
            agents.count,
            grid.dim(),
            grid.dim(),
            grid.cell_size(),
        );

        Ok(Crowd {
            params:  SteerParams::from_config(&self.config),
            rng:     rng.child(POLICY_STREAM),
            config:  self.config,
            clock:   StepClock::new(),
            agents,
            grid,
            policy:  self.policy,
            cleared: Vec::new(),
        })
    }
}
