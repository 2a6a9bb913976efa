//! The `Crowd` struct and its tick.

use hk_agent::AgentStore;
use hk_core::{AgentId, CrowdConfig, SimRng, StepClock, Tick, Vec2};
use hk_grid::SpatialGrid;

use crate::steer::{self, SteerParams};
use crate::{
    ClearCause, CrowdError, CrowdObserver, CrowdResult, NoopObserver, RetargetContext,
    TargetPolicy,
};

/// The crowd simulator.
///
/// `Crowd<P>` owns every agent's state (SoA, see [`AgentStore`]), the spatial
/// grid, and the re-targeting policy `P`.  One call to [`tick`](Self::tick)
/// advances every agent by `dt` seconds:
///
/// 1. **Grid**: full rebuild from current positions.
/// 2. **Steer**: seek + separation + stuck detection + integration, one agent
///    at a time in ascending index order (or on Rayon with `parallel`).
/// 3. **Retarget**: agents cleared in step 2 are reported to the observer and
///    handed to the policy.
///
/// Create via [`CrowdBuilder`][crate::CrowdBuilder].
pub struct Crowd<P: TargetPolicy> {
    /// Validated configuration.
    pub(crate) config: CrowdConfig,

    pub(crate) params: SteerParams,

    /// Completed ticks and accumulated simulated seconds.
    pub(crate) clock: StepClock,

    pub(crate) agents: AgentStore,

    /// Rebuilt at the start of every tick; read-only during steering.
    pub(crate) grid: SpatialGrid,

    pub(crate) policy: P,

    /// RNG stream reserved for the policy.
    pub(crate) rng: SimRng,

    /// Scratch list of agents cleared during the current tick.
    pub(crate) cleared: Vec<(AgentId, ClearCause)>,
}

impl<P: TargetPolicy> Crowd<P> {
    // ── Stepping ──────────────────────────────────────────────────────────

    /// Advance every agent by `dt` seconds.
    ///
    /// `dt` must be finite and non-negative; anything else is treated as 0.
    pub fn tick(&mut self, dt: f32) {
        self.tick_observed(dt, &mut NoopObserver);
    }

    /// Advance by `config.fixed_dt`.
    pub fn step(&mut self) {
        let dt = self.config.fixed_dt;
        self.tick(dt);
    }

    /// Run exactly `n` fixed steps, reporting to `observer`.
    pub fn run_ticks<O: CrowdObserver>(&mut self, n: u64, observer: &mut O) {
        let dt = self.config.fixed_dt;
        for _ in 0..n {
            self.tick_observed(dt, observer);
        }
    }

    /// [`tick`](Self::tick) with observer callbacks.
    pub fn tick_observed<O: CrowdObserver>(&mut self, dt: f32, observer: &mut O) {
        debug_assert!(dt >= 0.0, "negative dt {dt}");
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        let now = self.clock.current_tick;

        observer.on_tick_start(now);

        // ── Phase 1: grid rebuild (write phase, no readers) ───────────────
        self.grid.rebuild(&self.agents.position);

        // ── Phase 2: per-agent steering ───────────────────────────────────
        self.cleared.clear();
        self.steer_all(dt);

        // ── Phase 3: report and re-target cleared agents ──────────────────
        for k in 0..self.cleared.len() {
            let (agent, cause) = self.cleared[k];
            observer.on_target_cleared(now, agent, cause);

            let ctx = RetargetContext {
                tick:        now,
                position:    self.agents.position[agent.index()],
                half_extent: self.params.half_extent,
            };
            match self.policy.on_target_cleared(agent, cause, &ctx, &mut self.rng) {
                Some(target) if target.is_finite() => {
                    self.agents.set_target(agent, target.clamp_square(self.params.half_extent));
                }
                Some(target) => {
                    log::warn!("crowd {now}: policy gave {agent} non-finite target {target}; left idle");
                }
                None => {}
            }
        }

        if !self.cleared.is_empty() {
            log::trace!("crowd {now}: {} targets cleared", self.cleared.len());
        }

        self.clock.advance(dt);
        observer.on_tick_end(now, self.clock.elapsed_secs, &self.agents);
    }

    #[cfg(not(feature = "parallel"))]
    fn steer_all(&mut self, dt: f32) {
        for i in 0..self.agents.count {
            let update = steer::steer_agent(i, &self.agents, &self.grid, &self.params, dt);
            update.apply(&mut self.agents, i);
            if let Some(cause) = update.cleared {
                self.cleared.push((AgentId(i as u32), cause));
            }
        }
    }

    #[cfg(feature = "parallel")]
    fn steer_all(&mut self, dt: f32) {
        use rayon::prelude::*;

        // Explicit field borrows so the closure only captures shared state.
        let agents = &self.agents;
        let grid   = &self.grid;
        let params = &self.params;

        let updates: Vec<_> = (0..agents.count)
            .into_par_iter()
            .map(|i| steer::steer_agent(i, agents, grid, params, dt))
            .collect();

        for (i, update) in updates.into_iter().enumerate() {
            update.apply(&mut self.agents, i);
            if let Some(cause) = update.cleared {
                self.cleared.push((AgentId(i as u32), cause));
            }
        }
    }

    // ── Out-of-band control ───────────────────────────────────────────────

    /// Give `agent` a new target (clamped onto the field).  NaN or infinite
    /// targets are rejected.
    pub fn set_target(&mut self, agent: AgentId, target: Vec2) -> CrowdResult<()> {
        self.check(agent)?;
        if !target.is_finite() {
            return Err(CrowdError::NonFiniteTarget(agent));
        }
        self.agents.set_target(agent, target.clamp_square(self.params.half_extent));
        Ok(())
    }

    /// Make `agent` idle.  The policy is not consulted.
    pub fn clear_target(&mut self, agent: AgentId) -> CrowdResult<()> {
        self.check(agent)?;
        self.agents.clear_target(agent);
        Ok(())
    }

    fn check(&self, agent: AgentId) -> CrowdResult<()> {
        if self.agents.contains(agent) {
            Ok(())
        } else {
            Err(CrowdError::AgentNotFound(agent))
        }
    }

    // ── Read access ───────────────────────────────────────────────────────
    //
    // Per-agent accessors panic on an out-of-range id, like slice indexing.

    #[inline]
    pub fn position(&self, agent: AgentId) -> Vec2 {
        self.agents.position[agent.index()]
    }

    #[inline]
    pub fn velocity(&self, agent: AgentId) -> Vec2 {
        self.agents.velocity[agent.index()]
    }

    /// Current target, or `None` while idle.
    #[inline]
    pub fn target(&self, agent: AgentId) -> Option<Vec2> {
        self.agents.target_of(agent)
    }

    #[inline]
    pub fn has_target(&self, agent: AgentId) -> bool {
        self.agents.has_target[agent.index()]
    }

    /// Repulsion `agent` would feel right now from neighbours found through
    /// the current grid.  Diagnostic only; does not change state.
    pub fn separation_at(&self, agent: AgentId) -> Vec2 {
        let i = agent.index();
        steer::separation(i, self.agents.position[i], &self.agents, &self.grid, &self.params)
    }

    /// Read-only view of every agent's SoA arrays.
    pub fn agents(&self) -> &AgentStore {
        &self.agents
    }

    /// The grid as rebuilt at the start of the last tick (or at build time).
    pub fn grid(&self) -> &SpatialGrid {
        &self.grid
    }

    pub fn clock(&self) -> &StepClock {
        &self.clock
    }

    pub fn current_tick(&self) -> Tick {
        self.clock.current_tick
    }

    pub fn config(&self) -> &CrowdConfig {
        &self.config
    }

    pub fn policy(&self) -> &P {
        &self.policy
    }

    pub fn len(&self) -> usize {
        self.agents.count
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    /// Number of agents that currently have a target.
    pub fn moving_count(&self) -> usize {
        self.agents.moving_count()
    }
}
