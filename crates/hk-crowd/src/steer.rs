//! Per-agent steering kernel.
//!
//! `steer_agent` is a pure function of the store, the grid, and one agent
//! index.  The sequential pass applies each result before computing the next
//! agent (later agents see earlier agents' new positions); the parallel pass
//! computes every result from the same snapshot and applies them afterwards.

use hk_agent::AgentStore;
use hk_core::{CrowdConfig, Vec2};
use hk_grid::SpatialGrid;

use crate::ClearCause;

/// Neighbours closer than this (squared) are treated as coincident and
/// ignored, so the away-direction never divides by zero.
const COINCIDENT_EPSILON_SQ: f32 = 1e-8;

/// Config values pre-squared for the hot loop.
#[derive(Copy, Clone, Debug)]
pub(crate) struct SteerParams {
    pub max_speed:        f32,
    pub gap:              f32,
    pub gap_sq:           f32,
    pub arrive_sq:        f32,
    pub separation_force: f32,
    pub stop_speed:       f32,
    pub stuck_time:       f32,
    pub half_extent:      f32,
}

impl SteerParams {
    pub fn from_config(config: &CrowdConfig) -> Self {
        let half_gap = config.gap * 0.5;
        Self {
            max_speed:        config.max_speed,
            gap:              config.gap,
            gap_sq:           config.gap * config.gap,
            arrive_sq:        half_gap * half_gap,
            separation_force: config.separation_force,
            stop_speed:       config.stop_speed_threshold,
            stuck_time:       config.stuck_time_to_stop,
            half_extent:      config.half_extent(),
        }
    }
}

/// New state for one agent after one tick.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) struct AgentUpdate {
    pub position:    Vec2,
    pub velocity:    Vec2,
    pub stuck_timer: f32,
    pub cleared:     Option<ClearCause>,
}

impl AgentUpdate {
    /// Stand still at `position`; `cleared` says whether the target goes too.
    fn halt(position: Vec2, cleared: Option<ClearCause>) -> Self {
        Self { position, velocity: Vec2::ZERO, stuck_timer: 0.0, cleared }
    }

    /// Write this update back into slot `i`.
    #[inline]
    pub fn apply(self, store: &mut AgentStore, i: usize) {
        store.position[i] = self.position;
        store.velocity[i] = self.velocity;
        store.stuck_timer[i] = self.stuck_timer;
        if self.cleared.is_some() {
            store.has_target[i] = false;
        }
    }
}

/// Compute agent `i`'s next state.
pub(crate) fn steer_agent(
    i:      usize,
    store:  &AgentStore,
    grid:   &SpatialGrid,
    params: &SteerParams,
    dt:     f32,
) -> AgentUpdate {
    let pos = store.position[i];

    if !store.has_target[i] {
        return AgentUpdate::halt(pos, None);
    }

    let to_target = store.target[i] - pos;
    let dist_sq = to_target.length_squared();
    if dist_sq < params.arrive_sq {
        return AgentUpdate::halt(pos, Some(ClearCause::Arrived));
    }

    let desired = to_target.normalize_or_zero() * params.max_speed;
    let push = separation(i, pos, store, grid, params);
    let velocity = (desired + push).clamp_length(params.max_speed);

    let mut stuck_timer = 0.0;
    if velocity.length() < params.stop_speed && dist_sq > params.gap_sq {
        stuck_timer = store.stuck_timer[i] + dt;
        if stuck_timer >= params.stuck_time {
            return AgentUpdate::halt(pos, Some(ClearCause::Stuck));
        }
    }

    AgentUpdate {
        position: (pos + velocity * dt).clamp_square(params.half_extent),
        velocity,
        stuck_timer,
        cleared: None,
    }
}

/// Sum of repulsion from every neighbour in the 3×3 cell block closer than
/// `gap`.  Each contributes `away * (gap - d) / gap * separation_force`.
pub(crate) fn separation(
    i:      usize,
    pos:    Vec2,
    store:  &AgentStore,
    grid:   &SpatialGrid,
    params: &SteerParams,
) -> Vec2 {
    let mut push = Vec2::ZERO;
    if params.separation_force == 0.0 {
        return push;
    }

    grid.for_each_nearby(pos, |other| {
        let j = other.index();
        if j == i {
            return;
        }
        let away = pos - store.position[j];
        let d_sq = away.length_squared();
        if d_sq > COINCIDENT_EPSILON_SQ && d_sq < params.gap_sq {
            let d = d_sq.sqrt();
            let depth = (params.gap - d) / params.gap;
            push += away * (depth * params.separation_force / d);
        }
    });
    push
}
