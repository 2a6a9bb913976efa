//! Target re-assignment policy.
//!
//! The simulation never invents targets on its own after construction.  When
//! an agent's target is cleared the [`TargetPolicy`] decides what happens
//! next: return `Some(target)` to send the agent off again in the same tick,
//! or `None` to leave it idle until the host calls
//! [`Crowd::set_target`][crate::Crowd::set_target].

use hk_core::{AgentId, RetargetMode, SimRng, Tick, Vec2};

/// Why a target was cleared.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ClearCause {
    /// The agent came within `gap / 2` of its target.
    Arrived,
    /// The agent stayed slower than `stop_speed_threshold` for
    /// `stuck_time_to_stop` seconds while still farther than `gap` away.
    Stuck,
}

/// Read-only facts about the agent being re-targeted.
#[derive(Copy, Clone, Debug)]
pub struct RetargetContext {
    pub tick:        Tick,
    /// Position after this tick's integration.
    pub position:    Vec2,
    /// Positions and targets live in `[-half_extent, half_extent]²`.
    pub half_extent: f32,
}

/// Pluggable re-targeting.
///
/// Called sequentially, in ascending `AgentId` order, after the steering
/// pass.  Returned targets are clamped onto the field.
///
/// Closures with the matching signature implement this trait, so ad-hoc
/// policies need no named type:
///
/// ```rust
/// use hk_core::{AgentId, SimRng, Vec2};
/// use hk_crowd::{ClearCause, RetargetContext, TargetPolicy};
///
/// // Send everyone back to the origin.
/// let mut home = |_: AgentId, _: ClearCause, _: &RetargetContext, _: &mut SimRng| {
///     Some(Vec2::ZERO)
/// };
/// fn takes_policy(_: &mut impl TargetPolicy) {}
/// takes_policy(&mut home);
/// ```
pub trait TargetPolicy {
    fn on_target_cleared(
        &mut self,
        agent: AgentId,
        cause: ClearCause,
        ctx:   &RetargetContext,
        rng:   &mut SimRng,
    ) -> Option<Vec2>;
}

impl TargetPolicy for RetargetMode {
    fn on_target_cleared(
        &mut self,
        _agent: AgentId,
        _cause: ClearCause,
        ctx:    &RetargetContext,
        rng:    &mut SimRng,
    ) -> Option<Vec2> {
        match self {
            RetargetMode::Idle => None,
            RetargetMode::Random => Some(rng.point_in_square(ctx.half_extent)),
        }
    }
}

impl<F> TargetPolicy for F
where
    F: FnMut(AgentId, ClearCause, &RetargetContext, &mut SimRng) -> Option<Vec2>,
{
    fn on_target_cleared(
        &mut self,
        agent: AgentId,
        cause: ClearCause,
        ctx:   &RetargetContext,
        rng:   &mut SimRng,
    ) -> Option<Vec2> {
        self(agent, cause, ctx, rng)
    }
}
