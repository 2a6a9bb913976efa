//! Core agent storage: `AgentStore`.
//!
//! The per-agent steering pass reads `position` for every neighbour while
//! writing one agent's own entries.  Keeping each field in its own `Vec` lets
//! the parallel pass hand out `&AgentStore` to every worker and collect
//! updates, then write them back in a single sequential sweep.

use hk_core::{AgentId, Vec2};

/// Structure-of-Arrays storage for all agent state.
///
/// Every `Vec` field has exactly `count` elements; the `AgentId` value is the
/// index into all of them:
///
/// ```ignore
/// let p = store.position[agent.index()];  // O(1), cache-friendly
/// ```
#[derive(Clone, Debug)]
pub struct AgentStore {
    /// Number of agents.  Equals the length of every SoA `Vec`.
    pub count: usize,

    /// Current position, always inside the field square.
    pub position: Vec<Vec2>,

    /// Current velocity.  Length never exceeds the configured `max_speed`;
    /// zero while the agent has no target.
    pub velocity: Vec<Vec2>,

    /// Target position.  Meaningless when `has_target` is `false`.
    pub target: Vec<Vec2>,

    /// `false` once the target was cleared (arrival or stuck) and until a new
    /// one is assigned.
    pub has_target: Vec<bool>,

    /// Seconds spent slow and not yet arrived.  Reset whenever the agent
    /// moves fast enough or gets close to its target.
    pub stuck_timer: Vec<f32>,
}

impl AgentStore {
    #[inline]
    pub fn len(&self) -> usize {
        self.count
    }

    /// `true` if there are no agents.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Iterator over all `AgentId`s in ascending index order.
    pub fn agent_ids(&self) -> impl Iterator<Item = AgentId> + '_ {
        (0..self.count as u32).map(AgentId)
    }

    /// `true` if `agent` indexes into this store.
    #[inline]
    pub fn contains(&self, agent: AgentId) -> bool {
        agent.index() < self.count
    }

    /// Current speed of `agent`.
    #[inline]
    pub fn speed(&self, agent: AgentId) -> f32 {
        self.velocity[agent.index()].length()
    }

    /// Target of `agent`, or `None` while idle.
    #[inline]
    pub fn target_of(&self, agent: AgentId) -> Option<Vec2> {
        let i = agent.index();
        self.has_target[i].then(|| self.target[i])
    }

    /// Assign a new target and restart the stuck timer.
    pub fn set_target(&mut self, agent: AgentId, target: Vec2) {
        let i = agent.index();
        self.target[i] = target;
        self.has_target[i] = true;
        self.stuck_timer[i] = 0.0;
    }

    /// Drop the target: the agent becomes idle with zero velocity.
    pub fn clear_target(&mut self, agent: AgentId) {
        let i = agent.index();
        self.has_target[i] = false;
        self.velocity[i] = Vec2::ZERO;
        self.stuck_timer[i] = 0.0;
    }

    /// Number of agents that currently have a target.
    pub fn moving_count(&self) -> usize {
        self.has_target.iter().filter(|&&t| t).count()
    }

    // ── Package-private constructor used by AgentStoreBuilder ─────────────

    pub(crate) fn new(position: Vec<Vec2>, target: Vec<Option<Vec2>>) -> Self {
        let count = position.len();
        Self {
            count,
            position,
            velocity:    vec![Vec2::ZERO; count],
            has_target:  target.iter().map(Option::is_some).collect(),
            target:      target.into_iter().map(Option::unwrap_or_default).collect(),
            stuck_timer: vec![0.0; count],
        }
    }
}
