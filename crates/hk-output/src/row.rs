//! Plain data row types written by output backends.

/// One agent's state at the end of a tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgentSnapshotRow {
    pub tick:       u64,
    pub agent_id:   u32,
    pub x:          f32,
    pub y:          f32,
    pub vx:         f32,
    pub vy:         f32,
    pub has_target: bool,
}

/// Crowd-wide numbers for one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickSummaryRow {
    pub tick:          u64,
    /// Simulated seconds including this tick.
    pub elapsed_secs:  f64,
    /// Agents with a target at the end of the tick.
    pub moving_agents: u64,
}
