//! Crowd observer trait for telemetry and data collection.

use hk_agent::AgentStore;
use hk_core::{AgentId, Tick};

use crate::ClearCause;

/// Callbacks invoked by [`Crowd::tick_observed`][crate::Crowd::tick_observed]
/// at key points in a tick.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: arrival counter
///
/// ```rust,ignore
/// struct Arrivals(usize);
///
/// impl CrowdObserver for Arrivals {
///     fn on_target_cleared(&mut self, _tick: Tick, _agent: AgentId, cause: ClearCause) {
///         if cause == ClearCause::Arrived {
///             self.0 += 1;
///         }
///     }
/// }
/// ```
pub trait CrowdObserver {
    /// Called at the very start of each tick, before the grid rebuild.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called once per agent whose target was cleared this tick, in ascending
    /// agent order, before the target policy runs.
    fn on_target_cleared(&mut self, _tick: Tick, _agent: AgentId, _cause: ClearCause) {}

    /// Called at the end of each tick with read-only access to every agent.
    ///
    /// `elapsed_secs` includes this tick's `dt`.
    fn on_tick_end(&mut self, _tick: Tick, _elapsed_secs: f64, _agents: &AgentStore) {}
}

/// A [`CrowdObserver`] that does nothing.
pub struct NoopObserver;

impl CrowdObserver for NoopObserver {}
