//! `hk-core` — foundational types for the `horde_kit` crates.
//!
//! This crate is a dependency of every crowd crate.  It has no `hk-*`
//! dependencies and minimal external ones (only `rand` and `thiserror`,
//! plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `AgentId`                                             |
//! | [`vec2`]        | `Vec2` planar vector maths                            |
//! | [`time`]        | `Tick`, `StepClock`                                   |
//! | [`rng`]         | `SimRng` (seeded, deterministic)                      |
//! | [`config`]      | `CrowdConfig`, `RetargetMode`, validation             |
//! | [`error`]       | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod ids;
pub mod rng;
pub mod time;
pub mod vec2;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{CrowdConfig, MAX_GRID_CELLS, MIN_CELL_SIZE, RetargetMode};
pub use error::{CoreError, CoreResult};
pub use ids::AgentId;
pub use rng::SimRng;
pub use time::{StepClock, Tick};
pub use vec2::Vec2;
