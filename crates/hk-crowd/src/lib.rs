//! `hk-crowd` — crowd movement with local avoidance.
//!
//! # Tick
//!
//! ```text
//! crowd.tick(dt):
//!   ① Grid       — rebuild the uniform grid from current positions (O(N)).
//!   ② Steer      — for each agent in ascending index order:
//!                    idle            → velocity 0
//!                    within gap / 2  → arrived, target cleared
//!                    otherwise       → seek target + separation, clamp speed,
//!                                      stuck detection, integrate, clamp to field
//!   ③ Retarget   — for each agent cleared in ②, notify the observer and ask
//!                  the TargetPolicy for a replacement.
//! ```
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Runs phase ② on Rayon's thread pool.                   |
//! | `serde`    | Propagates serde derives to `hk-core` / `hk-agent`.    |
//!
//! # Quick-start
//!
//! ```rust
//! use hk_core::CrowdConfig;
//! use hk_crowd::CrowdBuilder;
//!
//! let config = CrowdConfig { agent_count: 64, ..CrowdConfig::default() };
//! let mut crowd = CrowdBuilder::new(config).build().unwrap();
//! for _ in 0..10 {
//!     crowd.step();
//! }
//! assert_eq!(crowd.clock().current_tick.0, 10);
//! ```

pub mod builder;
pub mod crowd;
pub mod error;
pub mod observer;
pub mod policy;
mod steer;


pub use builder::CrowdBuilder;
pub use crowd::Crowd;
pub use error::{CrowdError, CrowdResult};
pub use observer::{CrowdObserver, NoopObserver};
pub use policy::{ClearCause, RetargetContext, TargetPolicy};
