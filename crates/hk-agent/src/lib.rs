//! `hk-agent` — Structure-of-Arrays agent storage for the crowd.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`store`]       | `AgentStore` (SoA arrays)                                 |
//! | [`builder`]     | `AgentStoreBuilder` (random or explicit placement)        |
//! | [`error`]       | `AgentError`, `AgentResult<T>`                            |
//!
//! Agents are never allocated one object at a time: every per-agent field is
//! a parallel `Vec` indexed by `AgentId`, so the steering loop walks
//! contiguous memory.

pub mod builder;
pub mod error;
pub mod store;


pub use builder::AgentStoreBuilder;
pub use error::{AgentError, AgentResult};
pub use store::AgentStore;
