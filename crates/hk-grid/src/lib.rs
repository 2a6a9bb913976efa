//! `hk-grid` — uniform spatial grid over the square crowd field.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                     |
//! |------------|--------------------------------------------------------------|
//! | [`grid`]   | `SpatialGrid` (CSR cell buckets, full rebuild, 3×3 scan)      |
//! | [`error`]  | `GridError`, `GridResult<T>`                                 |

pub mod error;
pub mod grid;


pub use error::{GridError, GridResult};
pub use grid::SpatialGrid;
