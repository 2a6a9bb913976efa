//! Grid error type.

use thiserror::Error;

/// Errors produced by `hk-grid`.
#[derive(Debug, Error)]
pub enum GridError {
    #[error("invalid grid dimensions: field {field_size}, cell {cell_size}")]
    InvalidDimensions { field_size: f32, cell_size: f32 },
}

pub type GridResult<T> = Result<T, GridError>;
