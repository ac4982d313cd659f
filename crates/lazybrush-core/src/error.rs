//! Error types for lazybrush-core

use thiserror::Error;

/// Lazybrush core error type
#[derive(Debug, Error)]
pub enum Error {
    /// A user label id must be non-negative; negative values are reserved
    /// for the engine's sentinels.
    #[error("invalid label id: {0} (user label ids must be non-negative)")]
    InvalidLabel(i16),

    /// Invalid canvas dimensions
    #[error("invalid canvas dimensions: {width}x{height}")]
    InvalidDimension { width: i32, height: i32 },

    /// Index out of bounds
    #[error("index out of bounds: {index} >= {len}")]
    IndexOutOfBounds { index: usize, len: usize },
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, Error>;
