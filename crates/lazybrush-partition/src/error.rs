//! Error types for lazybrush-partition

use thiserror::Error;

/// Errors that can occur while building or mutating a grid of quadtrees
#[derive(Debug, Error)]
pub enum PartitionError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] lazybrush_core::Error),

    /// Cell sizes must be positive powers of two so that refinement can
    /// reach 1x1 leaves.
    #[error("cell size must be a positive power of two, got {0}")]
    InvalidCellSize(i32),
}

/// Result type for partition operations
pub type PartitionResult<T> = Result<T, PartitionError>;
