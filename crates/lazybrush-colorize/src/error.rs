//! Error types for lazybrush-colorize

use thiserror::Error;

/// Errors that can occur while building a context or computing a labeling
#[derive(Debug, Error)]
pub enum ColorizeError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] lazybrush_core::Error),

    /// Space partition error
    #[error("partition error: {0}")]
    Partition(#[from] lazybrush_partition::PartitionError),

    /// The min-cut engine rejected the flow problem
    #[error("solver error: {0}")]
    Solver(#[from] lazybrush_maxflow::FlowError),
}

/// Result type for colorization operations
pub type ColorizeResult<T> = Result<T, ColorizeError>;
