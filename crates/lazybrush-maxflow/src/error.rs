//! Error types for lazybrush-maxflow

use thiserror::Error;

/// Errors raised while building or solving a flow graph
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FlowError {
    /// An edge or terminal references a node that was never added
    #[error("node {node} out of range (graph has {count} nodes)")]
    NodeOutOfRange { node: usize, count: usize },

    /// Capacities must be non-negative
    #[error("negative capacity {0}")]
    NegativeCapacity(i32),

    /// The graph cannot be extended once `maxflow` has run
    #[error("graph is frozen after maxflow")]
    Frozen,
}

/// Result type for flow operations
pub type FlowResult<T> = Result<T, FlowError>;
