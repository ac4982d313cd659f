//! lazybrush-maxflow - Min-cut engine for the lazybrush colorization
//! engine
//!
//! A self-contained max-flow / min-cut solver over integer capacities
//! with the two-terminal interface graph-cut segmentation expects:
//! per-node terminal weights ([`FlowGraph::add_tweights`]), directed edge
//! pairs ([`FlowGraph::add_edge`]), one [`FlowGraph::maxflow`] solve and
//! per-node cut sides ([`FlowGraph::segment`]).
//!
//! The solver is deterministic: identical construction sequences produce
//! identical flows and identical cuts. Segmentation follows residual
//! reachability from the source, so among equal-cost cuts the one with
//! the smallest source side is reported and disconnected nodes default
//! to the sink side.
//!
//! # Examples
//!
//! ```
//! use lazybrush_maxflow::{FlowGraph, Segment};
//!
//! let mut graph = FlowGraph::with_capacity(2, 1);
//! let a = graph.add_node();
//! let b = graph.add_node();
//! graph.add_tweights(a, 10, 0).unwrap();
//! graph.add_tweights(b, 0, 10).unwrap();
//! graph.add_edge(a, b, 5, 5).unwrap();
//!
//! assert_eq!(graph.maxflow().unwrap(), 5);
//! assert_eq!(graph.segment(a), Segment::Source);
//! assert_eq!(graph.segment(b), Segment::Sink);
//! ```

pub mod error;
pub mod graph;

pub use error::{FlowError, FlowResult};
pub use graph::{FlowGraph, Segment};
