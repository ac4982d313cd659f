//! Lazybrush - Interactive line-art colorization for Rust
//!
//! A space-adaptive implementation of lazy-brush style colorization: the
//! canvas is partitioned by a grid of quadtrees that stays coarse over
//! blank areas and refines to single pixels along line art and scribble
//! outlines, and the labeling is computed as a sequence of binary
//! min-cuts over the partition's leaf graph. Recoloring after a new
//! scribble touches only the affected tiles, which keeps multi-megapixel
//! canvases interactive.
//!
//! # Overview
//!
//! - [`Grid`] - the adaptive partition and its planar leaf graph
//! - [`ColorizationContext`] - canvas state plus the ordered scribbles
//! - [`colorize`] - the labeling engine
//! - [`MaskScribble`] - a brush-painted scribble; custom shapes
//!   implement [`Scribble`]
//! - [`FlowGraph`] - the underlying min-cut solver
//!
//! # Example
//!
//! ```
//! use lazybrush::{
//!     colorize, ColorizationContext, ColorizeOptions, InputPoint, Label, MaskScribble, Point,
//!     Rect,
//! };
//!
//! // A canvas with a vertical line down the middle.
//! let points: Vec<InputPoint> = (0..64)
//!     .map(|y| InputPoint::new(Point::new(32, y), 0))
//!     .collect();
//! let mut context =
//!     ColorizationContext::new(Rect::from_origin_size(0, 0, 64, 64), 32, &points).unwrap();
//!
//! // Scribble on both sides of the line.
//! let mut left = MaskScribble::new(Label::new(1).unwrap());
//! left.dab_at(Point::new(10, 32), 4);
//! context.append_scribble(left);
//! let mut right = MaskScribble::new(Label::new(2).unwrap());
//! right.dab_at(Point::new(52, 32), 4);
//! context.append_scribble(right);
//!
//! // The labeling tiles the canvas; the cut follows the line.
//! let labeling = colorize(&mut context, &ColorizeOptions::default()).unwrap();
//! assert!(labeling.iter().any(|&(_, label)| label == Label::new(1).unwrap()));
//! assert!(labeling.iter().any(|&(_, label)| label == Label::new(2).unwrap()));
//! ```

pub use lazybrush_core::{
    Error, InputPoint, Intensity, Label, Point, Rect, Result, Scribble, INTENSITY_MAX,
    INTENSITY_MIN,
};

pub use lazybrush_partition::{CellId, Grid, PartitionError, PartitionResult, Quadrant, Side};

pub use lazybrush_maxflow::{FlowError, FlowGraph, FlowResult, Segment};

pub use lazybrush_colorize::{
    colorize, ColorizationContext, ColorizeError, ColorizeOptions, ColorizeResult, MaskScribble,
    ReferenceCellData, ScribbleWeight, WorkingCellData,
};
