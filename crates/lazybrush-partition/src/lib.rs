//! lazybrush-partition - Adaptive space partition for line-art canvases
//!
//! This crate provides the grid of quadtrees underlying the lazybrush
//! colorization engine:
//!
//! - **Quadtree cells** - aligned power-of-two squares, refined on demand
//!   down to single pixels
//! - **Grid of quadtrees** - a regular tiling of fixed-size trees with
//!   whole-canvas, rectangular and border traversal
//! - **Neighbor resolution** - per-leaf, per-side lists of the leaves
//!   sharing an edge, exposing the partition as a planar graph
//!
//! The partition is coarse over homogeneous areas and fine exactly along
//! inserted points, so algorithms walking the leaves cost
//! O(#non-trivial regions) instead of O(#pixels).
//!
//! # Examples
//!
//! ```
//! use lazybrush_core::{Point, Rect};
//! use lazybrush_partition::{Grid, Side};
//!
//! let canvas = Rect::from_origin_size(0, 0, 64, 64);
//! let mut grid: Grid<u8> = Grid::new(canvas, 32).unwrap();
//!
//! // Inserting a point refines the containing tree down to 1x1.
//! let leaf = grid.add_point(Point::new(10, 20)).unwrap();
//! assert_eq!(grid.side_of(leaf), 1);
//!
//! // Leaves tile the canvas exactly.
//! let mut area = 0;
//! grid.visit_leaves(|id| {
//!     area += grid.rect_of(id).area();
//!     true
//! });
//! assert_eq!(area, 64 * 64);
//!
//! // After a neighbor pass, each leaf knows the leaves sharing its sides.
//! grid.update_neighbors(false);
//! assert!(grid.neighbors(leaf, Side::Top).len() == 1);
//! ```

pub mod cell;
pub mod error;
pub mod grid;

pub use cell::{CellId, Quadrant, Side};
pub use error::{PartitionError, PartitionResult};
pub use grid::Grid;
