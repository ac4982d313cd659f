//! lazybrush-colorize - Scribble-driven colorization of line-art
//! canvases
//!
//! The interactive core of a lazy-brush style colorizer. A
//! [`ColorizationContext`] tracks a canvas (as two grids of quadtrees)
//! and an ordered list of user scribbles; [`colorize`] turns that state
//! into a complete per-region labeling by solving one binary min-cut per
//! label over the partition's leaf graph. Cuts are nearly free along
//! line pixels and expensive across blank canvas, so the computed
//! regions follow the line art.
//!
//! Scribbles are anything implementing the
//! [`Scribble`](lazybrush_core::Scribble) capability; [`MaskScribble`]
//! provides the brush-painted implementation interactive applications
//! want.
//!
//! # Examples
//!
//! ```
//! use lazybrush_colorize::{colorize, ColorizationContext, ColorizeOptions, MaskScribble};
//! use lazybrush_core::{InputPoint, Label, Point, Rect};
//!
//! // A 64x64 canvas with a vertical line splitting it in two.
//! let points: Vec<InputPoint> = (0..64)
//!     .map(|y| InputPoint::new(Point::new(32, y), 0))
//!     .collect();
//! let mut context =
//!     ColorizationContext::new(Rect::from_origin_size(0, 0, 64, 64), 32, &points).unwrap();
//!
//! let mut left = MaskScribble::new(Label::new(1).unwrap());
//! left.dab_at(Point::new(10, 32), 4);
//! context.append_scribble(left);
//!
//! let mut right = MaskScribble::new(Label::new(2).unwrap());
//! right.dab_at(Point::new(52, 32), 4);
//! context.append_scribble(right);
//!
//! let labeling = colorize(&mut context, &ColorizeOptions::default()).unwrap();
//! let area: i64 = labeling.iter().map(|(rect, _)| rect.area()).sum();
//! assert_eq!(area, 64 * 64);
//! ```

pub mod colorize;
pub mod context;
pub mod error;
mod labeling;
pub mod mask;
pub mod options;

pub use colorize::colorize;
pub use context::{
    ColorizationContext, ReferenceCellData, WorkingCellData, SCRIBBLE_INDEX_UNDEFINED,
};
pub use error::{ColorizeError, ColorizeResult};
pub use mask::MaskScribble;
pub use options::{ColorizeOptions, ScribbleWeight};
