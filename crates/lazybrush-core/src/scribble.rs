//! The scribble capability

use crate::geometry::{Point, Rect};
use crate::types::Label;

/// A labeled, filled 2D region painted by the user
///
/// The colorization engine is polymorphic over this small capability set
/// and never sees the scribble's storage representation.
///
/// `contains_point` is the authoritative inside/outside test. `rect` must
/// be a bounding box consistent with it, though not necessarily tight.
/// `contour_points` yields the 1-pixel-wide outline of the filled region;
/// it may be computed lazily and cached, and is treated as a pure function
/// of the scribble's current state.
pub trait Scribble {
    /// Bounding rectangle of the filled region
    fn rect(&self) -> Rect;

    /// The label this scribble paints
    fn label(&self) -> Label;

    /// Whether a point lies inside the filled region
    fn contains_point(&self, p: Point) -> bool;

    /// The 1-pixel-wide outline of the filled region
    fn contour_points(&self) -> Vec<Point>;
}
