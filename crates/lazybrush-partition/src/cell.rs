//! Quadtree cells and their addressing
//!
//! Cells live in a per-grid arena and reference each other by [`CellId`].
//! The arena breaks the parent/child reference cycle that an owning-pointer
//! representation would create, and keeps the tree cache-friendly.

use lazybrush_core::Rect;

/// Handle to a cell inside a grid's arena
///
/// Ids are only meaningful for the grid that produced them. They stay
/// stable across neighbor updates but not across `clear`, which recycles
/// the subtree slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellId(u32);

impl CellId {
    #[inline]
    pub(crate) const fn new(index: usize) -> Self {
        Self(index as u32)
    }

    #[inline]
    pub(crate) const fn index(self) -> usize {
        self.0 as usize
    }
}

/// One side of a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Top = 0,
    Left = 1,
    Bottom = 2,
    Right = 3,
}

impl Side {
    /// All four sides
    pub const ALL: [Side; 4] = [Side::Top, Side::Left, Side::Bottom, Side::Right];

    /// The side facing this one across a shared edge
    #[inline]
    pub const fn opposite(self) -> Side {
        match self {
            Side::Top => Side::Bottom,
            Side::Left => Side::Right,
            Side::Bottom => Side::Top,
            Side::Right => Side::Left,
        }
    }

    #[inline]
    pub(crate) const fn index(self) -> usize {
        self as usize
    }
}

/// One quadrant of a subdivided cell
///
/// The order matches the child array layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quadrant {
    TopLeft = 0,
    TopRight = 1,
    BottomRight = 2,
    BottomLeft = 3,
}

impl Quadrant {
    #[inline]
    pub(crate) const fn index(self) -> usize {
        self as usize
    }

    pub(crate) const fn from_index(index: usize) -> Quadrant {
        match index {
            0 => Quadrant::TopLeft,
            1 => Quadrant::TopRight,
            2 => Quadrant::BottomRight,
            _ => Quadrant::BottomLeft,
        }
    }

    /// Whether a child in this quadrant touches the given side of its
    /// parent.
    pub(crate) const fn touches(self, side: Side) -> bool {
        match side {
            Side::Top => matches!(self, Quadrant::TopLeft | Quadrant::TopRight),
            Side::Bottom => matches!(self, Quadrant::BottomLeft | Quadrant::BottomRight),
            Side::Left => matches!(self, Quadrant::TopLeft | Quadrant::BottomLeft),
            Side::Right => matches!(self, Quadrant::TopRight | Quadrant::BottomRight),
        }
    }

    /// This quadrant mirrored across the axis of the given side
    ///
    /// Stepping from a cell to its side neighbor of equal size lands on
    /// the mirrored quadrant, whether the neighbor shares the parent or
    /// hangs off the parent's own side neighbor.
    pub(crate) const fn mirrored(self, side: Side) -> Quadrant {
        match side {
            Side::Top | Side::Bottom => match self {
                Quadrant::TopLeft => Quadrant::BottomLeft,
                Quadrant::TopRight => Quadrant::BottomRight,
                Quadrant::BottomRight => Quadrant::TopRight,
                Quadrant::BottomLeft => Quadrant::TopLeft,
            },
            Side::Left | Side::Right => match self {
                Quadrant::TopLeft => Quadrant::TopRight,
                Quadrant::TopRight => Quadrant::TopLeft,
                Quadrant::BottomRight => Quadrant::BottomLeft,
                Quadrant::BottomLeft => Quadrant::BottomRight,
            },
        }
    }
}

/// A quadtree cell: an aligned square, either a leaf or split into four
/// quadrants of half the side length
///
/// Internal cells keep their `data` slot but only leaves carry meaningful
/// values. The per-side neighbor lists are caches, valid only after a
/// neighbor-update pass on the owning grid.
#[derive(Debug, Clone)]
pub(crate) struct Cell<D> {
    pub(crate) rect: Rect,
    pub(crate) parent: Option<CellId>,
    /// Children in [`Quadrant`] order, present iff the cell is subdivided
    pub(crate) children: Option<[CellId; 4]>,
    /// Leaf neighbor caches in [`Side`] order
    pub(crate) neighbors: [Vec<CellId>; 4],
    pub(crate) data: D,
}

impl<D> Cell<D> {
    pub(crate) fn new(rect: Rect, parent: Option<CellId>, data: D) -> Self {
        Self {
            rect,
            parent,
            children: None,
            neighbors: [Vec::new(), Vec::new(), Vec::new(), Vec::new()],
            data,
        }
    }
}
