//! Grid of quadtrees
//!
//! A canvas is covered by a regular tiling of fixed-size top-level cells,
//! each the root of a quadtree. Homogeneous areas stay coarse; inserting a
//! point refines the containing tree down to a 1x1 leaf, so the partition
//! is fine exactly along line-art pixels and scribble outlines. Every
//! point of the canvas maps to exactly one leaf.
//!
//! The grid exposes the partition as a planar graph: after
//! [`Grid::update_neighbors`] each leaf carries, per side, the list of
//! leaves sharing that side.

use lazybrush_core::{Point, Rect};

use crate::cell::{Cell, CellId, Quadrant, Side};
use crate::error::{PartitionError, PartitionResult};

/// A rectangle of cells, each owning a quadtree
///
/// The cells live in one arena indexed by [`CellId`]; subtrees removed by
/// the clear operations are recycled through a free list. `clone` deep
/// copies the arena, preserving the cell correspondence positionally.
#[derive(Debug, Clone)]
pub struct Grid<D> {
    rect: Rect,
    cell_size: i32,
    width_in_cells: i32,
    height_in_cells: i32,
    cells: Vec<Cell<D>>,
    free: Vec<CellId>,
}

impl<D> Default for Grid<D> {
    /// The null grid: no canvas, no cells
    fn default() -> Self {
        Self {
            rect: Rect::default(),
            cell_size: 0,
            width_in_cells: 0,
            height_in_cells: 0,
            cells: Vec::new(),
            free: Vec::new(),
        }
    }
}

impl<D: Default> Grid<D> {
    /// Create a grid covering `rect` with top-level cells of side
    /// `cell_size`
    ///
    /// The canvas is rounded up to a whole number of cells in each
    /// direction.
    ///
    /// # Errors
    ///
    /// Returns an error if `cell_size` is not a positive power of two or
    /// if `rect` is not a valid rectangle.
    pub fn new(rect: Rect, cell_size: i32) -> PartitionResult<Self> {
        if cell_size <= 0 || !(cell_size as u32).is_power_of_two() {
            return Err(PartitionError::InvalidCellSize(cell_size));
        }
        if !rect.is_valid() {
            return Err(lazybrush_core::Error::InvalidDimension {
                width: rect.width(),
                height: rect.height(),
            }
            .into());
        }

        let width_in_cells = (rect.width() + cell_size - 1) / cell_size;
        let height_in_cells = (rect.height() + cell_size - 1) / cell_size;
        let canvas = Rect::from_origin_size(
            rect.left,
            rect.top,
            width_in_cells * cell_size,
            height_in_cells * cell_size,
        );

        let mut cells = Vec::with_capacity((width_in_cells * height_in_cells) as usize);
        for y in 0..height_in_cells {
            for x in 0..width_in_cells {
                let cell_rect = Rect::from_origin_size(
                    canvas.left + x * cell_size,
                    canvas.top + y * cell_size,
                    cell_size,
                    cell_size,
                );
                cells.push(Cell::new(cell_rect, None, D::default()));
            }
        }

        Ok(Self {
            rect: canvas,
            cell_size,
            width_in_cells,
            height_in_cells,
            cells,
            free: Vec::new(),
        })
    }

    // ========================================================================
    // Basic queries
    // ========================================================================

    /// True for the default-constructed grid
    #[inline]
    pub fn is_null(&self) -> bool {
        self.cells.is_empty()
    }

    /// The canvas rect (already rounded up to whole cells)
    #[inline]
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Side length of the top-level cells
    #[inline]
    pub fn cell_size(&self) -> i32 {
        self.cell_size
    }

    /// Number of top-level cells per row
    #[inline]
    pub fn width_in_cells(&self) -> i32 {
        self.width_in_cells
    }

    /// Number of top-level cells per column
    #[inline]
    pub fn height_in_cells(&self) -> i32 {
        self.height_in_cells
    }

    #[inline]
    fn top_level_count(&self) -> usize {
        (self.width_in_cells * self.height_in_cells) as usize
    }

    #[inline]
    fn top_level_id(&self, x: i32, y: i32) -> CellId {
        CellId::new((y * self.width_in_cells + x) as usize)
    }

    // ========================================================================
    // Cell accessors
    // ========================================================================

    /// The square region a cell covers
    #[inline]
    pub fn rect_of(&self, id: CellId) -> Rect {
        self.cells[id.index()].rect
    }

    /// Side length of a cell (always a power of two)
    #[inline]
    pub fn side_of(&self, id: CellId) -> i32 {
        self.cells[id.index()].rect.width()
    }

    /// The center point used for quadrant decisions and scribble tests
    ///
    /// A point equal to a center coordinate belongs to the right/lower
    /// quadrant, so the center of a 1x1 cell is its own top-left pixel.
    #[inline]
    pub fn center_of(&self, id: CellId) -> Point {
        let rect = self.cells[id.index()].rect;
        let half = rect.width() / 2;
        Point::new(rect.left + half, rect.top + half)
    }

    /// Borrow a cell's payload
    #[inline]
    pub fn data(&self, id: CellId) -> &D {
        &self.cells[id.index()].data
    }

    /// Mutably borrow a cell's payload
    #[inline]
    pub fn data_mut(&mut self, id: CellId) -> &mut D {
        &mut self.cells[id.index()].data
    }

    /// Whether the cell has no children
    #[inline]
    pub fn is_leaf(&self, id: CellId) -> bool {
        self.cells[id.index()].children.is_none()
    }

    /// Whether the cell is a 1x1 leaf, the finest refinement
    #[inline]
    pub fn is_unit(&self, id: CellId) -> bool {
        self.cells[id.index()].rect.width() == 1
    }

    /// The owning cell, `None` for top-level cells
    #[inline]
    pub fn parent_of(&self, id: CellId) -> Option<CellId> {
        self.cells[id.index()].parent
    }

    /// The four children in quadrant order, `None` for leaves
    #[inline]
    pub fn children_of(&self, id: CellId) -> Option<[CellId; 4]> {
        self.cells[id.index()].children
    }

    /// The cached leaf neighbors on one side
    ///
    /// Only valid after [`Grid::update_neighbors`]; any structural
    /// mutation invalidates the cache.
    #[inline]
    pub fn neighbors(&self, id: CellId, side: Side) -> &[CellId] {
        &self.cells[id.index()].neighbors[side.index()]
    }

    // ========================================================================
    // Point location and insertion
    // ========================================================================

    /// The top-level cell containing a point, `None` outside the canvas
    pub fn top_level_cell_at(&self, p: Point) -> Option<CellId> {
        if self.is_null() || !self.rect.contains(p) {
            return None;
        }
        let x = (p.x - self.rect.left) / self.cell_size;
        let y = (p.y - self.rect.top) / self.cell_size;
        Some(self.top_level_id(x, y))
    }

    /// The child quadrant of `id` containing a point
    ///
    /// Returns `None` if the point is outside the cell or the cell is a
    /// leaf.
    pub fn child_at(&self, id: CellId, p: Point) -> Option<CellId> {
        let cell = &self.cells[id.index()];
        if !cell.rect.contains(p) {
            return None;
        }
        let children = cell.children?;
        Some(children[self.quadrant_at(id, p).index()])
    }

    /// The leaf containing a point, `None` outside the canvas
    pub fn leaf_cell_at(&self, p: Point) -> Option<CellId> {
        let mut id = self.top_level_cell_at(p)?;
        while let Some(children) = self.cells[id.index()].children {
            id = children[self.quadrant_at(id, p).index()];
        }
        Some(id)
    }

    /// Insert a point, refining the containing tree down to a 1x1 leaf
    ///
    /// Returns the unit leaf at the point, or `None` if the point lies
    /// outside the canvas. Existing leaves are only ever replaced by
    /// their four children; no refinement is undone.
    pub fn add_point(&mut self, p: Point) -> Option<CellId> {
        let mut id = self.top_level_cell_at(p)?;
        loop {
            if self.cells[id.index()].rect.width() == 1 {
                return Some(id);
            }
            if self.cells[id.index()].children.is_none() {
                self.subdivide(id);
            }
            id = self.child_at(id, p)?;
        }
    }

    fn quadrant_at(&self, id: CellId, p: Point) -> Quadrant {
        let center = self.center_of(id);
        if p.x < center.x {
            if p.y < center.y {
                Quadrant::TopLeft
            } else {
                Quadrant::BottomLeft
            }
        } else if p.y < center.y {
            Quadrant::TopRight
        } else {
            Quadrant::BottomRight
        }
    }

    fn alloc_cell(&mut self, rect: Rect, parent: CellId) -> CellId {
        let cell = Cell::new(rect, Some(parent), D::default());
        match self.free.pop() {
            Some(id) => {
                self.cells[id.index()] = cell;
                id
            }
            None => {
                self.cells.push(cell);
                CellId::new(self.cells.len() - 1)
            }
        }
    }

    fn subdivide(&mut self, id: CellId) {
        let rect = self.cells[id.index()].rect;
        let half = rect.width() / 2;
        let (cx, cy) = (rect.left + half, rect.top + half);
        let tl = self.alloc_cell(Rect::from_origin_size(rect.left, rect.top, half, half), id);
        let tr = self.alloc_cell(Rect::from_origin_size(cx, rect.top, half, half), id);
        let br = self.alloc_cell(Rect::from_origin_size(cx, cy, half, half), id);
        let bl = self.alloc_cell(Rect::from_origin_size(rect.left, cy, half, half), id);
        self.cells[id.index()].children = Some([tl, tr, br, bl]);
    }

    // ========================================================================
    // Clearing
    // ========================================================================

    /// Collapse every top-level cell back to a single leaf
    pub fn clear(&mut self) {
        for index in 0..self.top_level_count() {
            self.collapse(CellId::new(index));
        }
    }

    /// Collapse the top-level cells intersecting `rect` back to single
    /// leaves
    ///
    /// Cells outside the canvas are ignored.
    pub fn clear_rect(&mut self, rect: &Rect) {
        let Some(tiles) = self.tile_range(rect) else {
            return;
        };
        for y in tiles.top..=tiles.bottom {
            for x in tiles.left..=tiles.right {
                let id = self.top_level_id(x, y);
                self.collapse(id);
            }
        }
    }

    fn collapse(&mut self, id: CellId) {
        if let Some(children) = self.cells[id.index()].children.take() {
            let mut stack: Vec<CellId> = children.into();
            while let Some(child) = stack.pop() {
                if let Some(grandchildren) = self.cells[child.index()].children.take() {
                    stack.extend(grandchildren);
                }
                self.free.push(child);
            }
        }
        let cell = &mut self.cells[id.index()];
        cell.data = D::default();
        cell.neighbors = [Vec::new(), Vec::new(), Vec::new(), Vec::new()];
    }

    // ========================================================================
    // Rect adjustment
    // ========================================================================

    /// The range of top-level cells intersecting `rect`, in cell
    /// coordinates
    fn tile_range(&self, rect: &Rect) -> Option<Rect> {
        if self.is_null() {
            return None;
        }
        let r = self.rect.intersect(rect)?;
        Some(Rect::new(
            (r.left - self.rect.left) / self.cell_size,
            (r.top - self.rect.top) / self.cell_size,
            (r.right - self.rect.left) / self.cell_size,
            (r.bottom - self.rect.top) / self.cell_size,
        ))
    }

    /// Snap `rect` outward to whole top-level cells
    ///
    /// Returns `None` when `rect` does not intersect the canvas.
    pub fn adjusted_rect(&self, rect: &Rect) -> Option<Rect> {
        let tiles = self.tile_range(rect)?;
        Some(Rect::new(
            self.rect.left + tiles.left * self.cell_size,
            self.rect.top + tiles.top * self.cell_size,
            self.rect.left + (tiles.right + 1) * self.cell_size - 1,
            self.rect.top + (tiles.bottom + 1) * self.cell_size - 1,
        ))
    }

    // ========================================================================
    // Traversal
    // ========================================================================

    /// Preorder walk over every cell, internal and leaf
    ///
    /// The visitor returns `false` to abort the whole walk.
    pub fn visit<F>(&self, mut visitor: F)
    where
        F: FnMut(CellId) -> bool,
    {
        for index in 0..self.top_level_count() {
            if !self.visit_subtree(CellId::new(index), &mut visitor) {
                return;
            }
        }
    }

    /// Preorder walk limited to the top-level cells intersecting `rect`
    ///
    /// Intersecting trees are traversed whole, so leaves outside `rect`
    /// but inside an intersecting tile are still visited.
    pub fn visit_in<F>(&self, rect: &Rect, mut visitor: F)
    where
        F: FnMut(CellId) -> bool,
    {
        let Some(tiles) = self.tile_range(rect) else {
            return;
        };
        for y in tiles.top..=tiles.bottom {
            for x in tiles.left..=tiles.right {
                if !self.visit_subtree(self.top_level_id(x, y), &mut visitor) {
                    return;
                }
            }
        }
    }

    /// Preorder walk over the leaves only
    pub fn visit_leaves<F>(&self, mut visitor: F)
    where
        F: FnMut(CellId) -> bool,
    {
        self.visit(|id| {
            if self.is_leaf(id) {
                visitor(id)
            } else {
                true
            }
        });
    }

    /// Preorder walk over the leaves of the top-level cells intersecting
    /// `rect`
    pub fn visit_leaves_in<F>(&self, rect: &Rect, mut visitor: F)
    where
        F: FnMut(CellId) -> bool,
    {
        self.visit_in(rect, |id| {
            if self.is_leaf(id) {
                visitor(id)
            } else {
                true
            }
        });
    }

    fn visit_subtree<F>(&self, top: CellId, visitor: &mut F) -> bool
    where
        F: FnMut(CellId) -> bool,
    {
        let mut stack = vec![top];
        while let Some(id) = stack.pop() {
            if !visitor(id) {
                return false;
            }
            if let Some([tl, tr, br, bl]) = self.cells[id.index()].children {
                stack.push(br);
                stack.push(bl);
                stack.push(tr);
                stack.push(tl);
            }
        }
        true
    }

    // ========================================================================
    // Side leaves and border traversal
    // ========================================================================

    /// The leaves tiling one side of a cell
    ///
    /// Top and bottom run left to right, left and right top to bottom.
    /// For a leaf this is the singleton `[id]`.
    pub fn edge_leaves(&self, id: CellId, side: Side) -> Vec<CellId> {
        let mut leaves = Vec::new();
        self.collect_edge_leaves(id, side, &mut leaves);
        leaves
    }

    fn collect_edge_leaves(&self, id: CellId, side: Side, leaves: &mut Vec<CellId>) {
        match self.cells[id.index()].children {
            None => leaves.push(id),
            Some(children) => {
                let (first, second) = match side {
                    Side::Top => (Quadrant::TopLeft, Quadrant::TopRight),
                    Side::Left => (Quadrant::TopLeft, Quadrant::BottomLeft),
                    Side::Bottom => (Quadrant::BottomLeft, Quadrant::BottomRight),
                    Side::Right => (Quadrant::TopRight, Quadrant::BottomRight),
                };
                self.collect_edge_leaves(children[first.index()], side, leaves);
                self.collect_edge_leaves(children[second.index()], side, leaves);
            }
        }
    }

    /// Walk the leaves touching the canvas boundary, clockwise, starting
    /// from the top-left cell's top edge
    ///
    /// A corner leaf lies on two edges of the walk; it is emitted the
    /// first time it is seen, so every border leaf appears exactly once.
    pub fn visit_border_leaves<F>(&self, mut visitor: F)
    where
        F: FnMut(CellId) -> bool,
    {
        if self.is_null() {
            return;
        }

        let w = self.width_in_cells;
        let h = self.height_in_cells;
        let mut seen = vec![false; self.cells.len()];
        let mut emit = |id: CellId| -> Option<bool> {
            if seen[id.index()] {
                return None;
            }
            seen[id.index()] = true;
            Some(visitor(id))
        };

        // Top row, left to right.
        for x in 0..w {
            for id in self.edge_leaves(self.top_level_id(x, 0), Side::Top) {
                if emit(id) == Some(false) {
                    return;
                }
            }
        }
        // Right column, top to bottom.
        for y in 0..h {
            for id in self.edge_leaves(self.top_level_id(w - 1, y), Side::Right) {
                if emit(id) == Some(false) {
                    return;
                }
            }
        }
        // Bottom row, right to left.
        for x in (0..w).rev() {
            for id in self
                .edge_leaves(self.top_level_id(x, h - 1), Side::Bottom)
                .into_iter()
                .rev()
            {
                if emit(id) == Some(false) {
                    return;
                }
            }
        }
        // Left column, bottom to top.
        for y in (0..h).rev() {
            for id in self
                .edge_leaves(self.top_level_id(0, y), Side::Left)
                .into_iter()
                .rev()
            {
                if emit(id) == Some(false) {
                    return;
                }
            }
        }
    }

    // ========================================================================
    // Neighbor resolution
    // ========================================================================

    /// Rebuild the per-leaf neighbor caches
    ///
    /// For every leaf the top and left lists are filled with the leaves
    /// sharing that side; bottom and right too unless `top_left_only` is
    /// set. The relation is symmetric, so with `top_left_only` every
    /// unordered leaf pair still appears exactly once across all lists.
    ///
    /// Sides on the canvas border get empty lists.
    pub fn update_neighbors(&mut self, top_left_only: bool) {
        if self.is_null() {
            return;
        }

        let mut leaves: Vec<(CellId, i32, i32)> = Vec::new();
        for y in 0..self.height_in_cells {
            for x in 0..self.width_in_cells {
                let mut stack = vec![self.top_level_id(x, y)];
                while let Some(id) = stack.pop() {
                    match self.cells[id.index()].children {
                        None => leaves.push((id, x, y)),
                        Some([tl, tr, br, bl]) => {
                            stack.push(br);
                            stack.push(bl);
                            stack.push(tr);
                            stack.push(tl);
                        }
                    }
                }
            }
        }

        let sides: &[Side] = if top_left_only {
            &[Side::Top, Side::Left]
        } else {
            &Side::ALL
        };

        for (id, tile_x, tile_y) in leaves {
            for &side in sides {
                let list = match self.find_side_cell(id, tile_x, tile_y, side) {
                    None => Vec::new(),
                    // An equal-size cell projects its far-side leaves
                    // onto the shared edge (itself, when it is a leaf).
                    Some((cell, true)) => self.edge_leaves(cell, side.opposite()),
                    // A larger abutting cell is necessarily a leaf.
                    Some((cell, false)) => vec![cell],
                };
                self.cells[id.index()].neighbors[side.index()] = list;
            }
        }
    }

    /// Find the cell abutting `id` on `side` at the same or a higher
    /// tree level
    ///
    /// Returns the cell and whether it sits at the same level as `id`;
    /// `None` when `id` lies on the canvas border. Works by climbing to
    /// the first ancestor not touching `side`, crossing to the mirrored
    /// sibling, and descending one step per unwound level.
    fn find_side_cell(
        &self,
        id: CellId,
        tile_x: i32,
        tile_y: i32,
        side: Side,
    ) -> Option<(CellId, bool)> {
        let Some(parent) = self.cells[id.index()].parent else {
            // Top-level cell: the abutting cell is the adjacent tile.
            let (nx, ny) = match side {
                Side::Top => (tile_x, tile_y - 1),
                Side::Left => (tile_x - 1, tile_y),
                Side::Bottom => (tile_x, tile_y + 1),
                Side::Right => (tile_x + 1, tile_y),
            };
            if nx < 0 || ny < 0 || nx >= self.width_in_cells || ny >= self.height_in_cells {
                return None;
            }
            return Some((self.top_level_id(nx, ny), true));
        };

        let children = self.cells[parent.index()]
            .children
            .expect("a parent cell is always subdivided");
        let quadrant = Quadrant::from_index(
            children
                .iter()
                .position(|&child| child == id)
                .expect("a cell is among its parent's children"),
        );
        let mirrored = quadrant.mirrored(side);

        if !quadrant.touches(side) {
            // The abutting cell is a sibling under the same parent.
            return Some((children[mirrored.index()], true));
        }

        let (found, same_level) = self.find_side_cell(parent, tile_x, tile_y, side)?;
        if !same_level {
            return Some((found, false));
        }
        match self.cells[found.index()].children {
            None => Some((found, false)),
            Some(found_children) => Some((found_children[mirrored.index()], true)),
        }
    }
}
