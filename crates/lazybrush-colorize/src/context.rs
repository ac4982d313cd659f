//! Colorization context
//!
//! The context pairs two grids over the same canvas. The reference grid
//! records the line-art skeleton and never changes after construction;
//! it exists to restore "what the canvas looked like before any
//! scribbles" in O(affected area) instead of O(canvas). The working grid
//! is the one that gets refined along scribble outlines, labeled and
//! handed to the solver.
//!
//! Scribbles form an ordered list; on overlap the higher-indexed (more
//! recent) scribble wins. Every list mutation re-rasterizes only the
//! tiles its rect touches.

use lazybrush_core::Error as CoreError;
use lazybrush_core::{InputPoint, Intensity, Label, Point, Rect, Scribble, INTENSITY_MAX};
use lazybrush_partition::Grid;
use log::trace;

use crate::error::ColorizeResult;

/// Transient index value meaning "not assigned to a solver node"
pub(crate) const INDEX_UNDEFINED: i32 = -1;

/// Scribble index value meaning "no scribble claims this cell"
pub const SCRIBBLE_INDEX_UNDEFINED: i32 = -1;

/// Payload of reference-grid cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReferenceCellData {
    pub intensity: Intensity,
}

impl Default for ReferenceCellData {
    fn default() -> Self {
        Self {
            intensity: INTENSITY_MAX,
        }
    }
}

/// Payload of working-grid cells
#[derive(Debug, Clone, Copy)]
pub struct WorkingCellData {
    /// Dense solver index, valid only while a labeling run flattens the
    /// grid
    pub(crate) index: i32,
    /// Index of the scribble that set `preferred_label`, used for
    /// priority resolution during rasterization
    pub scribble_index: i32,
    /// Label of the most recent scribble whose interior contains this
    /// cell's center
    pub preferred_label: Label,
    pub intensity: Intensity,
}

impl Default for WorkingCellData {
    fn default() -> Self {
        Self {
            index: INDEX_UNDEFINED,
            scribble_index: SCRIBBLE_INDEX_UNDEFINED,
            preferred_label: Label::UNDEFINED,
            intensity: INTENSITY_MAX,
        }
    }
}

/// The state a labeling run consumes: canvas structure plus scribbles
///
/// All operations run to completion on the caller's thread; the context
/// must not be read concurrently with a mutation.
#[derive(Debug, Clone)]
pub struct ColorizationContext<S> {
    reference_grid: Grid<ReferenceCellData>,
    working_grid: Grid<WorkingCellData>,
    scribbles: Vec<S>,
}

impl<S> Default for ColorizationContext<S> {
    /// The null context: no canvas; every operation is a no-op and
    /// `colorize` returns an empty labeling
    fn default() -> Self {
        Self {
            reference_grid: Grid::default(),
            working_grid: Grid::default(),
            scribbles: Vec::new(),
        }
    }
}

impl<S: Scribble> ColorizationContext<S> {
    /// Build a context over a canvas
    ///
    /// Both grids cover `rect` (rounded up to whole cells of side
    /// `cell_size`) and get every input point inserted as a 1x1 leaf
    /// carrying its intensity. Points outside the canvas are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if `cell_size` is not a positive power of two or
    /// `rect` is invalid.
    pub fn new(rect: Rect, cell_size: i32, points: &[InputPoint]) -> ColorizeResult<Self> {
        let mut reference_grid: Grid<ReferenceCellData> = Grid::new(rect, cell_size)?;
        let mut working_grid: Grid<WorkingCellData> = Grid::new(rect, cell_size)?;

        for point in points {
            if let Some(id) = reference_grid.add_point(point.position) {
                reference_grid.data_mut(id).intensity = point.intensity;
            }
            if let Some(id) = working_grid.add_point(point.position) {
                working_grid.data_mut(id).intensity = point.intensity;
            }
        }

        Ok(Self {
            reference_grid,
            working_grid,
            scribbles: Vec::new(),
        })
    }

    /// True for the default-constructed context
    #[inline]
    pub fn is_null(&self) -> bool {
        self.working_grid.is_null()
    }

    /// The line-art skeleton grid (read-only after construction)
    #[inline]
    pub fn reference_grid(&self) -> &Grid<ReferenceCellData> {
        &self.reference_grid
    }

    /// The grid that carries scribble refinement and labels
    #[inline]
    pub fn working_grid(&self) -> &Grid<WorkingCellData> {
        &self.working_grid
    }

    #[inline]
    pub(crate) fn working_grid_mut(&mut self) -> &mut Grid<WorkingCellData> {
        &mut self.working_grid
    }

    /// The ordered scribble list
    #[inline]
    pub fn scribbles(&self) -> &[S] {
        &self.scribbles
    }

    /// Get a scribble by index
    ///
    /// # Errors
    ///
    /// Returns an error if `index` is out of bounds.
    pub fn scribble(&self, index: usize) -> ColorizeResult<&S> {
        if index >= self.scribbles.len() {
            return Err(CoreError::IndexOutOfBounds {
                index,
                len: self.scribbles.len(),
            }
            .into());
        }
        Ok(&self.scribbles[index])
    }

    /// Append a scribble at the end of the list (highest priority)
    pub fn append_scribble(&mut self, scribble: S) {
        if self.is_null() {
            return;
        }
        let rect = scribble.rect();
        self.scribbles.push(scribble);
        self.clear_and_add_scribbles_in(&rect);
    }

    /// Insert a scribble at `index`, shifting later scribbles up
    ///
    /// # Errors
    ///
    /// Returns an error if `index` is greater than the list length.
    pub fn insert_scribble(&mut self, index: usize, scribble: S) -> ColorizeResult<()> {
        if index > self.scribbles.len() {
            return Err(CoreError::IndexOutOfBounds {
                index,
                len: self.scribbles.len(),
            }
            .into());
        }
        if self.is_null() {
            return Ok(());
        }
        let rect = scribble.rect();
        self.scribbles.insert(index, scribble);
        self.clear_and_add_scribbles_in(&rect);
        Ok(())
    }

    /// Remove and return the scribble at `index`
    ///
    /// # Errors
    ///
    /// Returns an error if `index` is out of bounds.
    pub fn remove_scribble(&mut self, index: usize) -> ColorizeResult<S> {
        if index >= self.scribbles.len() {
            return Err(CoreError::IndexOutOfBounds {
                index,
                len: self.scribbles.len(),
            }
            .into());
        }
        let scribble = self.scribbles.remove(index);
        self.clear_and_add_scribbles_in(&scribble.rect());
        Ok(scribble)
    }

    /// Replace the scribble at `index`, returning the one it displaces
    ///
    /// Equivalent to a removal followed by an insertion: the affected
    /// area is the old scribble's rect plus the new one's.
    ///
    /// # Errors
    ///
    /// Returns an error if `index` is out of bounds.
    pub fn replace_scribble(&mut self, index: usize, scribble: S) -> ColorizeResult<S> {
        let old = self.remove_scribble(index)?;
        self.insert_scribble(index, scribble)?;
        Ok(old)
    }

    /// Refresh the working grid's leaf neighbor caches
    ///
    /// Only the top and left lists are filled; the pairwise relation is
    /// symmetric, so every adjacency is still enumerated exactly once.
    pub fn update_neighbors(&mut self) {
        if self.is_null() {
            return;
        }
        self.working_grid.update_neighbors(true);
    }

    /// Reset the working grid inside `rect` and re-apply the scribbles
    /// that touch it
    fn clear_and_add_scribbles_in(&mut self, rect: &Rect) {
        self.clear_working_grid(rect);
        self.add_scribbles_to_working_grid(rect);
    }

    /// Phase A: collapse the affected tiles and restore the line-art
    /// refinement from the reference grid
    fn clear_working_grid(&mut self, rect: &Rect) {
        self.working_grid.clear_rect(rect);

        let mut skeleton: Vec<(Point, Intensity)> = Vec::new();
        self.reference_grid.visit_leaves_in(rect, |id| {
            if self.reference_grid.is_unit(id) {
                skeleton.push((
                    self.reference_grid.rect_of(id).top_left(),
                    self.reference_grid.data(id).intensity,
                ));
            }
            true
        });

        for (position, intensity) in skeleton {
            if let Some(id) = self.working_grid.add_point(position) {
                self.working_grid.data_mut(id).intensity = intensity;
            }
        }
    }

    /// Phase B: walk the scribbles from most recent to oldest, refine
    /// along their outlines and stamp their labels
    ///
    /// Processing order plus the `scribble_index` guard makes the
    /// highest-indexed scribble win every overlapping cell.
    fn add_scribbles_to_working_grid(&mut self, rect: &Rect) {
        let Some(adjusted) = self.working_grid.adjusted_rect(rect) else {
            return;
        };

        for index in (0..self.scribbles.len()).rev() {
            let scribble = &self.scribbles[index];
            let priority = index as i32;

            if adjusted.intersect(&scribble.rect()).is_none() {
                continue;
            }

            // Split the partition down to 1x1 along the outline, so the
            // cut can hug the scribble edge. Cells already claimed by a
            // more recent scribble are left alone.
            let mut refined = 0usize;
            for point in scribble.contour_points() {
                if !adjusted.contains(point) {
                    continue;
                }
                let Some(leaf) = self.working_grid.leaf_cell_at(point) else {
                    continue;
                };
                if self.working_grid.data(leaf).scribble_index > priority {
                    continue;
                }
                if self.working_grid.add_point(point).is_some() {
                    refined += 1;
                }
            }
            trace!(
                "scribble {}: refined along {} contour points in {:?}",
                index,
                refined,
                adjusted
            );

            // Stamp the label on every leaf whose center the scribble
            // contains.
            let mut covered = Vec::new();
            self.working_grid.visit_leaves_in(&adjusted, |id| {
                if self.working_grid.data(id).scribble_index <= priority
                    && scribble.contains_point(self.working_grid.center_of(id))
                {
                    covered.push(id);
                }
                true
            });
            let label = scribble.label();
            for id in covered {
                let data = self.working_grid.data_mut(id);
                data.scribble_index = priority;
                data.preferred_label = label;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ColorizeError;
    use lazybrush_test::RectScribble;

    fn rect_scribble(left: i32, top: i32, right: i32, bottom: i32, label: i16) -> RectScribble {
        RectScribble::new(
            Rect::new(left, top, right, bottom),
            Label::new(label).unwrap(),
        )
    }

    fn context(points: &[InputPoint]) -> ColorizationContext<RectScribble> {
        ColorizationContext::new(Rect::from_origin_size(0, 0, 16, 16), 16, points).unwrap()
    }

    #[test]
    fn construction_inserts_skeleton_into_both_grids() {
        let points = [
            InputPoint::new(Point::new(3, 3), 0),
            InputPoint::new(Point::new(9, 12), 40),
            // Outside the canvas, silently dropped.
            InputPoint::new(Point::new(40, 3), 0),
        ];
        let ctx = context(&points);
        assert!(!ctx.is_null());

        for grid_intensity in [
            ctx.reference_grid()
                .leaf_cell_at(Point::new(3, 3))
                .map(|id| ctx.reference_grid().data(id).intensity),
            ctx.working_grid()
                .leaf_cell_at(Point::new(3, 3))
                .map(|id| ctx.working_grid().data(id).intensity),
        ] {
            assert_eq!(grid_intensity, Some(0));
        }

        let leaf = ctx.reference_grid().leaf_cell_at(Point::new(9, 12)).unwrap();
        assert!(ctx.reference_grid().is_unit(leaf));
        assert_eq!(ctx.reference_grid().data(leaf).intensity, 40);
    }

    #[test]
    fn append_stamps_preferred_labels() {
        let mut ctx = context(&[]);
        ctx.append_scribble(rect_scribble(2, 2, 5, 5, 1));

        for y in 2..=5 {
            for x in 2..=5 {
                let leaf = ctx.working_grid().leaf_cell_at(Point::new(x, y)).unwrap();
                assert_eq!(
                    ctx.working_grid().data(leaf).preferred_label,
                    Label::new(1).unwrap(),
                    "pixel ({}, {})",
                    x,
                    y
                );
            }
        }

        let outside = ctx.working_grid().leaf_cell_at(Point::new(10, 10)).unwrap();
        assert_eq!(
            ctx.working_grid().data(outside).preferred_label,
            Label::UNDEFINED
        );
    }

    #[test]
    fn scribble_outline_is_bounded_by_unit_leaves() {
        let mut ctx = context(&[]);
        ctx.append_scribble(rect_scribble(4, 4, 11, 11, 2));

        for x in 4..=11 {
            let top = ctx.working_grid().leaf_cell_at(Point::new(x, 4)).unwrap();
            assert!(ctx.working_grid().is_unit(top));
            let bottom = ctx.working_grid().leaf_cell_at(Point::new(x, 11)).unwrap();
            assert!(ctx.working_grid().is_unit(bottom));
        }
    }

    #[test]
    fn later_scribble_wins_overlap() {
        let mut ctx = context(&[]);
        ctx.append_scribble(rect_scribble(0, 0, 7, 7, 1));
        ctx.append_scribble(rect_scribble(4, 4, 11, 11, 2));

        let shared = ctx.working_grid().leaf_cell_at(Point::new(5, 5)).unwrap();
        assert_eq!(
            ctx.working_grid().data(shared).preferred_label,
            Label::new(2).unwrap()
        );
        let only_first = ctx.working_grid().leaf_cell_at(Point::new(2, 2)).unwrap();
        assert_eq!(
            ctx.working_grid().data(only_first).preferred_label,
            Label::new(1).unwrap()
        );
    }

    #[test]
    fn remove_restores_the_older_scribble() {
        let mut ctx = context(&[]);
        ctx.append_scribble(rect_scribble(0, 0, 7, 7, 1));
        ctx.append_scribble(rect_scribble(4, 4, 11, 11, 2));
        let removed = ctx.remove_scribble(1).unwrap();
        assert_eq!(removed.rect(), Rect::new(4, 4, 11, 11));

        let shared = ctx.working_grid().leaf_cell_at(Point::new(5, 5)).unwrap();
        assert_eq!(
            ctx.working_grid().data(shared).preferred_label,
            Label::new(1).unwrap()
        );
        let freed = ctx.working_grid().leaf_cell_at(Point::new(10, 10)).unwrap();
        assert_eq!(
            ctx.working_grid().data(freed).preferred_label,
            Label::UNDEFINED
        );
    }

    #[test]
    fn mutation_preserves_the_skeleton() {
        let points = [InputPoint::new(Point::new(6, 6), 0)];
        let mut ctx = context(&points);

        ctx.append_scribble(rect_scribble(2, 2, 9, 9, 1));
        ctx.remove_scribble(0).unwrap();

        let leaf = ctx.working_grid().leaf_cell_at(Point::new(6, 6)).unwrap();
        assert!(ctx.working_grid().is_unit(leaf));
        assert_eq!(ctx.working_grid().data(leaf).intensity, 0);
        assert_eq!(
            ctx.working_grid().data(leaf).preferred_label,
            Label::UNDEFINED
        );
    }

    #[test]
    fn replace_moves_the_labeled_region() {
        let mut ctx = context(&[]);
        ctx.append_scribble(rect_scribble(0, 0, 3, 3, 1));
        let displaced = ctx.replace_scribble(0, rect_scribble(8, 8, 11, 11, 1)).unwrap();
        assert_eq!(displaced.rect(), Rect::new(0, 0, 3, 3));

        let old = ctx.working_grid().leaf_cell_at(Point::new(1, 1)).unwrap();
        assert_eq!(ctx.working_grid().data(old).preferred_label, Label::UNDEFINED);
        let new = ctx.working_grid().leaf_cell_at(Point::new(9, 9)).unwrap();
        assert_eq!(
            ctx.working_grid().data(new).preferred_label,
            Label::new(1).unwrap()
        );
    }

    #[test]
    fn null_context_ignores_mutations() {
        let mut ctx: ColorizationContext<RectScribble> = ColorizationContext::default();
        assert!(ctx.is_null());
        ctx.append_scribble(rect_scribble(0, 0, 3, 3, 1));
        assert!(ctx.insert_scribble(0, rect_scribble(0, 0, 3, 3, 1)).is_ok());
        assert!(ctx.scribbles().is_empty());
    }

    #[test]
    fn out_of_range_indices_are_rejected() {
        let mut ctx = context(&[]);
        ctx.append_scribble(rect_scribble(0, 0, 3, 3, 1));

        assert!(ctx.scribble(0).is_ok());
        assert!(matches!(
            ctx.scribble(1),
            Err(ColorizeError::Core(CoreError::IndexOutOfBounds { index: 1, len: 1 }))
        ));
        assert!(ctx.remove_scribble(3).is_err());
        assert!(ctx.insert_scribble(2, rect_scribble(4, 4, 5, 5, 2)).is_err());
        assert!(ctx.replace_scribble(1, rect_scribble(4, 4, 5, 5, 2)).is_err());

        // Failed mutations leave the list untouched.
        assert_eq!(ctx.scribbles().len(), 1);
    }
}
