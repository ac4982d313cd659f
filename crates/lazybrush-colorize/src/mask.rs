//! Mask-backed scribbles
//!
//! A [`MaskScribble`] is painted the way an interactive brush paints:
//! round dabs stamped along strokes into an 8-bit coverage mask that
//! grows to fit. The contour is extracted from the mask on demand and
//! cached until the next stroke.

use std::cell::RefCell;

use lazybrush_core::{Label, Point, Rect, Scribble};

/// A filled region painted with a round brush
///
/// Build strokes with [`move_to`](MaskScribble::move_to) /
/// [`line_to`](MaskScribble::line_to); the radius is interpolated along
/// each stroke. The bounding rect is the mask extent and is invalid
/// until something has been painted.
#[derive(Debug, Clone)]
pub struct MaskScribble {
    label: Label,
    mask: Vec<u8>,
    mask_rect: Rect,
    position: Point,
    radius: i32,
    contour_cache: RefCell<Option<Vec<Point>>>,
}

impl MaskScribble {
    /// Create an empty scribble carrying `label`
    pub fn new(label: Label) -> Self {
        Self {
            label,
            mask: Vec::new(),
            mask_rect: Rect::default(),
            position: Point::new(0, 0),
            radius: 0,
            contour_cache: RefCell::new(None),
        }
    }

    /// Lift the brush and place it at `point`
    pub fn move_to(&mut self, point: Point, radius: i32) {
        self.position = point;
        self.radius = radius.max(0);
    }

    /// Paint a stroke from the current position to `point`
    ///
    /// Dabs are stamped at unit spacing with the radius interpolated
    /// linearly from the current radius to `radius`. The brush ends up
    /// at `point`.
    pub fn line_to(&mut self, point: Point, radius: i32) {
        let radius = radius.max(0);
        self.grow_to_contain(point, radius);

        let dx = (point.x - self.position.x) as f64;
        let dy = (point.y - self.position.y) as f64;
        let dradius = (radius - self.radius) as f64;
        let dist = (dx * dx + dy * dy).sqrt();

        if dist > 0.0 {
            let inc = 1.0 / dist;
            let mut x = self.position.x as f64;
            let mut y = self.position.y as f64;
            let mut r = self.radius as f64;
            let mut t = 0.0;
            while t < 1.0 {
                self.stamp_dab(
                    Point::new(x.round() as i32, y.round() as i32),
                    r.round() as i32,
                );
                t += inc;
                x += dx * inc;
                y += dy * inc;
                r += dradius * inc;
            }
        }
        self.stamp_dab(point, radius);

        self.move_to(point, radius);
        self.contour_cache.replace(None);
    }

    /// Paint a single dab at `point`
    pub fn dab_at(&mut self, point: Point, radius: i32) {
        self.move_to(point, radius);
        self.line_to(point, radius);
    }

    fn grow_to_contain(&mut self, point: Point, radius: i32) {
        let start = dab_rect(self.position, self.radius);
        let end = dab_rect(point, radius);
        // One blank pixel of margin absorbs rounding while stamping.
        let needed = start
            .united(&end)
            .adjusted(-1, -1, 1, 1)
            .united(&self.mask_rect);
        if needed == self.mask_rect {
            return;
        }

        let width = needed.width() as usize;
        let mut mask = vec![0u8; width * needed.height() as usize];
        if self.mask_rect.is_valid() {
            let old_width = self.mask_rect.width() as usize;
            let offset_x = (self.mask_rect.left - needed.left) as usize;
            let offset_y = (self.mask_rect.top - needed.top) as usize;
            for row in 0..self.mask_rect.height() as usize {
                let src = &self.mask[row * old_width..(row + 1) * old_width];
                let dst_start = (offset_y + row) * width + offset_x;
                mask[dst_start..dst_start + old_width].copy_from_slice(src);
            }
        }
        self.mask = mask;
        self.mask_rect = needed;
    }

    fn stamp_dab(&mut self, center: Point, radius: i32) {
        // Pixels within the disc of diameter 2r + 1.
        let threshold = radius * radius + radius;
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                if dx * dx + dy * dy > threshold {
                    continue;
                }
                if let Some(offset) = self.offset_of(Point::new(center.x + dx, center.y + dy)) {
                    self.mask[offset] = 255;
                }
            }
        }
    }

    fn offset_of(&self, p: Point) -> Option<usize> {
        if !self.mask_rect.contains(p) {
            return None;
        }
        let x = (p.x - self.mask_rect.left) as usize;
        let y = (p.y - self.mask_rect.top) as usize;
        Some(y * self.mask_rect.width() as usize + x)
    }

    fn compute_contour(&self) -> Vec<Point> {
        let mut points = Vec::new();
        if !self.mask_rect.is_valid() {
            return points;
        }
        let w = self.mask_rect.width();
        let h = self.mask_rect.height();
        let at = |x: i32, y: i32| -> u8 {
            if x < 0 || y < 0 || x >= w || y >= h {
                0
            } else {
                self.mask[(y * w + x) as usize]
            }
        };
        for y in 0..h {
            for x in 0..w {
                if at(x, y) == 0 {
                    continue;
                }
                let on_edge = at(x - 1, y - 1) == 0
                    || at(x, y - 1) == 0
                    || at(x + 1, y - 1) == 0
                    || at(x - 1, y) == 0
                    || at(x + 1, y) == 0
                    || at(x - 1, y + 1) == 0
                    || at(x, y + 1) == 0
                    || at(x + 1, y + 1) == 0;
                if on_edge {
                    points.push(Point::new(
                        x + self.mask_rect.left,
                        y + self.mask_rect.top,
                    ));
                }
            }
        }
        points
    }
}

impl Scribble for MaskScribble {
    fn rect(&self) -> Rect {
        self.mask_rect
    }

    fn label(&self) -> Label {
        self.label
    }

    fn contains_point(&self, p: Point) -> bool {
        match self.offset_of(p) {
            Some(offset) => self.mask[offset] != 0,
            None => false,
        }
    }

    fn contour_points(&self) -> Vec<Point> {
        self.contour_cache
            .borrow_mut()
            .get_or_insert_with(|| self.compute_contour())
            .clone()
    }
}

fn dab_rect(center: Point, radius: i32) -> Rect {
    Rect::from_origin_size(
        center.x - radius,
        center.y - radius,
        2 * radius + 1,
        2 * radius + 1,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn label(id: i16) -> Label {
        Label::new(id).unwrap()
    }

    #[test]
    fn empty_scribble_contains_nothing() {
        let scribble = MaskScribble::new(label(1));
        assert!(!scribble.rect().is_valid());
        assert!(!scribble.contains_point(Point::new(0, 0)));
        assert!(scribble.contour_points().is_empty());
    }

    #[test]
    fn dab_covers_a_disc() {
        let mut scribble = MaskScribble::new(label(1));
        scribble.dab_at(Point::new(10, 10), 3);

        assert!(scribble.contains_point(Point::new(10, 10)));
        assert!(scribble.contains_point(Point::new(13, 10)));
        assert!(scribble.contains_point(Point::new(10, 7)));
        // Corner of the bounding square stays outside the disc.
        assert!(!scribble.contains_point(Point::new(13, 7)));
        // The rect bounds the painted area.
        assert!(scribble.rect().contains(Point::new(13, 13)));
    }

    #[test]
    fn stroke_paints_a_connected_band() {
        let mut scribble = MaskScribble::new(label(2));
        scribble.move_to(Point::new(0, 0), 2);
        scribble.line_to(Point::new(12, 0), 2);

        for x in 0..=12 {
            assert!(scribble.contains_point(Point::new(x, 0)), "x = {}", x);
            assert!(scribble.contains_point(Point::new(x, 2)), "x = {}", x);
        }
        assert!(!scribble.contains_point(Point::new(6, 4)));
    }

    #[test]
    fn contour_points_sit_on_the_boundary() {
        let mut scribble = MaskScribble::new(label(1));
        scribble.dab_at(Point::new(8, 8), 4);

        let contour = scribble.contour_points();
        assert!(!contour.is_empty());
        for p in &contour {
            assert!(scribble.contains_point(*p));
            let has_outside_neighbor = (-1..=1).any(|dy| {
                (-1..=1).any(|dx| {
                    !(dx == 0 && dy == 0)
                        && !scribble.contains_point(Point::new(p.x + dx, p.y + dy))
                })
            });
            assert!(has_outside_neighbor, "{:?} is interior", p);
        }
        // The dab center is interior, not contour.
        assert!(!contour.contains(&Point::new(8, 8)));
    }

    #[test]
    fn contour_cache_invalidates_on_painting() {
        let mut scribble = MaskScribble::new(label(1));
        scribble.dab_at(Point::new(4, 4), 2);
        let before = scribble.contour_points();

        scribble.move_to(Point::new(20, 4), 2);
        scribble.line_to(Point::new(24, 4), 2);
        let after = scribble.contour_points();

        assert_ne!(before, after);
        // Painting elsewhere must not erase the earlier dab.
        assert!(scribble.contains_point(Point::new(4, 4)));
    }

    #[test]
    fn radius_interpolates_along_the_stroke() {
        let mut scribble = MaskScribble::new(label(3));
        scribble.move_to(Point::new(0, 10), 1);
        scribble.line_to(Point::new(20, 10), 5);

        // Near the start the band is narrow, near the end it is wide.
        assert!(!scribble.contains_point(Point::new(0, 14)));
        assert!(scribble.contains_point(Point::new(20, 14)));
    }
}
