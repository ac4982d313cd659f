//! Shared test fixtures

use lazybrush_core::{InputPoint, Intensity, Label, Point, Rect, Scribble};

/// An axis-aligned, filled rectangular scribble
///
/// The simplest useful [`Scribble`]: the bounding rect is tight, the
/// inside test is the rect's own containment test and the contour is the
/// rect's 1-pixel perimeter.
#[derive(Debug, Clone, Copy)]
pub struct RectScribble {
    rect: Rect,
    label: Label,
}

impl RectScribble {
    /// Create a filled rectangular scribble
    pub fn new(rect: Rect, label: Label) -> Self {
        Self { rect, label }
    }
}

impl Scribble for RectScribble {
    fn rect(&self) -> Rect {
        self.rect
    }

    fn label(&self) -> Label {
        self.label
    }

    fn contains_point(&self, p: Point) -> bool {
        self.rect.contains(p)
    }

    fn contour_points(&self) -> Vec<Point> {
        if !self.rect.is_valid() {
            return Vec::new();
        }
        let mut points = Vec::new();
        for x in self.rect.left..=self.rect.right {
            points.push(Point::new(x, self.rect.top));
        }
        if self.rect.bottom > self.rect.top {
            for x in self.rect.left..=self.rect.right {
                points.push(Point::new(x, self.rect.bottom));
            }
        }
        for y in (self.rect.top + 1)..self.rect.bottom {
            points.push(Point::new(self.rect.left, y));
            if self.rect.right > self.rect.left {
                points.push(Point::new(self.rect.right, y));
            }
        }
        points
    }
}

/// Input points forming a vertical line segment
pub fn vertical_line_points(x: i32, y0: i32, y1: i32, intensity: Intensity) -> Vec<InputPoint> {
    (y0..=y1)
        .map(|y| InputPoint::new(Point::new(x, y), intensity))
        .collect()
}

/// Input points forming a horizontal line segment
pub fn horizontal_line_points(y: i32, x0: i32, x1: i32, intensity: Intensity) -> Vec<InputPoint> {
    (x0..=x1)
        .map(|x| InputPoint::new(Point::new(x, y), intensity))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_scribble_contour_is_the_perimeter() {
        let rect = Rect::new(2, 2, 5, 4);
        let scribble = RectScribble::new(rect, Label::new(1).unwrap());
        let contour = scribble.contour_points();

        // 4x3 rect: perimeter of 4*2 + (3-2)*2 = 10 pixels, no duplicates.
        assert_eq!(contour.len(), 10);
        let mut unique = contour.clone();
        unique.sort_by_key(|p| (p.y, p.x));
        unique.dedup();
        assert_eq!(unique.len(), contour.len());

        for p in &contour {
            assert!(scribble.contains_point(*p));
        }
    }

    #[test]
    fn single_pixel_scribble() {
        let scribble = RectScribble::new(Rect::new(3, 3, 3, 3), Label::new(0).unwrap());
        assert_eq!(scribble.contour_points(), vec![Point::new(3, 3)]);
    }

    #[test]
    fn line_builders() {
        let v = vertical_line_points(8, 0, 15, 0);
        assert_eq!(v.len(), 16);
        assert_eq!(v[3].position, Point::new(8, 3));
        assert_eq!(v[3].intensity, 0);

        let h = horizontal_line_points(2, 1, 4, 128);
        assert_eq!(h.len(), 4);
        assert_eq!(h[0].position, Point::new(1, 2));
    }
}
