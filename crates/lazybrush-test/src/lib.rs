//! lazybrush-test - Regression test framework for the lazybrush workspace
//!
//! This crate provides a small regression harness and shared fixtures:
//!
//! - [`RegParams`] - named checks with failure accumulation and an
//!   environment-selected mode
//! - [`rasterize_labeling`] - expand `(rect, label)` output into a
//!   per-pixel label raster, verifying exact tiling on the way
//! - [`RectScribble`] and line-of-points builders for driving the engine
//!
//! # Usage
//!
//! ```
//! use lazybrush_test::RegParams;
//!
//! let mut rp = RegParams::new("example");
//! rp.compare_values(4.0, 2.0 + 2.0, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: set to "display" to report without failing

mod error;
mod fixtures;
mod params;

pub use error::{TestError, TestResult};
pub use fixtures::{horizontal_line_points, vertical_line_points, RectScribble};
pub use params::{RegParams, RegTestMode};

use lazybrush_core::{Label, Rect};

/// Expand a `(rect, label)` labeling into a row-major per-pixel raster
///
/// Fails if the rects do not tile the canvas exactly: every pixel must be
/// covered by exactly one rect and no rect may stick out of the canvas.
///
/// # Errors
///
/// Returns an error describing the first tiling violation found.
pub fn rasterize_labeling(canvas: &Rect, regions: &[(Rect, Label)]) -> TestResult<Vec<Label>> {
    if !canvas.is_valid() {
        return Err(TestError::InvalidCanvas { canvas: *canvas });
    }

    let width = canvas.width() as usize;
    let height = canvas.height() as usize;
    let mut raster: Vec<Option<Label>> = vec![None; width * height];

    for (rect, label) in regions {
        if !canvas.contains_rect(rect) {
            return Err(TestError::RectOutsideCanvas {
                rect: *rect,
                canvas: *canvas,
            });
        }
        for y in rect.top..=rect.bottom {
            for x in rect.left..=rect.right {
                let offset =
                    (y - canvas.top) as usize * width + (x - canvas.left) as usize;
                if raster[offset].is_some() {
                    return Err(TestError::OverlappingRects { x, y });
                }
                raster[offset] = Some(*label);
            }
        }
    }

    let mut out = Vec::with_capacity(raster.len());
    for (offset, label) in raster.into_iter().enumerate() {
        match label {
            Some(label) => out.push(label),
            None => {
                return Err(TestError::UncoveredPixel {
                    x: canvas.left + (offset % width) as i32,
                    y: canvas.top + (offset / width) as i32,
                })
            }
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rasterize_exact_tiling() {
        let canvas = Rect::new(0, 0, 1, 1);
        let a = Label::new(1).unwrap();
        let b = Label::new(2).unwrap();
        let regions = vec![
            (Rect::new(0, 0, 0, 1), a),
            (Rect::new(1, 0, 1, 1), b),
        ];
        let raster = rasterize_labeling(&canvas, &regions).unwrap();
        assert_eq!(raster, vec![a, b, a, b]);
    }

    #[test]
    fn rasterize_detects_gap() {
        let canvas = Rect::new(0, 0, 1, 0);
        let regions = vec![(Rect::new(0, 0, 0, 0), Label::new(1).unwrap())];
        assert!(matches!(
            rasterize_labeling(&canvas, &regions),
            Err(TestError::UncoveredPixel { x: 1, y: 0 })
        ));
    }

    #[test]
    fn rasterize_detects_overlap() {
        let canvas = Rect::new(0, 0, 1, 0);
        let regions = vec![
            (Rect::new(0, 0, 1, 0), Label::new(1).unwrap()),
            (Rect::new(1, 0, 1, 0), Label::new(2).unwrap()),
        ];
        assert!(matches!(
            rasterize_labeling(&canvas, &regions),
            Err(TestError::OverlappingRects { x: 1, y: 0 })
        ));
    }

    #[test]
    fn rasterize_detects_escape() {
        let canvas = Rect::new(0, 0, 1, 0);
        let regions = vec![(Rect::new(0, 0, 2, 0), Label::new(1).unwrap())];
        assert!(matches!(
            rasterize_labeling(&canvas, &regions),
            Err(TestError::RectOutsideCanvas { .. })
        ));
    }
}
