//! Error types for lazybrush-test

use lazybrush_core::Rect;
use thiserror::Error;

/// Errors raised by the test helpers
#[derive(Debug, Error)]
pub enum TestError {
    /// A labeling rect sticks out of the canvas
    #[error("labeled rect {rect:?} is not contained in the canvas {canvas:?}")]
    RectOutsideCanvas { rect: Rect, canvas: Rect },

    /// Two labeling rects cover the same pixel
    #[error("pixel ({x}, {y}) is covered by more than one labeled rect")]
    OverlappingRects { x: i32, y: i32 },

    /// A canvas pixel is not covered by any labeling rect
    #[error("pixel ({x}, {y}) is not covered by any labeled rect")]
    UncoveredPixel { x: i32, y: i32 },

    /// The canvas rect is invalid
    #[error("invalid canvas rect {canvas:?}")]
    InvalidCanvas { canvas: Rect },
}

/// Result type for test helpers
pub type TestResult<T> = Result<T, TestError>;
