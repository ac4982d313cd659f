//! Labels, intensities and input points

use crate::error::{Error, Result};
use crate::geometry::Point;

/// Pixel intensity: 0 is a line pixel, 255 is blank canvas
pub type Intensity = u8;

/// Darkest intensity (a line pixel)
pub const INTENSITY_MIN: Intensity = 0;

/// Lightest intensity (blank canvas); untouched cells keep this value
pub const INTENSITY_MAX: Intensity = 255;

/// A region label
///
/// Non-negative values are user label ids. Two negative sentinels are
/// reserved: [`Label::UNDEFINED`] for cells no scribble claims and
/// [`Label::IMPLICIT_SURROUNDING`] for the area outside every labeled
/// region when the implicit surrounding option is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Label(i16);

impl Label {
    /// No label assigned
    pub const UNDEFINED: Label = Label(-1);

    /// The implicit label of the area surrounding all scribbled regions
    pub const IMPLICIT_SURROUNDING: Label = Label(-2);

    /// Create a user label
    ///
    /// # Errors
    ///
    /// Returns an error if the id is negative; negative ids are reserved.
    pub fn new(id: i16) -> Result<Self> {
        if id < 0 {
            return Err(Error::InvalidLabel(id));
        }
        Ok(Self(id))
    }

    /// True for user labels, false for both sentinels
    #[inline]
    pub const fn is_defined(self) -> bool {
        self.0 >= 0
    }

    /// The raw label id (negative for sentinels)
    #[inline]
    pub const fn id(self) -> i16 {
        self.0
    }
}

/// One input point of the line-art skeleton
///
/// Callers preprocess a raster into a set of dark pixels and pass those
/// with intensity 0; other intensities are allowed and bias the
/// smoothness term proportionally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputPoint {
    pub position: Point,
    pub intensity: Intensity,
}

impl InputPoint {
    /// Create an input point
    #[inline]
    pub const fn new(position: Point, intensity: Intensity) -> Self {
        Self {
            position,
            intensity,
        }
    }
}
