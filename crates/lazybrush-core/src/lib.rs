//! lazybrush-core - Shared types for the lazybrush colorization engine
//!
//! This crate provides the small vocabulary the other lazybrush crates
//! build on:
//!
//! - **Geometry** - integer [`Point`] and inclusive [`Rect`]
//! - **Labels** - [`Label`] with its reserved sentinels
//! - **Intensities** - 8-bit line-art intensities and [`InputPoint`]
//! - **Scribbles** - the [`Scribble`] capability trait
//!
//! # Examples
//!
//! ```
//! use lazybrush_core::{Label, Point, Rect};
//!
//! let canvas = Rect::from_origin_size(0, 0, 64, 64);
//! assert!(canvas.contains(Point::new(63, 63)));
//!
//! let label = Label::new(3).unwrap();
//! assert!(label.is_defined());
//! assert!(!Label::UNDEFINED.is_defined());
//! ```

pub mod error;
pub mod geometry;
pub mod scribble;
pub mod types;

pub use error::{Error, Result};
pub use geometry::{Point, Rect};
pub use scribble::Scribble;
pub use types::{InputPoint, Intensity, Label, INTENSITY_MAX, INTENSITY_MIN};
