//! Freehand selection masks
//!
//! A selection is painted into a [`MaskAccumulator`] (colored, partially
//! transparent, editable) and reduced on commit to a [`BinaryMask`]
//! (strictly black and white, immutable). [`MaskSession`] drives the
//! pointer-event state machine around the accumulator.

mod accumulator;
mod binary;
mod session;

pub use accumulator::MaskAccumulator;
pub use binary::{BinaryMask, commit_mask};
pub use session::{MaskSession, SessionState};

use crate::constants::DEFAULT_BRUSH_RADIUS;
use crate::layout::PixelSize;
use crate::types::{GeometryError, Result};

/// A point in pixel space
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Whether a stroke adds or removes coverage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum StrokeMode {
    /// Source-over in the highlight color
    #[default]
    Paint,
    /// Destination-out
    Erase,
}

/// One continuous pointer drag, in source-image pixels
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MaskStroke {
    pub path: Vec<Point>,
    #[cfg_attr(feature = "serde", serde(default = "default_brush_radius"))]
    pub brush_radius: f32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub mode: StrokeMode,
}

#[cfg(feature = "serde")]
fn default_brush_radius() -> f32 {
    DEFAULT_BRUSH_RADIUS
}

impl MaskStroke {
    pub fn new(path: Vec<Point>, brush_radius: f32, mode: StrokeMode) -> Self {
        Self {
            path,
            brush_radius,
            mode,
        }
    }

    /// A stroke with the default 30 px brush
    pub fn paint(path: Vec<Point>) -> Self {
        Self::new(path, DEFAULT_BRUSH_RADIUS, StrokeMode::Paint)
    }
}

/// Maps points on a scaled display of the image back to native pixels.
///
/// The scale is per axis, so a display that does not preserve the aspect
/// ratio still maps correctly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayMapping {
    scale_x: f32,
    scale_y: f32,
}

impl DisplayMapping {
    /// `native` is the image size in pixels, `display` its on-screen size
    pub fn new(native: PixelSize, display: PixelSize) -> Result<Self> {
        let valid = |v: f32| v.is_finite() && v > 0.0;
        if !(valid(native.width) && valid(native.height)) {
            return Err(
                GeometryError::InvalidArgument("native size must be positive".into()).into(),
            );
        }
        if !(valid(display.width) && valid(display.height)) {
            return Err(
                GeometryError::InvalidArgument("display size must be positive".into()).into(),
            );
        }
        Ok(Self {
            scale_x: native.width / display.width,
            scale_y: native.height / display.height,
        })
    }

    /// Display and native sizes are the same
    pub fn identity() -> Self {
        Self {
            scale_x: 1.0,
            scale_y: 1.0,
        }
    }

    /// Display point to native pixel point
    pub fn to_native(&self, point: Point) -> Point {
        Point::new(point.x * self.scale_x, point.y * self.scale_y)
    }
}

impl Default for DisplayMapping {
    fn default() -> Self {
        Self::identity()
    }
}
