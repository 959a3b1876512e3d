//! Pixel adjustment pipeline
//!
//! Stages run in a fixed order on a fresh copy of the source:
//! 1. Bound resize to [`MAX_DIMENSION`]
//! 2. One combined color transform (brightness, contrast, named filter)
//! 3. Cross-kernel sharpening when `sharpness > 0`

mod color;
mod sharpen;

pub use color::ColorMatrix;
pub use sharpen::sharpen;

use std::fmt;
use std::str::FromStr;

use image::RgbaImage;

use crate::codec;
use crate::constants::{EDIT_JPEG_QUALITY, MAX_DIMENSION};
use crate::resample::bound_resize;
use crate::types::{GeometryError, Result, SheetError};

/// Upper bound for brightness, contrast and sharpness percentages
pub const MAX_PERCENT: f32 = 200.0;

/// Named color filter applied after brightness and contrast
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum FilterKind {
    #[default]
    None,
    Grayscale,
    Sepia,
    Invert,
    /// sepia(30%) contrast(110%) brightness(110%) saturate(130%)
    Vintage,
}

impl FilterKind {
    pub const ALL: [FilterKind; 5] = [
        FilterKind::None,
        FilterKind::Grayscale,
        FilterKind::Sepia,
        FilterKind::Invert,
        FilterKind::Vintage,
    ];

    pub fn id(self) -> &'static str {
        match self {
            FilterKind::None => "none",
            FilterKind::Grayscale => "grayscale",
            FilterKind::Sepia => "sepia",
            FilterKind::Invert => "invert",
            FilterKind::Vintage => "vintage",
        }
    }

    pub fn matrix(self) -> ColorMatrix {
        match self {
            FilterKind::None => ColorMatrix::IDENTITY,
            FilterKind::Grayscale => ColorMatrix::grayscale(1.0),
            FilterKind::Sepia => ColorMatrix::sepia(1.0),
            FilterKind::Invert => ColorMatrix::invert(1.0),
            FilterKind::Vintage => ColorMatrix::sepia(0.3)
                .then(ColorMatrix::contrast(1.1))
                .then(ColorMatrix::brightness(1.1))
                .then(ColorMatrix::saturate(1.3)),
        }
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for FilterKind {
    type Err = SheetError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        FilterKind::ALL
            .into_iter()
            .find(|f| f.id().eq_ignore_ascii_case(s))
            .ok_or_else(|| SheetError::Config(format!("Unknown filter: {}", s)))
    }
}

/// Requested adjustments, all in percent
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AdjustmentSpec {
    /// `0..=200`, 100 is neutral
    pub brightness: f32,
    /// `0..=200`, 100 is neutral
    pub contrast: f32,
    /// `0..=200`, 0 disables sharpening
    pub sharpness: f32,
    pub filter: FilterKind,
}

impl Default for AdjustmentSpec {
    fn default() -> Self {
        Self::identity()
    }
}

impl AdjustmentSpec {
    /// Leaves every pixel as it was
    pub const fn identity() -> Self {
        Self {
            brightness: 100.0,
            contrast: 100.0,
            sharpness: 0.0,
            filter: FilterKind::None,
        }
    }

    pub fn validate(&self) -> Result<()> {
        check_percent("brightness", self.brightness)?;
        check_percent("contrast", self.contrast)?;
        check_percent("sharpness", self.sharpness)?;
        Ok(())
    }

    /// Brightness, contrast and filter folded into one matrix
    pub fn color_matrix(&self) -> ColorMatrix {
        ColorMatrix::brightness(self.brightness / 100.0)
            .then(ColorMatrix::contrast(self.contrast / 100.0))
            .then(self.filter.matrix())
    }
}

fn check_percent(name: &str, value: f32) -> Result<()> {
    if !value.is_finite() || !(0.0..=MAX_PERCENT).contains(&value) {
        return Err(GeometryError::InvalidArgument(format!(
            "{} must be within 0..={}, got {}",
            name, MAX_PERCENT, value
        ))
        .into());
    }
    Ok(())
}

/// Run the adjustment pipeline, returning a new raster.
///
/// The result is bounded to [`MAX_DIMENSION`] on its longest edge. The
/// identity spec returns the (bounded) source unchanged.
pub fn apply_adjustments(image: &RgbaImage, spec: &AdjustmentSpec) -> Result<RgbaImage> {
    spec.validate()?;

    let mut out = bound_resize(image, MAX_DIMENSION);
    spec.color_matrix().apply(&mut out);
    if spec.sharpness > 0.0 {
        sharpen(&mut out, spec.sharpness / 100.0);
    }

    log::debug!(
        "adjusted {}x{}: brightness {}%, contrast {}%, sharpness {}, filter {}",
        out.width(),
        out.height(),
        spec.brightness,
        spec.contrast,
        spec.sharpness,
        spec.filter
    );
    Ok(out)
}

/// Adjust and encode as JPEG at the default edit quality
pub fn render_adjusted(image: &RgbaImage, spec: &AdjustmentSpec) -> Result<Vec<u8>> {
    render_adjusted_with_quality(image, spec, EDIT_JPEG_QUALITY)
}

/// Adjust and encode as JPEG at `quality`
pub fn render_adjusted_with_quality(
    image: &RgbaImage,
    spec: &AdjustmentSpec,
    quality: f32,
) -> Result<Vec<u8>> {
    let adjusted = apply_adjustments(image, spec)?;
    codec::encode_jpeg(&adjusted, quality)
}
