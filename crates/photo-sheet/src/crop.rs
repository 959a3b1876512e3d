//! Rectangular crop extraction

use image::RgbaImage;
use image::imageops;

use crate::codec;
use crate::constants::{EDIT_JPEG_QUALITY, MAX_DIMENSION};
use crate::resample::bound_resize;
use crate::types::{GeometryError, Result};

/// A crop rectangle in source pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Whether the rectangle lies entirely inside a `width x height` image
    pub fn fits_within(&self, width: u32, height: u32) -> bool {
        self.x as u64 + self.width as u64 <= width as u64
            && self.y as u64 + self.height as u64 <= height as u64
    }

    /// Intersect with a `width x height` image.
    ///
    /// The result may be empty when the rectangle lies wholly outside.
    pub fn clamp_to(&self, width: u32, height: u32) -> PixelRect {
        let x = self.x.min(width);
        let y = self.y.min(height);
        let right = (self.x as u64 + self.width as u64).min(width as u64) as u32;
        let bottom = (self.y as u64 + self.height as u64).min(height as u64) as u32;
        PixelRect {
            x,
            y,
            width: right.saturating_sub(x),
            height: bottom.saturating_sub(y),
        }
    }

    fn validate(&self, image_width: u32, image_height: u32) -> Result<()> {
        if self.is_empty() {
            return Err(GeometryError::EmptyRect.into());
        }
        if !self.fits_within(image_width, image_height) {
            return Err(GeometryError::RectOutOfBounds {
                x: self.x,
                y: self.y,
                width: self.width,
                height: self.height,
                image_width,
                image_height,
            }
            .into());
        }
        Ok(())
    }
}

/// Copy `rect` out of `image`, downscaled to fit `max_dimension`.
///
/// Rectangles that are empty or reach past the image edges are rejected;
/// use [`PixelRect::clamp_to`] first to crop whatever part overlaps.
pub fn extract_crop(image: &RgbaImage, rect: PixelRect, max_dimension: u32) -> Result<RgbaImage> {
    rect.validate(image.width(), image.height())?;
    let cropped = imageops::crop_imm(image, rect.x, rect.y, rect.width, rect.height).to_image();
    let out = bound_resize(&cropped, max_dimension);
    log::debug!(
        "cropped {}x{} at ({}, {}) -> {}x{}",
        rect.width,
        rect.height,
        rect.x,
        rect.y,
        out.width(),
        out.height()
    );
    Ok(out)
}

/// Crop at the default bound and encode as JPEG
pub fn render_crop(image: &RgbaImage, rect: PixelRect) -> Result<Vec<u8>> {
    let cropped = extract_crop(image, rect, MAX_DIMENSION)?;
    codec::encode_jpeg(&cropped, EDIT_JPEG_QUALITY)
}
