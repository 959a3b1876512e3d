//! Intensity blend between a source and a generated result

use image::RgbaImage;

use crate::resample::resize_exact;
use crate::surface::{Surface, blend_over};
use crate::types::{GeometryError, Result};

/// Blend `generated` over `source` at `intensity` percent.
///
/// 0 returns a copy of the source and 100 a copy of the generated image
/// stretched to the source size. In between, the stretched generated image
/// is drawn over the source with opacity `intensity / 100`.
pub fn blend_result(source: &RgbaImage, generated: &RgbaImage, intensity: u8) -> Result<RgbaImage> {
    if intensity > 100 {
        return Err(GeometryError::InvalidArgument(format!(
            "intensity must be within 0..=100, got {}",
            intensity
        ))
        .into());
    }
    let (width, height) = source.dimensions();
    if intensity == 0 {
        return Ok(source.clone());
    }
    let stretched = resize_exact(generated, width, height);
    if intensity == 100 {
        return Ok(stretched);
    }

    let opacity = intensity as f32 / 100.0;
    let mut surface = Surface::from_image(source.clone())?;
    for (x, y, pixel) in surface.image_mut().enumerate_pixels_mut() {
        *pixel = blend_over(pixel, stretched.get_pixel(x, y), opacity);
    }
    log::debug!("blended at {}% over {}x{}", intensity, width, height);
    Ok(surface.into_image())
}
