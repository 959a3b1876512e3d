//! Raster resizing helpers shared by the edit paths

use image::RgbaImage;
use image::imageops::{self, FilterType};

/// Dimensions after the longest-edge bound is applied.
///
/// Images already within `max_dimension` on both axes keep their size;
/// larger ones are scaled by `min(max / w, max / h)` and floored, never
/// below one pixel.
pub fn bound_dimensions(width: u32, height: u32, max_dimension: u32) -> (u32, u32) {
    if width <= max_dimension && height <= max_dimension {
        return (width, height);
    }
    // min(max / w, max / h) is max / longest; integer division floors
    let longest = width.max(height) as u64;
    let max = max_dimension as u64;
    let w = (width as u64 * max / longest).max(1) as u32;
    let h = (height as u64 * max / longest).max(1) as u32;
    (w, h)
}

/// Downscale `image` to fit the longest-edge bound, always returning a
/// fresh buffer.
pub fn bound_resize(image: &RgbaImage, max_dimension: u32) -> RgbaImage {
    let (width, height) = image.dimensions();
    let (w, h) = bound_dimensions(width, height, max_dimension);
    if (w, h) == (width, height) {
        return image.clone();
    }
    log::debug!("bound resize {}x{} -> {}x{}", width, height, w, h);
    resize_exact(image, w, h)
}

/// Resample to exactly `width x height`
pub fn resize_exact(image: &RgbaImage, width: u32, height: u32) -> RgbaImage {
    if image.dimensions() == (width, height) {
        return image.clone();
    }
    imageops::resize(image, width, height, FilterType::Triangle)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bound_dimensions() {
        assert_eq!(bound_dimensions(640, 480, 800), (640, 480));
        assert_eq!(bound_dimensions(800, 800, 800), (800, 800));
        assert_eq!(bound_dimensions(1600, 1200, 800), (800, 600));
        assert_eq!(bound_dimensions(1000, 3000, 800), (266, 800));
        assert_eq!(bound_dimensions(5000, 1, 800), (800, 1));
    }

    #[test]
    fn test_bound_resize_copies_small_images() {
        let img = RgbaImage::new(10, 20);
        let out = bound_resize(&img, 800);
        assert_eq!(out.dimensions(), (10, 20));
    }
}
