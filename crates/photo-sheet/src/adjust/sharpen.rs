//! 3x3 cross-kernel sharpening
//!
//! ```text
//!  0  -s   0
//! -s 1+4s -s
//!  0  -s   0
//! ```
//!
//! Neighbours outside the image repeat the edge pixel. Reads come from a
//! snapshot so already-sharpened pixels never feed back into the kernel.

use image::RgbaImage;

#[inline]
fn sample_clamped(img: &RgbaImage, x: i64, y: i64, channel: usize) -> f32 {
    let cx = x.clamp(0, img.width() as i64 - 1) as u32;
    let cy = y.clamp(0, img.height() as i64 - 1) as u32;
    img.get_pixel(cx, cy)[channel] as f32
}

/// Sharpen the RGB channels of `image` in place with weight `s`.
///
/// Alpha is left as-is. Results are rounded and clamped to `0..=255`.
pub fn sharpen(image: &mut RgbaImage, s: f32) {
    if s <= 0.0 || image.width() == 0 || image.height() == 0 {
        return;
    }
    let snapshot = image.clone();
    let center_weight = 1.0 + 4.0 * s;

    for (x, y, pixel) in image.enumerate_pixels_mut() {
        let (x, y) = (x as i64, y as i64);
        for channel in 0..3 {
            let neighbours = sample_clamped(&snapshot, x, y - 1, channel)
                + sample_clamped(&snapshot, x, y + 1, channel)
                + sample_clamped(&snapshot, x - 1, y, channel)
                + sample_clamped(&snapshot, x + 1, y, channel);
            let value = sample_clamped(&snapshot, x, y, channel) * center_weight - s * neighbours;
            pixel[channel] = value.round().clamp(0.0, 255.0) as u8;
        }
    }
}
