//! Scoped raster drawing surfaces
//!
//! Every operation that produces a new raster acquires it through
//! [`Surface::new`], which refuses empty or oversized areas and reports a
//! failed allocation as [`SheetError::CanvasUnavailable`] instead of aborting.
//! The surface is owned by the calling operation and released when it returns.

use image::{Rgba, RgbaImage};

use crate::constants::MAX_SURFACE_PIXELS;
use crate::layout::PixelBounds;
use crate::types::{Result, SheetError};

/// An owned RGBA drawing target
#[derive(Debug, Clone)]
pub struct Surface {
    image: RgbaImage,
}

impl Surface {
    /// Allocate a `width x height` surface filled with `fill`.
    pub fn new(width: u32, height: u32, fill: Rgba<u8>) -> Result<Self> {
        let unavailable = SheetError::CanvasUnavailable { width, height };
        let area = width as u64 * height as u64;
        if area == 0 || area > MAX_SURFACE_PIXELS {
            log::warn!("refusing {}x{} surface ({} px)", width, height, area);
            return Err(unavailable);
        }

        let len = area as usize * 4;
        let mut data: Vec<u8> = Vec::new();
        if data.try_reserve_exact(len).is_err() {
            log::warn!("allocation of {}x{} surface failed", width, height);
            return Err(unavailable);
        }
        data.extend(std::iter::repeat_n(fill.0, area as usize).flatten());

        let image = RgbaImage::from_raw(width, height, data).ok_or(unavailable)?;
        Ok(Self { image })
    }

    /// Allocate a fully transparent surface
    pub fn transparent(width: u32, height: u32) -> Result<Self> {
        Self::new(width, height, Rgba([0, 0, 0, 0]))
    }

    /// Take over an existing raster as a drawing surface
    pub fn from_image(image: RgbaImage) -> Result<Self> {
        let (width, height) = image.dimensions();
        if width as u64 * height as u64 > MAX_SURFACE_PIXELS {
            return Err(SheetError::CanvasUnavailable { width, height });
        }
        Ok(Self { image })
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn image_mut(&mut self) -> &mut RgbaImage {
        &mut self.image
    }

    /// Release the surface, keeping its pixels
    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// Overwrite every pixel of `bounds` with `color`
    pub fn fill_rect(&mut self, bounds: PixelBounds, color: Rgba<u8>) {
        let right = (bounds.x + bounds.width).min(self.width());
        let bottom = (bounds.y + bounds.height).min(self.height());
        for y in bounds.y..bottom {
            for x in bounds.x..right {
                self.image.put_pixel(x, y, color);
            }
        }
    }

    /// Draw a `line_width` pixel outline just inside `bounds`
    pub fn stroke_rect(&mut self, bounds: PixelBounds, color: Rgba<u8>, line_width: u32) {
        if bounds.is_empty() || line_width == 0 {
            return;
        }
        let w = line_width.min(bounds.width);
        let h = line_width.min(bounds.height);
        let right = bounds.x + bounds.width;
        let bottom = bounds.y + bounds.height;

        // top, bottom, left, right
        self.fill_rect(PixelBounds { height: h, ..bounds }, color);
        self.fill_rect(
            PixelBounds {
                y: bottom - h,
                height: h,
                ..bounds
            },
            color,
        );
        self.fill_rect(PixelBounds { width: w, ..bounds }, color);
        self.fill_rect(
            PixelBounds {
                x: right - w,
                width: w,
                ..bounds
            },
            color,
        );
    }
}

/// Source-over composite of `src` onto `dst` with an extra opacity factor
pub fn blend_over(dst: &Rgba<u8>, src: &Rgba<u8>, opacity: f32) -> Rgba<u8> {
    let sa = src[3] as f32 / 255.0 * opacity;
    let da = dst[3] as f32 / 255.0;
    let out_a = sa + da * (1.0 - sa);
    if out_a <= 0.0 {
        return Rgba([0, 0, 0, 0]);
    }
    let channel = |i: usize| {
        let c = (src[i] as f32 * sa + dst[i] as f32 * da * (1.0 - sa)) / out_a;
        c.round().clamp(0.0, 255.0) as u8
    };
    Rgba([
        channel(0),
        channel(1),
        channel(2),
        (out_a * 255.0).round().clamp(0.0, 255.0) as u8,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_fills_surface() {
        let surface = Surface::new(4, 3, Rgba([255, 255, 255, 255])).unwrap();
        assert_eq!(surface.width(), 4);
        assert_eq!(surface.height(), 3);
        assert!(surface.image().pixels().all(|p| p.0 == [255, 255, 255, 255]));
    }

    #[test]
    fn test_rejects_empty_and_oversized() {
        assert!(matches!(
            Surface::transparent(0, 10),
            Err(SheetError::CanvasUnavailable { .. })
        ));
        assert!(matches!(
            Surface::transparent(70_000, 70_000),
            Err(SheetError::CanvasUnavailable {
                width: 70_000,
                height: 70_000
            })
        ));
    }

    #[test]
    fn test_stroke_rect_outline_only() {
        let mut surface = Surface::transparent(10, 10).unwrap();
        let red = Rgba([255, 0, 0, 255]);
        surface.stroke_rect(
            PixelBounds {
                x: 2,
                y: 2,
                width: 5,
                height: 5,
            },
            red,
            1,
        );
        let img = surface.image();
        assert_eq!(*img.get_pixel(2, 2), red);
        assert_eq!(*img.get_pixel(6, 6), red);
        assert_eq!(*img.get_pixel(4, 2), red);
        assert_eq!(img.get_pixel(4, 4)[3], 0);
        assert_eq!(img.get_pixel(7, 7)[3], 0);
    }

    #[test]
    fn test_blend_over() {
        let white = Rgba([255, 255, 255, 255]);
        let black = Rgba([0, 0, 0, 255]);
        assert_eq!(blend_over(&white, &black, 1.0), black);
        assert_eq!(blend_over(&white, &black, 0.0), white);
        let half = blend_over(&white, &black, 0.5);
        assert!((half[0] as i32 - 128).abs() <= 1);
        assert_eq!(half[3], 255);
    }
}
