//! The editable selection layer
//!
//! Strokes are rasterized as capsules: every pixel whose center lies within
//! `radius` of the segment is covered, which gives round caps and, since
//! consecutive segments share endpoints, round joins.

use image::{Rgba, RgbaImage};

use crate::constants::MASK_HIGHLIGHT;
use crate::surface::{Surface, blend_over};
use crate::types::{GeometryError, Result};

use super::{MaskStroke, Point, StrokeMode};

/// Mutable RGBA layer whose alpha is selection coverage
#[derive(Debug, Clone)]
pub struct MaskAccumulator {
    surface: Surface,
}

impl MaskAccumulator {
    /// A fully transparent layer of the source image's native size
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Ok(Self {
            surface: Surface::transparent(width, height)?,
        })
    }

    pub fn width(&self) -> u32 {
        self.surface.width()
    }

    pub fn height(&self) -> u32 {
        self.surface.height()
    }

    /// Current layer contents
    pub fn image(&self) -> &RgbaImage {
        self.surface.image()
    }

    /// Wipe every pixel back to transparent
    pub fn clear(&mut self) {
        for pixel in self.surface.image_mut().pixels_mut() {
            *pixel = Rgba([0, 0, 0, 0]);
        }
    }

    /// Whether any pixel has non-zero coverage
    pub fn has_coverage(&self) -> bool {
        self.image().pixels().any(|p| p[3] > 0)
    }

    /// Paint or erase a round-capped segment of width `2 * radius`.
    ///
    /// A zero-length segment paints a single round dot.
    pub fn paint_segment(
        &mut self,
        from: Point,
        to: Point,
        radius: f32,
        mode: StrokeMode,
    ) -> Result<()> {
        check_radius(radius)?;
        if !(from.is_finite() && to.is_finite()) {
            return Err(GeometryError::InvalidArgument("stroke point is not finite".into()).into());
        }

        let (width, height) = (self.width(), self.height());
        let min_x = (from.x.min(to.x) - radius).floor().max(0.0);
        let min_y = (from.y.min(to.y) - radius).floor().max(0.0);
        let max_x = (from.x.max(to.x) + radius).ceil().min(width as f32);
        let max_y = (from.y.max(to.y) + radius).ceil().min(height as f32);
        if min_x >= max_x || min_y >= max_y {
            return Ok(());
        }

        let highlight = Rgba(MASK_HIGHLIGHT);
        let radius_sq = radius * radius;
        let image = self.surface.image_mut();
        for y in min_y as u32..max_y as u32 {
            for x in min_x as u32..max_x as u32 {
                let center = Point::new(x as f32 + 0.5, y as f32 + 0.5);
                if distance_sq_to_segment(center, from, to) > radius_sq {
                    continue;
                }
                let pixel = image.get_pixel_mut(x, y);
                *pixel = match mode {
                    StrokeMode::Paint => blend_over(pixel, &highlight, 1.0),
                    StrokeMode::Erase => Rgba([0, 0, 0, 0]),
                };
            }
        }
        Ok(())
    }

    /// Replay a whole stroke: a dot at the first point, then one segment per
    /// consecutive pair of points.
    pub fn paint_stroke(&mut self, stroke: &MaskStroke) -> Result<()> {
        let Some(&first) = stroke.path.first() else {
            return Ok(());
        };
        if stroke.path.len() == 1 {
            return self.paint_segment(first, first, stroke.brush_radius, stroke.mode);
        }
        for pair in stroke.path.windows(2) {
            self.paint_segment(pair[0], pair[1], stroke.brush_radius, stroke.mode)?;
        }
        Ok(())
    }
}

fn check_radius(radius: f32) -> Result<()> {
    if !radius.is_finite() || radius <= 0.0 {
        return Err(GeometryError::InvalidArgument(format!(
            "brush radius must be positive, got {}",
            radius
        ))
        .into());
    }
    Ok(())
}

/// Squared distance from `p` to the segment `a`-`b`
fn distance_sq_to_segment(p: Point, a: Point, b: Point) -> f32 {
    let (dx, dy) = (b.x - a.x, b.y - a.y);
    let len_sq = dx * dx + dy * dy;
    let t = if len_sq > 0.0 {
        (((p.x - a.x) * dx + (p.y - a.y) * dy) / len_sq).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let (cx, cy) = (a.x + t * dx - p.x, a.y + t * dy - p.y);
    cx * cx + cy * cy
}
