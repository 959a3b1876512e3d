//! Text overlay drawn at an image's natural resolution
//!
//! One line of text is centered on a point given in percent of the image
//! size. Font size and shadow are specified in preview pixels and scaled by
//! the ratio of natural width to preview width.

use ab_glyph::{Font, GlyphId, OutlinedGlyph, PxScale, ScaleFont, point};
use image::{GrayImage, RgbaImage, imageops};

pub use ab_glyph::FontArc;

use crate::codec;
use crate::constants::{
    DEFAULT_FONT_SIZE, TEXT_JPEG_QUALITY, TEXT_SHADOW_BLUR, TEXT_SHADOW_COLOR, TEXT_SHADOW_OFFSET,
};
use crate::types::{GeometryError, Result, SheetError};

/// Text to draw and where to draw it
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TextOverlay {
    pub text: String,
    /// Horizontal center, percent of the image width
    pub x_percent: f32,
    /// Vertical center, percent of the image height
    pub y_percent: f32,
    /// Em size in preview pixels
    pub font_size: f32,
    /// Width the image was previewed at. `None` means natural size.
    pub display_width: Option<f32>,
    pub color: [u8; 4],
    pub shadow: bool,
}

impl Default for TextOverlay {
    fn default() -> Self {
        Self {
            text: "Add Text".to_string(),
            x_percent: 50.0,
            y_percent: 50.0,
            font_size: DEFAULT_FONT_SIZE,
            display_width: None,
            color: [255, 255, 255, 255],
            shadow: true,
        }
    }
}

impl TextOverlay {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn at(mut self, x_percent: f32, y_percent: f32) -> Self {
        self.x_percent = x_percent;
        self.y_percent = y_percent;
        self
    }

    pub fn with_font_size(mut self, font_size: f32) -> Self {
        self.font_size = font_size;
        self
    }

    pub fn with_color(mut self, color: [u8; 4]) -> Self {
        self.color = color;
        self
    }

    pub fn validate(&self) -> Result<()> {
        let percent = |v: f32| v.is_finite() && (0.0..=100.0).contains(&v);
        if !(percent(self.x_percent) && percent(self.y_percent)) {
            return Err(GeometryError::InvalidArgument(format!(
                "text position must be within 0..=100 percent, got ({}, {})",
                self.x_percent, self.y_percent
            ))
            .into());
        }
        if !(self.font_size.is_finite() && self.font_size > 0.0) {
            return Err(GeometryError::InvalidArgument(format!(
                "font size must be positive, got {}",
                self.font_size
            ))
            .into());
        }
        if let Some(width) = self.display_width {
            if !(width.is_finite() && width > 0.0) {
                return Err(GeometryError::InvalidArgument(format!(
                    "display width must be positive, got {}",
                    width
                ))
                .into());
            }
        }
        Ok(())
    }

    /// Natural pixels per preview pixel for an image `image_width` wide
    fn scale_for(&self, image_width: u32) -> f32 {
        self.display_width.map_or(1.0, |display| image_width as f32 / display)
    }
}

/// Parse a font from TrueType/OpenType bytes
pub fn font_from_bytes(data: Vec<u8>) -> Result<FontArc> {
    FontArc::try_from_vec(data).map_err(|e| SheetError::Font(e.to_string()))
}

/// Parse `#rgb`, `#rrggbb` or `#rrggbbaa` into RGBA
pub fn parse_hex_color(value: &str) -> Result<[u8; 4]> {
    let invalid = || SheetError::Config(format!("invalid color: {}", value));
    let hex = value.strip_prefix('#').unwrap_or(value);
    if !hex.is_ascii() {
        return Err(invalid());
    }
    let channel = |digits: &str| u8::from_str_radix(digits, 16).map_err(|_| invalid());

    let mut rgba = [255u8; 4];
    match hex.len() {
        3 => {
            for (i, slot) in rgba.iter_mut().take(3).enumerate() {
                *slot = channel(&hex[i..i + 1])? * 17;
            }
        }
        6 | 8 => {
            for (i, slot) in rgba.iter_mut().take(hex.len() / 2).enumerate() {
                *slot = channel(&hex[i * 2..i * 2 + 2])?;
            }
        }
        _ => return Err(invalid()),
    }
    Ok(rgba)
}

/// Draw `overlay` onto a copy of `image`.
///
/// The text is centered horizontally on its anchor, and the middle of the em
/// box sits on it vertically. Line breaks are drawn as spaces. Glyphs that
/// fall outside the image are clipped.
pub fn apply_text(image: &RgbaImage, overlay: &TextOverlay, font: &FontArc) -> Result<RgbaImage> {
    overlay.validate()?;
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(GeometryError::EmptyRect.into());
    }

    let scale = overlay.scale_for(width);
    let anchor = (
        overlay.x_percent / 100.0 * width as f32,
        overlay.y_percent / 100.0 * height as f32,
    );
    let sigma = TEXT_SHADOW_BLUR * scale / 2.0;
    let offset = (TEXT_SHADOW_OFFSET * scale).round() as i64;
    let pad = if overlay.shadow {
        (3.0 * sigma).ceil() as i64 + offset
    } else {
        0
    };

    let mut out = image.clone();
    let em = overlay.font_size * scale;
    let Some(coverage) = rasterize(font, em, &overlay.text, anchor, pad, (width, height)) else {
        log::debug!("text overlay {:?} has no visible glyphs", overlay.text);
        return Ok(out);
    };

    if overlay.shadow {
        let shadow = if sigma > 0.0 {
            imageops::blur(&coverage.mask, sigma)
        } else {
            coverage.mask.clone()
        };
        paint(&mut out, &shadow, coverage.x + offset, coverage.y + offset, TEXT_SHADOW_COLOR);
    }
    paint(&mut out, &coverage.mask, coverage.x, coverage.y, overlay.color);

    log::debug!(
        "drew {:?} at ({:.1}, {:.1}), em {:.1} px, shadow {}",
        overlay.text,
        anchor.0,
        anchor.1,
        em,
        overlay.shadow
    );
    Ok(out)
}

/// Draw `overlay` and encode the result as JPEG
pub fn render_text(image: &RgbaImage, overlay: &TextOverlay, font: &FontArc) -> Result<Vec<u8>> {
    let out = apply_text(image, overlay, font)?;
    codec::encode_jpeg(&out, TEXT_JPEG_QUALITY)
}

/// Glyph coverage whose top-left corner sits at (`x`, `y`) on the image
struct Coverage {
    mask: GrayImage,
    x: i64,
    y: i64,
}

/// Scale whose em square is `em` pixels
fn em_scale(font: &FontArc, em: f32) -> PxScale {
    let units_per_em = font.units_per_em().unwrap_or(1000.0);
    PxScale::from(em * font.height_unscaled() / units_per_em)
}

/// Glyphs of one line with pen positions from 0, and the advance width
fn layout_line(font: &FontArc, scale: PxScale, text: &str) -> (Vec<(GlyphId, f32)>, f32) {
    let scaled = font.as_scaled(scale);
    let mut glyphs = Vec::with_capacity(text.len());
    let mut cursor = 0.0f32;
    let mut previous: Option<GlyphId> = None;

    for ch in text.chars() {
        let ch = if ch.is_ascii_whitespace() { ' ' } else { ch };
        let id = font.glyph_id(ch);
        if let Some(prev) = previous {
            cursor += scaled.kern(prev, id);
        }
        glyphs.push((id, cursor));
        cursor += scaled.h_advance(id);
        previous = Some(id);
    }
    (glyphs, cursor)
}

/// Rasterize `text` centered on `anchor`, padded by `pad` on every side and
/// clipped to the image plus that padding
fn rasterize(
    font: &FontArc,
    em: f32,
    text: &str,
    anchor: (f32, f32),
    pad: i64,
    image_size: (u32, u32),
) -> Option<Coverage> {
    let scale = em_scale(font, em);
    let scaled = font.as_scaled(scale);
    let (glyphs, advance) = layout_line(font, scale, text);

    let left = anchor.0 - advance / 2.0;
    let baseline = anchor.1 + (scaled.ascent() + scaled.descent()) / 2.0;
    let outlined: Vec<OutlinedGlyph> = glyphs
        .into_iter()
        .filter_map(|(id, x)| {
            font.outline_glyph(id.with_scale_and_position(scale, point(left + x, baseline)))
        })
        .collect();
    if outlined.is_empty() {
        return None;
    }

    let (mut min_x, mut min_y) = (f32::MAX, f32::MAX);
    let (mut max_x, mut max_y) = (f32::MIN, f32::MIN);
    for glyph in &outlined {
        let bounds = glyph.px_bounds();
        min_x = min_x.min(bounds.min.x);
        min_y = min_y.min(bounds.min.y);
        max_x = max_x.max(bounds.max.x);
        max_y = max_y.max(bounds.max.y);
    }

    let x0 = (min_x.floor() as i64 - pad).max(-pad);
    let y0 = (min_y.floor() as i64 - pad).max(-pad);
    let x1 = (max_x.ceil() as i64 + pad).min(image_size.0 as i64 + pad);
    let y1 = (max_y.ceil() as i64 + pad).min(image_size.1 as i64 + pad);
    if x1 <= x0 || y1 <= y0 {
        return None;
    }

    let (width, height) = ((x1 - x0) as u32, (y1 - y0) as u32);
    let mut mask = GrayImage::new(width, height);
    for glyph in &outlined {
        let bounds = glyph.px_bounds();
        let gx = bounds.min.x as i64 - x0;
        let gy = bounds.min.y as i64 - y0;
        glyph.draw(|px, py, c| {
            let x = gx + px as i64;
            let y = gy + py as i64;
            if x < 0 || y < 0 || x >= width as i64 || y >= height as i64 {
                return;
            }
            let pixel = mask.get_pixel_mut(x as u32, y as u32);
            pixel[0] = pixel[0].max((c.clamp(0.0, 1.0) * 255.0).round() as u8);
        });
    }

    Some(Coverage { mask, x: x0, y: y0 })
}

/// Blend `color` over `image` weighted by `coverage` placed at (`x`, `y`)
fn paint(image: &mut RgbaImage, coverage: &GrayImage, x: i64, y: i64, color: [u8; 4]) {
    let (width, height) = (image.width() as i64, image.height() as i64);
    for (cx, cy, c) in coverage.enumerate_pixels() {
        if c[0] == 0 {
            continue;
        }
        let (ix, iy) = (x + cx as i64, y + cy as i64);
        if ix < 0 || iy < 0 || ix >= width || iy >= height {
            continue;
        }
        let alpha = c[0] as f32 / 255.0 * color[3] as f32 / 255.0;
        let dst = image.get_pixel_mut(ix as u32, iy as u32);
        for i in 0..3 {
            dst[i] = (color[i] as f32 * alpha + dst[i] as f32 * (1.0 - alpha)).round() as u8;
        }
        dst[3] = (alpha * 255.0 + dst[3] as f32 * (1.0 - alpha)).round().min(255.0) as u8;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn font() -> FontArc {
        font_from_bytes(include_bytes!("../tests/fonts/Tuffy.ttf").to_vec()).unwrap()
    }

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#ffffff").unwrap(), [255, 255, 255, 255]);
        assert_eq!(parse_hex_color("#ef4444").unwrap(), [0xEF, 0x44, 0x44, 255]);
        assert_eq!(parse_hex_color("fff").unwrap(), [255, 255, 255, 255]);
        assert_eq!(parse_hex_color("#00000080").unwrap(), [0, 0, 0, 0x80]);
        assert!(parse_hex_color("#12345").is_err());
        assert!(parse_hex_color("#gggggg").is_err());
        assert!(parse_hex_color("#ééé").is_err());
    }

    #[test]
    fn test_em_scale_matches_font_size() {
        let font = font();
        let scale = em_scale(&font, 40.0);
        let scaled = font.as_scaled(scale);
        let expected = 40.0 * font.height_unscaled() / font.units_per_em().unwrap();
        assert!((scaled.height() - expected).abs() < 0.01);
    }

    #[test]
    fn test_layout_line_advances() {
        let font = font();
        let scale = em_scale(&font, 30.0);
        let (glyphs, one) = layout_line(&font, scale, "H");
        assert_eq!(glyphs.len(), 1);
        let (_, three) = layout_line(&font, scale, "HHH");
        assert!((three - 3.0 * one).abs() < 1.0);
    }

    #[test]
    fn test_line_breaks_draw_as_spaces() {
        let font = font();
        let scale = em_scale(&font, 30.0);
        let (broken, _) = layout_line(&font, scale, "A\nB");
        let (spaced, _) = layout_line(&font, scale, "A B");
        assert_eq!(broken, spaced);
    }

    #[test]
    fn test_rasterize_blank_text() {
        assert!(rasterize(&font(), 40.0, "   ", (50.0, 50.0), 0, (100, 100)).is_none());
    }

    #[test]
    fn test_paint_blends_by_coverage() {
        let mut image = RgbaImage::from_pixel(2, 1, image::Rgba([0, 0, 0, 255]));
        let coverage = GrayImage::from_raw(2, 1, vec![255, 128]).unwrap();
        paint(&mut image, &coverage, 0, 0, [200, 200, 200, 255]);
        assert_eq!(image.get_pixel(0, 0)[0], 200);
        assert_eq!(image.get_pixel(1, 0)[0], 100);
    }
}
