//! Raster encode/decode and data URLs
//!
//! JPEG has no alpha channel, so every JPEG path flattens onto white first.
//! PNG keeps RGBA as-is.

use std::io::Cursor;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, Rgb, RgbImage, RgbaImage};

use crate::types::{GeometryError, Result, SheetError};

/// Encoded raster container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ImageFormat {
    Png,
    #[default]
    Jpeg,
}

impl ImageFormat {
    pub fn mime(self) -> &'static str {
        match self {
            ImageFormat::Png => "image/png",
            ImageFormat::Jpeg => "image/jpeg",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Jpeg => "jpg",
        }
    }

    pub fn from_mime(mime: &str) -> Option<Self> {
        match mime.trim().to_ascii_lowercase().as_str() {
            "image/png" => Some(ImageFormat::Png),
            "image/jpeg" | "image/jpg" => Some(ImageFormat::Jpeg),
            _ => None,
        }
    }

    /// Guess from a file extension (`png`, `jpg`, `jpeg`)
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.trim().to_ascii_lowercase().as_str() {
            "png" => Some(ImageFormat::Png),
            "jpg" | "jpeg" => Some(ImageFormat::Jpeg),
            _ => None,
        }
    }
}

// =============================================================================
// Decoding
// =============================================================================

/// Decode JPEG or PNG bytes into an RGBA raster (format is sniffed)
pub fn decode(bytes: &[u8]) -> Result<RgbaImage> {
    let image = image::load_from_memory(bytes)?;
    log::debug!("decoded {}x{} image", image.width(), image.height());
    Ok(image.to_rgba8())
}

/// Decode a `data:image/...;base64,` URL into an RGBA raster
pub fn decode_data_url(url: &str) -> Result<RgbaImage> {
    let (_, bytes) = from_data_url(url)?;
    decode(&bytes)
}

// =============================================================================
// Encoding
// =============================================================================

/// Composite an RGBA raster over opaque white
pub fn flatten_onto_white(image: &RgbaImage) -> RgbImage {
    RgbImage::from_fn(image.width(), image.height(), |x, y| {
        let p = image.get_pixel(x, y);
        let a = p[3] as f32 / 255.0;
        let over = |c: u8| (c as f32 * a + 255.0 * (1.0 - a)).round() as u8;
        Rgb([over(p[0]), over(p[1]), over(p[2])])
    })
}

/// Map a `0.0..=1.0` quality to the encoder's `1..=100` scale
fn jpeg_quality(quality: f32) -> Result<u8> {
    if !quality.is_finite() || quality <= 0.0 || quality > 1.0 {
        return Err(GeometryError::InvalidArgument(format!(
            "JPEG quality must be in (0, 1], got {}",
            quality
        ))
        .into());
    }
    Ok((quality * 100.0).round().clamp(1.0, 100.0) as u8)
}

/// Encode as JPEG, flattening alpha onto white first.
///
/// `quality` is in `(0, 1]`, as in canvas `toDataURL`.
pub fn encode_jpeg(image: &RgbaImage, quality: f32) -> Result<Vec<u8>> {
    let quality = jpeg_quality(quality)?;
    let rgb = flatten_onto_white(image);
    let mut buffer = Vec::new();
    JpegEncoder::new_with_quality(Cursor::new(&mut buffer), quality)
        .encode(rgb.as_raw(), rgb.width(), rgb.height(), ExtendedColorType::Rgb8)
        .map_err(|e| SheetError::Encode(format!("failed to encode JPEG: {}", e)))?;
    Ok(buffer)
}

/// Encode as lossless RGBA PNG
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    PngEncoder::new(Cursor::new(&mut buffer))
        .write_image(
            image.as_raw(),
            image.width(),
            image.height(),
            ExtendedColorType::Rgba8,
        )
        .map_err(|e| SheetError::Encode(format!("failed to encode PNG: {}", e)))?;
    Ok(buffer)
}

/// Encode in `format`; `quality` only applies to JPEG
pub fn encode(image: &RgbaImage, format: ImageFormat, quality: f32) -> Result<Vec<u8>> {
    match format {
        ImageFormat::Png => encode_png(image),
        ImageFormat::Jpeg => encode_jpeg(image, quality),
    }
}

// =============================================================================
// Data URLs
// =============================================================================

/// Wrap encoded bytes as a base64 data URL
pub fn to_data_url(bytes: &[u8], mime: &str) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

/// Split a base64 data URL into its MIME type and decoded bytes
pub fn from_data_url(url: &str) -> Result<(String, Vec<u8>)> {
    let rest = url
        .trim()
        .strip_prefix("data:")
        .ok_or_else(|| SheetError::DataUrl("missing data: prefix".into()))?;
    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| SheetError::DataUrl("missing payload separator".into()))?;
    let mime = header
        .strip_suffix(";base64")
        .ok_or_else(|| SheetError::DataUrl("only base64 payloads are supported".into()))?;
    let bytes = STANDARD
        .decode(payload)
        .map_err(|e| SheetError::DataUrl(format!("bad base64 payload: {}", e)))?;
    Ok((mime.to_string(), bytes))
}
