//! Committed black/white selection masks

use image::{Rgba, RgbaImage};

use crate::codec::{self, ImageFormat};
use crate::types::Result;

const SELECTED: Rgba<u8> = Rgba([255, 255, 255, 255]);
const UNSELECTED: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// Immutable mask: opaque white where selected, opaque black elsewhere
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryMask {
    image: RgbaImage,
}

impl BinaryMask {
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    pub fn is_selected(&self, x: u32, y: u32) -> bool {
        self.image.get_pixel(x, y)[0] == 255
    }

    /// Number of selected pixels
    pub fn selected_count(&self) -> usize {
        self.image.pixels().filter(|p| p[0] == 255).count()
    }

    /// Lossless PNG, so the mask stays strictly two-valued
    pub fn to_png(&self) -> Result<Vec<u8>> {
        codec::encode_png(&self.image)
    }

    /// PNG data URL
    pub fn to_data_url(&self) -> Result<String> {
        Ok(codec::to_data_url(&self.to_png()?, ImageFormat::Png.mime()))
    }
}

/// Reduce an accumulated selection layer to a binary mask.
///
/// Any non-zero coverage selects the pixel. The result depends only on the
/// alpha channel of `accumulated`.
pub fn commit_mask(accumulated: &RgbaImage) -> BinaryMask {
    let image = RgbaImage::from_fn(accumulated.width(), accumulated.height(), |x, y| {
        if accumulated.get_pixel(x, y)[3] > 0 {
            SELECTED
        } else {
            UNSELECTED
        }
    });
    BinaryMask { image }
}
