//! File I/O for subject images and produced artefacts

use image::RgbaImage;
use std::path::Path;

use crate::codec;
use crate::text::{FontArc, font_from_bytes};
use crate::types::*;

/// Load and decode a single JPEG/PNG image
pub async fn load_image(path: impl AsRef<Path>) -> Result<RgbaImage> {
    let path = path.as_ref().to_owned();
    let bytes = tokio::fs::read(&path).await?;
    let image = tokio::task::spawn_blocking(move || codec::decode(&bytes)).await??;
    log::debug!(
        "loaded {} ({}x{})",
        path.display(),
        image.width(),
        image.height()
    );
    Ok(image)
}

/// Load multiple images, in order
pub async fn load_images(paths: &[impl AsRef<Path>]) -> Result<Vec<RgbaImage>> {
    let mut images = Vec::with_capacity(paths.len());
    for path in paths {
        images.push(load_image(path).await?);
    }
    Ok(images)
}

/// Load an image from a `data:` URL
pub async fn load_data_url(url: String) -> Result<RgbaImage> {
    let image = tokio::task::spawn_blocking(move || codec::decode_data_url(&url)).await??;
    Ok(image)
}

/// Load a TrueType/OpenType font file
pub async fn load_font(path: impl AsRef<Path>) -> Result<FontArc> {
    let path = path.as_ref();
    let bytes = tokio::fs::read(path).await?;
    let font = font_from_bytes(bytes)?;
    log::debug!("loaded font {}", path.display());
    Ok(font)
}

/// Write encoded bytes to disk
pub async fn save_bytes(bytes: &[u8], path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    tokio::fs::write(path, bytes).await?;
    log::info!("wrote {} ({} bytes)", path.display(), bytes.len());
    Ok(())
}
