//! Upload normalization
//!
//! Incoming photos are bounded to [`MAX_DIMENSION`], flattened onto white
//! and re-encoded as a small JPEG before anything else sees them.

use crate::codec::{self, ImageFormat};
use crate::constants::{MAX_DIMENSION, UPLOAD_JPEG_QUALITY};
use crate::resample::bound_resize;
use crate::types::Result;

/// A normalized upload
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedImage {
    /// Encoded JPEG
    pub bytes: Vec<u8>,
    pub mime: &'static str,
    pub width: u32,
    pub height: u32,
}

impl PreparedImage {
    pub fn to_data_url(&self) -> String {
        codec::to_data_url(&self.bytes, self.mime)
    }
}

/// Decode, bound and re-encode uploaded JPEG/PNG bytes
pub fn prepare_upload(bytes: &[u8]) -> Result<PreparedImage> {
    let decoded = codec::decode(bytes)?;
    let bounded = bound_resize(&decoded, MAX_DIMENSION);
    let encoded = codec::encode_jpeg(&bounded, UPLOAD_JPEG_QUALITY)?;

    log::info!(
        "prepared upload {}x{} -> {}x{} ({} bytes)",
        decoded.width(),
        decoded.height(),
        bounded.width(),
        bounded.height(),
        encoded.len()
    );

    Ok(PreparedImage {
        bytes: encoded,
        mime: ImageFormat::Jpeg.mime(),
        width: bounded.width(),
        height: bounded.height(),
    })
}
