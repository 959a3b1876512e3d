//! Shared constants for sheet composition and image adjustment
//!
//! This module centralizes magic numbers and constants used throughout
//! the layout, raster and export code.

// =============================================================================
// Unit Conversion
// =============================================================================

/// Millimeters per inch
pub const MM_PER_INCH: f32 = 25.4;

/// PDF points per inch
pub const POINTS_PER_INCH: f32 = 72.0;

/// Default print resolution (dots per inch)
pub const DEFAULT_DPI: f32 = 300.0;

/// Default gutter between photo slots, in inches (45 px at 300 dpi)
pub const DEFAULT_PADDING_IN: f32 = 0.15;

// =============================================================================
// Raster Limits
// =============================================================================

/// Longest edge allowed for edited images (adjust, crop, upload)
pub const MAX_DIMENSION: u32 = 800;

/// Largest surface area we are willing to allocate, in pixels.
/// Matches the area cap common browser canvases enforce.
pub const MAX_SURFACE_PIXELS: u64 = 268_435_456;

// =============================================================================
// Encoding Quality
// =============================================================================

/// JPEG quality of a finished print sheet
pub const SHEET_JPEG_QUALITY: f32 = 0.95;

/// JPEG quality for adjusted and cropped images
pub const EDIT_JPEG_QUALITY: f32 = 0.7;

/// JPEG quality for normalized uploads
pub const UPLOAD_JPEG_QUALITY: f32 = 0.6;

/// JPEG quality for user-facing JPEG export
pub const EXPORT_JPEG_QUALITY: f32 = 0.9;

/// JPEG quality for images with a text overlay
pub const TEXT_JPEG_QUALITY: f32 = 0.9;

// =============================================================================
// Sheet Marks
// =============================================================================

/// Cut guide color drawn around each filled slot (#E2E8F0)
pub const SEPARATOR_COLOR: [u8; 4] = [0xE2, 0xE8, 0xF0, 0xFF];

/// Cut guide width in pixels
pub const SEPARATOR_WIDTH: u32 = 1;

/// Sheet background
pub const SHEET_BACKGROUND: [u8; 4] = [0xFF, 0xFF, 0xFF, 0xFF];

// =============================================================================
// Mask Painting
// =============================================================================

/// Highlight color for painted mask strokes: rgba(99, 102, 241, 0.6)
pub const MASK_HIGHLIGHT: [u8; 4] = [99, 102, 241, 153];

/// Default brush radius in native pixels (30 px wide brush)
pub const DEFAULT_BRUSH_RADIUS: f32 = 15.0;

// =============================================================================
// Text Overlay
// =============================================================================

/// Font size in preview pixels
pub const DEFAULT_FONT_SIZE: f32 = 40.0;

/// Drop shadow color: rgba(0, 0, 0, 0.5)
pub const TEXT_SHADOW_COLOR: [u8; 4] = [0, 0, 0, 128];

/// Shadow blur in preview pixels; the Gaussian sigma is half of it
pub const TEXT_SHADOW_BLUR: f32 = 4.0;

/// Shadow offset right and down, in preview pixels
pub const TEXT_SHADOW_OFFSET: f32 = 2.0;

// =============================================================================
// Quantity Choices
// =============================================================================

/// Largest explicit copy count offered before "max"
pub const MAX_LISTED_QUANTITY: u32 = 16;
