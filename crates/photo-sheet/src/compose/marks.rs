//! Cut guides for composed sheets
//!
//! Each filled slot gets a thin light outline so the prints can be cut
//! apart. Empty slots get nothing.

use image::Rgba;

use crate::constants::{SEPARATOR_COLOR, SEPARATOR_WIDTH};
use crate::layout::SheetLayout;
use crate::surface::Surface;

/// Draw the separator outline around every placed slot
pub fn draw_separators(surface: &mut Surface, layout: &SheetLayout) {
    let (width, height) = (surface.width(), surface.height());
    for placement in &layout.placements {
        let bounds = placement.rect.to_pixel_bounds(width, height);
        surface.stroke_rect(bounds, Rgba(SEPARATOR_COLOR), SEPARATOR_WIDTH);
    }
}
