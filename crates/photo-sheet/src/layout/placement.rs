//! Slot placement on the sheet
//!
//! This module decides which grid cells get filled, in what order, with
//! which subject, and how a subject raster is scaled into its slot:
//! - The filled block is centered on the paper
//! - Cells are visited row-major and subjects are assigned round-robin
//! - Subjects are cover-scaled and clipped to the slot

use crate::types::{GeometryError, Quantity, Result};

use super::{
    Capacity, GridPosition, PixelSize, Rect, ScalingMode, SheetLayout, SlotPlacement,
    active_block, block_size, slot_bounds,
};

/// Lay out a sheet without touching any pixels.
///
/// # Arguments
/// * `paper` - Paper size in pixels
/// * `capacity` - Grid computed for this paper and slot size
/// * `quantity` - Requested number of copies
/// * `subject_count` - Number of distinct subject rasters
///
/// # Errors
/// Zero capacity, no subjects and a zero count are all rejected as
/// [`GeometryError`]s.
pub fn sheet_layout(
    paper: PixelSize,
    capacity: &Capacity,
    quantity: Quantity,
    subject_count: usize,
) -> Result<SheetLayout> {
    if capacity.is_empty() {
        return Err(GeometryError::ZeroCapacity.into());
    }
    if subject_count == 0 {
        return Err(
            GeometryError::InvalidArgument("at least one subject is required".into()).into(),
        );
    }
    if quantity == Quantity::Count(0) {
        return Err(GeometryError::InvalidArgument("quantity must be at least 1".into()).into());
    }

    let actual = quantity.resolve(capacity.capacity);
    if let Quantity::Count(requested) = quantity {
        if requested > actual {
            log::warn!(
                "requested {} copies but the sheet holds {}; clamping",
                requested,
                actual
            );
        }
    }

    let (active_cols, active_rows) = active_block(capacity, actual);
    let block = block_size(capacity, active_cols, active_rows);
    let origin = (
        (paper.width - block.width) / 2.0,
        (paper.height - block.height) / 2.0,
    );

    log::debug!(
        "sheet: {} of {} slots, active block {}x{} at ({:.1}, {:.1})",
        actual,
        capacity.capacity,
        active_cols,
        active_rows,
        origin.0,
        origin.1
    );

    // Traversal walks the full grid width; for a row-major fill this lands on
    // the same cells as the active block.
    let placements = (0..capacity.rows as usize)
        .flat_map(|row| (0..capacity.cols as usize).map(move |col| GridPosition::new(row, col)))
        .take(actual as usize)
        .enumerate()
        .map(|(index, grid_pos)| SlotPlacement {
            index,
            grid_pos,
            rect: slot_bounds(capacity, grid_pos, origin),
            subject: index % subject_count,
        })
        .collect();

    Ok(SheetLayout {
        paper,
        capacity: *capacity,
        quantity: actual,
        origin,
        placements,
    })
}

/// Where a `src_width x src_height` raster lands when cover-scaled into
/// `slot`: centered on the slot, overflowing it on one axis.
pub fn cover_rect(src_width: f32, src_height: f32, slot: &Rect) -> Rect {
    let scale = calculate_scale(
        src_width,
        src_height,
        slot.width,
        slot.height,
        ScalingMode::Fill,
    );
    let width = src_width * scale;
    let height = src_height * scale;
    Rect::new(
        slot.x + (slot.width - width) / 2.0,
        slot.y + (slot.height - height) / 2.0,
        width,
        height,
    )
}

/// Where a raster lands when fitted inside `target`, centered.
pub fn fit_rect(src_width: f32, src_height: f32, target: &Rect) -> Rect {
    let scale = calculate_scale(
        src_width,
        src_height,
        target.width,
        target.height,
        ScalingMode::Fit,
    );
    let width = src_width * scale;
    let height = src_height * scale;
    Rect::new(
        target.x + (target.width - width) / 2.0,
        target.y + (target.height - height) / 2.0,
        width,
        height,
    )
}

/// Calculate scale factor for fitting source to target dimensions.
pub fn calculate_scale(
    src_width: f32,
    src_height: f32,
    target_width: f32,
    target_height: f32,
    mode: ScalingMode,
) -> f32 {
    let scale_w = target_width / src_width;
    let scale_h = target_height / src_height;
    match mode {
        ScalingMode::Fit => scale_w.min(scale_h),
        ScalingMode::Fill => scale_w.max(scale_h),
    }
}
