//! Grid capacity calculation
//!
//! This module works out how many photo slots of one size fit on a sheet,
//! and where each slot of the grid sits once the filled block is centered.

use crate::constants::MAX_LISTED_QUANTITY;
use crate::types::{PaperSize, PhotoSize, PrintConfig, Quantity, Result};

use super::{Capacity, GridPosition, PixelSize, Rect};

// =============================================================================
// Capacity
// =============================================================================

/// Compute how many slots fit on the paper.
///
/// One gutter is reserved at the leading edge and one follows every slot, so
/// `cols * slot.width + (cols - 1) * padding` never exceeds the paper width
/// (and likewise for rows). No rotation, no mixed packing.
///
/// A slot that does not fit, or has a non-positive size, yields capacity 0.
///
/// # Arguments
/// * `paper` - Paper size in pixels
/// * `slot` - Photo slot size in pixels
/// * `padding` - Gutter in pixels
pub fn compute_capacity(paper: PixelSize, slot: PixelSize, padding: f32) -> Capacity {
    let cols = fit_count(paper.width, slot.width, padding);
    let rows = fit_count(paper.height, slot.height, padding);
    let capacity = if cols == 0 || rows == 0 { 0 } else { cols * rows };

    log::debug!(
        "capacity: {:.1}x{:.1} px slots on {:.1}x{:.1} px paper -> {} cols x {} rows",
        slot.width,
        slot.height,
        paper.width,
        paper.height,
        cols,
        rows
    );

    Capacity {
        cols,
        rows,
        capacity,
        slot,
        padding,
    }
}

fn fit_count(extent: f32, slot: f32, padding: f32) -> u32 {
    if slot.is_nan() || slot <= 0.0 || !extent.is_finite() || !padding.is_finite() {
        return 0;
    }
    if slot + padding <= 0.0 {
        return 0;
    }
    let count = ((extent - padding) / (slot + padding)).floor();
    if count > 0.0 { count as u32 } else { 0 }
}

/// Capacity of a photo preset on a paper preset at the configured resolution
pub fn plan_sheet(paper: PaperSize, photo: PhotoSize, config: &PrintConfig) -> Result<Capacity> {
    config.validate()?;
    let paper_px = paper.physical().to_pixels(config)?;
    let slot_px = photo.physical().to_pixels(config)?;
    Ok(compute_capacity(paper_px, slot_px, config.padding_px()))
}

/// Quantities worth offering for a sheet: every count up to
/// `min(16, capacity)`, then [`Quantity::Max`].
///
/// An empty sheet offers nothing.
pub fn quantity_choices(capacity: u32) -> Vec<Quantity> {
    if capacity == 0 {
        return Vec::new();
    }
    (1..=capacity.min(MAX_LISTED_QUANTITY))
        .map(Quantity::Count)
        .chain(std::iter::once(Quantity::Max))
        .collect()
}

// =============================================================================
// Active Block
// =============================================================================

/// Columns and rows of the block that `actual` filled slots occupy.
///
/// Columns fill first, so `active_cols = min(actual, cols)` and the rows are
/// whatever it takes to hold the rest.
pub fn active_block(capacity: &Capacity, actual: u32) -> (u32, u32) {
    if actual == 0 || capacity.cols == 0 {
        return (0, 0);
    }
    let active_cols = actual.min(capacity.cols);
    let active_rows = actual.div_ceil(active_cols);
    (active_cols, active_rows)
}

/// Pixel extent of a block of `cols x rows` slots with gutters between them
pub fn block_size(capacity: &Capacity, cols: u32, rows: u32) -> PixelSize {
    let span = |n: u32, slot: f32| {
        if n == 0 {
            0.0
        } else {
            n as f32 * slot + (n - 1) as f32 * capacity.padding
        }
    };
    PixelSize::new(
        span(cols, capacity.slot.width),
        span(rows, capacity.slot.height),
    )
}

// =============================================================================
// Slot Bounds
// =============================================================================

/// Bounds of the slot at `pos`, relative to the block origin (top-left).
pub fn slot_bounds(capacity: &Capacity, pos: GridPosition, origin: (f32, f32)) -> Rect {
    let (origin_x, origin_y) = origin;
    Rect::new(
        origin_x + pos.col as f32 * (capacity.slot.width + capacity.padding),
        origin_y + pos.row as f32 * (capacity.slot.height + capacity.padding),
        capacity.slot.width,
        capacity.slot.height,
    )
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_passport_on_four_by_six() {
        let capacity =
            plan_sheet(PaperSize::FourBySix, PhotoSize::Eu35x45, &PrintConfig::default()).unwrap();

        assert_eq!(capacity.cols, 2);
        assert_eq!(capacity.rows, 3);
        assert_eq!(capacity.capacity, 6);
        assert!((capacity.padding - 45.0).abs() < 0.001);
    }

    #[test]
    fn test_capacity_invariant_holds() {
        let config = PrintConfig::default();
        for paper in PaperSize::PRESETS {
            for photo in PhotoSize::PRESETS {
                let c = plan_sheet(paper, photo, &config).unwrap();
                let paper_px = paper.physical().to_pixels(&config).unwrap();
                if c.cols > 0 {
                    let used = c.cols as f32 * c.slot.width + (c.cols - 1) as f32 * c.padding;
                    assert!(used <= paper_px.width, "{} / {}", paper, photo);
                }
                if c.rows > 0 {
                    let used = c.rows as f32 * c.slot.height + (c.rows - 1) as f32 * c.padding;
                    assert!(used <= paper_px.height, "{} / {}", paper, photo);
                }
            }
        }
    }

    #[test]
    fn test_capacity_monotonic_in_paper_size() {
        let slot = PixelSize::new(413.0, 531.0);
        let mut last = 0;
        for step in 0..40 {
            let side = 400.0 + step as f32 * 75.0;
            let c = compute_capacity(PixelSize::new(side, side * 1.5), slot, 45.0);
            assert!(c.capacity >= last);
            last = c.capacity;
        }
    }

    #[test]
    fn test_capacity_decreases_with_slot_size() {
        let paper = PixelSize::new(2481.0, 3507.0);
        let mut last = u32::MAX;
        for step in 0..30 {
            let w = 200.0 + step as f32 * 60.0;
            let c = compute_capacity(paper, PixelSize::new(w, w), 45.0);
            assert!(c.capacity <= last);
            last = c.capacity;
        }
    }

    #[test]
    fn test_oversized_slot_is_zero_capacity() {
        let c = compute_capacity(
            PixelSize::new(1200.0, 1800.0),
            PixelSize::new(1300.0, 200.0),
            45.0,
        );
        assert_eq!(c.cols, 0);
        assert_eq!(c.capacity, 0);
        assert!(c.is_empty());
    }

    #[test]
    fn test_degenerate_slot_is_zero_capacity() {
        let paper = PixelSize::new(1200.0, 1800.0);
        assert_eq!(compute_capacity(paper, PixelSize::new(0.0, 100.0), 45.0).capacity, 0);
        assert_eq!(compute_capacity(paper, PixelSize::new(-5.0, 100.0), 0.0).capacity, 0);
        assert_eq!(compute_capacity(paper, PixelSize::new(f32::NAN, 100.0), 0.0).capacity, 0);
    }

    #[test]
    fn test_quantity_choices() {
        assert!(quantity_choices(0).is_empty());

        let choices = quantity_choices(6);
        assert_eq!(choices.len(), 7);
        assert_eq!(choices[0], Quantity::Count(1));
        assert_eq!(choices[5], Quantity::Count(6));
        assert_eq!(choices[6], Quantity::Max);

        let choices = quantity_choices(40);
        assert_eq!(choices.len(), 17);
        assert_eq!(choices[15], Quantity::Count(16));
    }

    #[test]
    fn test_active_block() {
        let c = compute_capacity(
            PixelSize::new(1200.0, 1800.0),
            PixelSize::new(400.0, 500.0),
            45.0,
        );
        assert_eq!((c.cols, c.rows), (2, 3));
        assert_eq!(active_block(&c, 1), (1, 1));
        assert_eq!(active_block(&c, 3), (2, 2));
        assert_eq!(active_block(&c, 6), (2, 3));
        assert_eq!(active_block(&c, 0), (0, 0));
    }

    #[test]
    fn test_slot_bounds() {
        let c = compute_capacity(
            PixelSize::new(1200.0, 1800.0),
            PixelSize::new(400.0, 500.0),
            45.0,
        );

        let bounds = slot_bounds(&c, GridPosition::new(0, 0), (10.0, 20.0));
        assert_eq!(bounds, Rect::new(10.0, 20.0, 400.0, 500.0));

        let bounds = slot_bounds(&c, GridPosition::new(2, 1), (10.0, 20.0));
        assert_eq!(bounds.x, 10.0 + 445.0);
        assert_eq!(bounds.y, 20.0 + 2.0 * 545.0);

        let size = block_size(&c, 2, 3);
        assert_eq!(size, PixelSize::new(845.0, 1590.0));
    }
}
