use crate::layout::{SheetLayout, plan_sheet, quantity_choices};
use crate::types::*;

/// Summary of a sheet layout, for display before composing
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SheetStatistics {
    pub cols: u32,
    pub rows: u32,
    pub capacity: u32,
    /// Copies that will actually be printed
    pub copies: u32,
    /// Slots left blank on the sheet
    pub empty_slots: u32,
    /// Copies per subject, in subject order
    pub copies_per_subject: Vec<u32>,
    /// Paper size in pixels (floored)
    pub paper_px: (u32, u32),
    /// Slot size in pixels (floored)
    pub slot_px: (u32, u32),
    /// Quantities worth offering for this sheet
    pub quantity_choices: Vec<Quantity>,
}

/// Calculate statistics for a laid-out sheet
pub fn calculate_statistics(layout: &SheetLayout, subject_count: usize) -> SheetStatistics {
    let capacity = &layout.capacity;

    let mut copies_per_subject = vec![0u32; subject_count];
    for placement in &layout.placements {
        if let Some(count) = copies_per_subject.get_mut(placement.subject) {
            *count += 1;
        }
    }

    SheetStatistics {
        cols: capacity.cols,
        rows: capacity.rows,
        capacity: capacity.capacity,
        copies: layout.quantity,
        empty_slots: capacity.capacity.saturating_sub(layout.quantity),
        copies_per_subject,
        paper_px: layout.paper.floor(),
        slot_px: capacity.slot.floor(),
        quantity_choices: quantity_choices(capacity.capacity),
    }
}

/// Capacity-only statistics, when no subjects have been chosen yet.
///
/// A photo that does not fit is not an error here; the zero capacity is
/// reported as is.
pub fn capacity_statistics(
    paper: PaperSize,
    photo: PhotoSize,
    config: &PrintConfig,
) -> Result<SheetStatistics> {
    let capacity = plan_sheet(paper, photo, config)?;
    let paper_px = paper.physical().to_pixels(config)?;

    Ok(SheetStatistics {
        cols: capacity.cols,
        rows: capacity.rows,
        capacity: capacity.capacity,
        copies: 0,
        empty_slots: capacity.capacity,
        copies_per_subject: Vec::new(),
        paper_px: paper_px.floor(),
        slot_px: capacity.slot.floor(),
        quantity_choices: quantity_choices(capacity.capacity),
    })
}
