//! Print sheet composition - tiling photos onto paper
//!
//! This module orchestrates sheet composition:
//! 1. Plan the grid for the paper and photo size
//! 2. Lay out the filled slots (centering, order, subject assignment)
//! 3. Draw each subject cover-scaled into its slot
//! 4. Outline the filled slots with cut guides

mod draw;
mod marks;

use image::{Rgba, RgbaImage};

use crate::codec;
use crate::constants::{SHEET_BACKGROUND, SHEET_JPEG_QUALITY};
use crate::layout::{SheetLayout, plan_sheet, sheet_layout};
use crate::surface::Surface;
use crate::types::{GeometryError, PaperSize, PhotoSize, PrintConfig, Quantity, Result};

use draw::ScaledSubject;
use marks::draw_separators;

/// Everything needed to compose one sheet
#[derive(Debug, Clone)]
pub struct SheetRequest {
    /// Distinct subject rasters, used round-robin
    pub subjects: Vec<RgbaImage>,
    pub quantity: Quantity,
    pub paper: PaperSize,
    pub photo: PhotoSize,
}

impl SheetRequest {
    pub fn new(subjects: Vec<RgbaImage>, paper: PaperSize, photo: PhotoSize) -> Self {
        Self {
            subjects,
            quantity: Quantity::default(),
            paper,
            photo,
        }
    }

    pub fn with_quantity(mut self, quantity: Quantity) -> Self {
        self.quantity = quantity;
        self
    }

    /// Build a request from encoded JPEG/PNG subjects
    pub fn from_encoded(
        encoded: &[Vec<u8>],
        paper: PaperSize,
        photo: PhotoSize,
    ) -> Result<Self> {
        let subjects = encoded
            .iter()
            .map(|bytes| codec::decode(bytes))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(subjects, paper, photo))
    }

    /// Slot layout for this request, without drawing anything
    pub fn layout(&self, config: &PrintConfig) -> Result<SheetLayout> {
        if let Some(index) = self
            .subjects
            .iter()
            .position(|s| s.width() == 0 || s.height() == 0)
        {
            return Err(GeometryError::InvalidArgument(format!(
                "subject {} has zero width or height",
                index
            ))
            .into());
        }
        let capacity = plan_sheet(self.paper, self.photo, config)?;
        let paper = self.paper.physical().to_pixels(config)?;
        sheet_layout(paper, &capacity, self.quantity, self.subjects.len())
    }
}

/// Compose a print sheet.
///
/// The canvas is the paper at `config.dpi`, white, with the requested number
/// of copies centered on it. Fails before any drawing when the photo does not
/// fit on the paper.
pub fn compose_sheet(request: &SheetRequest, config: &PrintConfig) -> Result<RgbaImage> {
    let layout = request.layout(config)?;
    let (width, height) = layout.paper.floor();
    let mut surface = Surface::new(width, height, Rgba(SHEET_BACKGROUND))?;

    let mut scaled: Vec<Option<ScaledSubject>> = Vec::with_capacity(request.subjects.len());
    scaled.resize_with(request.subjects.len(), || None);

    for placement in &layout.placements {
        let subject = scaled[placement.subject].get_or_insert_with(|| {
            ScaledSubject::new(&request.subjects[placement.subject], &placement.rect)
        });
        subject.draw(&mut surface, &placement.rect);
    }

    draw_separators(&mut surface, &layout);

    log::info!(
        "composed {} copies of {} on {} ({}x{} px, capacity {})",
        layout.quantity,
        request.photo,
        request.paper,
        width,
        height,
        layout.capacity.capacity
    );

    Ok(surface.into_image())
}

/// Compose a print sheet and encode it as JPEG
pub fn render_sheet(request: &SheetRequest, config: &PrintConfig) -> Result<Vec<u8>> {
    render_sheet_with_quality(request, config, SHEET_JPEG_QUALITY)
}

/// Compose a print sheet and encode it as JPEG at `quality`
pub fn render_sheet_with_quality(
    request: &SheetRequest,
    config: &PrintConfig,
    quality: f32,
) -> Result<Vec<u8>> {
    let sheet = compose_sheet(request, config)?;
    codec::encode_jpeg(&sheet, quality)
}
