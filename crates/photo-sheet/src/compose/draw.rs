//! Cover-scaled drawing of a subject into one slot

use image::RgbaImage;
use image::imageops;

use crate::layout::{PixelBounds, Rect, cover_rect};
use crate::resample::resize_exact;
use crate::surface::Surface;

/// Subject resampled to the drawn size of a slot.
///
/// Every slot on a sheet has the same size, so each subject only needs to be
/// resampled once per sheet. Only the part of the subject that can show
/// through a slot is resampled, so the buffer never exceeds the slot by more
/// than a pixel per axis.
pub(crate) struct ScaledSubject {
    image: RgbaImage,
}

impl ScaledSubject {
    /// Resample the visible part of `subject` for a `slot`-sized target
    pub(crate) fn new(subject: &RgbaImage, slot: &Rect) -> Self {
        let cover = cover_rect(subject.width() as f32, subject.height() as f32, slot);
        let scale = cover.width / subject.width() as f32;

        // Pixel-snapped slot bounds can be one pixel larger than the slot
        let width = (slot.width.ceil() as u32 + 1).min(cover.width.ceil() as u32).max(1);
        let height = (slot.height.ceil() as u32 + 1).min(cover.height.ceil() as u32).max(1);

        let window = source_window(subject.width(), subject.height(), width, height, scale);
        let visible =
            imageops::crop_imm(subject, window.x, window.y, window.width, window.height)
                .to_image();
        Self {
            image: resize_exact(&visible, width, height),
        }
    }

    /// Draw into `slot`, centered and hard-clipped to the slot bounds
    pub(crate) fn draw(&self, surface: &mut Surface, slot: &Rect) {
        let bounds = slot.to_pixel_bounds(surface.width(), surface.height());
        if bounds.is_empty() {
            return;
        }
        let window = centered_window(self.image.width(), self.image.height(), bounds);
        let visible = imageops::crop_imm(
            &self.image,
            window.x,
            window.y,
            window.width,
            window.height,
        )
        .to_image();
        imageops::overlay(
            surface.image_mut(),
            &visible,
            bounds.x as i64,
            bounds.y as i64,
        );
    }
}

/// The part of a `width x height` drawing that shows through `slot` when the
/// drawing is centered on it
fn centered_window(width: u32, height: u32, slot: PixelBounds) -> PixelBounds {
    let w = slot.width.min(width);
    let h = slot.height.min(height);
    PixelBounds {
        x: (width - w) / 2,
        y: (height - h) / 2,
        width: w,
        height: h,
    }
}

/// Centered region of a `src_width x src_height` source that covers a
/// `width x height` drawing at `scale`
fn source_window(
    src_width: u32,
    src_height: u32,
    width: u32,
    height: u32,
    scale: f32,
) -> PixelBounds {
    let span = |drawn: u32, src: u32| ((drawn as f32 / scale).round() as u32).clamp(1, src);
    let w = span(width, src_width);
    let h = span(height, src_height);
    PixelBounds {
        x: (src_width - w) / 2,
        y: (src_height - h) / 2,
        width: w,
        height: h,
    }
}
