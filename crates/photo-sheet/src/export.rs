//! Final artefact export: PNG, JPEG and single-page PDF
//!
//! The PDF page is the paper the sheet was laid out for, so a sheet printed
//! at 100% comes out at its physical size.

use image::RgbaImage;
use printpdf::{
    Mm, Op, PdfDocument, PdfPage, PdfSaveOptions, RawImage, RawImageData, RawImageFormat,
    XObjectTransform,
};

use crate::codec::{self, ImageFormat};
use crate::constants::EXPORT_JPEG_QUALITY;
use crate::layout::{Rect, fit_rect};
use crate::types::{PaperSize, PrintConfig, Result, SheetError};
use crate::units::px_to_pt;

/// Export format for a finished image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ExportFormat {
    Png,
    #[default]
    Jpeg,
    Pdf,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Png => ImageFormat::Png.extension(),
            ExportFormat::Jpeg => ImageFormat::Jpeg.extension(),
            ExportFormat::Pdf => "pdf",
        }
    }
}

/// Lossless PNG export
pub fn export_png(image: &RgbaImage) -> Result<Vec<u8>> {
    codec::encode_png(image)
}

/// JPEG export, flattened onto white
pub fn export_jpeg(image: &RgbaImage) -> Result<Vec<u8>> {
    codec::encode_jpeg(image, EXPORT_JPEG_QUALITY)
}

/// Page size in millimeters for a paper; ISO sizes use their exact metric
/// dimensions
pub fn page_size_mm(paper: PaperSize) -> (f32, f32) {
    match paper {
        PaperSize::A4 => (210.0, 297.0),
        other => other.physical().to_mm(),
    }
}

/// Export a raster as a one-page portrait PDF sized to `paper`.
///
/// The raster is scaled to fit the page (aspect ratio kept) and centered.
pub fn export_pdf(image: &RgbaImage, paper: PaperSize, config: &PrintConfig) -> Result<Vec<u8>> {
    config.validate()?;
    let (page_w_mm, page_h_mm) = page_size_mm(paper);
    let (px_w, px_h) = image.dimensions();
    if px_w == 0 || px_h == 0 {
        return Err(SheetError::Pdf("cannot export an empty image".into()));
    }

    let page = Rect::new(0.0, 0.0, page_w_mm, page_h_mm);
    let placed = fit_rect(px_w as f32, px_h as f32, &page);

    let mut doc = PdfDocument::new("Photo Sheet");
    let rgb = codec::flatten_onto_white(image);
    let raw = RawImage {
        pixels: RawImageData::U8(rgb.into_raw()),
        width: px_w as usize,
        height: px_h as usize,
        data_format: RawImageFormat::RGB8,
        tag: Vec::new(),
    };
    let image_id = doc.add_image(&raw);

    // Native size of the image at `dpi`, in points
    let native_w_pt = px_to_pt(px_w as f32, config);
    let native_h_pt = px_to_pt(px_h as f32, config);
    let target_w_pt = Mm(placed.width).into_pt().0;
    let target_h_pt = Mm(placed.height).into_pt().0;

    // PDF origin is bottom-left
    let bottom_mm = page_h_mm - placed.bottom();
    let ops = vec![Op::UseXobject {
        id: image_id,
        transform: XObjectTransform {
            translate_x: Some(Mm(placed.x).into_pt()),
            translate_y: Some(Mm(bottom_mm).into_pt()),
            scale_x: Some(target_w_pt / native_w_pt),
            scale_y: Some(target_h_pt / native_h_pt),
            dpi: Some(config.dpi),
            ..Default::default()
        },
    }];

    doc.pages.push(PdfPage::new(Mm(page_w_mm), Mm(page_h_mm), ops));

    let mut warnings = Vec::new();
    let bytes = doc.save(&PdfSaveOptions::default(), &mut warnings);
    if !warnings.is_empty() {
        log::debug!("pdf export produced {} warnings", warnings.len());
    }

    log::info!(
        "exported {}x{} px image to {:.1}x{:.1} mm PDF page ({} bytes)",
        px_w,
        px_h,
        page_w_mm,
        page_h_mm,
        bytes.len()
    );
    Ok(bytes)
}

/// Translate an export request into bytes
pub fn export(
    image: &RgbaImage,
    format: ExportFormat,
    paper: PaperSize,
    config: &PrintConfig,
) -> Result<Vec<u8>> {
    match format {
        ExportFormat::Png => export_png(image),
        ExportFormat::Jpeg => export_jpeg(image),
        ExportFormat::Pdf => export_pdf(image, paper, config),
    }
}
