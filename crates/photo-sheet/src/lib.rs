pub mod adjust;
mod blend;
pub mod codec;
pub mod compose;
pub mod constants;
mod crop;
pub mod export;
pub mod io;
pub mod layout;
pub mod mask;
mod options;
pub mod resample;
mod stats;
pub mod surface;
mod text;
mod types;
pub mod units;
mod upload;

pub use adjust::{AdjustmentSpec, FilterKind, apply_adjustments, render_adjusted};
pub use blend::blend_result;
pub use compose::{SheetRequest, compose_sheet, render_sheet};
pub use crop::{PixelRect, extract_crop, render_crop};
pub use export::{ExportFormat, export, export_pdf};
pub use io::{load_font, load_image, load_images, save_bytes};
pub use layout::{Capacity, SheetLayout, plan_sheet};
pub use mask::{BinaryMask, MaskSession, MaskStroke, Point, StrokeMode};
pub use options::*;
pub use stats::{SheetStatistics, calculate_statistics, capacity_statistics};
pub use text::{
    FontArc, TextOverlay, apply_text, font_from_bytes, parse_hex_color, render_text,
};
pub use types::*;
pub use upload::{PreparedImage, prepare_upload};
