use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::constants::{DEFAULT_DPI, DEFAULT_PADDING_IN};

#[derive(Error, Debug)]
pub enum SheetError {
    #[error("Image decode error: {0}")]
    Decode(#[from] image::ImageError),
    #[error("Drawing surface unavailable ({width}x{height})")]
    CanvasUnavailable { width: u32, height: u32 },
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(#[from] GeometryError),
    #[error("Mask has no painted content")]
    EmptyMask,
    #[error("Encode error: {0}")]
    Encode(String),
    #[error("PDF error: {0}")]
    Pdf(String),
    #[error("Font error: {0}")]
    Font(String),
    #[error("Invalid data URL: {0}")]
    DataUrl(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

/// Caller-contract violations on sizes, rectangles and grids
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    #[error("photo slot does not fit on the paper (capacity is 0)")]
    ZeroCapacity,
    #[error("rectangle {x},{y} {width}x{height} exceeds image bounds {image_width}x{image_height}")]
    RectOutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        image_width: u32,
        image_height: u32,
    },
    #[error("rectangle has zero width or height")]
    EmptyRect,
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

pub type Result<T> = std::result::Result<T, SheetError>;

/// Physical length unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Unit {
    #[default]
    Inch,
    Millimeter,
}

impl Unit {
    pub fn abbreviation(self) -> &'static str {
        match self {
            Unit::Inch => "in",
            Unit::Millimeter => "mm",
        }
    }
}

/// A width/height pair in a physical unit
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PhysicalSize {
    pub width: f32,
    pub height: f32,
    pub unit: Unit,
}

impl PhysicalSize {
    pub const fn inches(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            unit: Unit::Inch,
        }
    }

    pub const fn millimeters(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            unit: Unit::Millimeter,
        }
    }

    /// Dimensions in millimeters regardless of the stored unit
    pub fn to_mm(self) -> (f32, f32) {
        match self.unit {
            Unit::Millimeter => (self.width, self.height),
            Unit::Inch => (
                crate::units::in_to_mm(self.width),
                crate::units::in_to_mm(self.height),
            ),
        }
    }
}

/// Print resolution and slot gutter.
///
/// Passed explicitly into every layout call rather than read from a global.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PrintConfig {
    /// Dots per inch used to turn physical sizes into pixels
    pub dpi: f32,
    /// Gutter between slots and around the grid, in inches
    pub padding_in: f32,
}

impl Default for PrintConfig {
    fn default() -> Self {
        Self {
            dpi: DEFAULT_DPI,
            padding_in: DEFAULT_PADDING_IN,
        }
    }
}

impl PrintConfig {
    pub fn with_dpi(dpi: f32) -> Self {
        Self {
            dpi,
            ..Self::default()
        }
    }

    /// Gutter in pixels at this resolution
    pub fn padding_px(&self) -> f32 {
        self.padding_in * self.dpi
    }

    pub fn validate(&self) -> Result<()> {
        if !self.dpi.is_finite() || self.dpi <= 0.0 {
            return Err(GeometryError::InvalidArgument(format!(
                "dpi must be positive, got {}",
                self.dpi
            ))
            .into());
        }
        if !self.padding_in.is_finite() || self.padding_in < 0.0 {
            return Err(GeometryError::InvalidArgument(format!(
                "padding must be non-negative, got {}",
                self.padding_in
            ))
            .into());
        }
        Ok(())
    }
}

/// Standard photo paper sizes (always portrait)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PaperSize {
    /// 4" x 6" (10 x 15 cm)
    #[default]
    FourBySix,
    /// 5" x 7" (13 x 18 cm)
    FiveBySeven,
    /// 210 x 297 mm, stored in inches as 8.27" x 11.69"
    A4,
    /// 8.5" x 11"
    Letter,
    Custom(PhysicalSize),
}

impl PaperSize {
    pub const PRESETS: [PaperSize; 4] = [
        PaperSize::FourBySix,
        PaperSize::FiveBySeven,
        PaperSize::A4,
        PaperSize::Letter,
    ];

    pub fn physical(self) -> PhysicalSize {
        match self {
            PaperSize::FourBySix => PhysicalSize::inches(4.0, 6.0),
            PaperSize::FiveBySeven => PhysicalSize::inches(5.0, 7.0),
            PaperSize::A4 => PhysicalSize::inches(8.27, 11.69),
            PaperSize::Letter => PhysicalSize::inches(8.5, 11.0),
            PaperSize::Custom(size) => size,
        }
    }

    /// Short identifier, as used in configs and on the command line
    pub fn id(self) -> &'static str {
        match self {
            PaperSize::FourBySix => "4x6",
            PaperSize::FiveBySeven => "5x7",
            PaperSize::A4 => "A4",
            PaperSize::Letter => "Letter",
            PaperSize::Custom(_) => "Custom",
        }
    }
}

impl fmt::Display for PaperSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaperSize::Custom(size) => write!(
                f,
                "{} x {} {}",
                size.width,
                size.height,
                size.unit.abbreviation()
            ),
            preset => f.write_str(preset.id()),
        }
    }
}

impl FromStr for PaperSize {
    type Err = SheetError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "4x6" => Ok(PaperSize::FourBySix),
            "5x7" => Ok(PaperSize::FiveBySeven),
            "a4" => Ok(PaperSize::A4),
            "letter" => Ok(PaperSize::Letter),
            other => Err(SheetError::Config(format!("Unknown paper size: {}", other))),
        }
    }
}

/// Standard identity photo sizes
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PhotoSize {
    /// 35mm x 45mm (EU and most of the world)
    #[default]
    Eu35x45,
    /// 2" x 2" (US, India)
    Us2x2,
    /// 50mm x 70mm (Canada)
    Canada50x70,
    /// 33mm x 48mm (China)
    China33x48,
    Custom(PhysicalSize),
}

impl PhotoSize {
    pub const PRESETS: [PhotoSize; 4] = [
        PhotoSize::Eu35x45,
        PhotoSize::Us2x2,
        PhotoSize::Canada50x70,
        PhotoSize::China33x48,
    ];

    pub fn physical(self) -> PhysicalSize {
        match self {
            PhotoSize::Eu35x45 => PhysicalSize::millimeters(35.0, 45.0),
            PhotoSize::Us2x2 => PhysicalSize::inches(2.0, 2.0),
            PhotoSize::Canada50x70 => PhysicalSize::millimeters(50.0, 70.0),
            PhotoSize::China33x48 => PhysicalSize::millimeters(33.0, 48.0),
            PhotoSize::Custom(size) => size,
        }
    }

    pub fn id(self) -> &'static str {
        match self {
            PhotoSize::Eu35x45 => "35x45mm",
            PhotoSize::Us2x2 => "2x2in",
            PhotoSize::Canada50x70 => "50x70mm",
            PhotoSize::China33x48 => "33x48mm",
            PhotoSize::Custom(_) => "Custom",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PhotoSize::Eu35x45 => "35mm x 45mm (Standard/EU)",
            PhotoSize::Us2x2 => "2\" x 2\" (US/India)",
            PhotoSize::Canada50x70 => "50mm x 70mm (Canada)",
            PhotoSize::China33x48 => "33mm x 48mm (China)",
            PhotoSize::Custom(_) => "Custom",
        }
    }
}

impl fmt::Display for PhotoSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhotoSize::Custom(size) => write!(
                f,
                "{} x {} {}",
                size.width,
                size.height,
                size.unit.abbreviation()
            ),
            preset => f.write_str(preset.id()),
        }
    }
}

impl FromStr for PhotoSize {
    type Err = SheetError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized: String = s
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "35x45" | "35x45mm" | "35mmx45mm" => Ok(PhotoSize::Eu35x45),
            "2x2" | "2x2in" | "2x2inches" => Ok(PhotoSize::Us2x2),
            "50x70" | "50x70mm" | "50mmx70mm" => Ok(PhotoSize::Canada50x70),
            "33x48" | "33x48mm" | "33mmx48mm" => Ok(PhotoSize::China33x48),
            _ => Err(SheetError::Config(format!("Unknown photo size: {}", s.trim()))),
        }
    }
}

/// Requested number of copies on a sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quantity {
    Count(u32),
    /// Fill every slot the sheet can hold
    Max,
}

impl Default for Quantity {
    fn default() -> Self {
        Quantity::Count(8)
    }
}

impl Quantity {
    /// Clamp the request to what the sheet can hold
    pub fn resolve(self, capacity: u32) -> u32 {
        match self {
            Quantity::Count(n) => n.min(capacity),
            Quantity::Max => capacity,
        }
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Quantity::Count(n) => write!(f, "{}", n),
            Quantity::Max => f.write_str("max"),
        }
    }
}

impl FromStr for Quantity {
    type Err = SheetError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("max") {
            return Ok(Quantity::Max);
        }
        s.parse::<u32>()
            .map(Quantity::Count)
            .map_err(|_| {
                SheetError::Config(format!("Quantity must be a number or \"max\", got {}", s))
            })
    }
}
