//! Physical length to device pixel conversion
//!
//! All layout math starts here: paper and photo sizes are physical, rasters
//! are pixels, and the bridge is the resolution carried by [`PrintConfig`].
//! Nothing is rounded; callers floor when they allocate buffers.

use crate::constants::{MM_PER_INCH, POINTS_PER_INCH};
use crate::layout::PixelSize;
use crate::types::{GeometryError, PhysicalSize, PrintConfig, Result, Unit};

/// Convert millimeters to inches
#[inline]
pub fn mm_to_in(mm: f32) -> f32 {
    mm / MM_PER_INCH
}

/// Convert inches to millimeters
#[inline]
pub fn in_to_mm(inches: f32) -> f32 {
    inches * MM_PER_INCH
}

/// Convert a length to pixels at the configured resolution.
///
/// Negative or non-finite lengths are rejected.
pub fn to_pixels(value: f32, unit: Unit, config: &PrintConfig) -> Result<f32> {
    if !value.is_finite() || value < 0.0 {
        return Err(GeometryError::InvalidArgument(format!(
            "length must be finite and non-negative, got {}",
            value
        ))
        .into());
    }
    let inches = match unit {
        Unit::Inch => value,
        Unit::Millimeter => mm_to_in(value),
    };
    Ok(inches * config.dpi)
}

/// Convert a pixel count at the configured resolution to PDF points
#[inline]
pub fn px_to_pt(px: f32, config: &PrintConfig) -> f32 {
    px / config.dpi * POINTS_PER_INCH
}

impl PhysicalSize {
    /// Pixel extents of this size at the configured resolution
    pub fn to_pixels(self, config: &PrintConfig) -> Result<PixelSize> {
        Ok(PixelSize::new(
            to_pixels(self.width, self.unit, config)?,
            to_pixels(self.height, self.unit, config)?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inches_to_pixels() {
        let config = PrintConfig::default();
        assert_eq!(to_pixels(4.0, Unit::Inch, &config).unwrap(), 1200.0);
        assert_eq!(to_pixels(6.0, Unit::Inch, &config).unwrap(), 1800.0);
    }

    #[test]
    fn test_millimeters_to_pixels() {
        let config = PrintConfig::default();
        let px = to_pixels(25.4, Unit::Millimeter, &config).unwrap();
        assert!((px - 300.0).abs() < 0.001);

        // 35mm at 300 dpi is about 413.4 px
        let px = to_pixels(35.0, Unit::Millimeter, &config).unwrap();
        assert!((px - 413.386).abs() < 0.01);
    }

    #[test]
    fn test_custom_dpi() {
        let config = PrintConfig::with_dpi(600.0);
        assert_eq!(to_pixels(2.0, Unit::Inch, &config).unwrap(), 1200.0);
    }

    #[test]
    fn test_rejects_negative_and_non_finite() {
        let config = PrintConfig::default();
        assert!(to_pixels(-1.0, Unit::Inch, &config).is_err());
        assert!(to_pixels(f32::NAN, Unit::Millimeter, &config).is_err());
        assert!(to_pixels(f32::INFINITY, Unit::Inch, &config).is_err());
    }

    #[test]
    fn test_px_to_pt() {
        let config = PrintConfig::default();
        // 1200 px at 300 dpi = 4 in = 288 pt
        assert!((px_to_pt(1200.0, &config) - 288.0).abs() < 0.001);
    }
}
