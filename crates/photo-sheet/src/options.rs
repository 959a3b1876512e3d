use image::RgbaImage;

use crate::compose::SheetRequest;
use crate::constants::SHEET_JPEG_QUALITY;
use crate::types::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Print sheet configuration
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SheetOptions {
    // Sizes
    pub paper: PaperSize,
    pub photo: PhotoSize,

    // Copies
    pub quantity: Quantity,

    // Resolution and gutter
    pub print: PrintConfig,

    // Output
    pub jpeg_quality: f32,
}

impl Default for SheetOptions {
    fn default() -> Self {
        Self {
            paper: PaperSize::default(),
            photo: PhotoSize::default(),
            quantity: Quantity::default(),
            print: PrintConfig::default(),
            jpeg_quality: SHEET_JPEG_QUALITY,
        }
    }
}

impl SheetOptions {
    /// Load options from JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let options = serde_json::from_slice(&bytes)
            .map_err(|e| SheetError::Config(format!("Failed to parse config: {}", e)))?;
        Ok(options)
    }

    /// Save options to JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| SheetError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Validate the options
    pub fn validate(&self) -> Result<()> {
        self.print
            .validate()
            .map_err(|e| SheetError::Config(format!("Invalid print settings: {}", e)))?;

        for (what, size) in [
            ("paper", self.paper.physical()),
            ("photo", self.photo.physical()),
        ] {
            if !(size.width.is_finite() && size.height.is_finite())
                || size.width <= 0.0
                || size.height <= 0.0
            {
                return Err(SheetError::Config(format!(
                    "Custom {} size must be positive, got {} x {}",
                    what, size.width, size.height
                )));
            }
        }

        if self.quantity == Quantity::Count(0) {
            return Err(SheetError::Config("Quantity must be at least 1".to_string()));
        }

        if !(self.jpeg_quality > 0.0 && self.jpeg_quality <= 1.0) {
            return Err(SheetError::Config(format!(
                "JPEG quality must be in (0, 1], got {}",
                self.jpeg_quality
            )));
        }

        Ok(())
    }

    /// Sheet request for `subjects` with these sizes and quantity
    pub fn request(&self, subjects: Vec<RgbaImage>) -> SheetRequest {
        SheetRequest::new(subjects, self.paper, self.photo).with_quantity(self.quantity)
    }
}

#[cfg(feature = "serde")]
mod serde_impls {
    use super::*;
    use serde::de::{self, MapAccess, Visitor};
    use serde::ser::SerializeStruct;
    use serde::{Deserialize, Serialize};
    use std::fmt;

    fn serialize_custom<S>(
        size: &PhysicalSize,
        serializer: S,
    ) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut s = serializer.serialize_struct("Custom", 3)?;
        s.serialize_field("width", &size.width)?;
        s.serialize_field("height", &size.height)?;
        s.serialize_field("unit", &size.unit)?;
        s.end()
    }

    fn visit_custom<'de, M>(mut map: M) -> std::result::Result<PhysicalSize, M::Error>
    where
        M: MapAccess<'de>,
    {
        let mut width = None;
        let mut height = None;
        let mut unit = None;

        while let Some(key) = map.next_key::<String>()? {
            match key.as_str() {
                "width" => width = Some(map.next_value()?),
                "height" => height = Some(map.next_value()?),
                "unit" => unit = Some(map.next_value()?),
                _ => {
                    let _: serde::de::IgnoredAny = map.next_value()?;
                }
            }
        }

        match (width, height) {
            (Some(width), Some(height)) => Ok(PhysicalSize {
                width,
                height,
                unit: unit.unwrap_or_default(),
            }),
            _ => Err(de::Error::missing_field("width or height")),
        }
    }

    impl Serialize for PaperSize {
        fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
        where
            S: serde::Serializer,
        {
            match self {
                PaperSize::Custom(size) => serialize_custom(size, serializer),
                preset => serializer.serialize_str(preset.id()),
            }
        }
    }

    impl<'de> Deserialize<'de> for PaperSize {
        fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
        where
            D: serde::Deserializer<'de>,
        {
            struct PaperSizeVisitor;

            impl<'de> Visitor<'de> for PaperSizeVisitor {
                type Value = PaperSize;

                fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                    formatter.write_str("a paper size")
                }

                fn visit_str<E>(self, value: &str) -> std::result::Result<PaperSize, E>
                where
                    E: de::Error,
                {
                    value.parse().map_err(|_| {
                        de::Error::unknown_variant(value, &["4x6", "5x7", "A4", "Letter", "Custom"])
                    })
                }

                fn visit_map<M>(self, map: M) -> std::result::Result<PaperSize, M::Error>
                where
                    M: MapAccess<'de>,
                {
                    visit_custom(map).map(PaperSize::Custom)
                }
            }

            deserializer.deserialize_any(PaperSizeVisitor)
        }
    }

    impl Serialize for PhotoSize {
        fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
        where
            S: serde::Serializer,
        {
            match self {
                PhotoSize::Custom(size) => serialize_custom(size, serializer),
                preset => serializer.serialize_str(preset.id()),
            }
        }
    }

    impl<'de> Deserialize<'de> for PhotoSize {
        fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
        where
            D: serde::Deserializer<'de>,
        {
            struct PhotoSizeVisitor;

            impl<'de> Visitor<'de> for PhotoSizeVisitor {
                type Value = PhotoSize;

                fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                    formatter.write_str("a photo size")
                }

                fn visit_str<E>(self, value: &str) -> std::result::Result<PhotoSize, E>
                where
                    E: de::Error,
                {
                    value.parse().map_err(|_| {
                        de::Error::unknown_variant(
                            value,
                            &["35x45mm", "2x2in", "50x70mm", "33x48mm", "Custom"],
                        )
                    })
                }

                fn visit_map<M>(self, map: M) -> std::result::Result<PhotoSize, M::Error>
                where
                    M: MapAccess<'de>,
                {
                    visit_custom(map).map(PhotoSize::Custom)
                }
            }

            deserializer.deserialize_any(PhotoSizeVisitor)
        }
    }

    impl Serialize for Quantity {
        fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
        where
            S: serde::Serializer,
        {
            match self {
                Quantity::Count(n) => serializer.serialize_u32(*n),
                Quantity::Max => serializer.serialize_str("max"),
            }
        }
    }

    impl<'de> Deserialize<'de> for Quantity {
        fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
        where
            D: serde::Deserializer<'de>,
        {
            struct QuantityVisitor;

            impl<'de> Visitor<'de> for QuantityVisitor {
                type Value = Quantity;

                fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                    formatter.write_str("a copy count or \"max\"")
                }

                fn visit_u64<E>(self, value: u64) -> std::result::Result<Quantity, E>
                where
                    E: de::Error,
                {
                    u32::try_from(value)
                        .map(Quantity::Count)
                        .map_err(|_| de::Error::custom("quantity out of range"))
                }

                fn visit_i64<E>(self, value: i64) -> std::result::Result<Quantity, E>
                where
                    E: de::Error,
                {
                    u32::try_from(value)
                        .map(Quantity::Count)
                        .map_err(|_| de::Error::custom("quantity out of range"))
                }

                fn visit_str<E>(self, value: &str) -> std::result::Result<Quantity, E>
                where
                    E: de::Error,
                {
                    value.parse().map_err(de::Error::custom)
                }
            }

            deserializer.deserialize_any(QuantityVisitor)
        }
    }
}
