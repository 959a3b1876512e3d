//! Affine color matrices
//!
//! Each adjustment is a 3x4 matrix over RGB in `0..=255` (the fourth column
//! is the offset). Matrices are chained with [`ColorMatrix::then`] so a whole
//! filter chain costs one multiply per pixel and one clamp at the end.
//! Coefficients follow the CSS filter-effects definitions.

use image::RgbaImage;

/// Row-major `[r, g, b, offset]` rows for the R, G and B outputs
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorMatrix {
    rows: [[f32; 4]; 3],
}

impl Default for ColorMatrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl ColorMatrix {
    pub const IDENTITY: Self = Self {
        rows: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
        ],
    };

    fn linear(m: [[f32; 3]; 3]) -> Self {
        Self {
            rows: [
                [m[0][0], m[0][1], m[0][2], 0.0],
                [m[1][0], m[1][1], m[1][2], 0.0],
                [m[2][0], m[2][1], m[2][2], 0.0],
            ],
        }
    }

    fn per_channel(slope: f32, intercept: f32) -> Self {
        Self {
            rows: [
                [slope, 0.0, 0.0, intercept],
                [0.0, slope, 0.0, intercept],
                [0.0, 0.0, slope, intercept],
            ],
        }
    }

    /// `brightness(amount)`; 1.0 leaves colors unchanged
    pub fn brightness(amount: f32) -> Self {
        Self::per_channel(amount, 0.0)
    }

    /// `contrast(amount)`; 1.0 leaves colors unchanged
    pub fn contrast(amount: f32) -> Self {
        Self::per_channel(amount, 127.5 * (1.0 - amount))
    }

    /// `grayscale(amount)` with amount in `0..=1`
    pub fn grayscale(amount: f32) -> Self {
        let k = 1.0 - amount.clamp(0.0, 1.0);
        Self::linear([
            [0.2126 + 0.7874 * k, 0.7152 - 0.7152 * k, 0.0722 - 0.0722 * k],
            [0.2126 - 0.2126 * k, 0.7152 + 0.2848 * k, 0.0722 - 0.0722 * k],
            [0.2126 - 0.2126 * k, 0.7152 - 0.7152 * k, 0.0722 + 0.9278 * k],
        ])
    }

    /// `sepia(amount)` with amount in `0..=1`
    pub fn sepia(amount: f32) -> Self {
        let k = 1.0 - amount.clamp(0.0, 1.0);
        Self::linear([
            [0.393 + 0.607 * k, 0.769 - 0.769 * k, 0.189 - 0.189 * k],
            [0.349 - 0.349 * k, 0.686 + 0.314 * k, 0.168 - 0.168 * k],
            [0.272 - 0.272 * k, 0.534 - 0.534 * k, 0.131 + 0.869 * k],
        ])
    }

    /// `saturate(amount)`; 1.0 leaves colors unchanged
    pub fn saturate(s: f32) -> Self {
        Self::linear([
            [0.213 + 0.787 * s, 0.715 - 0.715 * s, 0.072 - 0.072 * s],
            [0.213 - 0.213 * s, 0.715 + 0.285 * s, 0.072 - 0.072 * s],
            [0.213 - 0.213 * s, 0.715 - 0.715 * s, 0.072 + 0.928 * s],
        ])
    }

    /// `invert(amount)` with amount in `0..=1`
    pub fn invert(amount: f32) -> Self {
        let a = amount.clamp(0.0, 1.0);
        Self::per_channel(1.0 - 2.0 * a, 255.0 * a)
    }

    /// Apply `self` first, then `next`
    pub fn then(self, next: ColorMatrix) -> ColorMatrix {
        let a = &self.rows;
        let b = &next.rows;
        let mut rows = [[0.0f32; 4]; 3];
        for (i, row) in rows.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate().take(3) {
                *cell = b[i][0] * a[0][j] + b[i][1] * a[1][j] + b[i][2] * a[2][j];
            }
            row[3] = b[i][0] * a[0][3] + b[i][1] * a[1][3] + b[i][2] * a[2][3] + b[i][3];
        }
        ColorMatrix { rows }
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// Transform one RGB triple, rounded and clamped to `0..=255`
    #[inline]
    pub fn transform(&self, rgb: [u8; 3]) -> [u8; 3] {
        let [r, g, b] = rgb.map(|c| c as f32);
        let out = |row: &[f32; 4]| {
            (row[0] * r + row[1] * g + row[2] * b + row[3])
                .round()
                .clamp(0.0, 255.0) as u8
        };
        [out(&self.rows[0]), out(&self.rows[1]), out(&self.rows[2])]
    }

    /// Transform every pixel in place; alpha is untouched
    pub fn apply(&self, image: &mut RgbaImage) {
        if self.is_identity() {
            return;
        }
        for pixel in image.pixels_mut() {
            let [r, g, b] = self.transform([pixel[0], pixel[1], pixel[2]]);
            pixel[0] = r;
            pixel[1] = g;
            pixel[2] = b;
        }
    }
}
