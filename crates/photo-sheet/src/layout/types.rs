//! Layout data types for sheet composition
//!
//! These types represent the intermediate layout calculations between
//! capacity planning and raster drawing. All coordinates are device pixels
//! with the origin at the top-left corner of the sheet.

/// Width and height in (possibly fractional) pixels
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PixelSize {
    pub width: f32,
    pub height: f32,
}

impl PixelSize {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Integer buffer dimensions (floored)
    pub fn floor(&self) -> (u32, u32) {
        (self.width.floor() as u32, self.height.floor() as u32)
    }
}

/// Position within the grid (row, column)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridPosition {
    /// Row index (0 = top row)
    pub row: usize,
    /// Column index (0 = leftmost column)
    pub col: usize,
}

impl GridPosition {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// How many slots of one size fit on one paper size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Capacity {
    /// Number of slot columns
    pub cols: u32,
    /// Number of slot rows
    pub rows: u32,
    /// `cols * rows`
    pub capacity: u32,
    /// Slot size in pixels
    pub slot: PixelSize,
    /// Gutter between slots in pixels
    pub padding: f32,
}

impl Capacity {
    pub fn is_empty(&self) -> bool {
        self.capacity == 0
    }
}

/// How a source is scaled into a target rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalingMode {
    /// Fit inside the target (preserve aspect ratio, may letterbox)
    Fit,
    /// Fill the target (preserve aspect ratio, overflow is cropped)
    Fill,
}

/// A rectangular area in pixels
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// X position (left edge)
    pub x: f32,
    /// Y position (top edge)
    pub y: f32,
    /// Width
    pub width: f32,
    /// Height
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge x coordinate
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge y coordinate
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Snap the edges to whole pixels, clipped to a `width x height` surface.
    ///
    /// Edges are rounded independently so neighbouring rectangles that share
    /// an edge also share the snapped pixel column.
    pub fn to_pixel_bounds(&self, width: u32, height: u32) -> PixelBounds {
        let snap = |v: f32, max: u32| v.round().clamp(0.0, max as f32) as u32;
        let left = snap(self.x, width);
        let top = snap(self.y, height);
        let right = snap(self.right(), width).max(left);
        let bottom = snap(self.bottom(), height).max(top);
        PixelBounds {
            x: left,
            y: top,
            width: right - left,
            height: bottom - top,
        }
    }
}

/// Integer pixel rectangle on a concrete surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PixelBounds {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl PixelBounds {
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// One filled slot on the sheet
#[derive(Debug, Clone, PartialEq)]
pub struct SlotPlacement {
    /// Fill order (0 = first drawn)
    pub index: usize,
    /// Where the slot sits in the full grid
    pub grid_pos: GridPosition,
    /// Slot rectangle on the sheet
    pub rect: Rect,
    /// Index into the request's subject list
    pub subject: usize,
}

/// Complete layout of a sheet, before any pixels are touched
#[derive(Debug, Clone, PartialEq)]
pub struct SheetLayout {
    /// Paper size in pixels
    pub paper: PixelSize,
    /// Grid and capacity on this paper
    pub capacity: Capacity,
    /// Number of slots that will be filled
    pub quantity: u32,
    /// Top-left corner of the centered block
    pub origin: (f32, f32),
    /// Filled slots in drawing order
    pub placements: Vec<SlotPlacement>,
}
