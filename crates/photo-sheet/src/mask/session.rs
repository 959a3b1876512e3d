//! Pointer-driven mask painting session
//!
//! ```text
//!          pointer_down            pointer_up / pointer_leave
//!   Idle ---------------> Drawing ---------------------------> Idle
//!     ^                      | pointer_move (paints a segment)
//!     |        clear()       |
//!     +----------------------+
//! ```
//!
//! `commit` consumes the session and is refused while nothing was painted.

use crate::constants::DEFAULT_BRUSH_RADIUS;
use crate::types::{GeometryError, Result, SheetError};

use super::{
    BinaryMask, DisplayMapping, MaskAccumulator, MaskStroke, Point, StrokeMode, commit_mask,
};

/// Where the session is in the pointer sequence
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SessionState {
    Idle,
    /// A drag is in progress; `last` is its latest native point
    Drawing { last: Point },
}

/// One selection-painting session over one source image
#[derive(Debug, Clone)]
pub struct MaskSession {
    accumulator: MaskAccumulator,
    mapping: DisplayMapping,
    brush_radius: f32,
    mode: StrokeMode,
    state: SessionState,
    has_content: bool,
}

impl MaskSession {
    /// Start a session over a `width x height` source image, with display
    /// coordinates equal to native ones
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Ok(Self {
            accumulator: MaskAccumulator::new(width, height)?,
            mapping: DisplayMapping::identity(),
            brush_radius: DEFAULT_BRUSH_RADIUS,
            mode: StrokeMode::Paint,
            state: SessionState::Idle,
            has_content: false,
        })
    }

    /// Map pointer coordinates from a scaled display of the image
    pub fn with_mapping(mut self, mapping: DisplayMapping) -> Self {
        self.mapping = mapping;
        self
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Whether anything has been painted since the start or the last clear
    pub fn has_content(&self) -> bool {
        self.has_content
    }

    pub fn accumulator(&self) -> &MaskAccumulator {
        &self.accumulator
    }

    pub fn brush_radius(&self) -> f32 {
        self.brush_radius
    }

    /// Brush radius in native pixels
    pub fn set_brush_radius(&mut self, radius: f32) -> Result<()> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(GeometryError::InvalidArgument(format!(
                "brush radius must be positive, got {}",
                radius
            ))
            .into());
        }
        self.brush_radius = radius;
        Ok(())
    }

    pub fn mode(&self) -> StrokeMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: StrokeMode) {
        self.mode = mode;
    }

    /// Begin a drag at a display point; paints a dot there
    pub fn pointer_down(&mut self, display: Point) -> Result<()> {
        let point = self.mapping.to_native(display);
        self.begin(point)
    }

    /// Continue a drag; ignored while idle
    pub fn pointer_move(&mut self, display: Point) -> Result<()> {
        let point = self.mapping.to_native(display);
        self.extend(point)
    }

    /// End the drag
    pub fn pointer_up(&mut self) {
        self.state = SessionState::Idle;
    }

    /// The pointer left the drawing area; ends the drag like `pointer_up`
    pub fn pointer_leave(&mut self) {
        self.pointer_up();
    }

    /// Replay a stroke given in native pixels, with its own brush and mode
    pub fn apply_stroke(&mut self, stroke: &MaskStroke) -> Result<()> {
        if stroke.path.is_empty() {
            return Ok(());
        }
        let (radius, mode) = (self.brush_radius, self.mode);
        self.set_brush_radius(stroke.brush_radius)?;
        self.mode = stroke.mode;

        let result = stroke
            .path
            .iter()
            .enumerate()
            .try_for_each(|(i, &p)| if i == 0 { self.begin(p) } else { self.extend(p) });
        self.pointer_up();

        self.brush_radius = radius;
        self.mode = mode;
        result
    }

    /// Empty the layer and return to idle
    pub fn clear(&mut self) {
        self.accumulator.clear();
        self.state = SessionState::Idle;
        self.has_content = false;
    }

    /// Reduce the painted layer to a binary mask, ending the session
    pub fn commit(self) -> Result<BinaryMask> {
        if !self.has_content {
            return Err(SheetError::EmptyMask);
        }
        let mask = commit_mask(self.accumulator.image());
        log::info!(
            "committed {}x{} mask ({} px selected)",
            mask.width(),
            mask.height(),
            mask.selected_count()
        );
        Ok(mask)
    }

    fn begin(&mut self, point: Point) -> Result<()> {
        self.accumulator
            .paint_segment(point, point, self.brush_radius, self.mode)?;
        self.state = SessionState::Drawing { last: point };
        self.has_content = true;
        Ok(())
    }

    fn extend(&mut self, point: Point) -> Result<()> {
        let SessionState::Drawing { last } = self.state else {
            return Ok(());
        };
        self.accumulator
            .paint_segment(last, point, self.brush_radius, self.mode)?;
        self.state = SessionState::Drawing { last: point };
        Ok(())
    }
}
