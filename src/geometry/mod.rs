pub mod crop;
pub mod rotate;
pub mod scale;

/// Axis-aligned rectangle in canvas pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Rect {
    pub const fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Rectangle anchored at `(left, top)` with the given size.
    pub fn from_size(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self::new(left, top, left + width, top + height)
    }

    pub fn width(&self) -> f32 {
        (self.right - self.left).max(0.0)
    }

    pub fn height(&self) -> f32 {
        (self.bottom - self.top).max(0.0)
    }

    /// Whether the rectangle lies fully within a `width x height` canvas.
    pub fn fits_within(&self, width: u32, height: u32) -> bool {
        self.left >= 0.0
            && self.top >= 0.0
            && self.right <= width as f32
            && self.bottom <= height as f32
            && self.left <= self.right
            && self.top <= self.bottom
    }

    /// Whether the interiors of two rectangles overlap.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left < other.right
            && other.left < self.right
            && self.top < other.bottom
            && other.top < self.bottom
    }

    /// Top-left offset that centers a `width x height` box inside this
    /// rectangle, rounded to the nearest pixel.
    pub fn centered_origin(&self, width: u32, height: u32) -> (i64, i64) {
        let x = self.left + (self.width() - width as f32) / 2.0;
        let y = self.top + (self.height() - height as f32) / 2.0;
        (x.round() as i64, y.round() as i64)
    }
}
