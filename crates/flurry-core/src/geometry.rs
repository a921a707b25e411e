//! Geometry shared by the overlay surface and the layer controllers.

/// Width and height of an element or area, in overlay units.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Cached dimensions of the visible area particles fall through.
pub type Viewport = Size;

/// Axis-aligned bounding box in viewport coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Box at `(x, y)` with the given size.
    pub const fn from_origin(x: f64, y: f64, size: Size) -> Self {
        Self::new(x, y, size.width, size.height)
    }

    pub fn left(&self) -> f64 {
        self.x
    }

    pub fn top(&self) -> f64 {
        self.y
    }

    /// Whether the box has travelled fully past the right or bottom edge of
    /// the viewport, with a margin of its own size.
    ///
    /// Boxes drifting off the left or top edge are not considered gone.
    pub fn has_left(&self, viewport: Viewport) -> bool {
        self.left() > viewport.width + self.width || self.top() > viewport.height + self.height
    }
}
