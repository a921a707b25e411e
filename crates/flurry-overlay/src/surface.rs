//! The drawing surface particles live on.

use flurry_core::{Size, Viewport};

/// Identity of one element on an [`OverlaySurface`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ElementId(pub u64);

/// Presentation rules shared by every flake on a surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stylesheet {
    /// Overlay units covered by one terminal cell.
    pub cell: Size,
    /// Intrinsic width and height of a flake.
    pub flake_size: f64,
    /// Flake hue in degrees; `None` for white.
    pub tint: Option<f32>,
}

impl Default for Stylesheet {
    fn default() -> Self {
        Self {
            cell: Size::new(8.0, 16.0),
            flake_size: 6.0,
            tint: None,
        }
    }
}

impl Stylesheet {
    /// Size in overlay units of an area of `width` x `height` cells.
    pub fn viewport_for(&self, width: u16, height: u16) -> Viewport {
        Viewport::new(
            f64::from(width) * self.cell.width,
            f64::from(height) * self.cell.height,
        )
    }
}

/// Capabilities the layer controllers need from a rendering backend.
///
/// Positions are in overlay units with the origin at the top left corner
/// of the viewport.
pub trait OverlaySurface {
    /// Install the shared presentation rules. Called once per overlay.
    fn install(&mut self, stylesheet: Stylesheet);

    /// Create and attach a flake with the given blur.
    fn create_flake(&mut self, blur: f64) -> ElementId;

    /// Move an attached element.
    fn place(&mut self, element: ElementId, x: f64, y: f64);

    /// Intrinsic size of an element.
    fn extent(&self, element: ElementId) -> Size;

    /// Detach an element; its id must not be used again.
    fn detach(&mut self, element: ElementId);
}
