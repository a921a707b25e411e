//! A single flake.

use flurry_core::Rect;

use crate::surface::{ElementId, OverlaySurface};

/// One flake and its position.
///
/// The position fields are authoritative; every setter writes the new
/// position through to the surface element.
#[derive(Debug, PartialEq)]
pub struct Particle {
    element: ElementId,
    x: f64,
    y: f64,
}

impl Particle {
    /// Create a flake at `(x, y)` and attach it to `surface`.
    pub fn new<S: OverlaySurface + ?Sized>(x: f64, y: f64, surface: &mut S, blur: f64) -> Self {
        let element = surface.create_flake(blur);
        surface.place(element, x, y);
        Self { element, x, y }
    }

    pub fn element(&self) -> ElementId {
        self.element
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn set_x<S: OverlaySurface + ?Sized>(&mut self, surface: &mut S, x: f64) {
        self.x = x;
        surface.place(self.element, self.x, self.y);
    }

    pub fn set_y<S: OverlaySurface + ?Sized>(&mut self, surface: &mut S, y: f64) {
        self.y = y;
        surface.place(self.element, self.x, self.y);
    }

    /// Update both coordinates with a single write to the surface.
    pub fn move_to<S: OverlaySurface + ?Sized>(&mut self, surface: &mut S, x: f64, y: f64) {
        self.x = x;
        self.y = y;
        surface.place(self.element, self.x, self.y);
    }

    /// Bounding box in viewport coordinates.
    pub fn bounds<S: OverlaySurface + ?Sized>(&self, surface: &S) -> Rect {
        Rect::from_origin(self.x, self.y, surface.extent(self.element))
    }

    /// Detach the flake from the surface.
    pub fn destroy<S: OverlaySurface + ?Sized>(self, surface: &mut S) {
        surface.detach(self.element);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terminal::TerminalOverlay;

    #[test]
    fn test_new_attaches_element() {
        let mut overlay = TerminalOverlay::new();
        let particle = Particle::new(12.0, 0.0, &mut overlay, 1.0);
        assert_eq!(overlay.len(), 1);
        assert_eq!(overlay.position(particle.element()), Some((12.0, 0.0)));
        assert_eq!(overlay.blur(particle.element()), Some(1.0));
    }

    #[test]
    fn test_setters_write_through() {
        let mut overlay = TerminalOverlay::new();
        let mut particle = Particle::new(0.0, 0.0, &mut overlay, 0.0);
        particle.set_x(&mut overlay, 40.5);
        assert_eq!(particle.x(), 40.5);
        particle.set_y(&mut overlay, 7.25);
        assert_eq!(particle.y(), 7.25);
        assert_eq!(overlay.position(particle.element()), Some((40.5, 7.25)));
        particle.move_to(&mut overlay, 1.0, 2.0);
        assert_eq!(overlay.position(particle.element()), Some((1.0, 2.0)));
    }

    #[test]
    fn test_bounds_use_intrinsic_size() {
        let mut overlay = TerminalOverlay::new();
        let particle = Particle::new(3.0, 4.0, &mut overlay, 0.0);
        let size = overlay.stylesheet().flake_size;
        assert_eq!(particle.bounds(&overlay), Rect::new(3.0, 4.0, size, size));
    }

    #[test]
    fn test_destroy_detaches() {
        let mut overlay = TerminalOverlay::new();
        let particle = Particle::new(0.0, 0.0, &mut overlay, 0.0);
        let element = particle.element();
        particle.destroy(&mut overlay);
        assert!(!overlay.contains(element));
        assert!(overlay.is_empty());
    }
}
