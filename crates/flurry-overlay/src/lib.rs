//! Layered snowfall overlay.
//!
//! An [`EffectManager`] owns a shared [`OverlaySurface`] and one
//! [`LayerController`] per [`Profile`](flurry_core::Profile). Each layer
//! fills itself up gradually, lets its flakes fall and sway on a fixed tick,
//! and replaces flakes that leave the viewport. [`TerminalOverlay`] is the
//! surface used to draw the flakes over a ratatui frame.

mod chars;
mod color;
mod layer;
mod manager;
mod particle;
mod population;
mod surface;
mod terminal;

pub use chars::{FLAKE_CHARS, flake_char};
pub use color::{flake_color, hsl_to_rgb};
pub use layer::{LayerController, Timing};
pub use manager::{EffectManager, Settings};
pub use particle::Particle;
pub use population::Population;
pub use surface::{ElementId, OverlaySurface, Stylesheet};
pub use terminal::TerminalOverlay;
