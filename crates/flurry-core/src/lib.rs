//! Core types for the flurry snowfall overlay.
//!
//! Everything here is independent of the rendering backend: layer profiles,
//! the command set, geometry, the sway wave and the clock abstractions the
//! animation loop is driven by.

mod clock;
mod command;
mod geometry;
mod profile;
mod wave;

pub use clock::{Clock, Interval, ManualClock, SystemClock};
pub use command::Command;
pub use geometry::{Rect, Size, Viewport};
pub use profile::Profile;
pub use wave::{SWAY_AMPLITUDE, SWAY_FREQUENCY, sine_wave, sway};
