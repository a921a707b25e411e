//! Layer profiles.

use serde::{Deserialize, Serialize};

/// Settings shared by every particle of one snowfall layer.
///
/// A profile is fixed for the lifetime of the layer it is given to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// Maximum number of live particles.
    pub limit: usize,
    /// Visual softness; larger values render dimmer, rounder flakes.
    pub blur: f64,
    /// Vertical distance travelled per tick.
    pub fall_rate: f64,
    /// Horizontal drift added per tick on top of the sway wave.
    pub sway_rate: f64,
}

impl Profile {
    pub const fn new(limit: usize, blur: f64, fall_rate: f64, sway_rate: f64) -> Self {
        Self {
            limit,
            blur,
            fall_rate,
            sway_rate,
        }
    }

    /// The three stock layers: a sparse sharp foreground, a middle layer and
    /// a dense soft background.
    pub fn defaults() -> Vec<Profile> {
        vec![
            Profile::new(20, 0.0, 2.0, 0.5),
            Profile::new(35, 1.0, 1.2, 0.3),
            Profile::new(60, 2.0, 0.6, 0.1),
        ]
    }
}
