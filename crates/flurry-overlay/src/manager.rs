//! The snowfall effect as a whole.

use flurry_core::{Clock, Command, Profile, SystemClock, Viewport};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use tracing::debug;

use crate::layer::{LayerController, Timing};
use crate::surface::{OverlaySurface, Stylesheet};

/// Everything needed to build an [`EffectManager`].
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub stylesheet: Stylesheet,
    pub timing: Timing,
    /// One layer per profile, in drawing order.
    pub profiles: Vec<Profile>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            stylesheet: Stylesheet::default(),
            timing: Timing::default(),
            profiles: Profile::defaults(),
        }
    }
}

/// Owns the overlay surface and every snowfall layer drawn on it.
///
/// The host creates one manager, forwards viewport resizes to it and calls
/// [`EffectManager::advance`] from its event loop.
#[derive(Debug)]
pub struct EffectManager<S, C = SystemClock> {
    surface: S,
    layers: Vec<LayerController>,
    clock: C,
}

impl<S: OverlaySurface, C: Clock> EffectManager<S, C> {
    /// Install the stylesheet on `surface` and start one layer per profile.
    pub fn initialize<R: RngCore + ?Sized>(
        mut surface: S,
        settings: &Settings,
        viewport: Viewport,
        clock: C,
        rng: &mut R,
    ) -> Self {
        surface.install(settings.stylesheet);

        let now = clock.now_ms();
        let layers = settings
            .profiles
            .iter()
            .map(|&profile| {
                let mut layer = LayerController::new(
                    profile,
                    viewport,
                    settings.timing,
                    StdRng::seed_from_u64(rng.next_u64()),
                );
                layer.start(now);
                layer
            })
            .collect::<Vec<_>>();
        debug!(
            layers = layers.len(),
            width = viewport.width,
            height = viewport.height,
            "snowfall initialized"
        );

        Self {
            surface,
            layers,
            clock,
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn layers(&self) -> &[LayerController] {
        &self.layers
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Live particles across every layer.
    pub fn live_count(&self) -> usize {
        self.layers.iter().map(LayerController::len).sum()
    }

    /// Run a command by name. Unknown names are ignored.
    pub fn command(&mut self, name: &str) -> Option<Command> {
        let Some(command) = Command::parse(name) else {
            debug!(name, "ignoring unknown command");
            return None;
        };
        self.dispatch(command);
        Some(command)
    }

    /// Broadcast a command to every layer in order.
    pub fn dispatch(&mut self, command: Command) {
        debug!(%command, "dispatching");
        let now = self.clock.now_ms();
        for layer in &mut self.layers {
            match command {
                Command::Start => layer.start(now),
                Command::Stop => layer.stop(),
                Command::Spawn => layer.spawn(&mut self.surface),
                Command::Clear => layer.clear(&mut self.surface),
            }
        }
    }

    /// Forward a new viewport size to every layer.
    pub fn resize(&mut self, width: f64, height: f64) {
        debug!(width, height, "viewport resized");
        for layer in &mut self.layers {
            layer.resize(&mut self.surface, width, height);
        }
    }

    /// Run every layer's due spawns and ticks.
    pub fn advance(&mut self) {
        let now = self.clock.now_ms();
        for layer in &mut self.layers {
            layer.advance(&mut self.surface, now);
        }
    }
}
