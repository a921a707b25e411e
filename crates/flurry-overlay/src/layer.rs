//! One layer of snowfall.

use flurry_core::{Interval, Profile, Viewport, sway};
use rand::Rng;
use rand::rngs::StdRng;
use tracing::{debug, trace};

use crate::particle::Particle;
use crate::population::Population;
use crate::surface::{ElementId, OverlaySurface};

/// Scheduling parameters shared by every layer of an overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    /// Period of the animation tick.
    pub tick_ms: u64,
    /// Longest delay between two spawns while a layer fills up.
    pub stagger_max_ms: u64,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            tick_ms: 17,
            stagger_max_ms: 400,
        }
    }
}

/// Owns the particles of one layer and drives their lifecycle.
///
/// A controller is created stopped. Once started it fills itself up to the
/// profile's limit over time and animates its particles on every tick,
/// replacing particles that fall out of the viewport.
#[derive(Debug)]
pub struct LayerController {
    profile: Profile,
    particles: Vec<Particle>,
    /// Last viewport size reported through [`LayerController::resize`].
    viewport: Viewport,
    timing: Timing,
    active: bool,
    ticker: Option<Interval>,
    population: Option<Population>,
    rng: StdRng,
}

impl LayerController {
    pub fn new(profile: Profile, viewport: Viewport, timing: Timing, rng: StdRng) -> Self {
        Self {
            profile,
            particles: Vec::with_capacity(profile.limit),
            viewport,
            timing,
            active: false,
            ticker: None,
            population: None,
            rng,
        }
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Whether the staggered initial population is still running.
    pub fn is_populating(&self) -> bool {
        self.population.is_some()
    }

    /// Begin populating and animating. Does nothing if already running.
    pub fn start(&mut self, now_ms: u64) {
        if self.active {
            return;
        }
        self.active = true;
        self.population = Some(Population::begin(
            self.particles.len(),
            now_ms,
            self.timing.stagger_max_ms,
            &mut self.rng,
        ));
        self.ticker = Some(Interval::new(self.timing.tick_ms, now_ms));
        debug!(limit = self.profile.limit, live = self.len(), "layer started");
    }

    /// Freeze the layer. Pending spawns and ticks are dropped.
    pub fn stop(&mut self) {
        if self.active {
            debug!(live = self.len(), "layer stopped");
        }
        self.active = false;
        self.ticker = None;
        self.population = None;
    }

    /// Add one particle at a random column along the top edge.
    ///
    /// The limit is not checked here; callers make room first.
    pub fn spawn<S: OverlaySurface + ?Sized>(&mut self, surface: &mut S) {
        let x = if self.viewport.width.is_finite() && self.viewport.width > 0.0 {
            self.rng.gen_range(0.0..self.viewport.width)
        } else {
            0.0
        };
        self.particles
            .push(Particle::new(x, 0.0, surface, self.profile.blur));
    }

    /// Run due population steps and ticks up to `now_ms`.
    pub fn advance<S: OverlaySurface + ?Sized>(&mut self, surface: &mut S, now_ms: u64) {
        if !self.active {
            return;
        }
        self.populate(surface, now_ms);
        let ticks = self.ticker.as_mut().map_or(0, |ticker| ticker.poll(now_ms));
        for _ in 0..ticks {
            self.animate(surface, now_ms);
        }
    }

    fn populate<S: OverlaySurface + ?Sized>(&mut self, surface: &mut S, now_ms: u64) {
        while let Some(mut population) = self.population {
            if !population.is_due(now_ms) {
                break;
            }
            if population.next_index() >= self.profile.limit
                || self.particles.len() >= self.profile.limit
            {
                self.population = None;
                trace!(live = self.len(), "layer populated");
                break;
            }
            self.spawn(surface);
            population.advance(&mut self.rng);
            self.population = Some(population);
        }
    }

    /// Move every particle one step and recycle those that left the viewport.
    pub fn animate<S: OverlaySurface + ?Sized>(&mut self, surface: &mut S, now_ms: u64) {
        let Profile {
            fall_rate,
            sway_rate,
            ..
        } = self.profile;

        let mut exited = Vec::new();
        for particle in &mut self.particles {
            let x = sway(particle.x(), sway_rate, now_ms);
            let y = particle.y() + fall_rate;
            particle.move_to(surface, x, y);
            if particle.bounds(surface).has_left(self.viewport) {
                exited.push(particle.element());
            }
        }

        for element in exited {
            trace!(?element, "recycling particle");
            self.remove(surface, element);
            self.spawn(surface);
        }
    }

    /// Remove and destroy the particle backed by `element`.
    ///
    /// The particle must belong to this layer.
    pub fn remove<S: OverlaySurface + ?Sized>(&mut self, surface: &mut S, element: ElementId) {
        let index = self.particles.iter().position(|p| p.element() == element);
        debug_assert!(index.is_some(), "{element:?} does not belong to this layer");
        let Some(index) = index else {
            return;
        };
        self.particles.remove(index).destroy(surface);
    }

    /// Destroy every particle.
    pub fn clear<S: OverlaySurface + ?Sized>(&mut self, surface: &mut S) {
        debug!(live = self.len(), "clearing layer");
        for particle in self.particles.drain(..) {
            particle.destroy(surface);
        }
    }

    /// Shift every particle by the change in viewport size, then remember
    /// the new size.
    pub fn resize<S: OverlaySurface + ?Sized>(
        &mut self,
        surface: &mut S,
        width: f64,
        height: f64,
    ) {
        let dx = width - self.viewport.width;
        let dy = height - self.viewport.height;
        for particle in &mut self.particles {
            let (x, y) = (particle.x() + dx, particle.y() + dy);
            particle.move_to(surface, x, y);
        }
        self.viewport = Viewport::new(width, height);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terminal::TerminalOverlay;
    use rand::SeedableRng;

    fn layer(profile: Profile, width: f64, height: f64) -> LayerController {
        LayerController::new(
            profile,
            Viewport::new(width, height),
            Timing::default(),
            StdRng::seed_from_u64(42),
        )
    }

    fn positions(layer: &LayerController) -> Vec<(f64, f64)> {
        layer.particles().iter().map(|p| (p.x(), p.y())).collect()
    }

    #[test]
    fn test_created_stopped_and_empty() {
        let layer = layer(Profile::new(5, 0.0, 1.0, 0.0), 100.0, 100.0);
        assert!(!layer.is_active());
        assert!(layer.is_empty());
        assert!(!layer.is_populating());
    }

    #[test]
    fn test_spawn_along_top_edge() {
        let mut overlay = TerminalOverlay::new();
        let mut layer = layer(Profile::new(50, 1.5, 1.0, 0.0), 80.0, 40.0);
        for _ in 0..50 {
            layer.spawn(&mut overlay);
        }
        assert_eq!(layer.len(), 50);
        assert_eq!(overlay.len(), 50);
        for particle in layer.particles() {
            assert!((0.0..80.0).contains(&particle.x()));
            assert_eq!(particle.y(), 0.0);
            assert_eq!(overlay.blur(particle.element()), Some(1.5));
        }
    }

    #[test]
    fn test_spawn_in_zero_width_viewport() {
        let mut overlay = TerminalOverlay::new();
        let mut layer = layer(Profile::new(1, 0.0, 1.0, 0.0), 0.0, 0.0);
        layer.spawn(&mut overlay);
        assert_eq!(positions(&layer), vec![(0.0, 0.0)]);
    }

    #[test]
    fn test_spawn_in_unbounded_viewport() {
        let mut overlay = TerminalOverlay::new();
        let mut layer = layer(Profile::new(1, 0.0, 1.0, 0.0), f64::INFINITY, 100.0);
        layer.spawn(&mut overlay);
        assert_eq!(positions(&layer), vec![(0.0, 0.0)]);
    }

    #[test]
    fn test_fall_and_recycle_scenario() {
        let mut overlay = TerminalOverlay::new();
        let mut layer = layer(Profile::new(1, 0.0, 10.0, 0.0), 100.0, 100.0);
        layer.spawn(&mut overlay);
        let first = layer.particles()[0].element();
        let x = layer.particles()[0].x();

        // sin(0) is zero, so only the fall moves the particle
        layer.animate(&mut overlay, 0);
        assert_eq!(positions(&layer), vec![(x, 10.0)]);

        for _ in 1..10 {
            layer.animate(&mut overlay, 0);
        }
        assert_eq!(layer.particles()[0].y(), 100.0);
        assert_eq!(layer.particles()[0].element(), first);

        layer.animate(&mut overlay, 0);
        assert_eq!(layer.len(), 1);
        assert_ne!(layer.particles()[0].element(), first);
        assert_eq!(layer.particles()[0].y(), 0.0);
        assert!(!overlay.contains(first));
        assert_eq!(overlay.len(), 1);
    }

    #[test]
    fn test_sway_follows_wall_clock() {
        let mut overlay = TerminalOverlay::new();
        let mut layer = layer(Profile::new(1, 0.0, 0.0, 0.5), 1_000.0, 100.0);
        layer.spawn(&mut overlay);
        let x = layer.particles()[0].x();
        let now = 314;
        layer.animate(&mut overlay, now);
        let expected = 1.0 * (now as f64 * 0.005).sin() + (x + 0.5);
        assert_eq!(layer.particles()[0].x(), expected);
    }

    #[test]
    fn test_right_edge_exit_recycles() {
        let mut overlay = TerminalOverlay::new();
        let mut layer = layer(Profile::new(1, 0.0, 0.0, 200.0), 100.0, 100.0);
        layer.spawn(&mut overlay);
        let first = layer.particles()[0].element();
        layer.animate(&mut overlay, 0);
        assert_ne!(layer.particles()[0].element(), first);
        assert_eq!(layer.particles()[0].y(), 0.0);
    }

    #[test]
    fn test_population_fills_to_limit_gradually() {
        let mut overlay = TerminalOverlay::new();
        let mut layer = layer(Profile::new(8, 0.0, 0.5, 0.0), 200.0, 10_000.0);
        layer.start(0);
        assert!(layer.is_populating());
        assert!(layer.len() < 8);

        let mut now = 0;
        while now <= 9 * 400 + 17 {
            now += 17;
            layer.advance(&mut overlay, now);
            assert!(layer.len() <= 8);
        }
        assert_eq!(layer.len(), 8);
        assert!(!layer.is_populating());
    }

    #[test]
    fn test_count_never_exceeds_limit_while_recycling() {
        let mut overlay = TerminalOverlay::new();
        let mut layer = layer(Profile::new(10, 0.0, 7.0, 1.0), 60.0, 60.0);
        layer.start(0);
        for step in 1..2_000 {
            layer.advance(&mut overlay, step * 17);
            assert!(layer.len() <= 10);
            assert_eq!(overlay.len(), layer.len());
        }
        assert_eq!(layer.len(), 10);
    }

    #[test]
    fn test_start_is_idempotent() {
        let mut layer = layer(Profile::new(3, 0.0, 1.0, 0.0), 100.0, 100.0);
        layer.start(0);
        let population = layer.population;
        let ticker = layer.ticker;
        layer.start(500);
        assert_eq!(layer.population, population);
        assert_eq!(layer.ticker, ticker);
    }

    #[test]
    fn test_stop_freezes_particles() {
        let mut overlay = TerminalOverlay::new();
        let mut layer = layer(Profile::new(4, 0.0, 1.0, 0.25), 500.0, 10_000.0);
        layer.start(0);
        let mut now = 0;
        while layer.len() < 4 {
            now += 17;
            layer.advance(&mut overlay, now);
        }

        layer.stop();
        layer.stop();
        assert!(!layer.is_active());
        let frozen = positions(&layer);
        for _ in 0..100 {
            now += 17;
            layer.advance(&mut overlay, now);
        }
        assert_eq!(positions(&layer), frozen);

        layer.start(now);
        now += 17;
        layer.advance(&mut overlay, now);
        assert_ne!(positions(&layer), frozen);
    }

    #[test]
    fn test_stop_cancels_population() {
        let mut overlay = TerminalOverlay::new();
        let mut layer = layer(Profile::new(50, 0.0, 1.0, 0.0), 100.0, 100.0);
        layer.start(0);
        layer.stop();
        layer.advance(&mut overlay, 100_000);
        assert!(layer.is_empty());
    }

    #[test]
    fn test_remove_by_identity() {
        let mut overlay = TerminalOverlay::new();
        let mut layer = layer(Profile::new(3, 0.0, 1.0, 0.0), 100.0, 100.0);
        for _ in 0..3 {
            layer.spawn(&mut overlay);
        }
        let elements: Vec<_> = layer.particles().iter().map(|p| p.element()).collect();
        layer.remove(&mut overlay, elements[1]);
        let remaining: Vec<_> = layer.particles().iter().map(|p| p.element()).collect();
        assert_eq!(remaining, vec![elements[0], elements[2]]);
        assert!(!overlay.contains(elements[1]));
    }

    #[test]
    fn test_clear_destroys_everything() {
        let mut overlay = TerminalOverlay::new();
        let mut layer = layer(Profile::new(6, 0.0, 1.0, 0.0), 100.0, 100.0);
        for _ in 0..6 {
            layer.spawn(&mut overlay);
        }
        let elements: Vec<_> = layer.particles().iter().map(|p| p.element()).collect();
        layer.clear(&mut overlay);
        assert!(layer.is_empty());
        assert!(elements.iter().all(|&e| !overlay.contains(e)));
        assert!(overlay.is_empty());
    }

    #[test]
    fn test_resize_shifts_by_delta() {
        let mut overlay = TerminalOverlay::new();
        let mut layer = layer(Profile::new(5, 0.0, 1.0, 0.0), 100.0, 80.0);
        for _ in 0..5 {
            layer.spawn(&mut overlay);
            layer.animate(&mut overlay, 0);
        }
        let before = positions(&layer);
        layer.resize(&mut overlay, 140.0, 50.0);
        let after = positions(&layer);
        for ((x1, y1), (x2, y2)) in before.iter().zip(&after) {
            assert!((x2 - x1 - 40.0).abs() < 1e-9);
            assert_eq!(y2 - y1, -30.0);
        }
        assert_eq!(layer.viewport(), Viewport::new(140.0, 50.0));
        let first = &layer.particles()[0];
        assert_eq!(overlay.position(first.element()), Some((first.x(), first.y())));
    }
}
