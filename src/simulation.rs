//! The simulator: owned particle state advanced one tick at a time.
//!
//! ```ignore
//! use image_rain::prelude::*;
//!
//! let config = RainOptions::new().with_num_images(80).with_seed(7).resolve();
//! let mut sim = Simulator::new(config, Viewport::new(1280.0, 720.0));
//!
//! let snapshot = sim.tick(Vec2::new(640.0, 360.0), Viewport::new(1280.0, 720.0));
//! for attrs in &snapshot {
//!     draw(attrs.x, attrs.y, attrs.scale, attrs.rotation, attrs.opacity);
//! }
//! ```

use crate::config::Config;
use crate::integrator::{step, StepParams};
use crate::particle::{Particle, Snapshot, Viewport};
use crate::spawn::{rng_for, spawn_all};
use glam::Vec2;
use rand::rngs::SmallRng;
use rand::Rng;

/// Particle array, resolved config and random source for one run.
///
/// `tick` is deterministic given the prior state, its inputs and the random
/// source; the generator is only consulted on recycles.
pub struct Simulator<R: Rng = SmallRng> {
    config: Config,
    params: StepParams,
    particles: Vec<Particle>,
    rng: R,
    ticks: u64,
    recycled_last_tick: usize,
}

impl Simulator<SmallRng> {
    /// Spawn `config.count` particles against the start-time viewport.
    ///
    /// Seeded from `config.seed` when set.
    pub fn new(config: Config, viewport: Viewport) -> Self {
        let rng = rng_for(&config);
        Self::with_rng(config, viewport, rng)
    }
}

impl<R: Rng> Simulator<R> {
    /// Build with an explicit random source.
    pub fn with_rng(config: Config, viewport: Viewport, mut rng: R) -> Self {
        let particles = spawn_all(&mut rng, &config, viewport);
        Self::from_particles(config, particles, rng)
    }

    /// Build from pre-made particles, e.g. for a scripted scenario.
    ///
    /// The particle count for the run is `particles.len()`; `config.count`
    /// is overwritten with it so the spawn band depth follows.
    pub fn from_particles(mut config: Config, particles: Vec<Particle>, rng: R) -> Self {
        config.count = particles.len() as u32;
        let params = StepParams::from_config(&config);
        Self {
            config,
            params,
            particles,
            rng,
            ticks: 0,
            recycled_last_tick: 0,
        }
    }

    /// Advance every particle by one tick and return what to draw.
    pub fn tick(&mut self, cursor: Vec2, viewport: Viewport) -> Snapshot {
        self.advance(cursor, viewport);
        self.snapshot()
    }

    /// Advance without building a snapshot.
    pub fn advance(&mut self, cursor: Vec2, viewport: Viewport) {
        let params = self.params;
        let mut recycled = 0;

        for particle in self.particles.iter_mut() {
            *particle = step(particle, cursor, viewport, &params, &mut self.rng);
            if particle.is_recycling() {
                recycled += 1;
            }
        }

        self.ticks += 1;
        self.recycled_last_tick = recycled;
        if recycled > 0 {
            log::trace!("tick {}: recycled {} particle(s)", self.ticks, recycled);
        }
    }

    /// Current render attributes without advancing.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::from_particles(&self.particles)
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Ticks run so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// How many particles recycled on the most recent tick.
    pub fn recycled_last_tick(&self) -> usize {
        self.recycled_last_tick
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RainOptions;
    use rand::SeedableRng;

    #[test]
    fn test_count_is_fixed() {
        let config = RainOptions::new().with_num_images(33).with_seed(5).resolve();
        let viewport = Viewport::new(640.0, 480.0);
        let mut sim = Simulator::new(config, viewport);

        for _ in 0..500 {
            let snapshot = sim.tick(Vec2::new(320.0, 240.0), viewport);
            assert_eq!(snapshot.len(), 33);
        }
        assert_eq!(sim.ticks(), 500);
    }

    #[test]
    fn test_opacity_is_binary() {
        let config = RainOptions::new().with_seed(11).resolve();
        let viewport = Viewport::new(800.0, 600.0);
        let mut sim = Simulator::new(config, viewport);

        for i in 0..300 {
            let cursor = Vec2::new((i * 7 % 800) as f32, (i * 13 % 600) as f32);
            for attrs in &sim.tick(cursor, viewport) {
                assert!(attrs.opacity == 0.0 || attrs.opacity == 1.0);
            }
        }
    }

    #[test]
    fn test_same_seed_same_snapshots() {
        let config = RainOptions::new().with_num_images(20).resolve();
        let viewport = Viewport::new(400.0, 800.0);

        let mut a = Simulator::with_rng(config.clone(), viewport, SmallRng::seed_from_u64(99));
        let mut b = Simulator::with_rng(config, viewport, SmallRng::seed_from_u64(99));

        for i in 0..200 {
            let cursor = Vec2::new(i as f32, 400.0);
            assert_eq!(a.tick(cursor, viewport), b.tick(cursor, viewport));
        }
    }

    #[test]
    fn test_empty_run() {
        let config = RainOptions::new().with_num_images(0).resolve();
        let mut sim = Simulator::new(config, Viewport::new(100.0, 100.0));
        assert!(sim.is_empty());
        assert!(sim.tick(Vec2::ZERO, Viewport::new(100.0, 100.0)).is_empty());
    }

    #[test]
    fn test_from_particles_sets_count() {
        let config = RainOptions::new()
            .with_num_images(40)
            .with_cursor_interact(false)
            .resolve();
        let viewport = Viewport::new(400.0, 800.0);
        let mut particle = spawn_all(&mut SmallRng::seed_from_u64(1), &config, viewport)[0];
        particle.position.y = 900.0;

        let rng = SmallRng::seed_from_u64(2);
        let mut sim = Simulator::from_particles(config, vec![particle], rng);
        assert_eq!(sim.config().count, 1);
        assert_eq!(sim.config().yoffset(), 0.25);

        // Past 1.1 * H, so recycled into a band one quarter of H deep
        let snapshot = sim.tick(Vec2::ZERO, viewport);
        assert_eq!(snapshot[0].y, -200.0);
    }
}
