//! Spawn and respawn sampling.
//!
//! All randomness in a run flows through one injected [`Rng`], so a seeded
//! generator reproduces the exact same rain.

use crate::config::Config;
use crate::particle::{Particle, Viewport};
use glam::Vec2;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Uniform sample in `[min, max)`.
///
/// Unlike `gen_range`, an empty range (`min == max`, e.g. a zero-width
/// viewport) returns `min` instead of panicking.
#[inline]
pub fn random_between<R: Rng + ?Sized>(rng: &mut R, min: f32, max: f32) -> f32 {
    rng.gen::<f32>() * (max - min) + min
}

/// Generator for a run: seeded when the config asks for it, entropy otherwise.
pub fn rng_for(config: &Config) -> SmallRng {
    match config.seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_entropy(),
    }
}

/// Create one particle at a random spot in the spawn band.
///
/// - `x` uniform over the viewport width
/// - `y` uniform over `[-H·yoffset, 0]`, above the visible area
/// - `scale` uniform over `[0.5, 1)·size_multiplier`
/// - `rotation` uniform over `[0, 360)` degrees
pub fn spawn_particle<R: Rng + ?Sized>(
    rng: &mut R,
    config: &Config,
    viewport: Viewport,
) -> Particle {
    let x = random_between(rng, 0.0, viewport.width);
    let y = random_between(rng, -viewport.height * config.yoffset(), 0.0);
    let scale = random_between(rng, 0.5, 1.0) * config.size_multiplier;
    let rotation = random_between(rng, 0.0, 360.0);

    Particle {
        position: Vec2::new(x, y),
        scale,
        rotation,
        opacity: 1.0,
        friction: config.friction,
        mass: config.mass,
    }
}

/// Spawn `config.count` particles against the start-time viewport.
pub fn spawn_all<R: Rng + ?Sized>(
    rng: &mut R,
    config: &Config,
    viewport: Viewport,
) -> Vec<Particle> {
    (0..config.count)
        .map(|_| spawn_particle(rng, config, viewport))
        .collect()
}

/// Fresh x for a recycled particle.
#[inline]
pub fn respawn_x<R: Rng + ?Sized>(rng: &mut R, viewport: Viewport) -> f32 {
    random_between(rng, 0.0, viewport.width)
}
