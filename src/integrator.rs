//! One-tick particle step.
//!
//! Stylised, not physical: gravity is a fixed per-tick displacement and the
//! force field adds directly to position. No velocity is carried between
//! ticks; the renderer's spring easing supplies the motion smoothing.

use crate::config::Config;
use crate::field::ForceField;
use crate::lifecycle::{resolve_boundary, Boundary, Regime};
use crate::particle::{Particle, Viewport, RECYCLE_FRICTION, RECYCLE_MASS};
use crate::spawn::respawn_x;
use glam::Vec2;
use rand::Rng;

/// Per-run constants hoisted out of the per-particle loop.
#[derive(Debug, Clone, Copy)]
pub struct StepParams {
    pub gravity: f32,
    pub yoffset: f32,
    pub regime: Regime,
    pub field: ForceField,
    pub friction: f32,
    pub mass: f32,
}

impl StepParams {
    pub fn from_config(config: &Config) -> Self {
        Self {
            gravity: config.gravity,
            yoffset: config.yoffset(),
            regime: Regime::from_gravity(config.gravity),
            field: ForceField::from_config(config),
            friction: config.friction,
            mass: config.mass,
        }
    }
}

/// Advance one particle by one tick.
///
/// `rng` is only drawn from when the particle recycles.
pub fn step<R: Rng + ?Sized>(
    particle: &Particle,
    cursor: Vec2,
    viewport: Viewport,
    params: &StepParams,
    rng: &mut R,
) -> Particle {
    let f = params.field.force(particle.position, cursor);

    let new_y = particle.position.y + params.gravity + f.y;
    let new_x = particle.position.x + f.x;

    let mut next = *particle;
    match resolve_boundary(params.regime, new_y, viewport.height, params.yoffset) {
        Boundary::Recycle { y, opacity } => {
            next.position = Vec2::new(respawn_x(rng, viewport), y);
            next.opacity = opacity;
            next.friction = RECYCLE_FRICTION;
            next.mass = RECYCLE_MASS;
        }
        Boundary::Within { y, opacity } => {
            next.position = Vec2::new(new_x, y);
            next.opacity = opacity;
            next.friction = params.friction;
            next.mass = params.mass;
        }
    }
    next
}
