//! Render-side spring easing.
//!
//! The simulation jumps each particle to a new target every tick. What gets
//! drawn is a damped spring chasing that target, driven by the particle's
//! current `friction` and `mass`:
//!
//! ```text
//! a = (tension * (target - pos) - friction * vel) / mass
//! ```
//!
//! Integrated with semi-implicit Euler in fixed 1 ms sub-steps so large frame
//! gaps stay stable.
//!
//! Springs are carried along with the per-tick drift (gravity) before they
//! advance, so they only smooth the cursor push and never trail the fall
//! itself. A particle carrying the recycle override (mass below the
//! configured floor) or hidden this tick snaps straight to its target, so
//! what is drawn invisible is always drawn where the simulation put it.

use crate::config::MASS_FLOOR;
use crate::particle::{Particle, Snapshot};
use glam::Vec2;
use std::time::Duration;

const SUB_STEP: f32 = 0.001;
/// Cap on simulated time per frame, so a stalled window does not spin.
const MAX_FRAME_SECS: f32 = 0.25;

/// One damped spring in 2-D.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spring {
    pub position: Vec2,
    pub velocity: Vec2,
}

impl Spring {
    pub fn at(position: Vec2) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
        }
    }

    /// Move toward `target` over `dt` seconds.
    pub fn advance(&mut self, target: Vec2, tension: f32, friction: f32, mass: f32, dt: f32) {
        if mass < MASS_FLOOR {
            self.snap(target);
            return;
        }

        let mut remaining = dt.clamp(0.0, MAX_FRAME_SECS);
        while remaining > 0.0 {
            let h = remaining.min(SUB_STEP);
            let accel = (tension * (target - self.position) - friction * self.velocity) / mass;
            self.velocity += accel * h;
            self.position += self.velocity * h;
            remaining -= h;
        }
    }

    pub fn snap(&mut self, target: Vec2) {
        self.position = target;
        self.velocity = Vec2::ZERO;
    }
}

/// Eased display positions for a whole run.
#[derive(Debug, Clone)]
pub struct Easing {
    tension: f32,
    drift: Vec2,
    springs: Vec<Spring>,
}

impl Easing {
    /// Start every spring at its particle's spawn position.
    pub fn new(tension: f32, particles: &[Particle]) -> Self {
        Self {
            tension,
            drift: Vec2::ZERO,
            springs: particles.iter().map(|p| Spring::at(p.position)).collect(),
        }
    }

    /// Displacement every target receives per tick regardless of the cursor.
    pub fn with_drift(mut self, drift: Vec2) -> Self {
        self.drift = drift;
        self
    }

    /// Chase this tick's targets and rewrite the snapshot's x/y with the
    /// eased positions. Scale, rotation and opacity pass through.
    pub fn apply(&mut self, particles: &[Particle], snapshot: &mut Snapshot, elapsed: Duration) {
        let dt = elapsed.as_secs_f32();
        for ((spring, particle), attrs) in self
            .springs
            .iter_mut()
            .zip(particles)
            .zip(snapshot.entries_mut())
        {
            if particle.opacity == 0.0 {
                spring.snap(particle.position);
            } else {
                spring.position += self.drift;
                spring.advance(
                    particle.position,
                    self.tension,
                    particle.friction,
                    particle.mass,
                    dt,
                );
            }
            attrs.x = spring.position.x;
            attrs.y = spring.position.y;
        }
    }

    pub fn springs(&self) -> &[Spring] {
        &self.springs
    }
}
