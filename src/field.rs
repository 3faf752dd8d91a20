//! Cursor-centred force field.
//!
//! A radius-limited push (or pull, with the blackhole effect) around the
//! cursor. Strength falls off linearly from full at the cursor to zero at the
//! radius boundary:
//!
//! ```text
//! magnitude = (radius - distance) / radius * gravity * force_multiplier * direction
//! force     = magnitude * (particle - cursor) / distance
//! ```
//!
//! Each component is then clamped to `±max_velocity`.

use crate::config::Config;
use glam::Vec2;

/// Force-field parameters pulled out of a [`Config`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForceField {
    pub enabled: bool,
    pub radius: f32,
    /// `gravity * force_multiplier`.
    pub gain: f32,
    pub max_velocity: f32,
    /// +1 pushes away from the cursor, -1 pulls toward it.
    pub direction: f32,
}

impl ForceField {
    pub fn from_config(config: &Config) -> Self {
        let mut direction = if config.blackhole_effect { -1.0 } else { 1.0 };
        // Non-positive gravity flips the pull so it still follows the flow
        if config.gravity <= 0.0 {
            direction = -direction;
        }

        Self {
            enabled: config.cursor_interaction,
            radius: config.force_field_radius,
            gain: config.effective_force_gain(),
            max_velocity: config.max_velocity,
            direction,
        }
    }

    /// Force on a particle at `particle` from a cursor at `cursor`.
    ///
    /// Zero when disabled, outside the radius, or exactly on the cursor.
    pub fn force(&self, particle: Vec2, cursor: Vec2) -> Vec2 {
        if !self.enabled {
            return Vec2::ZERO;
        }

        let d = particle - cursor;
        let distance = d.length();
        if distance >= self.radius || distance == 0.0 {
            return Vec2::ZERO;
        }

        let magnitude = (self.radius - distance) / self.radius * self.gain * self.direction;
        let f = magnitude * d / distance;

        Vec2::new(clamp_axis(f.x, self.max_velocity), clamp_axis(f.y, self.max_velocity))
    }
}

// `f32::clamp` panics on an inverted range; a negative limit just pins to it.
#[inline]
fn clamp_axis(v: f32, limit: f32) -> f32 {
    v.max(-limit).min(limit)
}

/// Convenience wrapper for one-off evaluations.
pub fn force(particle: Vec2, cursor: Vec2, config: &Config) -> Vec2 {
    ForceField::from_config(config).force(particle, cursor)
}
