//! Options and resolved configuration.
//!
//! [`RainOptions`] is the user-facing form: every field optional, serializable
//! to JSON with camelCase keys. It is resolved exactly once into a
//! [`Config`], where defaults are filled in and the friction/mass floors are
//! applied. Nothing downstream re-checks them.
//!
//! ```json
//! {
//!   "src": "assets/leaf.png",
//!   "numImages": 80,
//!   "gravity": 29,
//!   "blackholeEffect": true
//! }
//! ```

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const DEFAULT_COUNT: u32 = 50;
pub const DEFAULT_GRAVITY: f32 = 60.0;
pub const DEFAULT_FORCE_FIELD_RADIUS: f32 = 100.0;
pub const FRICTION_FLOOR: f32 = 15.0;
pub const MASS_FLOOR: f32 = 1.0;
pub const DEFAULT_MAX_VELOCITY: f32 = 100.0;
pub const DEFAULT_SIZE_MULTIPLIER: f32 = 1.0;
pub const DEFAULT_FORCE_MULTIPLIER: f32 = 13.66;
pub const DEFAULT_SPRING_TENSION: f32 = 170.0;
pub const DEFAULT_SAMPLE_INTERVAL_MS: u64 = 50;

/// User-facing options. Unset fields take the defaults listed on [`Config`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RainOptions {
    /// Image drawn for every particle. Not used by the simulation.
    pub src: Option<String>,
    pub num_images: Option<u32>,
    pub gravity: Option<f32>,
    pub force_field_radius: Option<f32>,
    pub friction: Option<f32>,
    pub mass: Option<f32>,
    pub max_velocity: Option<f32>,
    pub size_multiplier: Option<f32>,
    pub force_multiplier: Option<f32>,
    pub cursor_interact: Option<bool>,
    pub blackhole_effect: Option<bool>,
    /// Fixed RNG seed for reproducible runs.
    pub seed: Option<u64>,
    /// Minimum spacing between accepted cursor samples.
    pub sample_interval_ms: Option<u64>,
    pub spring_tension: Option<f32>,
    pub window: WindowOptions,
}

/// Initial window geometry for the bundled viewer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowOptions {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowOptions {
    fn default() -> Self {
        Self {
            title: "image-rain".to_string(),
            width: 1280,
            height: 720,
        }
    }
}

impl RainOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Set the image drawn for each particle.
    pub fn with_src(mut self, src: impl Into<String>) -> Self {
        self.src = Some(src.into());
        self
    }

    /// Set the number of particles.
    pub fn with_num_images(mut self, count: u32) -> Self {
        self.num_images = Some(count);
        self
    }

    /// Set the signed per-tick vertical drift. `> 1` falls, `<= 1` rises.
    pub fn with_gravity(mut self, gravity: f32) -> Self {
        self.gravity = Some(gravity);
        self
    }

    pub fn with_force_field_radius(mut self, radius: f32) -> Self {
        self.force_field_radius = Some(radius);
        self
    }

    pub fn with_friction(mut self, friction: f32) -> Self {
        self.friction = Some(friction);
        self
    }

    pub fn with_mass(mut self, mass: f32) -> Self {
        self.mass = Some(mass);
        self
    }

    pub fn with_max_velocity(mut self, max_velocity: f32) -> Self {
        self.max_velocity = Some(max_velocity);
        self
    }

    pub fn with_size_multiplier(mut self, multiplier: f32) -> Self {
        self.size_multiplier = Some(multiplier);
        self
    }

    pub fn with_force_multiplier(mut self, multiplier: f32) -> Self {
        self.force_multiplier = Some(multiplier);
        self
    }

    pub fn with_cursor_interact(mut self, enabled: bool) -> Self {
        self.cursor_interact = Some(enabled);
        self
    }

    /// Invert the force field so the cursor pulls instead of pushes.
    pub fn with_blackhole_effect(mut self, enabled: bool) -> Self {
        self.blackhole_effect = Some(enabled);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_sample_interval_ms(mut self, interval: u64) -> Self {
        self.sample_interval_ms = Some(interval);
        self
    }

    pub fn with_spring_tension(mut self, tension: f32) -> Self {
        self.spring_tension = Some(tension);
        self
    }

    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        self.window.width = width;
        self.window.height = height;
        self
    }

    /// Fill in defaults and apply the friction/mass floors.
    pub fn resolve(&self) -> Config {
        Config {
            count: self.num_images.unwrap_or(DEFAULT_COUNT),
            gravity: self.gravity.unwrap_or(DEFAULT_GRAVITY),
            force_field_radius: self
                .force_field_radius
                .unwrap_or(DEFAULT_FORCE_FIELD_RADIUS)
                .max(0.0),
            friction: self.friction.unwrap_or(FRICTION_FLOOR).max(FRICTION_FLOOR),
            mass: self.mass.unwrap_or(MASS_FLOOR).max(MASS_FLOOR),
            max_velocity: self.max_velocity.unwrap_or(DEFAULT_MAX_VELOCITY),
            size_multiplier: self.size_multiplier.unwrap_or(DEFAULT_SIZE_MULTIPLIER),
            force_multiplier: self.force_multiplier.unwrap_or(DEFAULT_FORCE_MULTIPLIER),
            cursor_interaction: self.cursor_interact.unwrap_or(true),
            blackhole_effect: self.blackhole_effect.unwrap_or(false),
            seed: self.seed,
            sample_interval_ms: self.sample_interval_ms.unwrap_or(DEFAULT_SAMPLE_INTERVAL_MS),
            spring_tension: self.spring_tension.unwrap_or(DEFAULT_SPRING_TENSION),
        }
    }
}

/// Fully resolved, immutable configuration for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Particle count (default 50).
    pub count: u32,
    /// Signed vertical drift per tick (default 60).
    pub gravity: f32,
    /// Cursor influence radius, never negative (default 100).
    pub force_field_radius: f32,
    /// Spring friction, at least 15.
    pub friction: f32,
    /// Spring mass, at least 1.
    pub mass: f32,
    /// Per-axis force clamp (default 100).
    pub max_velocity: f32,
    /// Scales the spawn scale range (default 1).
    pub size_multiplier: f32,
    /// Scales force-field strength (default 13.66).
    pub force_multiplier: f32,
    pub cursor_interaction: bool,
    pub blackhole_effect: bool,
    pub seed: Option<u64>,
    pub sample_interval_ms: u64,
    pub spring_tension: f32,
}

impl Default for Config {
    fn default() -> Self {
        RainOptions::default().resolve()
    }
}

impl Config {
    /// Vertical spread of the spawn band, in viewport heights.
    #[inline]
    pub fn yoffset(&self) -> f32 {
        self.count as f32 / 4.0
    }

    /// Peak force-field strength at the cursor.
    #[inline]
    pub fn effective_force_gain(&self) -> f32 {
        self.gravity * self.force_multiplier
    }
}
