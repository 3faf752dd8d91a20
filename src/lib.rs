//! # image-rain
//!
//! A field of small images falling (or rising) across a viewport, pushed away
//! from (or pulled toward) the pointer.
//!
//! The simulation is a pure function of its state, the pointer position and a
//! random source. It knows nothing about windows or GPUs; the viewer in
//! [`window`] drives it once per redraw and draws the returned [`Snapshot`].
//!
//! ## Quick Start
//!
//! ```ignore
//! use image_rain::prelude::*;
//!
//! fn main() -> Result<(), SimulationError> {
//!     let options = RainOptions::new()
//!         .with_src("leaf.png")
//!         .with_num_images(80)
//!         .with_gravity(3.0)
//!         .with_blackhole_effect(true);
//!
//!     image_rain::window::run(options)
//! }
//! ```
//!
//! ## Headless
//!
//! ```ignore
//! let config = RainOptions::new().with_seed(1).resolve();
//! let viewport = Viewport::new(800.0, 600.0);
//! let mut sim = Simulator::new(config, viewport);
//!
//! for _ in 0..120 {
//!     let snapshot = sim.tick(Vec2::new(400.0, 300.0), viewport);
//!     assert_eq!(snapshot.len(), 50);
//! }
//! ```
//!
//! ## Regimes
//!
//! | Gravity | Motion | Recycled when | Re-entry |
//! |---------|--------|---------------|----------|
//! | `> 1` | falls | below `1.1 * height` | above the top, hidden for one tick |
//! | `<= 1` | rises | above `-height` | below the bottom, visible |
//!
//! Gravity is also the sign of the cursor force: positive gravity repels,
//! zero or negative gravity attracts (inverted again by `blackhole_effect`).

pub mod config;
pub mod easing;
pub mod error;
pub mod field;
mod gpu;
pub mod input;
pub mod integrator;
pub mod lifecycle;
pub mod particle;
pub mod scheduler;
pub mod simulation;
pub mod spawn;
pub mod textures;
pub mod time;
pub mod window;

pub use config::{Config, RainOptions, WindowOptions};
pub use easing::{Easing, Spring};
pub use error::{ConfigError, GpuError, SimulationError, TextureError};
pub use field::ForceField;
pub use glam::Vec2;
pub use input::{CursorSampler, CursorTracker};
pub use lifecycle::{Boundary, Regime};
pub use particle::{Particle, RenderAttributes, Snapshot, Viewport};
pub use scheduler::{Scheduler, StopHandle};
pub use simulation::Simulator;
pub use textures::{FilterMode, SpriteTexture};
pub use time::FrameClock;

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use image_rain::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::{Config, RainOptions};
    pub use crate::error::SimulationError;
    pub use crate::input::CursorTracker;
    pub use crate::particle::{RenderAttributes, Snapshot, Viewport};
    pub use crate::scheduler::{Scheduler, StopHandle};
    pub use crate::simulation::Simulator;
    pub use crate::Vec2;
}
