//! Particle state and the per-tick render snapshot.

use glam::Vec2;

/// Current drawable area in screen pixels.
///
/// Read fresh every tick; only the spawn pass uses the start-time value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// No drawable area, e.g. a minimized window.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// One falling image.
///
/// `friction` and `mass` are the spring parameters handed to the renderer's
/// easing. They equal the configured values except on the tick a particle is
/// recycled, where they drop to [`RECYCLE_FRICTION`] / [`RECYCLE_MASS`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    /// Screen position in pixels, y grows downward.
    pub position: Vec2,
    /// Size multiplier, fixed after spawn.
    pub scale: f32,
    /// Cosmetic rotation in degrees, fixed after spawn.
    pub rotation: f32,
    /// Always exactly 0.0 or 1.0.
    pub opacity: f32,
    pub friction: f32,
    pub mass: f32,
}

/// Spring friction used on the tick of a recycle.
pub const RECYCLE_FRICTION: f32 = 0.0;
/// Spring mass used on the tick of a recycle.
pub const RECYCLE_MASS: f32 = 0.1;

impl Particle {
    /// Whether this tick teleported the particle to the opposite edge.
    #[inline]
    pub fn is_recycling(&self) -> bool {
        self.friction == RECYCLE_FRICTION && self.mass == RECYCLE_MASS
    }

    /// The five attributes that cross the renderer boundary.
    pub fn render_attributes(&self) -> RenderAttributes {
        RenderAttributes {
            x: self.position.x,
            y: self.position.y,
            scale: self.scale,
            rotation: self.rotation,
            opacity: self.opacity,
        }
    }
}

/// What the renderer needs to place one visual element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderAttributes {
    pub x: f32,
    pub y: f32,
    pub scale: f32,
    /// Degrees.
    pub rotation: f32,
    pub opacity: f32,
}

/// Ordered render attributes for every particle after one tick.
///
/// Index `i` always describes particle `i`; the length never changes during a run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    entries: Vec<RenderAttributes>,
}

impl Snapshot {
    pub fn from_particles(particles: &[Particle]) -> Self {
        Self {
            entries: particles.iter().map(Particle::render_attributes).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RenderAttributes> {
        self.entries.iter()
    }

    pub fn as_slice(&self) -> &[RenderAttributes] {
        &self.entries
    }

    /// Mutable access for render-side post-processing such as easing.
    pub(crate) fn entries_mut(&mut self) -> &mut [RenderAttributes] {
        &mut self.entries
    }
}

impl std::ops::Index<usize> for Snapshot {
    type Output = RenderAttributes;

    fn index(&self, index: usize) -> &Self::Output {
        &self.entries[index]
    }
}

impl<'a> IntoIterator for &'a Snapshot {
    type Item = &'a RenderAttributes;
    type IntoIter = std::slice::Iter<'a, RenderAttributes>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
