//! Boundary and recycle policy.
//!
//! Particles are never created or destroyed after spawn. When one leaves the
//! viewport on its "downstream" side it is recycled: teleported to the far
//! upstream edge at a fresh random x, with transient spring parameters so the
//! jump is drawn instantly instead of eased.
//!
//! Which side is downstream depends on the [`Regime`]:
//!
//! | Regime | Gravity | Recycle when | Respawn at | Clamp |
//! |--------|---------|--------------|------------|-------|
//! | Falling | `> 1` | `y > 1.1·H` | `y = -H·yoffset`, hidden | `y >= -H·yoffset` |
//! | Rising | `<= 1` | `y < -H` | `y = H·yoffset`, visible | `y <= H·yoffset` |

/// Recycle threshold below the viewport, as a fraction of its height.
///
/// Opacity already drops to 0 past `H`, so the teleport happens out of sight.
pub const FALL_RECYCLE_FACTOR: f32 = 1.1;

/// Gravity-selected boundary policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Regime {
    /// `gravity > 1`: particles fall and recycle below the viewport.
    Falling,
    /// `gravity <= 1`: particles rise (or hover) and recycle above it.
    Rising,
}

impl Regime {
    pub fn from_gravity(gravity: f32) -> Self {
        if gravity > 1.0 {
            Regime::Falling
        } else {
            Regime::Rising
        }
    }
}

/// What the boundary policy decided for one particle this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Boundary {
    /// Still in play, at `y` with the given opacity.
    Within { y: f32, opacity: f32 },
    /// Crossed the recycle threshold; respawn at `y` with the given opacity.
    Recycle { y: f32, opacity: f32 },
}

impl Boundary {
    pub fn y(&self) -> f32 {
        match *self {
            Boundary::Within { y, .. } | Boundary::Recycle { y, .. } => y,
        }
    }

    pub fn opacity(&self) -> f32 {
        match *self {
            Boundary::Within { opacity, .. } | Boundary::Recycle { opacity, .. } => opacity,
        }
    }

    pub fn is_recycle(&self) -> bool {
        matches!(self, Boundary::Recycle { .. })
    }
}

/// Apply the regime's boundary rules to a freshly integrated `new_y`.
///
/// `height` is the current viewport height, `yoffset` the spawn band depth in
/// viewport heights.
pub fn resolve_boundary(regime: Regime, new_y: f32, height: f32, yoffset: f32) -> Boundary {
    // Provisional: hidden once past the bottom edge
    let opacity = if new_y > height { 0.0 } else { 1.0 };
    let band = height * yoffset;

    match regime {
        Regime::Falling => {
            if new_y > height * FALL_RECYCLE_FACTOR {
                Boundary::Recycle { y: -band, opacity: 0.0 }
            } else if new_y < -band {
                Boundary::Within { y: -band, opacity }
            } else if new_y < -height {
                Boundary::Within { y: new_y, opacity: 0.0 }
            } else {
                Boundary::Within { y: new_y, opacity }
            }
        }
        Regime::Rising => {
            if new_y < -height {
                Boundary::Recycle { y: band, opacity: 1.0 }
            } else if new_y > band {
                Boundary::Within { y: band, opacity }
            } else if new_y > height {
                Boundary::Within { y: new_y, opacity: 1.0 }
            } else {
                Boundary::Within { y: new_y, opacity }
            }
        }
    }
}
