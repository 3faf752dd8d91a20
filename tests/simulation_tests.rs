//! Integration tests for the rain simulation.
//!
//! Scripted scenarios drive a [`Simulator`] from hand-placed particles; the
//! property tests at the bottom check the invariants that must hold for any
//! configuration.

use glam::Vec2;
use image_rain::field::ForceField;
use image_rain::particle::{RECYCLE_FRICTION, RECYCLE_MASS};
use image_rain::{Config, Particle, RainOptions, Simulator, Viewport};
use proptest::prelude::*;
use rand::rngs::SmallRng;
use rand::SeedableRng;

fn particle_at(x: f32, y: f32, config: &Config) -> Particle {
    Particle {
        position: Vec2::new(x, y),
        scale: 1.0,
        rotation: 0.0,
        opacity: 1.0,
        friction: config.friction,
        mass: config.mass,
    }
}

fn single(config: Config, x: f32, y: f32) -> Simulator {
    let particle = particle_at(x, y, &config);
    Simulator::from_particles(config, vec![particle], SmallRng::seed_from_u64(0))
}

// ============================================================================
// Falling regime
// ============================================================================

#[test]
fn test_falling_particle_hides_then_recycles_above() {
    let config = RainOptions::new()
        .with_num_images(1)
        .with_gravity(60.0)
        .with_cursor_interact(false)
        .resolve();
    let viewport = Viewport::new(400.0, 800.0);
    let mut sim = single(config, 200.0, -100.0);

    for _ in 0..15 {
        sim.tick(Vec2::ZERO, viewport);
    }
    // Sitting exactly on the bottom edge still counts as visible
    let p = sim.particles()[0];
    assert_eq!(p.position.y, 800.0);
    assert_eq!(p.opacity, 1.0);
    assert_eq!(p.position.x, 200.0);

    let snapshot = sim.tick(Vec2::ZERO, viewport);
    assert_eq!(snapshot[0].y, 860.0);
    assert_eq!(snapshot[0].opacity, 0.0);
    assert_eq!(sim.recycled_last_tick(), 0);

    // 920 > 1.1 * 800: recycled to -H * yoffset with yoffset = 1/4
    let snapshot = sim.tick(Vec2::ZERO, viewport);
    assert_eq!(snapshot[0].y, -200.0);
    assert_eq!(snapshot[0].opacity, 0.0);
    assert!((0.0..=400.0).contains(&snapshot[0].x));
    assert_eq!(sim.recycled_last_tick(), 1);

    let p = sim.particles()[0];
    assert_eq!(p.friction, RECYCLE_FRICTION);
    assert_eq!(p.mass, RECYCLE_MASS);

    // Next tick falls normally, visible again, spring params restored
    let snapshot = sim.tick(Vec2::ZERO, viewport);
    assert_eq!(snapshot[0].y, -140.0);
    assert_eq!(snapshot[0].opacity, 1.0);
    let p = sim.particles()[0];
    assert_eq!(p.friction, sim.config().friction);
    assert_eq!(p.mass, sim.config().mass);
}

#[test]
fn test_falling_particle_far_above_is_pinned_to_band() {
    let config = RainOptions::new()
        .with_num_images(1)
        .with_gravity(5.0)
        .with_cursor_interact(false)
        .resolve();
    let viewport = Viewport::new(400.0, 300.0);
    // band = 300 * 1/4
    let mut sim = single(config, 10.0, -1000.0);

    let snapshot = sim.tick(Vec2::ZERO, viewport);
    assert_eq!(snapshot[0].y, -75.0);
}

// ============================================================================
// Rising regime
// ============================================================================

#[test]
fn test_rising_particle_recycles_below_visible() {
    let config = RainOptions::new()
        .with_num_images(1)
        .with_gravity(-10.0)
        .with_cursor_interact(false)
        .resolve();
    let viewport = Viewport::new(400.0, 600.0);
    let mut sim = single(config, 50.0, -590.0);

    let snapshot = sim.tick(Vec2::ZERO, viewport);
    assert_eq!(snapshot[0].y, -600.0);
    assert_eq!(sim.recycled_last_tick(), 0);

    // Recycled to H * yoffset = 600 * 1/4
    let snapshot = sim.tick(Vec2::ZERO, viewport);
    assert_eq!(snapshot[0].y, 150.0);
    assert_eq!(snapshot[0].opacity, 1.0);
    assert_eq!(sim.recycled_last_tick(), 1);

    let snapshot = sim.tick(Vec2::ZERO, viewport);
    assert_eq!(snapshot[0].y, 140.0);
    assert_eq!(snapshot[0].opacity, 1.0);
}

#[test]
fn test_gravity_of_one_rises() {
    let config = RainOptions::new()
        .with_num_images(1)
        .with_gravity(1.0)
        .with_cursor_interact(false)
        .resolve();
    let viewport = Viewport::new(400.0, 600.0);
    let mut sim = single(config, 50.0, -600.5);

    // Gravity 1 belongs to the rising regime, so crossing -H recycles
    let snapshot = sim.tick(Vec2::ZERO, viewport);
    assert_eq!(snapshot[0].y, -599.5);

    let mut sim = single(sim.config().clone(), 50.0, -602.0);
    let snapshot = sim.tick(Vec2::ZERO, viewport);
    assert_eq!(snapshot[0].y, 150.0);
}

// ============================================================================
// Cursor force
// ============================================================================

#[test]
fn test_cursor_on_particle_exerts_no_force() {
    let config = RainOptions::new().with_num_images(1).with_gravity(60.0).resolve();
    let viewport = Viewport::new(400.0, 800.0);
    let mut sim = single(config, 100.0, 100.0);

    let snapshot = sim.tick(Vec2::new(100.0, 100.0), viewport);
    assert_eq!(snapshot[0].x, 100.0);
    assert_eq!(snapshot[0].y, 160.0);
    assert!(snapshot[0].x.is_finite() && snapshot[0].y.is_finite());
}

#[test]
fn test_repel_and_blackhole_are_mirrored() {
    let base = RainOptions::new()
        .with_num_images(1)
        .with_gravity(10.0)
        .with_force_multiplier(1.0)
        .with_force_field_radius(100.0);
    let viewport = Viewport::new(400.0, 800.0);
    let cursor = Vec2::new(150.0, 100.0);

    let mut repel = single(base.clone().resolve(), 100.0, 100.0);
    let snapshot = repel.tick(cursor, viewport);
    assert!((snapshot[0].x - 95.0).abs() < 1e-4);
    assert_eq!(snapshot[0].y, 110.0);

    let mut attract = single(base.with_blackhole_effect(true).resolve(), 100.0, 100.0);
    let snapshot = attract.tick(cursor, viewport);
    assert!((snapshot[0].x - 105.0).abs() < 1e-4);
    assert_eq!(snapshot[0].y, 110.0);
}

#[test]
fn test_disabled_interaction_ignores_cursor() {
    let config = RainOptions::new()
        .with_num_images(1)
        .with_gravity(10.0)
        .with_cursor_interact(false)
        .resolve();
    let viewport = Viewport::new(400.0, 800.0);
    let mut sim = single(config, 100.0, 100.0);

    let snapshot = sim.tick(Vec2::new(110.0, 100.0), viewport);
    assert_eq!(snapshot[0].x, 100.0);
    assert_eq!(snapshot[0].y, 110.0);
}

// ============================================================================
// Whole runs
// ============================================================================

#[test]
fn test_seeded_runs_are_identical() {
    let config = RainOptions::new().with_num_images(40).with_seed(99).resolve();
    let viewport = Viewport::new(640.0, 480.0);
    let mut a = Simulator::new(config.clone(), viewport);
    let mut b = Simulator::new(config, viewport);

    for i in 0..200 {
        let cursor = Vec2::new((i * 7 % 640) as f32, (i * 13 % 480) as f32);
        assert_eq!(a.tick(cursor, viewport), b.tick(cursor, viewport));
    }
}

#[test]
fn test_viewport_resize_is_read_every_tick() {
    let config = RainOptions::new()
        .with_num_images(1)
        .with_gravity(60.0)
        .with_cursor_interact(false)
        .resolve();
    let mut sim = single(config, 10.0, 500.0);

    // Tall viewport: still within
    let snapshot = sim.tick(Vec2::ZERO, Viewport::new(400.0, 800.0));
    assert_eq!(snapshot[0].y, 560.0);

    // Shrunk viewport: 620 > 1.1 * 400 recycles
    let snapshot = sim.tick(Vec2::ZERO, Viewport::new(400.0, 400.0));
    assert_eq!(snapshot[0].y, -100.0);
}

// ============================================================================
// Properties
// ============================================================================

fn arb_options() -> impl Strategy<Value = RainOptions> {
    (
        1u32..60,
        -80.0f32..80.0,
        0.0f32..300.0,
        0.0f32..200.0,
        0.1f32..20.0,
        any::<bool>(),
        any::<bool>(),
        any::<u64>(),
    )
        .prop_map(|(count, gravity, radius, max_velocity, multiplier, interact, blackhole, seed)| {
            RainOptions::new()
                .with_num_images(count)
                .with_gravity(gravity)
                .with_force_field_radius(radius)
                .with_max_velocity(max_velocity)
                .with_force_multiplier(multiplier)
                .with_cursor_interact(interact)
                .with_blackhole_effect(blackhole)
                .with_seed(seed)
        })
}

fn arb_point() -> impl Strategy<Value = Vec2> {
    (-500.0f32..1500.0, -1500.0f32..1500.0).prop_map(|(x, y)| Vec2::new(x, y))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Property: each force component stays within max_velocity
    #[test]
    fn test_force_is_clamped_per_axis(
        options in arb_options(),
        p in arb_point(),
        c in arb_point(),
    ) {
        let config = options.resolve();
        let f = ForceField::from_config(&config).force(p, c);

        prop_assert!(f.is_finite());
        prop_assert!(f.x.abs() <= config.max_velocity);
        prop_assert!(f.y.abs() <= config.max_velocity);
    }

    /// Property: no force outside the radius or with interaction off
    #[test]
    fn test_force_zero_outside_field(options in arb_options(), p in arb_point(), c in arb_point()) {
        let config = options.resolve();
        let f = ForceField::from_config(&config).force(p, c);

        if !config.cursor_interaction || (p - c).length() >= config.force_field_radius {
            prop_assert_eq!(f, Vec2::ZERO);
        }
    }

    /// Property: count is fixed and opacity binary across a run
    #[test]
    fn test_run_invariants(
        options in arb_options(),
        cursors in prop::collection::vec(arb_point(), 1..40),
        width in 50.0f32..2000.0,
        height in 50.0f32..2000.0,
    ) {
        let config = options.resolve();
        let count = config.count as usize;
        let viewport = Viewport::new(width, height);
        let mut sim = Simulator::new(config, viewport);

        for cursor in cursors {
            let snapshot = sim.tick(cursor, viewport);
            prop_assert_eq!(snapshot.len(), count);
            for attrs in &snapshot {
                prop_assert!(attrs.opacity == 0.0 || attrs.opacity == 1.0);
                prop_assert!(attrs.x.is_finite() && attrs.y.is_finite());
            }
        }
    }

    /// Property: scale and rotation never change after spawn
    #[test]
    fn test_cosmetics_fixed(
        options in arb_options(),
        cursors in prop::collection::vec(arb_point(), 1..20),
    ) {
        let config = options.resolve();
        let viewport = Viewport::new(800.0, 600.0);
        let mut sim = Simulator::new(config, viewport);
        let initial = sim.snapshot();

        for cursor in cursors {
            let snapshot = sim.tick(cursor, viewport);
            for (before, after) in initial.iter().zip(snapshot.iter()) {
                prop_assert_eq!(before.scale, after.scale);
                prop_assert_eq!(before.rotation, after.rotation);
            }
        }
    }

    /// Property: with a fixed viewport, falling particles stay in [-H*yoffset, 1.1*H]
    #[test]
    fn test_falling_stays_in_band(
        options in arb_options(),
        gravity in 1.01f32..80.0,
        cursors in prop::collection::vec(arb_point(), 1..60),
        height in 50.0f32..2000.0,
    ) {
        let config = options.with_gravity(gravity).resolve();
        let viewport = Viewport::new(800.0, height);
        let band = height * config.yoffset();
        let mut sim = Simulator::new(config, viewport);

        for cursor in cursors {
            for attrs in &sim.tick(cursor, viewport) {
                prop_assert!(attrs.y >= -band, "y {} above band {}", attrs.y, -band);
                prop_assert!(attrs.y <= height * 1.1, "y {} below 1.1 * {}", attrs.y, height);
            }
        }
    }

    /// Property: with a fixed viewport, rising particles stay in [-H, H*yoffset]
    #[test]
    fn test_rising_stays_in_band(
        options in arb_options(),
        gravity in -80.0f32..=1.0,
        cursors in prop::collection::vec(arb_point(), 1..60),
        height in 50.0f32..2000.0,
    ) {
        let config = options.with_gravity(gravity).resolve();
        let viewport = Viewport::new(800.0, height);
        let band = height * config.yoffset();
        let mut sim = Simulator::new(config, viewport);

        for cursor in cursors {
            for attrs in &sim.tick(cursor, viewport) {
                prop_assert!(attrs.y <= band, "y {} below band {}", attrs.y, band);
                prop_assert!(attrs.y >= -height, "y {} above -{}", attrs.y, height);
            }
        }
    }
}
