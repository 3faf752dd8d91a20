//! Drives the simulator once per refresh opportunity.
//!
//! The host (a window event loop, a test, a headless exporter) calls
//! [`Scheduler::frame`] whenever it is ready to draw. Each call runs exactly
//! one whole tick, so stopping through a [`StopHandle`] can never leave a
//! half-advanced particle array behind.

use crate::config::Config;
use crate::easing::Easing;
use crate::input::{CursorSampler, CursorTracker};
use crate::particle::{Snapshot, Viewport};
use crate::simulation::Simulator;
use crate::time::FrameClock;
use glam::Vec2;
use rand::rngs::SmallRng;
use rand::Rng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Cloneable stop request, usable from any thread.
#[derive(Debug, Clone, Default)]
pub struct StopHandle {
    stopped: Arc<AtomicBool>,
}

impl StopHandle {
    pub fn stop(&self) {
        self.stopped.store(true, Ordering::Release);
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Acquire)
    }
}

/// Owns a [`Simulator`] and the per-frame plumbing around it.
pub struct Scheduler<R: Rng = SmallRng> {
    simulator: Simulator<R>,
    sampler: CursorSampler,
    easing: Option<Easing>,
    clock: FrameClock,
    stop: StopHandle,
}

impl Scheduler<SmallRng> {
    /// Spawn a fresh run against the start-time viewport.
    pub fn new(config: Config, viewport: Viewport) -> Self {
        Self::with_simulator(Simulator::new(config, viewport))
    }
}

impl<R: Rng> Scheduler<R> {
    /// Wrap an existing simulator. Cursor sampling and easing follow its config.
    pub fn with_simulator(simulator: Simulator<R>) -> Self {
        let config = simulator.config();
        let tracker = Arc::new(CursorTracker::new());
        let interval = Duration::from_millis(config.sample_interval_ms);
        let mut sampler = CursorSampler::new(tracker, interval);
        if !config.cursor_interaction {
            sampler = sampler.disabled();
        }
        let easing = Easing::new(config.spring_tension, simulator.particles())
            .with_drift(Vec2::new(0.0, config.gravity));

        Self {
            simulator,
            sampler,
            easing: Some(easing),
            clock: FrameClock::new(),
            stop: StopHandle::default(),
        }
    }

    /// Emit raw simulated positions instead of eased ones.
    pub fn without_easing(mut self) -> Self {
        self.easing = None;
        self
    }

    /// Run one tick and return what to draw.
    ///
    /// `None` once stopped, and also while `viewport` has no area; such a
    /// frame leaves the particles untouched.
    pub fn frame(&mut self, now: Instant, viewport: Viewport) -> Option<Snapshot> {
        if self.stop.is_stopped() || viewport.is_empty() {
            return None;
        }

        let elapsed = self.clock.update(now);
        self.sampler.poll(now);
        let cursor = self.sampler.tracker().current();

        let mut snapshot = self.simulator.tick(cursor, viewport);
        if let Some(easing) = &mut self.easing {
            easing.apply(self.simulator.particles(), &mut snapshot, elapsed);
        }

        if self.clock.frame() % 300 == 0 {
            log::debug!(
                "frame {}: {:.1} fps, {} particle(s), cursor ({:.0}, {:.0})",
                self.clock.frame(),
                self.clock.fps(),
                snapshot.len(),
                cursor.x,
                cursor.y,
            );
        }

        Some(snapshot)
    }

    /// Drive `frames` ticks at a fixed interval, collecting each snapshot.
    ///
    /// Stops early if a stop was requested or the viewport is empty.
    pub fn run_frames(
        &mut self,
        frames: usize,
        interval: Duration,
        viewport: Viewport,
    ) -> Vec<Snapshot> {
        let start = Instant::now();
        let mut out = Vec::with_capacity(frames);
        for i in 0..frames {
            let now = start + interval * i as u32;
            match self.frame(now, viewport) {
                Some(snapshot) => out.push(snapshot),
                None => break,
            }
        }
        out
    }

    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    pub fn stop(&self) {
        self.stop.stop();
    }

    pub fn is_stopped(&self) -> bool {
        self.stop.is_stopped()
    }

    /// Sampler for feeding pointer events.
    pub fn sampler_mut(&mut self) -> &mut CursorSampler {
        &mut self.sampler
    }

    /// Shared tracker, for writers outside the event loop.
    pub fn cursor(&self) -> Arc<CursorTracker> {
        self.sampler.tracker().clone()
    }

    pub fn simulator(&self) -> &Simulator<R> {
        &self.simulator
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }
}
