//! Cursor tracking.
//!
//! Raw pointer samples go through a [`CursorSampler`], which rate-limits them
//! into a shared [`CursorTracker`]. The simulation reads the tracker once per
//! tick and uses whatever value is current at that instant.
//!
//! ```ignore
//! let tracker = Arc::new(CursorTracker::new());
//! let mut sampler = CursorSampler::new(tracker.clone(), Duration::from_millis(50));
//!
//! // on every pointer event
//! sampler.sample(x, y, Instant::now());
//! // once per frame
//! sampler.poll(Instant::now());
//! let cursor = tracker.current();
//! ```

use glam::Vec2;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use winit::event::WindowEvent;

/// Latest cursor position, `(0, 0)` until the first sample.
///
/// Both coordinates live in one atomic word, so a reader never sees an `x`
/// from one sample paired with a `y` from another.
#[derive(Debug, Default)]
pub struct CursorTracker {
    packed: AtomicU64,
}

impl CursorTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the stored position. No validation.
    pub fn sample(&self, x: f32, y: f32) {
        self.packed.store(pack(x, y), Ordering::Release);
    }

    /// The most recently stored position.
    pub fn current(&self) -> Vec2 {
        unpack(self.packed.load(Ordering::Acquire))
    }
}

#[inline]
fn pack(x: f32, y: f32) -> u64 {
    ((x.to_bits() as u64) << 32) | y.to_bits() as u64
}

#[inline]
fn unpack(bits: u64) -> Vec2 {
    Vec2::new(f32::from_bits((bits >> 32) as u32), f32::from_bits(bits as u32))
}

/// Throttles pointer samples into a [`CursorTracker`].
///
/// Leading and trailing edge: the first sample after a quiet interval is
/// stored immediately; samples arriving inside the interval are held and
/// the newest is stored once the interval has passed, on the next
/// [`sample`](Self::sample) or [`poll`](Self::poll).
#[derive(Debug)]
pub struct CursorSampler {
    tracker: Arc<CursorTracker>,
    interval: Duration,
    enabled: bool,
    last_stored: Option<Instant>,
    pending: Option<Vec2>,
}

impl CursorSampler {
    pub fn new(tracker: Arc<CursorTracker>, interval: Duration) -> Self {
        Self {
            tracker,
            interval,
            enabled: true,
            last_stored: None,
            pending: None,
        }
    }

    /// Stop forwarding samples. The tracker keeps its last value.
    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn tracker(&self) -> &Arc<CursorTracker> {
        &self.tracker
    }

    /// Offer a raw pointer position observed at `now`.
    pub fn sample(&mut self, x: f32, y: f32, now: Instant) {
        if !self.enabled {
            return;
        }
        if self.is_due(now) {
            self.store(Vec2::new(x, y), now);
        } else {
            self.pending = Some(Vec2::new(x, y));
        }
    }

    /// Flush a held sample if its interval has elapsed. Call once per frame.
    pub fn poll(&mut self, now: Instant) {
        if let Some(pos) = self.pending {
            if self.is_due(now) {
                self.store(pos, now);
            }
        }
    }

    /// Feed a winit event; only `CursorMoved` is of interest.
    pub fn handle_event(&mut self, event: &WindowEvent, now: Instant) {
        if let WindowEvent::CursorMoved { position, .. } = event {
            self.sample(position.x as f32, position.y as f32, now);
        }
    }

    fn is_due(&self, now: Instant) -> bool {
        match self.last_stored {
            Some(last) => now.saturating_duration_since(last) >= self.interval,
            None => true,
        }
    }

    fn store(&mut self, pos: Vec2, now: Instant) {
        self.tracker.sample(pos.x, pos.y);
        self.last_stored = Some(now);
        self.pending = None;
    }
}
