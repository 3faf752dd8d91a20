//! Frame timing for the scheduler.
//!
//! Tracks the gap between refreshes (for spring easing) and a periodically
//! recomputed frame rate (for logging). Every method takes `now` explicitly
//! so tests can drive it without sleeping.

use std::time::{Duration, Instant};

const FPS_WINDOW: Duration = Duration::from_millis(500);

#[derive(Debug, Clone)]
pub struct FrameClock {
    last_frame: Option<Instant>,
    delta: Duration,
    frame_count: u64,
    fps: f32,
    fps_frame_count: u64,
    fps_window_start: Option<Instant>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            last_frame: None,
            delta: Duration::ZERO,
            frame_count: 0,
            fps: 0.0,
            fps_frame_count: 0,
            fps_window_start: None,
        }
    }

    /// Record a frame at `now` and return the time since the previous one.
    ///
    /// The first frame has a zero delta.
    pub fn update(&mut self, now: Instant) -> Duration {
        self.delta = match self.last_frame {
            Some(last) => now.saturating_duration_since(last),
            None => Duration::ZERO,
        };
        self.last_frame = Some(now);
        self.frame_count += 1;

        let Some(window_start) = self.fps_window_start else {
            self.fps_window_start = Some(now);
            self.fps_frame_count = self.frame_count;
            return self.delta;
        };
        let window = now.saturating_duration_since(window_start);
        if window >= FPS_WINDOW {
            let frames = self.frame_count - self.fps_frame_count;
            self.fps = frames as f32 / window.as_secs_f32();
            self.fps_frame_count = self.frame_count;
            self.fps_window_start = Some(now);
        }

        self.delta
    }

    #[inline]
    pub fn delta(&self) -> Duration {
        self.delta
    }

    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_frame_zero_delta() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.update(Instant::now()), Duration::ZERO);
        assert_eq!(clock.frame(), 1);
    }

    #[test]
    fn test_delta_between_frames() {
        let mut clock = FrameClock::new();
        let t0 = Instant::now();
        clock.update(t0);
        let delta = clock.update(t0 + Duration::from_millis(16));
        assert_eq!(delta, Duration::from_millis(16));
        assert_eq!(clock.delta(), Duration::from_millis(16));
    }

    #[test]
    fn test_fps_window() {
        let mut clock = FrameClock::new();
        let t0 = Instant::now();
        // 20ms apart; the window opens on the first frame and closes at 500ms
        for i in 0..=30 {
            clock.update(t0 + Duration::from_millis(20 * i));
        }
        assert!((clock.fps() - 50.0).abs() < 1.0, "fps = {}", clock.fps());
    }
}
