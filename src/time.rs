//! Frame timing for the native preview.
//!
//! The warp field advances a fixed step per frame, so timing is only used to
//! report the frame rate.
//!
//! ```ignore
//! let mut clock = FrameClock::new();
//!
//! // after each presented frame:
//! if clock.update() {
//!     println!("{:.0} fps after {} frames", clock.fps(), clock.frame());
//! }
//! ```

use std::time::{Duration, Instant};

/// Frame counter with a periodically refreshed FPS estimate.
#[derive(Debug)]
pub struct FrameClock {
    /// When the clock was created.
    start: Instant,
    /// Total frames since start.
    frame_count: u64,
    /// Calculated FPS (updated periodically).
    fps: f32,
    /// Frame count at last FPS update.
    fps_frame_count: u64,
    /// Time of last FPS calculation.
    fps_update_time: Instant,
    /// How often to update FPS calculation.
    fps_update_interval: Duration,
}

impl FrameClock {
    /// Create a clock starting from now.
    pub fn new() -> Self {
        Self::with_interval(Duration::from_millis(500))
    }

    /// Create a clock that refreshes its FPS estimate every `interval`.
    pub fn with_interval(interval: Duration) -> Self {
        let now = Instant::now();
        Self {
            start: now,
            frame_count: 0,
            fps: 0.0,
            fps_frame_count: 0,
            fps_update_time: now,
            fps_update_interval: interval,
        }
    }

    /// Count one frame. Returns `true` when the FPS estimate was refreshed.
    pub fn update(&mut self) -> bool {
        let now = Instant::now();
        self.frame_count += 1;

        let fps_elapsed = now.duration_since(self.fps_update_time);
        if fps_elapsed < self.fps_update_interval {
            return false;
        }
        let frames_since = self.frame_count - self.fps_frame_count;
        self.fps = frames_since as f32 / fps_elapsed.as_secs_f32();
        self.fps_frame_count = self.frame_count;
        self.fps_update_time = now;
        true
    }

    /// Total frames since start.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    /// Calculated frames per second.
    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }

    /// Wall time since the clock was created.
    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
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
    use std::thread;

    #[test]
    fn test_clock_new() {
        let clock = FrameClock::new();
        assert_eq!(clock.frame(), 0);
        assert_eq!(clock.fps(), 0.0);
    }

    #[test]
    fn test_clock_counts_frames() {
        let mut clock = FrameClock::with_interval(Duration::from_secs(3600));
        for _ in 0..5 {
            assert!(!clock.update());
        }
        assert_eq!(clock.frame(), 5);
        assert_eq!(clock.fps(), 0.0);
    }

    #[test]
    fn test_fps_refresh() {
        let mut clock = FrameClock::with_interval(Duration::from_millis(10));
        clock.update();
        thread::sleep(Duration::from_millis(20));

        assert!(clock.update());
        assert!(clock.fps() > 0.0);
        assert!(clock.elapsed() >= Duration::from_millis(20));
    }
}
