//! Frame timing diagnostics.
//!
//! The core produces two numbers per run - instantaneous FPS and
//! milliseconds-per-frame - and the host renders them however it likes.
//! FPS is recomputed once per measurement window (one second), so motion
//! speed follows the *previous* window's average rather than the current
//! frame's delta.

use std::time::{Duration, Instant};

#[derive(Debug)]
pub struct FrameClock {
    frame_start: Instant,
    window_start: Instant,
    window: Duration,
    frames_in_window: u32,
    fps: f64,
    millis_per_frame: f64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::with_window(Duration::from_secs(1))
    }

    /// Clock with a custom measurement window.
    pub fn with_window(window: Duration) -> Self {
        let now = Instant::now();
        Self {
            frame_start: now,
            window_start: now,
            window,
            frames_in_window: 0,
            fps: 0.0,
            millis_per_frame: 0.0,
        }
    }

    /// Record one frame; returns the milliseconds the frame took. Rolls the
    /// FPS figure over when the measurement window has elapsed.
    pub fn tick(&mut self) -> f64 {
        let now = Instant::now();
        let elapsed = now.duration_since(self.frame_start).as_secs_f64() * 1000.0;
        self.frame_start = now;
        self.frames_in_window += 1;

        let window_elapsed = now.duration_since(self.window_start);
        if window_elapsed >= self.window {
            self.fps = self.frames_in_window as f64 / window_elapsed.as_secs_f64();
            self.millis_per_frame = elapsed;
            self.frames_in_window = 0;
            self.window_start = now;
        }
        elapsed
    }

    /// Instantaneous FPS from the last completed window; 0 until the first
    /// window closes, which deliberately freezes FPS-normalized motion.
    pub fn fps(&self) -> f64 {
        self.fps
    }

    pub fn millis_per_frame(&self) -> f64 {
        self.millis_per_frame
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
    fn test_fps_is_zero_before_first_window() {
        let mut clock = FrameClock::new();
        clock.tick();
        assert_eq!(clock.fps(), 0.0);
        assert_eq!(clock.millis_per_frame(), 0.0);
    }

    #[test]
    fn test_tick_measures_elapsed_millis() {
        let mut clock = FrameClock::new();
        thread::sleep(Duration::from_millis(20));
        let elapsed = clock.tick();
        assert!(elapsed >= 20.0, "measured {elapsed}ms");
    }

    #[test]
    fn test_fps_rolls_over_after_the_window() {
        let mut clock = FrameClock::with_window(Duration::from_millis(50));
        for _ in 0..8 {
            thread::sleep(Duration::from_millis(10));
            clock.tick();
        }
        let fps = clock.fps();
        assert!(fps > 0.0);
        // ~10ms frames: the figure should land near 100, not wildly off
        assert!((20.0..500.0).contains(&fps), "fps {fps}");
        assert!(clock.millis_per_frame() > 0.0);
    }
}
