// src/fps.rs
use std::time::Duration;
/// Frame rate over a window that restarts every `window`.
#[derive(Clone, Debug)]
pub struct FpsMeter {
    window: Duration,
    window_start: Option<Duration>,
    frames: u32,
}
impl FpsMeter {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            window_start: None,
            frames: 0,
        }
    }
    /// Count a frame at `now`. Returns the window's FPS when the window rolls over.
    pub fn record_frame(&mut self, now: Duration) -> Option<f64> {
        let start = *self.window_start.get_or_insert(now);
        self.frames += 1;
        let elapsed = now.saturating_sub(start);
        if elapsed < self.window || elapsed.is_zero() {
            return None;
        }
        let fps = self.frames as f64 / elapsed.as_secs_f64();
        self.window_start = Some(now);
        self.frames = 0;
        Some(fps)
    }
    /// FPS of the current, unfinished window.
    pub fn current(&self, now: Duration) -> Option<f64> {
        let start = self.window_start?;
        let elapsed = now.saturating_sub(start).as_secs_f64();
        if elapsed <= 0.0 || self.frames == 0 {
            return None;
        }
        Some(self.frames as f64 / elapsed)
    }
}
