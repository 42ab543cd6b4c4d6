//! Fixed-timestep frame clock
//!
//! Display frames arrive at whatever rate the browser chooses; the
//! simulation always advances in `SIM_DT_MS` steps.

use crate::consts::{MAX_FRAME_MS, MAX_SUBSTEPS, SIM_DT_MS};

#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    accumulator: f32,
    last_time: Option<f64>,
    /// Smoothed frames per second for the debug overlay
    fps: f32,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a frame timestamp (ms) and get the number of fixed steps to run
    pub fn advance(&mut self, now_ms: f64) -> u32 {
        let Some(last) = self.last_time.replace(now_ms) else {
            return 0;
        };

        let dt = ((now_ms - last) as f32).clamp(0.0, MAX_FRAME_MS);
        if dt > 0.0 {
            let instant = 1000.0 / dt;
            self.fps = if self.fps == 0.0 { instant } else { self.fps * 0.9 + instant * 0.1 };
        }
        self.accumulator += dt;

        let mut steps = 0;
        while self.accumulator >= SIM_DT_MS && steps < MAX_SUBSTEPS {
            self.accumulator -= SIM_DT_MS;
            steps += 1;
        }
        // Never carry more than one step of debt into the next frame
        self.accumulator = self.accumulator.min(SIM_DT_MS);
        steps
    }

    pub fn fps(&self) -> f32 {
        self.fps
    }

    /// Forget the previous timestamp (after a pause or restart)
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
        self.last_time = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_frame_runs_nothing() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.advance(1000.0), 0);
    }

    #[test]
    fn test_sixty_hz_runs_one_step_per_frame() {
        let mut clock = FrameClock::new();
        clock.advance(0.0);
        let mut total = 0;
        for frame in 1..=60 {
            total += clock.advance(frame as f64 * 1000.0 / 60.0 + 0.01);
        }
        assert!((59..=60).contains(&total));
    }

    #[test]
    fn test_high_refresh_accumulates() {
        let mut clock = FrameClock::new();
        clock.advance(0.0);
        let mut total = 0;
        for frame in 1..=120 {
            total += clock.advance(frame as f64 * 1000.0 / 120.0);
        }
        assert!((59..=60).contains(&total));
    }

    #[test]
    fn test_long_stall_is_clamped() {
        let mut clock = FrameClock::new();
        clock.advance(0.0);
        let steps = clock.advance(5000.0);
        assert!(steps as f32 <= MAX_FRAME_MS / SIM_DT_MS + 1.0);
        assert!(steps <= MAX_SUBSTEPS);
    }

    #[test]
    fn test_time_going_backwards() {
        let mut clock = FrameClock::new();
        clock.advance(100.0);
        assert_eq!(clock.advance(50.0), 0);
    }

    #[test]
    fn test_reset_forgets_timestamp() {
        let mut clock = FrameClock::new();
        clock.advance(0.0);
        clock.reset();
        assert_eq!(clock.advance(10_000.0), 0);
    }

    #[test]
    fn test_fps_estimate() {
        let mut clock = FrameClock::new();
        for frame in 0..=30 {
            clock.advance(frame as f64 * 20.0);
        }
        assert!((clock.fps() - 50.0).abs() < 1.0);
    }
}
