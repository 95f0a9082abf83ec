//! Fixed-step accumulator for the owning game loop.
//!
//! Real frame time goes in, a whole number of fixed ticks comes out, so the
//! simulation is identical regardless of display refresh rate.

/// Accumulates frame time and hands out fixed ticks.
#[derive(Clone, Debug)]
pub struct FixedTimestep {
    step: f64,
    accumulator: f64,
    max_steps_per_frame: usize,
}

impl FixedTimestep {
    /// `step` in seconds, e.g. `1.0 / 60.0`. At most `max_steps_per_frame`
    /// ticks run per frame; any backlog beyond that is discarded.
    pub fn new(step: f64, max_steps_per_frame: usize) -> Self {
        Self { step, accumulator: 0.0, max_steps_per_frame: max_steps_per_frame.max(1) }
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    /// Feed one frame's elapsed time and run `tick(step)` as many whole
    /// times as fit. Returns the number of ticks run.
    pub fn advance(&mut self, frame_dt: f64, mut tick: impl FnMut(f64)) -> usize {
        if self.step.is_nan() || self.step <= 0.0 || !frame_dt.is_finite() || frame_dt <= 0.0 {
            return 0;
        }
        self.accumulator += frame_dt;
        let mut ran = 0;
        while self.accumulator >= self.step && ran < self.max_steps_per_frame {
            tick(self.step);
            self.accumulator -= self.step;
            ran += 1;
        }
        if ran == self.max_steps_per_frame && self.accumulator >= self.step {
            log::debug!("dropping {:.4}s of simulation backlog", self.accumulator);
            self.accumulator %= self.step;
        }
        ran
    }

    /// Leftover fraction of a step, for render interpolation.
    pub fn alpha(&self) -> f64 {
        if self.step > 0.0 { self.accumulator / self.step } else { 0.0 }
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_steps_and_remainder() {
        let mut ts = FixedTimestep::new(0.25, 8);
        let mut seen = Vec::new();
        assert_eq!(ts.advance(0.625, |dt| seen.push(dt)), 2);
        assert_eq!(seen, vec![0.25, 0.25]);
        assert_eq!(ts.alpha(), 0.5);
        assert_eq!(ts.advance(0.125, |_| {}), 1);
        assert_eq!(ts.alpha(), 0.0);
    }

    #[test]
    fn test_backlog_capped() {
        let mut ts = FixedTimestep::new(0.25, 3);
        assert_eq!(ts.advance(10.1, |_| {}), 3);
        assert!(ts.alpha() < 1.0);
        // Backlog gone: a small frame runs nothing.
        assert_eq!(ts.advance(0.01, |_| {}), 0);
    }

    #[test]
    fn test_invalid_frame_time_ignored() {
        let mut ts = FixedTimestep::new(0.01, 3);
        assert_eq!(ts.advance(f64::NAN, |_| {}), 0);
        assert_eq!(ts.advance(-0.5, |_| {}), 0);
        assert_eq!(ts.alpha(), 0.0);
    }
}
