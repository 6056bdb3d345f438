/// Default per-frame increment of the shader time uniform.
pub const DEFAULT_TIME_STEP: f32 = 0.01;

/// Snapshot produced by one [`FrameClock::tick`].
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameTime {
    /// Shader time after this tick (`step * ticks`).
    pub time: f32,

    /// Number of ticks taken before this one.
    pub frame_index: u64,
}

/// Fixed-increment frame clock.
///
/// The time value is derived from the tick count rather than accumulated, so
/// it carries no summation drift: after `n` ticks it is `step * n` evaluated
/// in `f64` and rounded once to `f32`.
#[derive(Debug, Clone)]
pub struct FrameClock {
    step: f64,
    ticks: u64,
}

impl FrameClock {
    pub fn new(step: f32) -> Self {
        Self {
            step: step as f64,
            ticks: 0,
        }
    }

    /// Per-tick increment.
    pub fn step(&self) -> f32 {
        self.step as f32
    }

    /// Number of ticks taken so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Current time value without advancing.
    pub fn time(&self) -> f32 {
        (self.step * self.ticks as f64) as f32
    }

    /// Advances by one increment.
    pub fn tick(&mut self) -> FrameTime {
        let frame_index = self.ticks;
        self.ticks = self.ticks.wrapping_add(1);
        FrameTime {
            time: self.time(),
            frame_index,
        }
    }

    pub fn reset(&mut self) {
        self.ticks = 0;
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(DEFAULT_TIME_STEP)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_zero() {
        let clock = FrameClock::default();
        assert_eq!(clock.time(), 0.0);
        assert_eq!(clock.ticks(), 0);
    }

    #[test]
    fn n_ticks_yield_step_times_n() {
        for n in [1u64, 7, 100, 1_000, 123_456] {
            let mut clock = FrameClock::new(0.01);
            let mut last = 0.0;
            for _ in 0..n {
                last = clock.tick().time;
            }
            let expected = 0.01f64 * n as f64;
            let err = (last as f64 - expected).abs();
            assert!(err <= 1e-6 * expected.max(1.0), "after {n} ticks: {last} vs {expected}");
        }
    }

    #[test]
    fn frame_index_counts_from_zero() {
        let mut clock = FrameClock::default();
        assert_eq!(clock.tick().frame_index, 0);
        assert_eq!(clock.tick().frame_index, 1);
        assert_eq!(clock.ticks(), 2);
    }

    #[test]
    fn identical_clocks_agree() {
        let mut a = FrameClock::new(0.01);
        let mut b = FrameClock::new(0.01);
        for _ in 0..500 {
            assert_eq!(a.tick(), b.tick());
        }
    }

    #[test]
    fn reset_returns_to_zero() {
        let mut clock = FrameClock::new(0.5);
        clock.tick();
        clock.tick();
        assert_eq!(clock.time(), 1.0);
        clock.reset();
        assert_eq!(clock.time(), 0.0);
    }
}
