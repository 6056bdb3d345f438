use std::time::{Duration, Instant};

/// Wall-clock delta source with clamping.
///
/// The first tick only records a baseline and reports zero. Later deltas are
/// clamped so that a stall (debugger, minimized window) does not produce a
/// single huge step, and tight loops never report zero.
#[derive(Debug, Clone)]
pub struct DeltaClock {
    last: Option<Instant>,
    dt_min: Duration,
    dt_max: Duration,
}

impl DeltaClock {
    pub fn new() -> Self {
        Self::with_clamps(Duration::from_micros(100), Duration::from_millis(250))
    }

    pub fn with_clamps(dt_min: Duration, dt_max: Duration) -> Self {
        debug_assert!(dt_min <= dt_max);
        Self {
            last: None,
            dt_min,
            dt_max,
        }
    }

    /// Seconds since the previous tick.
    pub fn tick(&mut self) -> f32 {
        self.tick_at(Instant::now())
    }

    /// Same as [`tick`](Self::tick) with an explicit timestamp.
    pub fn tick_at(&mut self, now: Instant) -> f32 {
        let Some(last) = self.last.replace(now) else {
            return 0.0;
        };
        now.saturating_duration_since(last)
            .clamp(self.dt_min, self.dt_max)
            .as_secs_f32()
    }

    /// Forgets the baseline; the next tick reports zero again.
    pub fn reset(&mut self) {
        self.last = None;
    }
}

impl Default for DeltaClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_tick_is_zero() {
        let mut clock = DeltaClock::new();
        assert_eq!(clock.tick_at(Instant::now()), 0.0);
    }

    #[test]
    fn delta_between_ticks() {
        let mut clock = DeltaClock::new();
        let t0 = Instant::now();
        clock.tick_at(t0);
        let dt = clock.tick_at(t0 + Duration::from_millis(16));
        assert!((dt - 0.016).abs() < 1e-6);
    }

    #[test]
    fn long_stall_is_clamped() {
        let mut clock = DeltaClock::new();
        let t0 = Instant::now();
        clock.tick_at(t0);
        assert_eq!(clock.tick_at(t0 + Duration::from_secs(5)), 0.25);
    }

    #[test]
    fn zero_delta_is_raised_to_minimum() {
        let mut clock = DeltaClock::new();
        let t0 = Instant::now();
        clock.tick_at(t0);
        assert!((clock.tick_at(t0) - 0.0001).abs() < 1e-7);
    }

    #[test]
    fn reset_drops_baseline() {
        let mut clock = DeltaClock::new();
        let t0 = Instant::now();
        clock.tick_at(t0);
        clock.reset();
        assert_eq!(clock.tick_at(t0 + Duration::from_millis(40)), 0.0);
    }
}
