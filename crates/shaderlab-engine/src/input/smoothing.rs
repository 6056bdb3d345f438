use glam::Vec2;

/// Damped approach toward the latest pointer sample.
///
/// Each advance by `dt` closes the fraction `1 - exp(-dt / time_constant)` of
/// the remaining distance. The approach is monotone and never passes the
/// target; after `time_constant * ln(100)` seconds it is within 1%.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointerSmoother {
    current: Vec2,
    target: Vec2,
    time_constant: f32,
}

impl PointerSmoother {
    pub fn new(time_constant: f32) -> Self {
        Self::starting_at(Vec2::ZERO, time_constant)
    }

    pub fn starting_at(position: Vec2, time_constant: f32) -> Self {
        Self {
            current: position,
            target: position,
            time_constant: time_constant.max(0.0),
        }
    }

    pub fn time_constant(&self) -> f32 {
        self.time_constant
    }

    pub fn set_target(&mut self, target: Vec2) {
        self.target = target;
    }

    pub fn target(&self) -> Vec2 {
        self.target
    }

    pub fn current(&self) -> Vec2 {
        self.current
    }

    /// Moves `current` toward `target` by `dt` seconds.
    pub fn advance(&mut self, dt: f32) -> Vec2 {
        if dt.is_nan() || dt <= 0.0 {
            return self.current;
        }
        if self.time_constant <= 0.0 {
            self.current = self.target;
            return self.current;
        }

        let alpha = 1.0 - (-dt / self.time_constant).exp();
        self.current += (self.target - self.current) * alpha;
        self.current
    }

    /// Number of fixed `dt` steps until the remaining distance drops below
    /// `tolerance` (a fraction of the initial distance).
    pub fn steps_to_settle(time_constant: f32, dt: f32, tolerance: f32) -> u32 {
        if time_constant <= 0.0 {
            return 1;
        }
        ((time_constant / dt) * (1.0 / tolerance).ln()).ceil() as u32
    }
}
