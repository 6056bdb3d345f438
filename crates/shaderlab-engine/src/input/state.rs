use glam::Vec2;

use super::smoothing::PointerSmoother;
use super::types::{PointerEvent, PointerTracking};

/// Pointer state for one mounted scene.
///
/// Positions are bottom-left origin. The raw sample is updated by pointer
/// events; the smoothed value is advanced separately on its own clock.
#[derive(Debug, Clone)]
pub struct PointerState {
    tracking: PointerTracking,
    raw: Vec2,
    smoother: Option<PointerSmoother>,
}

impl PointerState {
    pub fn new(tracking: PointerTracking) -> Self {
        let smoother = match tracking {
            PointerTracking::Smoothed { time_constant } => Some(PointerSmoother::new(time_constant)),
            _ => None,
        };
        Self {
            tracking,
            raw: Vec2::ZERO,
            smoother,
        }
    }

    pub fn tracking(&self) -> PointerTracking {
        self.tracking
    }

    /// Records a host pointer event, flipping to bottom-left origin.
    pub fn record(&mut self, event: PointerEvent, viewport_height: f32) {
        if !self.tracking.is_enabled() {
            return;
        }
        self.raw = event.flipped(viewport_height);
        if let Some(s) = self.smoother.as_mut() {
            s.set_target(self.raw);
        }
    }

    /// Advances smoothing by `dt` seconds. No-op without smoothing.
    pub fn advance(&mut self, dt: f32) {
        if let Some(s) = self.smoother.as_mut() {
            s.advance(dt);
        }
    }

    /// Latest raw sample.
    pub fn raw(&self) -> Vec2 {
        self.raw
    }

    /// Value to feed the shader: smoothed when enabled, raw otherwise.
    pub fn position(&self) -> Vec2 {
        self.smoother.map_or(self.raw, |s| s.current())
    }
}
