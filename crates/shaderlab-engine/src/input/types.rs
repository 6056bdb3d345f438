use std::fmt;
use std::str::FromStr;

use glam::Vec2;

use crate::viewport::Viewport;

/// Pointer move notification in host space (logical pixels, top-left origin).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointerEvent {
    pub x: f32,
    pub y: f32,
}

impl PointerEvent {
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Converts to bottom-left origin for a viewport of the given height.
    #[inline]
    pub fn flipped(self, viewport_height: f32) -> Vec2 {
        Vec2::new(self.x, viewport_height - self.y)
    }
}

/// Signals a host delivers to the render driver.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum HostSignal {
    Resized(Viewport),
    PointerMoved(PointerEvent),
}

/// How the pointer feeds the `u_mouse` uniform.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub enum PointerTracking {
    /// Pointer is ignored; `u_mouse` is not declared.
    #[default]
    Off,

    /// `u_mouse` follows the latest raw sample.
    Raw,

    /// `u_mouse` approaches the latest sample with the given time constant (seconds).
    Smoothed { time_constant: f32 },
}

impl PointerTracking {
    /// Tracking selected by the `mouse` variant: smoothed over 0.25 s.
    pub const DEFAULT: PointerTracking = PointerTracking::Smoothed { time_constant: 0.25 };

    #[inline]
    pub fn is_enabled(self) -> bool {
        !matches!(self, PointerTracking::Off)
    }
}

impl fmt::Display for PointerTracking {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PointerTracking::Off => f.write_str("off"),
            PointerTracking::Raw => f.write_str("raw"),
            PointerTracking::Smoothed { time_constant } => write!(f, "smoothed({time_constant}s)"),
        }
    }
}

impl FromStr for PointerTracking {
    type Err = String;

    /// Accepts `off`, `raw`, or a time constant in seconds (`0.25`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "off" | "still" => Ok(PointerTracking::Off),
            "raw" => Ok(PointerTracking::Raw),
            other => match other.parse::<f32>() {
                Ok(tau) if tau.is_finite() && tau > 0.0 => {
                    Ok(PointerTracking::Smoothed { time_constant: tau })
                }
                Ok(_) => Err(format!("smoothing time constant must be positive, got {other}")),
                Err(_) => Err(format!("unknown pointer tracking mode '{other}'")),
            },
        }
    }
}
