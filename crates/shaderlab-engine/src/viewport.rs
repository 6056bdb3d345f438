//! Viewport state shared by the camera, the resolution uniform and the surface.
//!
//! Sizes are logical pixels (the host's layout units). The device pixel ratio
//! only scales the backing buffer and is capped at [`MAX_PIXEL_RATIO`].

/// Upper bound for the device pixel ratio used to size the backing buffer.
pub const MAX_PIXEL_RATIO: f32 = 2.0;

/// Drawable size in logical pixels plus the effective device pixel ratio.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    device_pixel_ratio: f32,
}

impl Viewport {
    /// Builds a viewport from host-reported values.
    ///
    /// The ratio is capped at [`MAX_PIXEL_RATIO`]; non-finite or non-positive
    /// ratios fall back to `1.0`.
    pub fn new(width: f32, height: f32, device_pixel_ratio: f32) -> Self {
        Self {
            width,
            height,
            device_pixel_ratio: effective_pixel_ratio(device_pixel_ratio),
        }
    }

    /// Builds a viewport from a physical size and the host scale factor.
    pub fn from_physical(width: u32, height: u32, scale_factor: f64) -> Self {
        let scale = if scale_factor.is_finite() && scale_factor > 0.0 {
            scale_factor
        } else {
            1.0
        };
        Self::new(
            (width as f64 / scale) as f32,
            (height as f64 / scale) as f32,
            scale as f32,
        )
    }

    #[inline]
    pub fn device_pixel_ratio(self) -> f32 {
        self.device_pixel_ratio
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }

    /// Width over height. Only meaningful for a valid viewport.
    #[inline]
    pub fn aspect(self) -> f32 {
        self.width / self.height
    }

    /// Backing-buffer size in physical pixels, never smaller than 1x1.
    pub fn backing_size(self) -> (u32, u32) {
        let scale = |v: f32| {
            if v.is_finite() && v > 0.0 {
                ((v * self.device_pixel_ratio).ceil() as u32).max(1)
            } else {
                1
            }
        };
        (scale(self.width), scale(self.height))
    }

    /// `[width, height]` as written into the resolution uniform.
    #[inline]
    pub fn resolution(self) -> [f32; 2] {
        [self.width, self.height]
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1.0, 1.0, 1.0)
    }
}

/// Caps a host-reported device pixel ratio.
pub fn effective_pixel_ratio(raw: f32) -> f32 {
    if raw.is_finite() && raw > 0.0 {
        raw.min(MAX_PIXEL_RATIO)
    } else {
        1.0
    }
}
