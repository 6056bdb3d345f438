use crate::driver::FrameError;

/// High-level response after a surface error.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceErrorAction {
    /// Surface was reconfigured; rendering may resume next frame.
    Reconfigured,
    /// Transient error; skip the current frame.
    SkipFrame,
    /// Rendering cannot continue (commonly OOM).
    Fatal,
}

impl SurfaceErrorAction {
    pub fn classify(err: &wgpu::SurfaceError) -> Self {
        match err {
            wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => SurfaceErrorAction::Reconfigured,
            wgpu::SurfaceError::OutOfMemory => SurfaceErrorAction::Fatal,
            wgpu::SurfaceError::Timeout | wgpu::SurfaceError::Other => SurfaceErrorAction::SkipFrame,
        }
    }

    /// Frame error reported to the driver for this action.
    pub fn into_frame_error(self, err: &wgpu::SurfaceError) -> FrameError {
        match self {
            SurfaceErrorAction::Reconfigured | SurfaceErrorAction::SkipFrame => {
                FrameError::Transient(err.to_string())
            }
            SurfaceErrorAction::Fatal => FrameError::Fatal(err.to_string()),
        }
    }
}
