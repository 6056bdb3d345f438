use thiserror::Error;

use crate::config::ConfigError;
use crate::material::MaterialError;
use crate::mesh::MeshError;

/// Why [`SceneDriver::start`](super::SceneDriver::start) refused to mount.
#[derive(Debug, Error)]
pub enum MountError {
    #[error("driver is already running")]
    AlreadyRunning,

    #[error("driver was disposed; mount a new instance instead")]
    Disposed,

    #[error("scene has nothing to draw")]
    EmptyScene,

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("invalid mesh: {0}")]
    Mesh(#[from] MeshError),

    #[error("material failed to compile: {0}")]
    Material(#[from] MaterialError),

    #[error("render backend setup failed: {0:#}")]
    Backend(anyhow::Error),
}

/// A failed draw.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FrameError {
    /// The frame was lost but the next one may succeed (surface lost,
    /// outdated, timed out).
    #[error("frame skipped: {0}")]
    Transient(String),

    /// Rendering cannot continue (out of memory, device lost, resources gone).
    #[error("frame failed: {0}")]
    Fatal(String),
}

impl FrameError {
    #[inline]
    pub fn is_fatal(&self) -> bool {
        matches!(self, FrameError::Fatal(_))
    }
}
