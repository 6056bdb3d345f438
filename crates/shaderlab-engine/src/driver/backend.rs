use crate::material::{ShaderProgram, UniformTable};
use crate::mesh::Mesh;
use crate::viewport::Viewport;

use super::error::FrameError;

/// Validated inputs handed to a backend at mount.
#[derive(Debug, Clone, Copy)]
pub struct PreparedScene<'a> {
    pub background: wgpu::Color,
    pub mesh: &'a Mesh,
    pub program: &'a ShaderProgram,
    pub uniforms: &'a UniformTable,
    pub viewport: Viewport,
}

/// What the driver needs from a renderer.
///
/// The wgpu implementation lives in `render::GpuBackend`. All calls happen on
/// the host thread; `release` is called exactly once, after which no other
/// method is called.
pub trait RenderBackend {
    /// Creates buffers and pipelines for `scene`.
    fn prepare(&mut self, scene: &PreparedScene<'_>) -> anyhow::Result<()>;

    /// Resizes the backing buffer. Only called with a valid viewport.
    fn resize(&mut self, viewport: Viewport);

    /// Uploads `uniforms` and draws one frame.
    fn draw(&mut self, uniforms: &UniformTable) -> Result<(), FrameError>;

    /// Drops GPU resources.
    fn release(&mut self);
}
