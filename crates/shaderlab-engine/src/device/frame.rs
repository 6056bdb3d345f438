/// A single acquired frame.
///
/// Holding the surface texture prevents acquisition of subsequent frames, so
/// submit promptly.
pub struct GpuFrame {
    pub surface_texture: wgpu::SurfaceTexture,
    /// View of the swapchain texture.
    pub view: wgpu::TextureView,
    /// Multisampled render target resolving into `view`, when MSAA is on.
    pub msaa_view: Option<wgpu::TextureView>,
    pub encoder: wgpu::CommandEncoder,
}

/// Color attachment that clears to `clear`, rendering into `msaa_view` and
/// resolving into `view` when multisampling.
pub fn color_attachment<'a>(
    view: &'a wgpu::TextureView,
    msaa_view: Option<&'a wgpu::TextureView>,
    clear: wgpu::Color,
) -> wgpu::RenderPassColorAttachment<'a> {
    let (target, resolve_target, store) = match msaa_view {
        Some(msaa) => (msaa, Some(view), wgpu::StoreOp::Discard),
        None => (view, None, wgpu::StoreOp::Store),
    };
    wgpu::RenderPassColorAttachment {
        view: target,
        resolve_target,
        ops: wgpu::Operations {
            load: wgpu::LoadOp::Clear(clear),
            store,
        },
        depth_slice: None,
    }
}
