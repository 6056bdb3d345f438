use crate::device::{color_attachment, Gpu};
use crate::driver::{FrameError, PreparedScene, RenderBackend};
use crate::material::UniformTable;
use crate::viewport::Viewport;

use super::material::Material;
use super::mesh::GpuMesh;

struct SceneResources {
    background: wgpu::Color,
    mesh: GpuMesh,
    material: Material,
}

/// [`RenderBackend`] on top of a wgpu surface.
pub struct GpuBackend<'w> {
    gpu: Gpu<'w>,
    resources: Option<SceneResources>,
}

impl<'w> GpuBackend<'w> {
    pub fn new(gpu: Gpu<'w>) -> Self {
        Self {
            gpu,
            resources: None,
        }
    }

    pub fn gpu(&self) -> &Gpu<'w> {
        &self.gpu
    }
}

impl RenderBackend for GpuBackend<'_> {
    fn prepare(&mut self, scene: &PreparedScene<'_>) -> anyhow::Result<()> {
        anyhow::ensure!(self.resources.is_none(), "backend already prepared");

        self.gpu.resize(scene.viewport);
        let device = self.gpu.device();
        let mesh = GpuMesh::upload(device, scene.mesh);
        let material = Material::create(
            device,
            self.gpu.surface_format(),
            self.gpu.sample_count(),
            scene.program,
        );
        material.write_uniforms(self.gpu.queue(), scene.uniforms);

        log::debug!(
            "gpu backend: prepared {} elements, {} byte uniform block",
            scene.mesh.element_count(),
            scene.program.layout.buffer_size
        );

        self.resources = Some(SceneResources {
            background: scene.background,
            mesh,
            material,
        });
        Ok(())
    }

    fn resize(&mut self, viewport: Viewport) {
        self.gpu.resize(viewport);
    }

    fn draw(&mut self, uniforms: &UniformTable) -> Result<(), FrameError> {
        let Some(res) = self.resources.as_ref() else {
            return Err(FrameError::Fatal("backend not prepared".into()));
        };

        let mut frame = match self.gpu.begin_frame() {
            Ok(frame) => frame,
            Err(err) => {
                let action = self.gpu.handle_surface_error(&err);
                return Err(action.into_frame_error(&err));
            }
        };

        res.material.write_uniforms(self.gpu.queue(), uniforms);

        {
            let attachment = color_attachment(&frame.view, frame.msaa_view.as_ref(), res.background);
            let mut pass = frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("shaderlab scene pass"),
                color_attachments: &[Some(attachment)],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            res.material.bind(&mut pass);
            res.mesh.draw(&mut pass);
        }

        self.gpu.submit(frame);
        Ok(())
    }

    fn release(&mut self) {
        if let Some(res) = self.resources.take() {
            res.mesh.destroy();
            res.material.destroy();
            log::debug!("gpu backend: resources released");
        }
    }
}
