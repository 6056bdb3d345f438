use anyhow::{Context, Result};
use wgpu::SurfaceError;

use crate::viewport::Viewport;

use super::frame::GpuFrame;
use super::surface;
use super::{GpuInit, SurfaceErrorAction};

/// Owns wgpu core objects, the surface configuration and the MSAA target.
///
/// The surface is sized from a [`Viewport`]: logical size times the capped
/// device pixel ratio.
pub struct Gpu<'w> {
    /// Kept alive for the surface.
    _instance: wgpu::Instance,
    surface: wgpu::Surface<'w>,
    adapter: wgpu::Adapter,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    sample_count: u32,
    msaa_view: Option<wgpu::TextureView>,
    viewport: Viewport,
}

impl<'w> Gpu<'w> {
    /// Creates a GPU context for `target` (a window handle).
    ///
    /// Adapter/device acquisition is asynchronous under wgpu.
    pub async fn new(
        target: impl Into<wgpu::SurfaceTarget<'w>>,
        viewport: Viewport,
        init: GpuInit,
    ) -> Result<Self> {
        let GpuInit {
            prefer_srgb,
            present_mode,
            alpha_mode,
            power_preference,
            required_features,
            required_limits,
            desired_maximum_frame_latency,
            msaa_samples,
        } = init;

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(target)
            .context("failed to create wgpu surface")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("failed to find a suitable GPU adapter")?;

        let info = adapter.get_info();
        log::info!("gpu: {} ({:?})", info.name, info.backend);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("shaderlab device"),
                required_features,
                required_limits,
                experimental_features: wgpu::ExperimentalFeatures::disabled(),
                memory_hints: wgpu::MemoryHints::Performance,
                trace: wgpu::Trace::Off,
            })
            .await
            .context("failed to create wgpu device/queue")?;

        let caps = surface.get_capabilities(&adapter);
        let format = surface::choose_surface_format(&caps.formats, prefer_srgb)
            .context("no supported surface formats")?;
        let alpha_mode = surface::choose_alpha_mode(&caps.alpha_modes, alpha_mode);

        let flags = adapter.get_texture_format_features(format).flags;
        let sample_count =
            surface::choose_sample_count(msaa_samples, |n| flags.sample_count_supported(n));
        if sample_count != msaa_samples {
            log::warn!("gpu: {msaa_samples}x MSAA unsupported for {format:?}, using {sample_count}x");
        }

        let (width, height) = viewport.backing_size();
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency,
        };
        surface.configure(&device, &config);
        let msaa_view = surface::create_msaa_view(&device, &config, sample_count);

        log::debug!("gpu: surface {width}x{height} {format:?}, {sample_count}x MSAA");

        Ok(Self {
            _instance: instance,
            surface,
            adapter,
            device,
            queue,
            config,
            sample_count,
            msaa_view,
            viewport,
        })
    }

    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    pub fn sample_count(&self) -> u32 {
        self.sample_count
    }

    /// Backing size in physical pixels.
    pub fn size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn adapter(&self) -> &wgpu::Adapter {
        &self.adapter
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    /// Reconfigures the surface (and MSAA target) for a new viewport.
    ///
    /// Invalid viewports only update the stored value; wgpu cannot configure
    /// a 0x0 surface.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        if !viewport.is_valid() {
            return;
        }

        let (width, height) = viewport.backing_size();
        if (width, height) == (self.config.width, self.config.height) {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
        self.msaa_view = surface::create_msaa_view(&self.device, &self.config, self.sample_count);
    }

    /// Acquires the next surface texture and creates an encoder.
    pub fn begin_frame(&self) -> std::result::Result<GpuFrame, SurfaceError> {
        let surface_texture = self.surface.get_current_texture()?;
        let view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("shaderlab frame encoder"),
            });

        Ok(GpuFrame {
            surface_texture,
            view,
            msaa_view: self.msaa_view.clone(),
            encoder,
        })
    }

    /// Submits the recorded commands and presents the frame.
    pub fn submit(&self, frame: GpuFrame) {
        let GpuFrame {
            surface_texture,
            encoder,
            ..
        } = frame;
        self.queue.submit(std::iter::once(encoder.finish()));
        surface_texture.present();
    }

    /// Classifies `err`, reconfiguring the surface when that is the remedy.
    pub fn handle_surface_error(&mut self, err: &SurfaceError) -> SurfaceErrorAction {
        let action = SurfaceErrorAction::classify(err);
        if action == SurfaceErrorAction::Reconfigured && self.viewport.is_valid() {
            self.surface.configure(&self.device, &self.config);
        }
        action
    }
}
