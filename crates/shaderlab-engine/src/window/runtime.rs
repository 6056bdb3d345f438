use std::sync::Arc;

use anyhow::{Context, Result};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::config::SceneConfig;
use crate::device::{Gpu, GpuInit};
use crate::driver::{SceneDriver, StepOutcome};
use crate::events::HostEvents;
use crate::input::platform::winit::{translate_window_event, window_viewport};
use crate::render::GpuBackend;

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "shaderlab".to_string(),
            initial_size: LogicalSize::new(1280.0, 720.0),
        }
    }
}

/// Entry point for the runtime.
///
/// Plays the host for one [`SceneDriver`]: creates the window and GPU on
/// `resumed`, forwards resize and pointer events into a [`HostEvents`] hub,
/// requests redraws while the driver wants frames and stops it on close.
pub struct Runtime;

impl Runtime {
    pub fn run(config: RuntimeConfig, gpu_init: GpuInit, scene: SceneConfig) -> Result<()> {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(config, gpu_init, scene);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.failure.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

struct AppState {
    config: RuntimeConfig,
    gpu_init: GpuInit,
    host: HostEvents,
    driver: SceneDriver<GpuBackend<'static>>,

    // Declared after `driver` so the surface is released before the window.
    window: Option<Arc<Window>>,
    failure: Option<anyhow::Error>,
}

impl AppState {
    fn new(config: RuntimeConfig, gpu_init: GpuInit, scene: SceneConfig) -> Self {
        Self {
            config,
            gpu_init,
            host: HostEvents::new(),
            driver: SceneDriver::new(scene),
            window: None,
            failure: None,
        }
    }

    fn mount(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);

        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .context("failed to create window")?,
        );
        let viewport = window_viewport(&window);

        let gpu = pollster::block_on(Gpu::new(window.clone(), viewport, self.gpu_init.clone()))
            .context("GPU initialization failed")?;

        self.driver
            .start(Some(GpuBackend::new(gpu)), &self.host, viewport)
            .context("failed to mount scene")?;

        self.window = Some(window);
        Ok(())
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: anyhow::Error) {
        log::error!("{error:#}");
        self.failure = Some(error);
        self.driver.stop();
        event_loop.exit();
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        if let Err(e) = self.mount(event_loop) {
            self.fail(event_loop, e);
            return;
        }

        if let Some(w) = self.window.as_ref() {
            w.request_redraw();
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        event_loop.set_control_flow(ControlFlow::Wait);

        if self.driver.wants_frame() {
            if let Some(w) = self.window.as_ref() {
                w.request_redraw();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(window) = self.window.as_ref() else {
            return;
        };
        if window.id() != window_id {
            return;
        }

        if let Some(signal) = translate_window_event(window, &event) {
            self.host.emit(signal);
        }

        match event {
            WindowEvent::CloseRequested => {
                self.driver.stop();
                self.window = None;
                event_loop.exit();
            }

            WindowEvent::RedrawRequested => {
                if let StepOutcome::Halted(e) = self.driver.step() {
                    log::error!("rendering stopped: {e}");
                }
            }

            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.driver.stop();
    }
}
