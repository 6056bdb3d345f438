use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::config::{ErrorPolicy, RenderMode, SceneConfig};
use crate::events::{HostEvents, SubscriptionSet};
use crate::input::{PointerEvent, PointerState};
use crate::material::{
    ShaderProgram, UniformTable, UniformValue, U_MOUSE, U_RESOLUTION, U_TIME, U_VIEW_PROJECTION,
};
use crate::scene::PerspectiveCamera;
use crate::time::{DeltaClock, FrameClock};
use crate::viewport::Viewport;

use super::backend::{PreparedScene, RenderBackend};
use super::error::{FrameError, MountError};
use super::types::{LifecycleState, Mount, StepOutcome};

/// Render-lifecycle driver.
///
/// `start` builds the scene and attaches to the host's signals, `step` runs
/// one frame when one is pending, `stop` detaches and releases everything.
/// A stopped driver cannot be started again.
///
/// The host asks [`wants_frame`](Self::wants_frame) after each event batch and
/// calls [`step`](Self::step) on its next redraw.
pub struct SceneDriver<B: RenderBackend + 'static> {
    config: SceneConfig,
    state: LifecycleState,
    mounted: Option<Rc<RefCell<Mounted<B>>>>,
    subscriptions: SubscriptionSet,
}

/// State shared between the driver and its host listeners.
struct Mounted<B> {
    backend: Option<B>,
    camera: PerspectiveCamera,
    uniforms: UniformTable,
    viewport: Viewport,
    pointer: PointerState,
    pointer_clock: DeltaClock,
    clock: FrameClock,
    mode: RenderMode,
    policy: ErrorPolicy,

    /// A step is scheduled.
    pending: bool,
    halted: Option<FrameError>,
    disposed: bool,
    frames_drawn: u64,
}

impl<B: RenderBackend + 'static> SceneDriver<B> {
    pub fn new(config: SceneConfig) -> Self {
        Self {
            config,
            state: LifecycleState::Uninitialized,
            mounted: None,
            subscriptions: SubscriptionSet::new(),
        }
    }

    #[inline]
    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    #[inline]
    pub fn state(&self) -> LifecycleState {
        self.state
    }

    /// Mounts the scene on `backend` and subscribes to `host`.
    ///
    /// `None` means the host has no drawing surface yet; the driver stays
    /// uninitialized and may be started later. On error nothing stays
    /// subscribed and the backend is released.
    pub fn start(
        &mut self,
        backend: Option<B>,
        host: &HostEvents,
        viewport: Viewport,
    ) -> Result<Mount, MountError> {
        match self.state {
            LifecycleState::Running => return Err(MountError::AlreadyRunning),
            LifecycleState::Disposed => return Err(MountError::Disposed),
            LifecycleState::Uninitialized => {}
        }

        let Some(mut backend) = backend else {
            log::info!("scene driver: no surface, not mounting");
            return Ok(Mount::NoSurface);
        };

        let mounted = match self.build(&mut backend, viewport) {
            Ok(m) => m,
            Err(e) => {
                backend.release();
                log::error!("scene driver: mount failed: {e}");
                return Err(e);
            }
        };

        let shared = Rc::new(RefCell::new(mounted));
        self.subscribe(host, Rc::downgrade(&shared));

        {
            let mut guard = shared.borrow_mut();
            let m = &mut *guard;
            m.backend = Some(backend);
            match m.mode {
                RenderMode::Static => m.draw_now(),
                RenderMode::Continuous => m.pending = true,
            }
        }

        self.mounted = Some(shared);
        self.state = LifecycleState::Running;
        log::info!(
            "scene driver: running ({}, {}x{} @{}x)",
            self.config,
            viewport.width,
            viewport.height,
            viewport.device_pixel_ratio()
        );
        Ok(Mount::Mounted)
    }

    fn build(&self, backend: &mut B, viewport: Viewport) -> Result<Mounted<B>, MountError> {
        self.config.validate()?;

        let scene = self.config.build_scene(viewport);
        let drawable = scene.drawable().ok_or(MountError::EmptyScene)?;
        drawable.mesh.validate()?;
        let program = ShaderProgram::compile(&drawable.material)?;

        let aspect = if viewport.is_valid() { viewport.aspect() } else { 1.0 };
        let camera = PerspectiveCamera::new(self.config.camera, aspect);
        let mut uniforms = drawable.material.uniforms.clone();
        uniforms.set_if_declared(U_VIEW_PROJECTION, camera.view_projection());

        backend
            .prepare(&PreparedScene {
                background: scene.background(),
                mesh: &drawable.mesh,
                program: &program,
                uniforms: &uniforms,
                viewport,
            })
            .map_err(MountError::Backend)?;

        Ok(Mounted {
            backend: None,
            camera,
            uniforms,
            viewport,
            pointer: PointerState::new(self.config.pointer),
            pointer_clock: DeltaClock::new(),
            clock: FrameClock::new(self.config.time_step),
            mode: self.config.mode,
            policy: self.config.error_policy,
            pending: false,
            halted: None,
            disposed: false,
            frames_drawn: 0,
        })
    }

    fn subscribe(&mut self, host: &HostEvents, shared: Weak<RefCell<Mounted<B>>>) {
        let weak = shared.clone();
        self.subscriptions.push(host.subscribe_resize(move |viewport| {
            with_mounted(&weak, |m| m.on_resize(*viewport));
        }));

        if self.config.pointer.is_enabled() {
            let weak = shared;
            self.subscriptions.push(host.subscribe_pointer(move |event| {
                with_mounted(&weak, |m| m.on_pointer(*event));
            }));
        }
    }

    /// Runs one frame if one is pending.
    pub fn step(&mut self) -> StepOutcome {
        let Some(shared) = self.mounted.as_ref() else {
            return StepOutcome::Idle;
        };
        let Ok(mut guard) = shared.try_borrow_mut() else {
            log::warn!("scene driver: step re-entered, ignoring");
            return StepOutcome::Idle;
        };
        guard.step()
    }

    /// True while a step is scheduled; the host should request a redraw.
    pub fn wants_frame(&self) -> bool {
        self.read(|m| m.pending && !m.disposed).unwrap_or(false)
    }

    /// Unsubscribes, cancels the pending step and releases the backend.
    ///
    /// Idempotent. The last mounted state stays readable.
    pub fn stop(&mut self) {
        if self.state == LifecycleState::Disposed {
            return;
        }
        let was_running = self.state == LifecycleState::Running;

        // Listeners go first so no signal reaches a half-released scene.
        self.subscriptions.dispose();

        if let Some(shared) = self.mounted.as_ref() {
            match shared.try_borrow_mut() {
                Ok(mut m) => m.dispose(),
                Err(_) => log::error!("scene driver: state busy during stop, backend not released"),
            }
        }

        self.state = LifecycleState::Disposed;
        if was_running {
            log::info!("scene driver: disposed");
        }
    }

    // ── inspection ────────────────────────────────────────────────────────

    fn read<T>(&self, f: impl FnOnce(&Mounted<B>) -> T) -> Option<T> {
        let shared = self.mounted.as_ref()?;
        let m = shared.try_borrow().ok()?;
        Some(f(&*m))
    }

    /// Last viewport the driver saw.
    pub fn viewport(&self) -> Option<Viewport> {
        self.read(|m| m.viewport)
    }

    pub fn camera_aspect(&self) -> Option<f32> {
        self.read(|m| m.camera.aspect())
    }

    pub fn uniform(&self, name: &str) -> Option<UniformValue> {
        self.read(|m| m.uniforms.get(name)).flatten()
    }

    /// Current shader time.
    pub fn time(&self) -> f32 {
        self.read(|m| m.clock.time()).unwrap_or(0.0)
    }

    pub fn frames_drawn(&self) -> u64 {
        self.read(|m| m.frames_drawn).unwrap_or(0)
    }

    /// The error that stopped the loop, if any.
    pub fn halt_reason(&self) -> Option<FrameError> {
        self.read(|m| m.halted.clone()).flatten()
    }

    pub fn subscription_count(&self) -> usize {
        self.subscriptions.len()
    }
}

impl<B: RenderBackend + 'static> Drop for SceneDriver<B> {
    fn drop(&mut self) {
        self.stop();
    }
}

fn with_mounted<B>(weak: &Weak<RefCell<Mounted<B>>>, f: impl FnOnce(&mut Mounted<B>)) {
    let Some(shared) = weak.upgrade() else {
        return;
    };
    match shared.try_borrow_mut() {
        Ok(mut m) => f(&mut *m),
        Err(_) => log::warn!("scene driver: signal during frame, dropped"),
    };
}

impl<B: RenderBackend> Mounted<B> {
    fn step(&mut self) -> StepOutcome {
        if !self.pending || self.disposed {
            return StepOutcome::Idle;
        }
        self.pending = false;

        let frame = self.clock.tick();
        self.uniforms.set_if_declared(U_TIME, frame.time);

        if self.pointer.tracking().is_enabled() {
            let dt = self.pointer_clock.tick();
            self.pointer.advance(dt);
            self.uniforms.set_if_declared(U_MOUSE, self.pointer.position());
        }
        self.uniforms
            .set_if_declared(U_VIEW_PROJECTION, self.camera.view_projection());

        match self.draw() {
            Ok(()) => {
                self.pending = true;
                StepOutcome::Drawn(frame)
            }
            Err(e) if !e.is_fatal() && self.policy == ErrorPolicy::Continue => {
                log::warn!("scene driver: {e}");
                self.pending = true;
                StepOutcome::Skipped(e)
            }
            Err(e) => {
                log::error!("scene driver: loop halted at frame {}: {e}", frame.frame_index);
                self.halted = Some(e.clone());
                StepOutcome::Halted(e)
            }
        }
    }

    fn draw(&mut self) -> Result<(), FrameError> {
        let backend = self
            .backend
            .as_mut()
            .ok_or_else(|| FrameError::Fatal("render backend released".into()))?;
        backend.draw(&self.uniforms)?;
        self.frames_drawn += 1;
        Ok(())
    }

    /// Static-mode draw outside the loop.
    ///
    /// Nothing advances smoothing without a loop, so the pointer goes in as
    /// the latest raw sample.
    fn draw_now(&mut self) {
        if self.halted.is_some() {
            return;
        }
        if self.pointer.tracking().is_enabled() {
            self.uniforms.set_if_declared(U_MOUSE, self.pointer.raw());
        }
        if let Err(e) = self.draw() {
            if e.is_fatal() || self.policy == ErrorPolicy::Stop {
                log::error!("scene driver: static draw failed, halting: {e}");
                self.halted = Some(e);
            } else {
                log::warn!("scene driver: static draw skipped: {e}");
            }
        }
    }

    fn on_resize(&mut self, viewport: Viewport) {
        if self.disposed {
            return;
        }
        self.viewport = viewport;
        if !viewport.is_valid() {
            log::debug!("scene driver: ignoring {}x{} viewport", viewport.width, viewport.height);
            return;
        }

        self.camera.set_aspect(viewport.aspect());
        if let Some(backend) = self.backend.as_mut() {
            backend.resize(viewport);
        }
        self.uniforms
            .set_if_declared(U_RESOLUTION, glam::Vec2::from(viewport.resolution()));
        self.uniforms
            .set_if_declared(U_VIEW_PROJECTION, self.camera.view_projection());

        if self.mode == RenderMode::Static {
            self.draw_now();
        }
    }

    fn on_pointer(&mut self, event: PointerEvent) {
        if self.disposed {
            return;
        }
        self.pointer.record(event, self.viewport.height);
        if self.mode == RenderMode::Static && self.viewport.is_valid() {
            self.draw_now();
        }
    }

    fn dispose(&mut self) {
        self.pending = false;
        self.disposed = true;
        if let Some(mut backend) = self.backend.take() {
            backend.release();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use crate::events::SignalKind;
    use crate::input::PointerTracking;
    use crate::material::ShaderSource;
    use crate::mesh::GeometryKind;

    use super::*;

    #[derive(Default)]
    struct Calls {
        prepared: u32,
        resizes: Vec<Viewport>,
        draws: Vec<UniformTable>,
        released: u32,
        failures: VecDeque<FrameError>,
        fail_prepare: bool,
    }

    struct MockBackend {
        calls: Rc<RefCell<Calls>>,
    }

    impl RenderBackend for MockBackend {
        fn prepare(&mut self, _scene: &PreparedScene<'_>) -> anyhow::Result<()> {
            let mut c = self.calls.borrow_mut();
            if c.fail_prepare {
                anyhow::bail!("no adapter");
            }
            c.prepared += 1;
            Ok(())
        }

        fn resize(&mut self, viewport: Viewport) {
            self.calls.borrow_mut().resizes.push(viewport);
        }

        fn draw(&mut self, uniforms: &UniformTable) -> Result<(), FrameError> {
            let mut c = self.calls.borrow_mut();
            if let Some(e) = c.failures.pop_front() {
                return Err(e);
            }
            c.draws.push(uniforms.clone());
            Ok(())
        }

        fn release(&mut self) {
            self.calls.borrow_mut().released += 1;
        }
    }

    fn mock() -> (MockBackend, Rc<RefCell<Calls>>) {
        let calls = Rc::new(RefCell::new(Calls::default()));
        (MockBackend { calls: calls.clone() }, calls)
    }

    fn vp(w: f32, h: f32) -> Viewport {
        Viewport::new(w, h, 1.0)
    }

    fn running(config: SceneConfig) -> (SceneDriver<MockBackend>, HostEvents, Rc<RefCell<Calls>>) {
        let host = HostEvents::new();
        let (backend, calls) = mock();
        let mut driver = SceneDriver::new(config);
        assert_eq!(
            driver.start(Some(backend), &host, vp(800.0, 600.0)).unwrap(),
            Mount::Mounted
        );
        (driver, host, calls)
    }

    // ── mount ─────────────────────────────────────────────────────────────

    #[test]
    fn missing_surface_is_a_noop() {
        let host = HostEvents::new();
        let mut driver = SceneDriver::<MockBackend>::new(SceneConfig::default());
        assert_eq!(driver.start(None, &host, vp(800.0, 600.0)).unwrap(), Mount::NoSurface);
        assert_eq!(driver.state(), LifecycleState::Uninitialized);
        assert_eq!(host.total_listeners(), 0);
        assert_eq!(driver.step(), StepOutcome::Idle);

        // A surface may show up later.
        let (backend, _) = mock();
        assert_eq!(driver.start(Some(backend), &host, vp(800.0, 600.0)).unwrap(), Mount::Mounted);
    }

    #[test]
    fn start_twice_is_rejected() {
        let (mut driver, host, _) = running(SceneConfig::default());
        let (backend, other) = mock();
        assert!(matches!(
            driver.start(Some(backend), &host, vp(1.0, 1.0)),
            Err(MountError::AlreadyRunning)
        ));
        assert_eq!(other.borrow().prepared, 0);
        assert_eq!(driver.state(), LifecycleState::Running);
    }

    #[test]
    fn disposed_driver_cannot_restart() {
        let (mut driver, host, _) = running(SceneConfig::default());
        driver.stop();
        let (backend, _) = mock();
        assert!(matches!(
            driver.start(Some(backend), &host, vp(1.0, 1.0)),
            Err(MountError::Disposed)
        ));
    }

    #[test]
    fn compile_error_fails_mount() {
        // Pointer-reactive shader without the pointer uniforms declared.
        let config = SceneConfig::default()
            .with_pointer(PointerTracking::Off)
            .with_shaders(ShaderSource::builtin(GeometryKind::ColoredQuad, true));
        let host = HostEvents::new();
        let (backend, calls) = mock();
        let mut driver = SceneDriver::new(config);

        let err = driver.start(Some(backend), &host, vp(800.0, 600.0)).unwrap_err();
        assert!(matches!(err, MountError::Material(_)));
        assert_eq!(driver.state(), LifecycleState::Uninitialized);
        assert_eq!(host.total_listeners(), 0);
        assert!(!driver.wants_frame());
        let c = calls.borrow();
        assert_eq!((c.prepared, c.released), (0, 1));
    }

    #[test]
    fn backend_failure_fails_mount() {
        let host = HostEvents::new();
        let (backend, calls) = mock();
        calls.borrow_mut().fail_prepare = true;
        let mut driver = SceneDriver::new(SceneConfig::default());
        assert!(matches!(
            driver.start(Some(backend), &host, vp(800.0, 600.0)),
            Err(MountError::Backend(_))
        ));
        assert_eq!(calls.borrow().released, 1);
        assert_eq!(host.total_listeners(), 0);
    }

    #[test]
    fn mount_subscribes_resize_and_pointer() {
        let (driver, host, calls) = running(SceneConfig::default());
        assert_eq!(host.listener_count(SignalKind::Resize), 1);
        assert_eq!(host.listener_count(SignalKind::PointerMove), 1);
        assert_eq!(driver.subscription_count(), 2);
        assert_eq!(calls.borrow().prepared, 1);
        assert!(driver.wants_frame());
    }

    #[test]
    fn still_variant_skips_pointer_listener() {
        let (_driver, host, _) = running(SceneConfig::default().with_pointer(PointerTracking::Off));
        assert_eq!(host.listener_count(SignalKind::PointerMove), 0);
    }

    // ── loop ──────────────────────────────────────────────────────────────

    #[test]
    fn time_advances_by_step_per_frame() {
        let (mut driver, _host, calls) = running(SceneConfig::default());
        for _ in 0..250 {
            assert!(driver.step().is_drawn());
        }
        let expected = 0.01f64 * 250.0;
        assert!((driver.time() as f64 - expected).abs() < 1e-6);
        assert_eq!(driver.frames_drawn(), 250);

        let c = calls.borrow();
        assert_eq!(c.draws.len(), 250);
        assert_eq!(c.draws[0].get(U_TIME), Some(UniformValue::F32(0.01)));
    }

    #[test]
    fn custom_time_step() {
        let (mut driver, _host, _) = running(SceneConfig::default().with_time_step(0.5));
        driver.step();
        driver.step();
        assert_eq!(driver.uniform(U_TIME), Some(UniformValue::F32(1.0)));
    }

    #[test]
    fn step_without_pending_frame_is_idle() {
        let mut driver = SceneDriver::<MockBackend>::new(SceneConfig::default());
        assert_eq!(driver.step(), StepOutcome::Idle);
    }

    // ── static mode ───────────────────────────────────────────────────────

    #[test]
    fn static_mode_draws_once_and_on_resize() {
        let (mut driver, host, calls) = running(SceneConfig::default().with_mode(RenderMode::Static));
        assert_eq!(calls.borrow().draws.len(), 1);
        assert!(!driver.wants_frame());
        assert_eq!(driver.step(), StepOutcome::Idle);
        // No clock tick in static mode.
        assert_eq!(calls.borrow().draws[0].get(U_TIME), Some(UniformValue::F32(0.0)));

        host.emit_resize(vp(1024.0, 512.0));
        assert_eq!(calls.borrow().draws.len(), 2);
        assert_eq!(
            calls.borrow().draws[1].get(U_RESOLUTION),
            Some(UniformValue::Vec2([1024.0, 512.0]))
        );
    }

    fn static_pointer_config() -> SceneConfig {
        SceneConfig::default()
            .with_mode(RenderMode::Static)
            .with_pointer(PointerTracking::Raw)
    }

    #[test]
    fn static_mode_resize_redraw_carries_pointer() {
        let (_driver, host, calls) = running(static_pointer_config());
        host.emit_pointer(PointerEvent::new(200.0, 100.0));
        host.emit_resize(vp(800.0, 600.0));

        let c = calls.borrow();
        let last = c.draws.last().unwrap();
        assert_eq!(last.get(U_MOUSE), Some(UniformValue::Vec2([200.0, 500.0])));
    }

    #[test]
    fn static_mode_redraws_on_pointer() {
        let (driver, host, calls) = running(static_pointer_config());
        assert_eq!(calls.borrow().draws.len(), 1);

        host.emit_pointer(PointerEvent::new(30.0, 40.0));
        assert_eq!(calls.borrow().draws.len(), 2);
        assert_eq!(
            calls.borrow().draws[1].get(U_MOUSE),
            Some(UniformValue::Vec2([30.0, 560.0]))
        );
        assert!(!driver.wants_frame());
    }

    #[test]
    fn static_mode_uses_raw_sample_when_smoothing() {
        let config = static_pointer_config().with_pointer(PointerTracking::Smoothed { time_constant: 0.25 });
        let (_driver, host, calls) = running(config);
        host.emit_pointer(PointerEvent::new(200.0, 100.0));
        assert_eq!(
            calls.borrow().draws.last().unwrap().get(U_MOUSE),
            Some(UniformValue::Vec2([200.0, 500.0]))
        );
    }

    #[test]
    fn static_still_variant_ignores_pointer() {
        let config = SceneConfig::default()
            .with_mode(RenderMode::Static)
            .with_pointer(PointerTracking::Off);
        let (_driver, host, calls) = running(config);
        host.emit_pointer(PointerEvent::new(200.0, 100.0));
        assert_eq!(calls.borrow().draws.len(), 1);
    }

    #[test]
    fn continuous_mode_does_not_draw_on_resize() {
        let (_driver, host, calls) = running(SceneConfig::default());
        host.emit_resize(vp(1024.0, 512.0));
        assert!(calls.borrow().draws.is_empty());
    }

    // ── resize ────────────────────────────────────────────────────────────

    #[test]
    fn resize_updates_aspect_and_resolution() {
        let (driver, host, calls) = running(SceneConfig::default());
        for (w, h) in [(1920.0, 1080.0), (300.0, 900.0), (1.0, 1.0), (4000.0, 3.0)] {
            host.emit_resize(vp(w, h));
            assert_eq!(driver.camera_aspect(), Some(w / h));
            assert_eq!(driver.uniform(U_RESOLUTION), Some(UniformValue::Vec2([w, h])));
        }
        assert_eq!(calls.borrow().resizes.len(), 4);
    }

    #[test]
    fn resize_caps_pixel_ratio() {
        let (driver, host, calls) = running(SceneConfig::default());
        host.emit_resize(Viewport::new(800.0, 600.0, 3.0));
        assert_eq!(driver.viewport().map(|v| v.device_pixel_ratio()), Some(2.0));
        assert_eq!(calls.borrow().resizes[0].backing_size(), (1600, 1200));
    }

    #[test]
    fn zero_viewport_only_records_size() {
        let (driver, host, calls) = running(SceneConfig::default());
        host.emit_resize(vp(0.0, 0.0));
        assert_eq!(driver.viewport(), Some(vp(0.0, 0.0)));
        assert_eq!(driver.camera_aspect(), Some(800.0 / 600.0));
        assert!(calls.borrow().resizes.is_empty());
        assert_eq!(driver.uniform(U_RESOLUTION), Some(UniformValue::Vec2([800.0, 600.0])));
    }

    // ── pointer ───────────────────────────────────────────────────────────

    #[test]
    fn pointer_is_flipped_into_mouse_uniform() {
        let (mut driver, host, calls) = running(SceneConfig::default().with_pointer(PointerTracking::Raw));
        host.emit_pointer(PointerEvent::new(200.0, 100.0));
        driver.step();
        assert_eq!(
            calls.borrow().draws[0].get(U_MOUSE),
            Some(UniformValue::Vec2([200.0, 500.0]))
        );
    }

    #[test]
    fn pointer_flip_uses_latest_height() {
        let (mut driver, host, _) = running(SceneConfig::default().with_pointer(PointerTracking::Raw));
        host.emit_resize(vp(800.0, 1000.0));
        host.emit_pointer(PointerEvent::new(10.0, 10.0));
        driver.step();
        assert_eq!(driver.uniform(U_MOUSE), Some(UniformValue::Vec2([10.0, 990.0])));
    }

    #[test]
    fn smoothed_pointer_starts_at_origin() {
        let config = SceneConfig::default().with_pointer(PointerTracking::Smoothed { time_constant: 0.5 });
        let (mut driver, host, _) = running(config);
        host.emit_pointer(PointerEvent::new(200.0, 100.0));
        // First delta is zero, so the smoothed value has not moved yet.
        driver.step();
        assert_eq!(driver.uniform(U_MOUSE), Some(UniformValue::Vec2([0.0, 0.0])));
    }

    // ── failures ──────────────────────────────────────────────────────────

    #[test]
    fn transient_error_skips_frame_and_continues() {
        let (mut driver, _host, calls) = running(SceneConfig::default());
        calls
            .borrow_mut()
            .failures
            .push_back(FrameError::Transient("outdated".into()));

        assert!(matches!(driver.step(), StepOutcome::Skipped(FrameError::Transient(_))));
        assert!(driver.wants_frame());
        assert!(driver.step().is_drawn());
        assert_eq!(driver.frames_drawn(), 1);
    }

    #[test]
    fn fatal_error_halts_loop() {
        let (mut driver, _host, calls) = running(SceneConfig::default());
        let oom = FrameError::Fatal("out of memory".into());
        calls.borrow_mut().failures.push_back(oom.clone());

        assert_eq!(driver.step(), StepOutcome::Halted(oom.clone()));
        assert!(!driver.wants_frame());
        assert_eq!(driver.step(), StepOutcome::Idle);
        assert_eq!(driver.halt_reason(), Some(oom));
        assert_eq!(driver.state(), LifecycleState::Running);
    }

    #[test]
    fn stop_policy_halts_on_transient_error() {
        let config = SceneConfig::default().with_error_policy(ErrorPolicy::Stop);
        let (mut driver, _host, calls) = running(config);
        calls
            .borrow_mut()
            .failures
            .push_back(FrameError::Transient("timeout".into()));

        assert!(matches!(driver.step(), StepOutcome::Halted(_)));
        assert!(!driver.wants_frame());
    }

    // ── dispose ───────────────────────────────────────────────────────────

    #[test]
    fn stop_detaches_and_releases() {
        let (mut driver, host, calls) = running(SceneConfig::default());
        driver.step();
        driver.stop();

        assert_eq!(driver.state(), LifecycleState::Disposed);
        assert_eq!(host.total_listeners(), 0);
        assert_eq!(driver.subscription_count(), 0);
        assert!(!driver.wants_frame());
        assert_eq!(driver.step(), StepOutcome::Idle);
        assert_eq!(calls.borrow().released, 1);
    }

    #[test]
    fn events_after_stop_change_nothing() {
        let (mut driver, host, calls) = running(SceneConfig::default().with_pointer(PointerTracking::Raw));
        host.emit_pointer(PointerEvent::new(200.0, 100.0));
        assert!(driver.step().is_drawn());
        let before = Some(UniformValue::Vec2([200.0, 500.0]));
        assert_eq!(driver.uniform(U_MOUSE), before);

        driver.stop();
        let draws = calls.borrow().draws.len();

        host.emit_resize(vp(100.0, 50.0));
        host.emit_pointer(PointerEvent::new(1.0, 1.0));
        assert_eq!(driver.step(), StepOutcome::Idle);

        assert_eq!(driver.viewport(), Some(vp(800.0, 600.0)));
        assert_eq!(driver.camera_aspect(), Some(800.0 / 600.0));
        assert_eq!(driver.uniform(U_MOUSE), before);
        let c = calls.borrow();
        assert_eq!(c.draws.len(), draws);
        assert!(c.resizes.is_empty());
    }

    #[test]
    fn events_after_stop_do_not_redraw_static_scene() {
        let (mut driver, host, calls) = running(static_pointer_config());
        driver.stop();

        host.emit_pointer(PointerEvent::new(1.0, 1.0));
        host.emit_resize(vp(100.0, 50.0));

        assert_eq!(calls.borrow().draws.len(), 1);
        assert_eq!(driver.uniform(U_MOUSE), Some(UniformValue::Vec2([0.0, 0.0])));
    }

    #[test]
    fn stop_is_idempotent() {
        let (mut driver, _host, calls) = running(SceneConfig::default());
        driver.stop();
        driver.stop();
        drop(driver);
        assert_eq!(calls.borrow().released, 1);
    }

    #[test]
    fn drop_stops_driver() {
        let (driver, host, calls) = running(SceneConfig::default());
        drop(driver);
        assert_eq!(host.total_listeners(), 0);
        assert_eq!(calls.borrow().released, 1);
    }

    #[test]
    fn stop_before_start_disposes() {
        let mut driver = SceneDriver::<MockBackend>::new(SceneConfig::default());
        driver.stop();
        assert_eq!(driver.state(), LifecycleState::Disposed);
    }
}
