//! Render-lifecycle driver.
//!
//! [`SceneDriver`] is the state machine `Uninitialized → Running → Disposed`:
//! - `start` builds mesh, material and camera, subscribes to the host's resize
//!   and pointer signals, then draws once (static) or schedules the loop
//! - `step` advances the frame clock, refreshes uniforms and draws
//! - `stop` drops every subscription, then releases the backend
//!
//! Rendering goes through the [`RenderBackend`] trait so the lifecycle runs
//! the same against wgpu or an in-memory recorder.

mod backend;
mod error;
mod scene_driver;
mod types;

pub use backend::{PreparedScene, RenderBackend};
pub use error::{FrameError, MountError};
pub use scene_driver::SceneDriver;
pub use types::{LifecycleState, Mount, StepOutcome};
