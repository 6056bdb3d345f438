//! Pointer input.
//!
//! Public API is platform-agnostic and does not expose winit types.
//! Runtime code translates platform events via [`platform::winit`].
//!
//! Conventions:
//! - `PointerEvent` arrives in logical pixels, top-left origin (host space).
//! - `PointerState` stores positions bottom-left origin (shader space).

pub mod platform;
mod smoothing;
mod state;
mod types;

pub use smoothing::PointerSmoother;
pub use state::PointerState;
pub use types::{HostSignal, PointerEvent, PointerTracking};
