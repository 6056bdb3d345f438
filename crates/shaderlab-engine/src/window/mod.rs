//! Window + runtime loop.
//!
//! Owns the `winit` EventLoop and Window, and wires them to the scene driver.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig};
