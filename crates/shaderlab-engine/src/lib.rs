//! shaderlab engine crate.
//!
//! A single-drawable shader demo built around an explicit render lifecycle:
//! geometry and material builders, a perspective camera, and a driver that
//! mounts, steps, resizes and disposes the scene on behalf of a host.

pub mod config;
pub mod device;
pub mod driver;
pub mod events;
pub mod input;
pub mod logging;
pub mod material;
pub mod mesh;
pub mod render;
pub mod scene;
pub mod time;
pub mod viewport;
pub mod window;
