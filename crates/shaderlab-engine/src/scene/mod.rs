//! Scene root and perspective camera.

mod camera;
mod root;

pub use camera::{CameraConfig, PerspectiveCamera};
pub use root::{Drawable, Scene};
