//! Material builder: shader sources, the uniform block and CPU-side compilation.
//!
//! A [`MaterialDesc`] pairs WGSL sources with a [`UniformTable`].
//! [`ShaderProgram::compile`] prepends the generated uniform struct and
//! validates both stages before any GPU object is created.

mod error;
mod program;
mod source;
mod uniform;

pub use error::{MaterialError, Stage};
pub use program::{MaterialDesc, ShaderProgram, FRAGMENT_ENTRY, VERTEX_ENTRY};
pub use source::{referenced_uniforms, ShaderSource};
pub use uniform::{
    is_uniform_name, UniformLayout, UniformSet, UniformTable, UniformType, UniformValue,
    U_MOUSE, U_RESOLUTION, U_TIME, U_VIEW_PROJECTION,
};
