//! GPU rendering subsystem.
//!
//! Turns a mounted scene into wgpu objects: vertex/index buffers for the mesh,
//! one pipeline plus uniform buffer for the material, and a backend that the
//! driver draws through.

mod backend;
mod material;
mod mesh;

pub use backend::GpuBackend;
pub use material::Material;
pub use mesh::GpuMesh;
