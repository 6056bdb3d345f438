//! Geometry builder.
//!
//! Produces the fixed CPU-side meshes the demo renders and the interleaved
//! vertex layout shared with the material pipeline.

mod geometry;
mod vertex;

pub use geometry::{GeometryKind, Mesh, MeshError};
pub use vertex::Vertex;
