use bytemuck::{Pod, Zeroable};

/// Interleaved GPU vertex.
///
/// Locations:
/// - `0` position (`vec3<f32>`)
/// - `1` color (`vec3<f32>`), white when the mesh carries no colors
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

impl Vertex {
    pub const ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x3, // position
        1 => Float32x3  // color
    ];

    /// Shader locations this layout provides.
    pub const LOCATIONS: [u32; 2] = [0, 1];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}
