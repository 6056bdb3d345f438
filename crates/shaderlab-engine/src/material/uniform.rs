use std::fmt;

use glam::{Mat4, Vec2};

use crate::viewport::Viewport;

use super::error::MaterialError;

pub const U_TIME: &str = "u_time";
pub const U_RESOLUTION: &str = "u_resolution";
pub const U_MOUSE: &str = "u_mouse";
pub const U_VIEW_PROJECTION: &str = "u_view_projection";

/// WGSL type of a uniform.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum UniformType {
    F32,
    Vec2,
    Vec3,
    Vec4,
    Mat4,
}

impl UniformType {
    pub fn wgsl(self) -> &'static str {
        match self {
            UniformType::F32 => "f32",
            UniformType::Vec2 => "vec2<f32>",
            UniformType::Vec3 => "vec3<f32>",
            UniformType::Vec4 => "vec4<f32>",
            UniformType::Mat4 => "mat4x4<f32>",
        }
    }

    /// Alignment in the uniform address space, in bytes.
    pub fn align(self) -> u32 {
        match self {
            UniformType::F32 => 4,
            UniformType::Vec2 => 8,
            UniformType::Vec3 | UniformType::Vec4 | UniformType::Mat4 => 16,
        }
    }

    /// Size in bytes.
    pub fn size(self) -> u32 {
        match self {
            UniformType::F32 => 4,
            UniformType::Vec2 => 8,
            UniformType::Vec3 => 12,
            UniformType::Vec4 => 16,
            UniformType::Mat4 => 64,
        }
    }
}

impl fmt::Display for UniformType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wgsl())
    }
}

/// Current value of a uniform.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum UniformValue {
    F32(f32),
    Vec2([f32; 2]),
    Vec3([f32; 3]),
    Vec4([f32; 4]),
    Mat4([[f32; 4]; 4]),
}

impl UniformValue {
    pub fn ty(&self) -> UniformType {
        match self {
            UniformValue::F32(_) => UniformType::F32,
            UniformValue::Vec2(_) => UniformType::Vec2,
            UniformValue::Vec3(_) => UniformType::Vec3,
            UniformValue::Vec4(_) => UniformType::Vec4,
            UniformValue::Mat4(_) => UniformType::Mat4,
        }
    }

    fn write_to(&self, out: &mut [u8]) {
        let bytes: &[u8] = match self {
            UniformValue::F32(v) => bytemuck::bytes_of(v),
            UniformValue::Vec2(v) => bytemuck::cast_slice(v),
            UniformValue::Vec3(v) => bytemuck::cast_slice(v),
            UniformValue::Vec4(v) => bytemuck::cast_slice(v),
            UniformValue::Mat4(m) => bytemuck::cast_slice(m),
        };
        out[..bytes.len()].copy_from_slice(bytes);
    }
}

impl From<f32> for UniformValue {
    fn from(v: f32) -> Self {
        UniformValue::F32(v)
    }
}

impl From<Vec2> for UniformValue {
    fn from(v: Vec2) -> Self {
        UniformValue::Vec2(v.to_array())
    }
}

impl From<Mat4> for UniformValue {
    fn from(m: Mat4) -> Self {
        UniformValue::Mat4(m.to_cols_array_2d())
    }
}

/// Which optional built-in uniforms a material declares. `u_time` is always
/// declared.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct UniformSet {
    pub resolution: bool,
    pub mouse: bool,
    pub view_projection: bool,
}

#[derive(Debug, Clone, PartialEq)]
struct Entry {
    name: String,
    value: UniformValue,
}

/// Ordered name → value table backing one uniform block.
///
/// Declaration order is the member order of the generated WGSL struct.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UniformTable {
    entries: Vec<Entry>,
}

/// Byte offsets of each member plus the padded block size.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct UniformLayout {
    pub offsets: Vec<u32>,
    /// Struct size (WGSL `SizeOf`), before buffer padding.
    pub struct_size: u32,
    /// Buffer size: struct size rounded up to 16, at least 16.
    pub buffer_size: u32,
}

impl UniformTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Built-in table with defaults: time `0`, resolution = `viewport`,
    /// mouse at the origin, view-projection identity.
    pub fn standard(set: UniformSet, viewport: Viewport) -> Self {
        let mut table = Self::new();
        table.push(U_TIME, UniformValue::F32(0.0));
        if set.resolution {
            table.push(U_RESOLUTION, UniformValue::Vec2(viewport.resolution()));
        }
        if set.mouse {
            table.push(U_MOUSE, UniformValue::Vec2([0.0, 0.0]));
        }
        if set.view_projection {
            table.push(U_VIEW_PROJECTION, Mat4::IDENTITY.into());
        }
        table
    }

    fn push(&mut self, name: &str, value: UniformValue) {
        self.entries.push(Entry {
            name: name.to_string(),
            value,
        });
    }

    /// Declares a new uniform with its default value.
    pub fn declare(
        &mut self,
        name: impl Into<String>,
        value: impl Into<UniformValue>,
    ) -> Result<(), MaterialError> {
        let name = name.into();
        if !is_uniform_name(&name) {
            return Err(MaterialError::InvalidUniformName(name));
        }
        if self.contains(&name) {
            return Err(MaterialError::DuplicateUniform(name));
        }
        self.entries.push(Entry {
            name,
            value: value.into(),
        });
        Ok(())
    }

    /// Builder form of [`declare`](Self::declare).
    pub fn with(
        mut self,
        name: impl Into<String>,
        value: impl Into<UniformValue>,
    ) -> Result<Self, MaterialError> {
        self.declare(name, value)?;
        Ok(self)
    }

    /// Updates a declared uniform. The type must match the declaration.
    pub fn set(&mut self, name: &str, value: impl Into<UniformValue>) -> Result<(), MaterialError> {
        let value = value.into();
        let entry = self
            .entries
            .iter_mut()
            .find(|e| e.name == name)
            .ok_or_else(|| MaterialError::UnknownUniform(name.to_string()))?;

        if entry.value.ty() != value.ty() {
            return Err(MaterialError::TypeMismatch {
                name: name.to_string(),
                expected: entry.value.ty(),
                found: value.ty(),
            });
        }
        entry.value = value;
        Ok(())
    }

    /// Sets `name` only if declared; returns whether it was written.
    pub fn set_if_declared(&mut self, name: &str, value: impl Into<UniformValue>) -> bool {
        self.contains(name) && self.set(name, value).is_ok()
    }

    pub fn get(&self, name: &str) -> Option<UniformValue> {
        self.entries.iter().find(|e| e.name == name).map(|e| e.value)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|e| e.name == name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    pub fn layout(&self) -> UniformLayout {
        let mut offsets = Vec::with_capacity(self.entries.len());
        let mut cursor = 0u32;
        let mut max_align = 4u32;

        for e in &self.entries {
            let ty = e.value.ty();
            let offset = align_up(cursor, ty.align());
            offsets.push(offset);
            cursor = offset + ty.size();
            max_align = max_align.max(ty.align());
        }

        let struct_size = align_up(cursor, max_align);
        UniformLayout {
            offsets,
            struct_size,
            buffer_size: align_up(struct_size, 16).max(16),
        }
    }

    /// Packs current values into a uniform-buffer image.
    pub fn to_bytes(&self) -> Vec<u8> {
        let layout = self.layout();
        let mut out = vec![0u8; layout.buffer_size as usize];
        for (e, &offset) in self.entries.iter().zip(&layout.offsets) {
            e.value.write_to(&mut out[offset as usize..]);
        }
        out
    }

    /// WGSL declarations of the uniform struct and its binding.
    ///
    /// Shader sources access members as `uniforms.<name>`.
    pub fn wgsl_prelude(&self) -> String {
        let mut s = String::from("struct Uniforms {\n");
        for e in &self.entries {
            s.push_str("    ");
            s.push_str(&e.name);
            s.push_str(": ");
            s.push_str(e.value.ty().wgsl());
            s.push_str(",\n");
        }
        s.push_str("};\n\n@group(0) @binding(0)\nvar<uniform> uniforms: Uniforms;\n\n");
        s
    }
}

/// `u_` followed by at least one identifier character.
pub fn is_uniform_name(name: &str) -> bool {
    name.len() > 2
        && name.starts_with("u_")
        && name.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_')
}

#[inline]
fn align_up(value: u32, align: u32) -> u32 {
    value.div_ceil(align) * align
}
