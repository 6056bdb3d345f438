use crate::material::MaterialDesc;
use crate::mesh::Mesh;

/// The single object a scene renders.
#[derive(Debug, Clone, PartialEq)]
pub struct Drawable {
    pub mesh: Mesh,
    pub material: MaterialDesc,
}

/// Scene root: a clear color and at most one drawable.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    background: wgpu::Color,
    drawable: Option<Drawable>,
}

impl Scene {
    /// Empty scene.
    pub fn new(background: wgpu::Color) -> Self {
        Self {
            background,
            drawable: None,
        }
    }

    /// Attaches the drawable, replacing any previous one.
    pub fn add(&mut self, mesh: Mesh, material: MaterialDesc) {
        if self.drawable.is_some() {
            log::debug!("scene: replacing drawable");
        }
        self.drawable = Some(Drawable { mesh, material });
    }

    #[inline]
    pub fn background(&self) -> wgpu::Color {
        self.background
    }

    #[inline]
    pub fn drawable(&self) -> Option<&Drawable> {
        self.drawable.as_ref()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.drawable.is_none()
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(wgpu::Color::BLACK)
    }
}

#[cfg(test)]
mod tests {
    use crate::material::{ShaderSource, UniformTable};
    use crate::mesh::GeometryKind;

    use super::*;

    #[test]
    fn new_scene_is_empty() {
        let s = Scene::default();
        assert!(s.is_empty());
        assert_eq!(s.background(), wgpu::Color::BLACK);
    }

    #[test]
    fn add_attaches_single_drawable() {
        let mut s = Scene::default();
        let material = |g| {
            MaterialDesc::new("m", ShaderSource::builtin(g, false), UniformTable::new())
        };
        s.add(GeometryKind::ColoredQuad.build(), material(GeometryKind::ColoredQuad));
        s.add(GeometryKind::PlainTriangle.build(), material(GeometryKind::PlainTriangle));
        assert_eq!(s.drawable().map(|d| d.mesh.vertex_count()), Some(3));
    }
}
