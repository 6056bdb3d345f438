use std::borrow::Cow;

use crate::mesh::GeometryKind;

/// Vertex + fragment WGSL text.
///
/// Sources are opaque apart from two conventions: entry points are named
/// `vs_main` / `fs_main`, and uniforms are read as `uniforms.u_<name>` from a
/// block the material builder prepends.
#[derive(Debug, Clone, PartialEq)]
pub struct ShaderSource {
    pub vertex: Cow<'static, str>,
    pub fragment: Cow<'static, str>,
}

impl ShaderSource {
    pub fn new(vertex: impl Into<Cow<'static, str>>, fragment: impl Into<Cow<'static, str>>) -> Self {
        Self {
            vertex: vertex.into(),
            fragment: fragment.into(),
        }
    }

    /// Built-in assets for a geometry, with or without pointer reactivity.
    pub fn builtin(geometry: GeometryKind, pointer_reactive: bool) -> Self {
        match (geometry, pointer_reactive) {
            (GeometryKind::ColoredQuad, false) => Self::new(
                include_str!("shaders/colored_quad.vert.wgsl"),
                include_str!("shaders/colored_quad.frag.wgsl"),
            ),
            (GeometryKind::ColoredQuad, true) => Self::new(
                include_str!("shaders/colored_quad.vert.wgsl"),
                include_str!("shaders/colored_quad_pointer.frag.wgsl"),
            ),
            (GeometryKind::PlainTriangle, false) => Self::new(
                include_str!("shaders/triangle.vert.wgsl"),
                include_str!("shaders/triangle.frag.wgsl"),
            ),
            (GeometryKind::PlainTriangle, true) => Self::new(
                include_str!("shaders/triangle.vert.wgsl"),
                include_str!("shaders/triangle_pointer.frag.wgsl"),
            ),
        }
    }
}

/// `u_*` identifiers in `src`, in first-use order, comments skipped.
pub fn referenced_uniforms(src: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    let bytes = src.as_bytes();
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];

        if b == b'/' && bytes.get(i + 1) == Some(&b'/') {
            while i < bytes.len() && bytes[i] != b'\n' {
                i += 1;
            }
            continue;
        }

        // WGSL block comments nest.
        if b == b'/' && bytes.get(i + 1) == Some(&b'*') {
            let mut depth = 1;
            i += 2;
            while i < bytes.len() && depth > 0 {
                if bytes[i] == b'/' && bytes.get(i + 1) == Some(&b'*') {
                    depth += 1;
                    i += 2;
                } else if bytes[i] == b'*' && bytes.get(i + 1) == Some(&b'/') {
                    depth -= 1;
                    i += 2;
                } else {
                    i += 1;
                }
            }
            continue;
        }

        if b.is_ascii_alphabetic() || b == b'_' {
            let start = i;
            while i < bytes.len() && (bytes[i].is_ascii_alphanumeric() || bytes[i] == b'_') {
                i += 1;
            }
            let ident = &src[start..i];
            if ident.len() > 2 && ident.starts_with("u_") && !out.iter().any(|s| s == ident) {
                out.push(ident.to_string());
            }
            continue;
        }

        // Skip numeric literals whole so suffixes like `1u_` are not read as identifiers.
        if b.is_ascii_digit() {
            while i < bytes.len() && (bytes[i].is_ascii_alphanumeric() || bytes[i] == b'_' || bytes[i] == b'.') {
                i += 1;
            }
            continue;
        }

        i += 1;
    }

    out
}
