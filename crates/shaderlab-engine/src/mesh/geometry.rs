use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use super::vertex::Vertex;

const WHITE: [f32; 3] = [1.0, 1.0, 1.0];

/// Structural problems in a [`Mesh`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MeshError {
    #[error("mesh has no vertices")]
    Empty,

    #[error("mesh has {positions} positions but {colors} colors")]
    ColorCountMismatch { positions: usize, colors: usize },

    #[error("index {index} at slot {slot} is out of range for {vertex_count} vertices")]
    IndexOutOfRange {
        slot: usize,
        index: u16,
        vertex_count: usize,
    },

    #[error("{count} {what} do not form whole triangles")]
    NotTriangles { what: &'static str, count: usize },

    #[error("{0} vertices exceed the 16-bit index range")]
    TooManyVertices(usize),
}

/// CPU-side triangle mesh.
///
/// Positions are in clip space for the built-in shaders (the quad spans
/// `[-1, 1]` on both axes).
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    pub positions: Vec<[f32; 3]>,
    pub colors: Option<Vec<[f32; 3]>>,
    pub indices: Option<Vec<u16>>,
}

impl Mesh {
    /// Four-vertex quad with per-vertex colors and two indexed triangles.
    pub fn colored_quad() -> Self {
        #[rustfmt::skip]
        let positions = vec![
            [-1.0, -1.0, 0.0], // 0: bottom-left
            [ 1.0, -1.0, 0.0], // 1: bottom-right
            [ 1.0,  1.0, 0.0], // 2: top-right
            [-1.0,  1.0, 0.0], // 3: top-left
        ];
        let colors = vec![
            [1.0, 0.0, 0.0], // red
            [0.0, 1.0, 0.0], // green
            [0.0, 0.0, 1.0], // blue
            [1.0, 1.0, 0.0], // yellow
        ];
        Self {
            positions,
            colors: Some(colors),
            indices: Some(vec![2, 3, 0, 0, 1, 2]),
        }
    }

    /// Three unindexed vertices, no colors.
    pub fn plain_triangle() -> Self {
        #[rustfmt::skip]
        let positions = vec![
            [ 0.0,  1.0, 0.0],
            [-1.0, -1.0, 0.0],
            [ 1.0, -1.0, 0.0],
        ];
        Self {
            positions,
            colors: None,
            indices: None,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn is_indexed(&self) -> bool {
        self.indices.is_some()
    }

    /// Number of vertices (unindexed) or indices (indexed) one draw consumes.
    pub fn element_count(&self) -> u32 {
        match &self.indices {
            Some(ix) => ix.len() as u32,
            None => self.positions.len() as u32,
        }
    }

    pub fn triangle_count(&self) -> usize {
        self.element_count() as usize / 3
    }

    /// Checks the mesh invariants.
    pub fn validate(&self) -> Result<(), MeshError> {
        let n = self.positions.len();
        if n == 0 {
            return Err(MeshError::Empty);
        }
        if n > u16::MAX as usize + 1 {
            return Err(MeshError::TooManyVertices(n));
        }
        if let Some(colors) = &self.colors {
            if colors.len() != n {
                return Err(MeshError::ColorCountMismatch {
                    positions: n,
                    colors: colors.len(),
                });
            }
        }

        match &self.indices {
            Some(indices) => {
                if indices.len() % 3 != 0 {
                    return Err(MeshError::NotTriangles {
                        what: "indices",
                        count: indices.len(),
                    });
                }
                if let Some((slot, &index)) =
                    indices.iter().enumerate().find(|&(_, &i)| i as usize >= n)
                {
                    return Err(MeshError::IndexOutOfRange {
                        slot,
                        index,
                        vertex_count: n,
                    });
                }
            }
            None if n % 3 != 0 => {
                return Err(MeshError::NotTriangles {
                    what: "vertices",
                    count: n,
                });
            }
            None => {}
        }

        Ok(())
    }

    /// Vertex indices of each triangle in draw order.
    pub fn triangles(&self) -> Vec<[u16; 3]> {
        match &self.indices {
            Some(ix) => ix.chunks_exact(3).map(|t| [t[0], t[1], t[2]]).collect(),
            None => (0..self.positions.len() as u16)
                .collect::<Vec<_>>()
                .chunks_exact(3)
                .map(|t| [t[0], t[1], t[2]])
                .collect(),
        }
    }

    /// Interleaved vertex data for upload.
    pub fn vertices(&self) -> Vec<Vertex> {
        self.positions
            .iter()
            .enumerate()
            .map(|(i, &position)| Vertex {
                position,
                color: self
                    .colors
                    .as_ref()
                    .and_then(|c| c.get(i).copied())
                    .unwrap_or(WHITE),
            })
            .collect()
    }
}

/// Which built-in mesh to draw.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum GeometryKind {
    #[default]
    ColoredQuad,
    PlainTriangle,
}

impl GeometryKind {
    pub fn build(self) -> Mesh {
        match self {
            GeometryKind::ColoredQuad => Mesh::colored_quad(),
            GeometryKind::PlainTriangle => Mesh::plain_triangle(),
        }
    }
}

impl fmt::Display for GeometryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            GeometryKind::ColoredQuad => "quad",
            GeometryKind::PlainTriangle => "triangle",
        })
    }
}

impl FromStr for GeometryKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "quad" | "colored-quad" => Ok(GeometryKind::ColoredQuad),
            "triangle" | "plain-triangle" => Ok(GeometryKind::PlainTriangle),
            other => Err(format!("unknown geometry '{other}'")),
        }
    }
}
