use std::fmt;

use thiserror::Error;

use super::uniform::UniformType;

/// Shader stage, for error reporting.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Stage {
    Vertex,
    Fragment,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::Vertex => "vertex",
            Stage::Fragment => "fragment",
        })
    }
}

/// Material construction and uniform errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MaterialError {
    #[error("{stage} shader references uniform '{name}' which is not declared")]
    UndeclaredUniform { stage: Stage, name: String },

    #[error("uniform '{0}' is not declared")]
    UnknownUniform(String),

    #[error("uniform '{0}' is declared twice")]
    DuplicateUniform(String),

    #[error("'{0}' is not a valid uniform name (expected u_<identifier>)")]
    InvalidUniformName(String),

    #[error("uniform '{name}' is {expected}, got {found}")]
    TypeMismatch {
        name: String,
        expected: UniformType,
        found: UniformType,
    },

    #[error("{stage} shader failed to parse:\n{message}")]
    Parse { stage: Stage, message: String },

    #[error("{stage} shader failed validation: {message}")]
    Validation { stage: Stage, message: String },

    #[error("{stage} shader has no `{entry}` entry point")]
    MissingEntryPoint { stage: Stage, entry: &'static str },

    #[error("vertex shader reads @location({0}), which the mesh layout does not provide")]
    UnboundVertexInput(u32),
}
