use crate::mesh::Vertex;

use super::error::{MaterialError, Stage};
use super::source::{referenced_uniforms, ShaderSource};
use super::uniform::{UniformLayout, UniformTable, U_VIEW_PROJECTION};

pub const VERTEX_ENTRY: &str = "vs_main";
pub const FRAGMENT_ENTRY: &str = "fs_main";

/// Everything needed to build a material: sources plus the declared uniforms.
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialDesc {
    pub label: String,
    pub source: ShaderSource,
    pub uniforms: UniformTable,
}

impl MaterialDesc {
    /// Pairs sources with a uniform table.
    ///
    /// `u_view_projection` is declared automatically (identity) when either
    /// source references it.
    pub fn new(label: impl Into<String>, source: ShaderSource, mut uniforms: UniformTable) -> Self {
        let wants_camera = [&source.vertex, &source.fragment]
            .iter()
            .any(|s| referenced_uniforms(s).iter().any(|n| n == U_VIEW_PROJECTION));
        if wants_camera && !uniforms.contains(U_VIEW_PROJECTION) {
            // The name is valid and absent, so this cannot fail.
            let _ = uniforms.declare(U_VIEW_PROJECTION, glam::Mat4::IDENTITY);
        }

        Self {
            label: label.into(),
            source,
            uniforms,
        }
    }
}

/// Validated WGSL ready for `wgpu::Device::create_shader_module`.
#[derive(Debug, Clone)]
pub struct ShaderProgram {
    pub vertex_wgsl: String,
    pub fragment_wgsl: String,
    pub layout: UniformLayout,
}

impl ShaderProgram {
    /// Checks `desc` and assembles the final shader text.
    ///
    /// Runs entirely on the CPU: uniform references are checked against the
    /// table, then each stage is parsed and validated with naga (the same
    /// front-end wgpu uses), so compile errors surface here instead of as a
    /// device error at pipeline creation.
    pub fn compile(desc: &MaterialDesc) -> Result<Self, MaterialError> {
        check_references(Stage::Vertex, &desc.source.vertex, &desc.uniforms)?;
        check_references(Stage::Fragment, &desc.source.fragment, &desc.uniforms)?;

        let prelude = desc.uniforms.wgsl_prelude();
        let vertex_wgsl = format!("{prelude}{}", desc.source.vertex);
        let fragment_wgsl = format!("{prelude}{}", desc.source.fragment);

        let vs = validate_stage(Stage::Vertex, &vertex_wgsl, VERTEX_ENTRY)?;
        check_vertex_inputs(&vs)?;
        validate_stage(Stage::Fragment, &fragment_wgsl, FRAGMENT_ENTRY)?;

        log::debug!(
            "material '{}' compiled ({} uniforms, {} byte block)",
            desc.label,
            desc.uniforms.len(),
            desc.uniforms.layout().buffer_size
        );

        Ok(Self {
            vertex_wgsl,
            fragment_wgsl,
            layout: desc.uniforms.layout(),
        })
    }
}

fn check_references(stage: Stage, src: &str, table: &UniformTable) -> Result<(), MaterialError> {
    match referenced_uniforms(src).into_iter().find(|n| !table.contains(n)) {
        Some(name) => Err(MaterialError::UndeclaredUniform { stage, name }),
        None => Ok(()),
    }
}

fn validate_stage(stage: Stage, src: &str, entry: &'static str) -> Result<naga::Module, MaterialError> {
    let module = naga::front::wgsl::parse_str(src).map_err(|e| MaterialError::Parse {
        stage,
        message: e.emit_to_string(src),
    })?;

    let mut validator = naga::valid::Validator::new(
        naga::valid::ValidationFlags::all(),
        naga::valid::Capabilities::empty(),
    );
    validator
        .validate(&module)
        .map_err(|e| MaterialError::Validation {
            stage,
            message: e.as_inner().to_string(),
        })?;

    let naga_stage = match stage {
        Stage::Vertex => naga::ShaderStage::Vertex,
        Stage::Fragment => naga::ShaderStage::Fragment,
    };
    let has_entry = module
        .entry_points
        .iter()
        .any(|ep| ep.stage == naga_stage && ep.name == entry);
    if !has_entry {
        return Err(MaterialError::MissingEntryPoint { stage, entry });
    }

    Ok(module)
}

/// Every `@location` the vertex entry point reads must come from [`Vertex`].
fn check_vertex_inputs(module: &naga::Module) -> Result<(), MaterialError> {
    let Some(ep) = module
        .entry_points
        .iter()
        .find(|ep| ep.stage == naga::ShaderStage::Vertex && ep.name == VERTEX_ENTRY)
    else {
        return Ok(());
    };

    let mut locations = Vec::new();
    for arg in &ep.function.arguments {
        match &arg.binding {
            Some(naga::Binding::Location { location, .. }) => locations.push(*location),
            Some(_) => {}
            None => {
                if let naga::TypeInner::Struct { members, .. } = &module.types[arg.ty].inner {
                    for m in members {
                        if let Some(naga::Binding::Location { location, .. }) = &m.binding {
                            locations.push(*location);
                        }
                    }
                }
            }
        }
    }

    match locations.into_iter().find(|l| !Vertex::LOCATIONS.contains(l)) {
        Some(l) => Err(MaterialError::UnboundVertexInput(l)),
        None => Ok(()),
    }
}
