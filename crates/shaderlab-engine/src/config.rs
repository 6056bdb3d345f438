//! Scene configuration.
//!
//! A demo variant is `{quad | triangle} × {static | loop} × pointer tracking`.
//! [`SceneConfig`] carries the variant plus the knobs the driver needs, and
//! parses the word-style command line the studio binary accepts.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::input::PointerTracking;
use crate::material::{MaterialDesc, ShaderSource, UniformSet, UniformTable};
use crate::mesh::GeometryKind;
use crate::scene::{CameraConfig, Scene};
use crate::time::DEFAULT_TIME_STEP;
use crate::viewport::Viewport;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("unknown argument '{0}'")]
    UnknownArgument(String),

    #[error("invalid value for {option}: {message}")]
    InvalidValue { option: &'static str, message: String },

    #[error("time step must be finite and positive, got {0}")]
    TimeStep(String),
}

/// Whether the scene animates.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum RenderMode {
    /// One draw at mount and one per resize.
    Static,

    /// A step per host redraw signal.
    #[default]
    Continuous,
}

impl fmt::Display for RenderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RenderMode::Static => "static",
            RenderMode::Continuous => "loop",
        })
    }
}

impl FromStr for RenderMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "static" => Ok(RenderMode::Static),
            "loop" | "continuous" => Ok(RenderMode::Continuous),
            other => Err(format!("unknown render mode '{other}'")),
        }
    }
}

/// What a failed frame does to the loop.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum ErrorPolicy {
    /// Skip transient failures, halt on fatal ones.
    #[default]
    Continue,

    /// Halt on any failure.
    Stop,
}

impl FromStr for ErrorPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "continue" => Ok(ErrorPolicy::Continue),
            "stop" => Ok(ErrorPolicy::Stop),
            other => Err(format!("unknown error policy '{other}'")),
        }
    }
}

/// Everything the driver needs to build and run one scene.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneConfig {
    pub geometry: GeometryKind,
    pub mode: RenderMode,
    pub pointer: PointerTracking,

    /// Shader time added per step.
    pub time_step: f32,
    pub error_policy: ErrorPolicy,
    pub background: wgpu::Color,
    pub camera: CameraConfig,

    /// Declare `u_resolution` even when the pointer is not tracked.
    pub resolution_uniform: bool,

    /// Custom shaders. `None` selects the built-in assets for `geometry`.
    pub shaders: Option<ShaderSource>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            geometry: GeometryKind::ColoredQuad,
            mode: RenderMode::Continuous,
            pointer: PointerTracking::DEFAULT,
            time_step: DEFAULT_TIME_STEP,
            error_policy: ErrorPolicy::Continue,
            background: wgpu::Color::BLACK,
            camera: CameraConfig::default(),
            resolution_uniform: false,
            shaders: None,
        }
    }
}

impl SceneConfig {
    pub fn with_geometry(mut self, geometry: GeometryKind) -> Self {
        self.geometry = geometry;
        self
    }

    pub fn with_mode(mut self, mode: RenderMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_pointer(mut self, pointer: PointerTracking) -> Self {
        self.pointer = pointer;
        self
    }

    pub fn with_time_step(mut self, time_step: f32) -> Self {
        self.time_step = time_step;
        self
    }

    pub fn with_error_policy(mut self, policy: ErrorPolicy) -> Self {
        self.error_policy = policy;
        self
    }

    pub fn with_background(mut self, background: wgpu::Color) -> Self {
        self.background = background;
        self
    }

    pub fn with_camera(mut self, camera: CameraConfig) -> Self {
        self.camera = camera;
        self
    }

    pub fn with_resolution_uniform(mut self, declare: bool) -> Self {
        self.resolution_uniform = declare;
        self
    }

    pub fn with_shaders(mut self, shaders: ShaderSource) -> Self {
        self.shaders = Some(shaders);
        self
    }

    /// Applies command-line words on top of `self`.
    ///
    /// Accepted: `quad`, `triangle`, `static`, `loop`, `mouse`, `still`,
    /// `--smooth=<seconds|raw>`, `--step=<increment>`, `--on-error=<continue|stop>`.
    pub fn parse_args<I, S>(mut self, args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for arg in args {
            let arg = arg.as_ref();
            if let Some(value) = arg.strip_prefix("--smooth=") {
                self.pointer = value.parse().map_err(|message| ConfigError::InvalidValue {
                    option: "--smooth",
                    message,
                })?;
                continue;
            }
            if let Some(value) = arg.strip_prefix("--step=") {
                self.time_step = value
                    .parse()
                    .map_err(|_| ConfigError::TimeStep(value.to_string()))?;
                continue;
            }
            if let Some(value) = arg.strip_prefix("--on-error=") {
                self.error_policy = value.parse().map_err(|message| ConfigError::InvalidValue {
                    option: "--on-error",
                    message,
                })?;
                continue;
            }

            match arg {
                "mouse" => {
                    if !self.pointer.is_enabled() {
                        self.pointer = PointerTracking::DEFAULT;
                    }
                }
                "still" => self.pointer = PointerTracking::Off,
                word => {
                    if let Ok(geometry) = word.parse::<GeometryKind>() {
                        self.geometry = geometry;
                    } else if let Ok(mode) = word.parse::<RenderMode>() {
                        self.mode = mode;
                    } else {
                        return Err(ConfigError::UnknownArgument(word.to_string()));
                    }
                }
            }
        }

        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.time_step.is_finite() && self.time_step > 0.0) {
            return Err(ConfigError::TimeStep(self.time_step.to_string()));
        }
        Ok(())
    }

    /// Optional built-in uniforms this variant declares.
    pub fn uniform_set(&self) -> UniformSet {
        let pointer = self.pointer.is_enabled();
        UniformSet {
            resolution: pointer || self.resolution_uniform,
            mouse: pointer,
            view_projection: false,
        }
    }

    pub fn shader_source(&self) -> ShaderSource {
        self.shaders
            .clone()
            .unwrap_or_else(|| ShaderSource::builtin(self.geometry, self.pointer.is_enabled()))
    }

    pub fn material(&self, viewport: Viewport) -> MaterialDesc {
        MaterialDesc::new(
            format!("{} material", self.geometry),
            self.shader_source(),
            UniformTable::standard(self.uniform_set(), viewport),
        )
    }

    /// Scene root with this variant's mesh and material attached.
    pub fn build_scene(&self, viewport: Viewport) -> Scene {
        let mut scene = Scene::new(self.background);
        scene.add(self.geometry.build(), self.material(viewport));
        scene
    }
}

impl fmt::Display for SceneConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {} / pointer {}", self.geometry, self.mode, self.pointer)
    }
}

#[cfg(test)]
mod tests {
    use crate::material::{U_MOUSE, U_RESOLUTION, U_TIME};

    use super::*;

    // ── arguments ─────────────────────────────────────────────────────────

    #[test]
    fn no_arguments_keep_defaults() {
        let c = SceneConfig::default().parse_args(Vec::<String>::new()).unwrap();
        assert_eq!(c, SceneConfig::default());
    }

    #[test]
    fn words_select_variant() {
        let c = SceneConfig::default()
            .parse_args(["triangle", "static", "still"])
            .unwrap();
        assert_eq!(c.geometry, GeometryKind::PlainTriangle);
        assert_eq!(c.mode, RenderMode::Static);
        assert_eq!(c.pointer, PointerTracking::Off);
    }

    #[test]
    fn pointer_is_smoothed_by_default() {
        assert_eq!(
            SceneConfig::default().pointer,
            PointerTracking::Smoothed { time_constant: 0.25 }
        );
        let c = SceneConfig::default().parse_args(["still", "mouse"]).unwrap();
        assert_eq!(c.pointer, PointerTracking::Smoothed { time_constant: 0.25 });

        let c = SceneConfig::default().parse_args(["--smooth=raw"]).unwrap();
        assert_eq!(c.pointer, PointerTracking::Raw);
    }

    #[test]
    fn smoothing_option() {
        let c = SceneConfig::default()
            .parse_args(["quad", "loop", "--smooth=0.2"])
            .unwrap();
        assert_eq!(c.pointer, PointerTracking::Smoothed { time_constant: 0.2 });

        // `mouse` does not undo an explicit smoothing choice.
        let c = SceneConfig::default()
            .parse_args(["--smooth=0.2", "mouse"])
            .unwrap();
        assert_eq!(c.pointer, PointerTracking::Smoothed { time_constant: 0.2 });
    }

    #[test]
    fn unknown_word_is_an_error() {
        assert_eq!(
            SceneConfig::default().parse_args(["hexagon"]),
            Err(ConfigError::UnknownArgument("hexagon".into()))
        );
    }

    #[test]
    fn bad_option_values_are_errors() {
        assert!(matches!(
            SceneConfig::default().parse_args(["--smooth=-1"]),
            Err(ConfigError::InvalidValue { option: "--smooth", .. })
        ));
        assert!(matches!(
            SceneConfig::default().parse_args(["--step=0"]),
            Err(ConfigError::TimeStep(_))
        ));
        assert!(matches!(
            SceneConfig::default().parse_args(["--on-error=panic"]),
            Err(ConfigError::InvalidValue { option: "--on-error", .. })
        ));
    }

    // ── uniforms ──────────────────────────────────────────────────────────

    #[test]
    fn pointer_variant_declares_mouse_and_resolution() {
        let m = SceneConfig::default().material(Viewport::new(640.0, 480.0, 1.0));
        let names: Vec<_> = m.uniforms.names().collect();
        assert_eq!(names, vec![U_TIME, U_RESOLUTION, U_MOUSE]);
    }

    #[test]
    fn still_variant_declares_time_only() {
        let m = SceneConfig::default()
            .with_pointer(PointerTracking::Off)
            .material(Viewport::default());
        assert_eq!(m.uniforms.names().collect::<Vec<_>>(), vec![U_TIME]);

        let m = SceneConfig::default()
            .with_pointer(PointerTracking::Off)
            .with_resolution_uniform(true)
            .material(Viewport::default());
        assert_eq!(m.uniforms.names().collect::<Vec<_>>(), vec![U_TIME, U_RESOLUTION]);
    }

    #[test]
    fn build_scene_attaches_variant_mesh() {
        let scene = SceneConfig::default()
            .with_geometry(GeometryKind::PlainTriangle)
            .build_scene(Viewport::default());
        let d = scene.drawable().unwrap();
        assert_eq!(d.mesh.vertex_count(), 3);
        assert!(!d.mesh.is_indexed());
    }
}
