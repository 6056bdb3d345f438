use anyhow::{Context, Result};
use winit::dpi::LogicalSize;

use shaderlab_engine::config::SceneConfig;
use shaderlab_engine::device::GpuInit;
use shaderlab_engine::logging::{init_logging, LoggingConfig};
use shaderlab_engine::window::{Runtime, RuntimeConfig};

const USAGE: &str = "usage: shaderlab-studio [quad|triangle] [static|loop] [mouse|still] \
[--smooth=<seconds|raw>] [--step=<increment>] [--on-error=<continue|stop>] [--msaa=<samples>]";

struct Options {
    scene: SceneConfig,
    msaa_samples: u32,
}

fn parse_options<I>(args: I) -> Result<Options>
where
    I: IntoIterator<Item = String>,
{
    let mut msaa_samples = GpuInit::default().msaa_samples;
    let mut scene_args = Vec::new();

    for arg in args {
        if let Some(value) = arg.strip_prefix("--msaa=") {
            msaa_samples = value
                .parse()
                .with_context(|| format!("invalid --msaa value '{value}'"))?;
        } else {
            scene_args.push(arg);
        }
    }

    let scene = SceneConfig::default()
        .parse_args(scene_args)
        .context(USAGE)?;

    Ok(Options { scene, msaa_samples })
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        println!("{USAGE}");
        return Ok(());
    }

    let options = parse_options(args)?;
    log::info!("shaderlab: {}", options.scene);

    let runtime = RuntimeConfig {
        title: format!("shaderlab · {}", options.scene.geometry),
        initial_size: LogicalSize::new(960.0, 640.0),
    };
    let gpu = GpuInit {
        msaa_samples: options.msaa_samples.max(1),
        ..GpuInit::default()
    };

    Runtime::run(runtime, gpu, options.scene)
}
