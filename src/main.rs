use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use zoomview::demo::DemoScene;
use zoomview::{init_logging, ViewerConfig, BUILD_DATE, VERSION};

/// Headless ZoomView demo.
///
/// Builds a viewer with a rectangle, both scale bars and a cursor, replays a
/// scripted drag session against it and writes the rendered overlay as PNG.
#[derive(Parser, Debug)]
#[command(name = "zoomview", version, about = "ZoomView overlay demo renderer")]
struct CliArgs {
    /// Viewer config (.toml or .json). Defaults to the platform config file;
    /// built-in defaults are used when that file does not exist.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Where to write the rendered PNG.
    #[arg(short, long, value_name = "FILE", default_value = "zoomview-demo.png")]
    output: PathBuf,

    /// Image width in pixels.
    #[arg(long, default_value_t = 800)]
    width: u32,

    /// Image height in pixels.
    #[arg(long, default_value_t = 600)]
    height: u32,

    /// Render the initial layout without replaying the drag script.
    #[arg(long)]
    no_script: bool,

    /// Also write the effective configuration to this file.
    #[arg(long, value_name = "FILE")]
    save_config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    init_logging()?;
    let args = CliArgs::parse();
    info!("ZoomView {} (built {})", VERSION, BUILD_DATE);

    let config_path = match args.config {
        Some(path) => path,
        None => ViewerConfig::default_path()?,
    };
    let config = ViewerConfig::load_or_default(&config_path)
        .with_context(|| format!("Failed to load {}", config_path.display()))?;

    let mut scene = DemoScene::build(&config, args.width, args.height)?;
    if !args.no_script {
        scene.run_script()?;
    }

    let surface = scene.render()?;
    surface
        .save_png(&args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;
    info!("Wrote {}", args.output.display());

    if let Some(path) = args.save_config {
        config.save_to_file(&path)?;
        info!("Saved configuration to {}", path.display());
    }

    Ok(())
}
