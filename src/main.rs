use std::error::Error;
use std::path::Path;

use log::{error, info};

use rustline::{Light, Mesh, RenderConfig, Renderer, Scene};

/// Read when no path is given on the command line.
const DEFAULT_CONFIG: &str = "render.toml";

fn load_config() -> Result<RenderConfig, Box<dyn Error>> {
    match std::env::args().nth(1) {
        Some(path) => {
            info!("loading settings from {path}");
            Ok(RenderConfig::load(path)?)
        }
        None if Path::new(DEFAULT_CONFIG).exists() => {
            info!("loading settings from {DEFAULT_CONFIG}");
            Ok(RenderConfig::load(DEFAULT_CONFIG)?)
        }
        None => Ok(RenderConfig::default()),
    }
}

fn load_scene(config: &RenderConfig) -> Result<Scene, Box<dyn Error>> {
    let mesh = match &config.mesh {
        Some(path) => Mesh::from_obj(path)?,
        None => Mesh::cube(),
    };
    Ok(Scene::framed(mesh, Light::default()))
}

fn run() -> Result<(), Box<dyn Error>> {
    let config = load_config()?;
    let scene = load_scene(&config)?;

    let renderer = Renderer::new(config.viewport()).with_background(config.background);
    let (frame, _stats) = scene.render(&renderer)?;

    frame.save(&config.output)?;
    info!("wrote {}", config.output.display());
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    run().map_err(|e| {
        error!("render failed: {e}");
        e
    })
}
