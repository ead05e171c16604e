//! Glint demo: renders the random-spheres cover scene to a PNG.
//!
//! Run with: cargo run --release -- --width 800 -s 50 -o cover.png --preview live.png

mod cli;
mod preview;
mod scene;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use glint_ffi::save_png;
use glint_renderer::{render, CameraConfig, RenderOptions};
use log::{info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::cli::Args;
use crate::preview::PreviewWriter;

fn load_camera(path: &Path) -> Result<CameraConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read camera file {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("failed to parse camera file {}", path.display()))
}

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_default_env()
        .filter_level(args.log_level.into())
        .init();

    let mut config = match &args.camera {
        Some(path) => load_camera(path)?,
        None => scene::cover_camera(),
    };
    args.apply(&mut config);
    config.validate().context("invalid camera configuration")?;

    let scene_seed = args.scene_seed.unwrap_or_else(rand::random);
    let world = scene::cover_scene(&mut StdRng::seed_from_u64(scene_seed));
    info!("Built scene with {} spheres (scene seed {})", world.len(), scene_seed);

    let options = RenderOptions {
        seed: args.seed.unwrap_or_else(rand::random),
        report_every: args.report_every,
        cancel: None,
    };
    info!("Render seed {}", options.seed);

    let mut buffer = vec![0u8; config.buffer_len()];
    let mut preview = args
        .preview
        .clone()
        .map(|path| PreviewWriter::new(path, config.image_width, config.image_height()));
    let total = config.samples_per_pixel;
    let stats = render(&config, &world, &mut buffer, &options, |samples, view| {
        info!("{}/{} samples per pixel", samples, total);
        if let Some(preview) = preview.as_mut() {
            if let Err(err) = preview.update(samples, view) {
                warn!("{:#}", err);
            }
        }
    })
    .context("render failed")?;

    save_png(stats.image_width, stats.image_height, &buffer, &args.output)
        .with_context(|| format!("failed to write {}", args.output.display()))?;

    info!(
        "Rendered {}x{} @ {} spp in {:?}",
        stats.image_width, stats.image_height, stats.samples, stats.elapsed
    );
    Ok(())
}
