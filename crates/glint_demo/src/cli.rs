use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use glint_renderer::CameraConfig;
use log::LevelFilter;

/// Log levels selectable on the command line
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "glint")]
#[command(about = "Render the random-spheres cover scene with the Glint path tracer")]
pub struct Args {
    /// Camera settings as JSON; flags below override individual fields
    #[arg(short, long)]
    pub camera: Option<PathBuf>,

    /// Image width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Number of samples per pixel
    #[arg(short = 's', long)]
    pub samples_per_pixel: Option<u32>,

    /// Maximum number of ray bounces
    #[arg(short = 'd', long)]
    pub max_depth: Option<u32>,

    /// Seed for the render's random streams (random if omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Seed for the placement of the small spheres (random if omitted)
    #[arg(long)]
    pub scene_seed: Option<u64>,

    /// Log progress every N sampling passes
    #[arg(long, default_value_t = 1)]
    pub report_every: u32,

    /// Output PNG path
    #[arg(short, long, default_value = "output.png")]
    pub output: PathBuf,

    /// Rewrite this PNG with the converging image at every progress report
    #[arg(long)]
    pub preview: Option<PathBuf>,

    /// Set the logging level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,
}

impl Args {
    /// Apply the command line overrides to a camera configuration.
    pub fn apply(&self, config: &mut CameraConfig) {
        if let Some(width) = self.width {
            config.image_width = width;
        }
        if let Some(samples) = self.samples_per_pixel {
            config.samples_per_pixel = samples;
        }
        if let Some(depth) = self.max_depth {
            config.max_depth = depth;
        }
    }
}
