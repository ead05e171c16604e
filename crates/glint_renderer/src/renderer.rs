//! Core path tracing renderer.
//!
//! Implements Monte Carlo path tracing with:
//! - Recursive ray tracing with configurable depth
//! - Progressive sampling: each pass adds one sample to every pixel
//! - Gamma correction and 8-bit quantization into a caller-owned RGBA buffer
//! - Row-parallel evaluation with rayon, reproducible from a seed

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use glint_math::{Color, Interval, Ray};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use rayon::prelude::*;

use crate::error::{RenderError, RenderResult};
use crate::{Camera, CameraConfig, Hittable};

/// Smallest ray parameter accepted as a hit; avoids shadow acne.
pub const SHADOW_EPSILON: f64 = 0.001;

/// Options controlling how a render is driven.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Seed for the per-row random streams. Same seed, same image.
    pub seed: u64,
    /// Resolve the buffer and call the progress sink every this many passes.
    /// The final pass is always reported; 0 reports only the final pass.
    pub report_every: u32,
    /// Checked between passes; when set the render stops with `Cancelled`.
    pub cancel: Option<Arc<AtomicBool>>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            seed: 0,
            report_every: 1,
            cancel: None,
        }
    }
}

/// Summary of a finished render.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderStats {
    pub image_width: u32,
    pub image_height: u32,
    /// Samples accumulated in every pixel
    pub samples: u32,
    pub elapsed: Duration,
}

/// Compute the color seen by a ray.
///
/// This is the core path tracing function. It follows the ray through the
/// scene for at most `depth` bounces, keeping the product of the surface
/// attenuations along the path. The walk is a loop, so the depth never
/// touches the call stack.
pub fn ray_color(ray: &Ray, world: &dyn Hittable, depth: u32, rng: &mut dyn RngCore) -> Color {
    let mut throughput = Color::ONE;
    let mut ray = *ray;

    for _ in 0..depth {
        let Some(rec) = world.hit(&ray, Interval::new(SHADOW_EPSILON, f64::INFINITY)) else {
            return throughput * sky_gradient(&ray);
        };

        match rec.material.scatter(&ray, &rec, rng) {
            Some(scatter) => {
                throughput *= scatter.attenuation;
                ray = scatter.scattered;
            }
            // Ray was absorbed
            None => return Color::ZERO,
        }

        // Nothing further along the path can contribute
        if throughput == Color::ZERO {
            return Color::ZERO;
        }
    }

    // Exceeded max depth: no light gathered
    Color::ZERO
}

/// Background seen by rays that miss everything: white at the bottom
/// blending to sky blue at the top.
pub fn sky_gradient(ray: &Ray) -> Color {
    let unit_direction = ray.direction().normalize();
    let a = 0.5 * (unit_direction.y + 1.0);
    let white = Color::new(1.0, 1.0, 1.0);
    let blue = Color::new(0.5, 0.7, 1.0);
    white.lerp(blue, a)
}

/// Apply gamma correction (gamma = 2.0) after clamping into [0, 1].
#[inline]
pub fn linear_to_gamma(linear: f64) -> f64 {
    Interval::UNIT.clamp(linear).sqrt()
}

/// Quantize a linear channel value to a byte: `min(floor(256 * sqrt(x)), 255)`.
#[inline]
pub fn quantize(linear: f64) -> u8 {
    ((256.0 * linear_to_gamma(linear)) as u32).min(255) as u8
}

/// Convert a linear color to 8-bit RGBA with opaque alpha.
pub fn color_to_rgba(color: Color) -> [u8; 4] {
    [quantize(color.x), quantize(color.y), quantize(color.z), 255]
}

/// Render the scene into `buffer`.
///
/// `buffer` must be exactly `image_width * image_height * 4` bytes, laid out
/// row-major from the top row, RGBA per pixel. Nothing is written if the
/// configuration or the buffer size is rejected.
///
/// Rendering proceeds in passes, each adding one sample to every pixel.
/// After every `options.report_every` passes (and always after the last) the
/// running average is written to `buffer` and `progress` receives the number
/// of samples per pixel so far together with the buffer. The sink runs on the
/// calling thread between passes, so it always sees a complete image.
pub fn render<P>(
    config: &CameraConfig,
    world: &dyn Hittable,
    buffer: &mut [u8],
    options: &RenderOptions,
    mut progress: P,
) -> RenderResult<RenderStats>
where
    P: FnMut(u32, &[u8]),
{
    let camera = Camera::new(config)?;
    let width = camera.image_width() as usize;
    let height = camera.image_height() as usize;

    let expected = config.buffer_len();
    if buffer.len() != expected {
        return Err(RenderError::BufferSize {
            expected,
            actual: buffer.len(),
        });
    }

    let samples = config.samples_per_pixel;
    log::info!(
        "Rendering {}x{} @ {} spp, max depth {}",
        width,
        height,
        samples,
        config.max_depth
    );

    let start = Instant::now();
    let mut rngs: Vec<StdRng> = (0..height as u64)
        .map(|row| StdRng::seed_from_u64(row_seed(options.seed, row)))
        .collect();
    let mut accum = vec![Color::ZERO; width * height];

    for pass in 1..=samples {
        if options
            .cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
        {
            log::info!("Render cancelled after {} passes", pass - 1);
            return Err(RenderError::Cancelled {
                completed: pass - 1,
                requested: samples,
            });
        }

        let pass_start = Instant::now();
        accum
            .par_chunks_mut(width)
            .zip(rngs.par_iter_mut())
            .enumerate()
            .for_each(|(j, (row, rng))| {
                for (i, sum) in row.iter_mut().enumerate() {
                    let ray = camera.get_ray(i as u32, j as u32, rng);
                    *sum += ray_color(&ray, world, config.max_depth, rng);
                }
            });
        log::debug!("pass {}/{} traced in {:?}", pass, samples, pass_start.elapsed());

        let report = pass == samples || (options.report_every > 0 && pass % options.report_every == 0);
        if report {
            resolve(&accum, buffer, width, pass);
            progress(pass, buffer);
        }
    }

    let elapsed = start.elapsed();
    log::info!("Rendered {}x{} in {:?}", width, height, elapsed);

    Ok(RenderStats {
        image_width: width as u32,
        image_height: height as u32,
        samples,
        elapsed,
    })
}

/// Write the average of `samples` accumulated samples per pixel into the raster.
fn resolve(accum: &[Color], buffer: &mut [u8], width: usize, samples: u32) {
    let scale = 1.0 / samples as f64;
    buffer
        .par_chunks_mut(width * 4)
        .zip(accum.par_chunks(width))
        .for_each(|(bytes, row)| {
            let pixels: &mut [[u8; 4]] = bytemuck::cast_slice_mut(bytes);
            for (pixel, sum) in pixels.iter_mut().zip(row) {
                *pixel = color_to_rgba(*sum * scale);
            }
        });
}

/// Seed for one image row's random stream (SplitMix64 finalizer).
fn row_seed(seed: u64, row: u64) -> u64 {
    let mut z = seed ^ row.wrapping_add(1).wrapping_mul(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
