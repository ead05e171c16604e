//! Glint renderer - CPU path tracing.
//!
//! A Monte Carlo path tracer over a scene of spheres with diffuse, metal and
//! glass materials. The entry point is [`render`], which fills a caller-owned
//! RGBA8 buffer and reports progress after each sampling pass.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use glint_renderer::{render, CameraConfig, Color, Material, Point3, RenderOptions, Scene};
//!
//! let mut scene = Scene::new();
//! let grey = Arc::new(Material::diffuse(Color::new(0.5, 0.5, 0.5)));
//! scene.add_sphere(Point3::new(0.0, 0.0, -1.0), 0.5, grey);
//!
//! let config = CameraConfig { image_width: 16, samples_per_pixel: 2, ..CameraConfig::default() };
//! let mut buffer = vec![0u8; config.buffer_len()];
//! let stats = render(&config, &scene, &mut buffer, &RenderOptions::default(), |_, _| {})?;
//! assert_eq!(stats.image_height, 16);
//! # Ok::<(), glint_renderer::RenderError>(())
//! ```

mod camera;
mod error;
mod hittable;
mod material;
mod renderer;
mod scene;
mod sphere;

pub use camera::{image_height, Camera, CameraConfig};
pub use error::{RenderError, RenderResult};
pub use hittable::{HitRecord, Hittable};
pub use material::{Material, Scatter};
pub use renderer::{
    color_to_rgba, linear_to_gamma, quantize, ray_color, render, sky_gradient, RenderOptions,
    RenderStats, SHADOW_EPSILON,
};
pub use scene::{Primitive, Scene};
pub use sphere::Sphere;

/// Re-export Vec3 and common math types from glint_math
pub use glint_math::{Color, Interval, Point3, Ray, Vec3};
