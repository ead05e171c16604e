//! Camera configuration and primary ray generation.

use glint_math::{random_in_unit_disk, sample_square, Point3, Ray, Vec3};
use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::error::{RenderError, RenderResult};

/// High-level camera and image settings supplied by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    // Image settings
    /// Ratio of image width over height
    pub aspect_ratio: f64,
    /// Rendered image width in pixel count
    pub image_width: u32,
    /// Count of random samples for each pixel
    pub samples_per_pixel: u32,
    /// Maximum number of ray bounces into the scene
    pub max_depth: u32,

    // Camera positioning
    /// Vertical field of view in degrees
    pub vfov: f64,
    pub look_from: Point3,
    pub look_at: Point3,
    /// Camera-relative "up" direction
    pub view_up: Vec3,

    // Lens settings
    /// Variation angle of rays through each pixel, in degrees
    pub defocus_angle: f64,
    /// Distance from camera to plane of perfect focus
    pub focus_dist: f64,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            aspect_ratio: 1.0,
            image_width: 100,
            samples_per_pixel: 10,
            max_depth: 10,
            vfov: 90.0,
            look_from: Point3::new(0.0, 0.0, 0.0),
            look_at: Point3::new(0.0, 0.0, -1.0),
            view_up: Vec3::new(0.0, 1.0, 0.0),
            defocus_angle: 0.0,
            focus_dist: 10.0,
        }
    }
}

impl CameraConfig {
    /// Image height derived from the width and aspect ratio, never below 1.
    ///
    /// Callers sizing a raster buffer must use this same value.
    pub fn image_height(&self) -> u32 {
        image_height(self.image_width, self.aspect_ratio)
    }

    /// Byte length of the RGBA raster this configuration renders into.
    pub fn buffer_len(&self) -> usize {
        (self.image_width as usize)
            .saturating_mul(self.image_height() as usize)
            .saturating_mul(4)
    }

    /// Check the settings that have no safe fallback.
    pub fn validate(&self) -> RenderResult<()> {
        if !(self.aspect_ratio.is_finite() && self.aspect_ratio > 0.0) {
            return Err(RenderError::AspectRatio(self.aspect_ratio));
        }
        if self.image_width == 0 {
            return Err(RenderError::ImageWidth);
        }
        if self.samples_per_pixel == 0 {
            return Err(RenderError::SamplesPerPixel);
        }
        if !(self.vfov > 0.0 && self.vfov < 180.0) {
            return Err(RenderError::FieldOfView(self.vfov));
        }
        if !(self.focus_dist.is_finite() && self.focus_dist > 0.0) {
            return Err(RenderError::FocusDistance(self.focus_dist));
        }

        if !(self.defocus_angle.is_finite() && self.defocus_angle < 180.0) {
            return Err(RenderError::DefocusAngle(self.defocus_angle));
        }
        for (name, vector) in [
            ("look_from", self.look_from),
            ("look_at", self.look_at),
            ("view_up", self.view_up),
        ] {
            if !vector.is_finite() {
                return Err(RenderError::NonFiniteVector(name));
            }
        }

        let w = self.look_from - self.look_at;
        let u = self.view_up.cross(w);
        if !(w.length_squared() > 0.0 && w.length_squared().is_finite())
            || !(u.length_squared() > 0.0 && u.length_squared().is_finite())
        {
            return Err(RenderError::DegenerateView);
        }

        Ok(())
    }
}

/// Image height for a given width and aspect ratio (at least 1).
pub fn image_height(image_width: u32, aspect_ratio: f64) -> u32 {
    ((image_width as f64 / aspect_ratio) as u32).max(1)
}

/// Camera for generating rays into the scene.
///
/// Built from a `CameraConfig` at the start of every render; all derived
/// values are fixed afterwards.
#[derive(Debug, Clone)]
pub struct Camera {
    image_width: u32,
    image_height: u32,
    defocus_angle: f64,

    center: Point3,
    pixel00_loc: Point3,
    pixel_delta_u: Vec3,
    pixel_delta_v: Vec3,
    u: Vec3,
    v: Vec3,
    w: Vec3,
    defocus_disk_u: Vec3,
    defocus_disk_v: Vec3,
}

impl Camera {
    /// Derive the viewing basis and lens model from a configuration.
    pub fn new(config: &CameraConfig) -> RenderResult<Self> {
        config.validate()?;

        let image_width = config.image_width;
        let image_height = config.image_height();
        let center = config.look_from;
        if ((image_width as f64 / config.aspect_ratio) as u32) < 1 {
            log::warn!(
                "image height for width {} at aspect {} rounds to 0, using 1",
                image_width,
                config.aspect_ratio
            );
        }

        // Calculate viewport dimensions
        let theta = config.vfov.to_radians();
        let h = (theta / 2.0).tan();
        let viewport_height = 2.0 * h * config.focus_dist;
        let viewport_width = viewport_height * (image_width as f64 / image_height as f64);

        // Calculate camera basis vectors
        let w = (config.look_from - config.look_at).normalize();
        let u = config.view_up.cross(w).normalize();
        let v = w.cross(u);

        // Viewport edges; v runs down the image
        let viewport_u = viewport_width * u;
        let viewport_v = -viewport_height * v;

        let pixel_delta_u = viewport_u / image_width as f64;
        let pixel_delta_v = viewport_v / image_height as f64;

        let viewport_upper_left =
            center - config.focus_dist * w - viewport_u / 2.0 - viewport_v / 2.0;
        let pixel00_loc = viewport_upper_left + 0.5 * (pixel_delta_u + pixel_delta_v);

        let defocus_radius = config.focus_dist * (config.defocus_angle / 2.0).to_radians().tan();

        log::debug!(
            "camera {}x{}: viewport {:.3}x{:.3}, defocus radius {:.4}",
            image_width,
            image_height,
            viewport_width,
            viewport_height,
            defocus_radius
        );

        Ok(Self {
            image_width,
            image_height,
            defocus_angle: config.defocus_angle,
            center,
            pixel00_loc,
            pixel_delta_u,
            pixel_delta_v,
            u,
            v,
            w,
            defocus_disk_u: u * defocus_radius,
            defocus_disk_v: v * defocus_radius,
        })
    }

    /// Image width in pixels.
    pub fn image_width(&self) -> u32 {
        self.image_width
    }

    /// Image height in pixels, as derived by [`image_height`].
    pub fn image_height(&self) -> u32 {
        self.image_height
    }

    /// Camera basis as (u, v, w): right, up, and backwards from the view direction.
    pub fn basis(&self) -> (Vec3, Vec3, Vec3) {
        (self.u, self.v, self.w)
    }

    /// Center of the top-left pixel on the focal plane.
    pub fn pixel00_loc(&self) -> Point3 {
        self.pixel00_loc
    }

    /// Generate a ray for column `i`, row `j` with random sampling.
    ///
    /// The ray starts on the defocus disk and passes through a jittered
    /// point inside the pixel's square on the focal plane.
    pub fn get_ray(&self, i: u32, j: u32, rng: &mut dyn RngCore) -> Ray {
        let offset = sample_square(rng);

        let pixel_sample = self.pixel00_loc
            + ((i as f64) + offset.x) * self.pixel_delta_u
            + ((j as f64) + offset.y) * self.pixel_delta_v;

        let ray_origin = if self.defocus_angle <= 0.0 {
            self.center
        } else {
            self.defocus_disk_sample(rng)
        };

        Ray::new(ray_origin, pixel_sample - ray_origin)
    }

    /// Sample a point on the defocus disk.
    fn defocus_disk_sample(&self, rng: &mut dyn RngCore) -> Point3 {
        let p = random_in_unit_disk(rng);
        self.center + p.x * self.defocus_disk_u + p.y * self.defocus_disk_v
    }
}
