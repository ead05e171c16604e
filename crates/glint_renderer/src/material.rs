//! Surface materials and how they scatter light.

use glint_math::{near_zero, random_f64, random_unit_vector, reflect, refract, Color, Ray};
use rand::RngCore;

use crate::hittable::HitRecord;

/// Outcome of a ray scattering off a surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scatter {
    /// Per-channel fraction of the scattered light that survives
    pub attenuation: Color,
    /// The outgoing ray
    pub scattered: Ray,
}

/// Describes how light interacts with a surface.
///
/// Materials are immutable once built and are shared between primitives
/// through `Arc<Material>`.
#[derive(Debug, Clone, PartialEq)]
pub enum Material {
    /// Lambertian (diffuse) surface.
    Diffuse { albedo: Color },
    /// Metal (specular) surface. `fuzz` of 0.0 is a perfect mirror.
    Reflective { albedo: Color, fuzz: f64 },
    /// Dielectric (glass) surface with the given index of refraction.
    Refractive { refraction_index: f64 },
}

impl Material {
    /// Create a Lambertian material with the given albedo color.
    pub fn diffuse(albedo: Color) -> Self {
        Material::Diffuse { albedo }
    }

    /// Create a metal material.
    ///
    /// - `albedo`: The color of the metal
    /// - `fuzz`: Roughness, 0.0 = perfect mirror, 1.0 = very rough. Clamped into [0, 1];
    ///   NaN becomes 0.0.
    pub fn reflective(albedo: Color, fuzz: f64) -> Self {
        let clamped = if fuzz.is_nan() { 0.0 } else { fuzz.clamp(0.0, 1.0) };
        if clamped != fuzz {
            log::warn!("metal fuzz {} clamped to {}", fuzz, clamped);
        }
        Material::Reflective {
            albedo,
            fuzz: clamped,
        }
    }

    /// Create a dielectric material.
    ///
    /// - `refraction_index`: 1.0 = air, 1.5 = glass, 2.4 = diamond
    pub fn refractive(refraction_index: f64) -> Self {
        Material::Refractive { refraction_index }
    }

    /// Scatter an incoming ray.
    ///
    /// Returns `None` if the ray is absorbed.
    pub fn scatter(&self, ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> Option<Scatter> {
        match *self {
            Material::Diffuse { albedo } => {
                let mut scatter_direction = rec.normal + random_unit_vector(rng);

                // Catch degenerate scatter direction
                if near_zero(scatter_direction) {
                    scatter_direction = rec.normal;
                }

                Some(Scatter {
                    attenuation: albedo,
                    scattered: Ray::new(rec.p, scatter_direction),
                })
            }
            Material::Reflective { albedo, fuzz } => {
                let reflected = reflect(ray_in.direction().normalize(), rec.normal);
                let direction = reflected + fuzz * random_unit_vector(rng);

                // Fuzz can push the ray below the surface, which absorbs it
                (direction.dot(rec.normal) > 0.0).then(|| Scatter {
                    attenuation: albedo,
                    scattered: Ray::new(rec.p, direction),
                })
            }
            Material::Refractive { refraction_index } => {
                let ratio = if rec.front_face {
                    1.0 / refraction_index
                } else {
                    refraction_index
                };

                let unit_direction = ray_in.direction().normalize();
                let cos_theta = (-unit_direction).dot(rec.normal).min(1.0);
                let sin_theta = (1.0 - cos_theta * cos_theta).sqrt();

                let cannot_refract = ratio * sin_theta > 1.0;
                let direction =
                    if cannot_refract || reflectance(cos_theta, ratio) > random_f64(rng) {
                        reflect(unit_direction, rec.normal)
                    } else {
                        refract(unit_direction, rec.normal, ratio)
                    };

                Some(Scatter {
                    attenuation: Color::ONE,
                    scattered: Ray::new(rec.p, direction),
                })
            }
        }
    }
}

/// Schlick's approximation for reflectance.
fn reflectance(cosine: f64, refraction_ratio: f64) -> f64 {
    let r0 = ((1.0 - refraction_ratio) / (1.0 + refraction_ratio)).powi(2);
    r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
}
