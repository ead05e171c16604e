//! Glint math - vectors, rays, intervals and random sampling.
//!
//! All geometry is double precision. `Vec3`, `Point3` and `Color` are the same
//! `glam::DVec3` type under different names so signatures read by intent.

pub use glam::DVec3;

mod interval;
mod random;
mod ray;
mod vector;

pub use interval::Interval;
pub use random::{
    random_color, random_color_range, random_f64, random_f64_range, random_in_unit_disk,
    random_in_unit_sphere, random_unit_vector, sample_square,
};
pub use ray::Ray;
pub use vector::{near_zero, reflect, refract};

/// A direction or offset in 3D space.
pub type Vec3 = DVec3;

/// A position in 3D space.
pub type Point3 = DVec3;

/// Linear RGB color, one channel per component (typically 0-1).
pub type Color = DVec3;
