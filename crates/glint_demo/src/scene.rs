//! The random-spheres cover scene.

use std::sync::Arc;

use glint_math::{random_color, random_color_range, random_f64, random_f64_range};
use glint_renderer::{CameraConfig, Color, Material, Point3, Scene, Vec3};
use rand::RngCore;

/// Camera framing the cover scene.
pub fn cover_camera() -> CameraConfig {
    CameraConfig {
        aspect_ratio: 16.0 / 9.0,
        image_width: 500,
        samples_per_pixel: 10,
        max_depth: 20,
        vfov: 20.0,
        look_from: Point3::new(13.0, 2.0, 3.0),
        look_at: Point3::new(0.0, 0.0, 0.0),
        view_up: Vec3::new(0.0, 1.0, 0.0),
        defocus_angle: 0.6,
        focus_dist: 10.0,
    }
}

/// Ground, a grid of small random spheres, and three large feature spheres.
pub fn cover_scene(rng: &mut dyn RngCore) -> Scene {
    let mut scene = Scene::new();

    let ground = Arc::new(Material::diffuse(Color::new(0.5, 0.5, 0.5)));
    scene.add_sphere(Point3::new(0.0, -1000.0, 0.0), 1000.0, ground);

    // Small spheres keep clear of the metal feature sphere
    let avoid = Point3::new(4.0, 0.2, 0.0);
    let glass = Arc::new(Material::refractive(1.5));

    for a in -11..11 {
        for b in -11..11 {
            let choose_mat = random_f64(rng);
            let center = Point3::new(
                a as f64 + 0.9 * random_f64(rng),
                0.2,
                b as f64 + 0.9 * random_f64(rng),
            );

            if (center - avoid).length() <= 0.9 {
                continue;
            }

            let material = if choose_mat < 0.8 {
                let albedo = random_color(rng) * random_color(rng);
                Arc::new(Material::diffuse(albedo))
            } else if choose_mat < 0.95 {
                let albedo = random_color_range(rng, 0.5, 1.0);
                let fuzz = random_f64_range(rng, 0.0, 0.5);
                Arc::new(Material::reflective(albedo, fuzz))
            } else {
                glass.clone()
            };

            scene.add_sphere(center, 0.2, material);
        }
    }

    scene.add_sphere(Point3::new(0.0, 1.0, 0.0), 1.0, glass);
    scene.add_sphere(
        Point3::new(-4.0, 1.0, 0.0),
        1.0,
        Arc::new(Material::diffuse(Color::new(0.4, 0.2, 0.1))),
    );
    scene.add_sphere(
        Point3::new(4.0, 1.0, 0.0),
        1.0,
        Arc::new(Material::reflective(Color::new(0.7, 0.6, 0.5), 0.0)),
    );

    scene
}
