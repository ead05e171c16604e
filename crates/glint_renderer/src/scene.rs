//! Scene aggregate: the set of primitives a render traces against.

use std::sync::Arc;

use glint_math::{Interval, Point3, Ray};

use crate::{HitRecord, Hittable, Material, Sphere};

/// Every primitive kind the renderer knows how to intersect.
///
/// New shapes are added as variants; `hit` dispatches with a `match` so the
/// inner loop stays free of virtual calls.
#[derive(Debug, Clone)]
pub enum Primitive {
    Sphere(Sphere),
}

impl From<Sphere> for Primitive {
    fn from(sphere: Sphere) -> Self {
        Primitive::Sphere(sphere)
    }
}

impl Hittable for Primitive {
    #[inline]
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        match self {
            Primitive::Sphere(sphere) => sphere.hit(ray, ray_t),
        }
    }
}

/// An ordered list of primitives.
///
/// The scene owns its primitives; the primitives share their materials.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    primitives: Vec<Primitive>,
}

impl Scene {
    /// Create a new empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a primitive to the scene.
    pub fn add(&mut self, primitive: impl Into<Primitive>) {
        self.primitives.push(primitive.into());
    }

    /// Add a sphere to the scene.
    pub fn add_sphere(&mut self, center: Point3, radius: f64, material: Arc<Material>) {
        self.add(Sphere::new(center, radius, material));
    }

    /// Remove all primitives from the scene.
    pub fn clear(&mut self) {
        self.primitives.clear();
    }

    /// Get the number of primitives.
    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    /// Check if the scene is empty.
    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }
}

impl Hittable for Scene {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let mut closest: Option<HitRecord<'_>> = None;

        for primitive in &self.primitives {
            let closest_so_far = closest.as_ref().map_or(ray_t.max, |rec| rec.t);
            if let Some(rec) = primitive.hit(ray, ray_t.with_max(closest_so_far)) {
                closest = Some(rec);
            }
        }

        closest
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glint_math::{Color, Vec3};

    fn material(gray: f64) -> Arc<Material> {
        Arc::new(Material::diffuse(Color::splat(gray)))
    }

    #[test]
    fn test_empty_scene_misses() {
        let scene = Scene::new();
        let ray = Ray::new(Point3::ZERO, -Vec3::Z);

        assert!(scene.is_empty());
        assert!(scene.hit(&ray, Interval::new(0.001, f64::INFINITY)).is_none());
    }

    #[test]
    fn test_nearest_hit_regardless_of_order() {
        let near = material(0.1);
        let far = material(0.9);
        let ray = Ray::new(Point3::ZERO, -Vec3::Z);
        let interval = Interval::new(0.001, f64::INFINITY);

        let mut near_first = Scene::new();
        near_first.add_sphere(Point3::new(0.0, 0.0, -2.0), 0.5, near.clone());
        near_first.add_sphere(Point3::new(0.0, 0.0, -5.0), 0.5, far.clone());

        let mut far_first = Scene::new();
        far_first.add_sphere(Point3::new(0.0, 0.0, -5.0), 0.5, far);
        far_first.add_sphere(Point3::new(0.0, 0.0, -2.0), 0.5, near.clone());

        for scene in [&near_first, &far_first] {
            let rec = scene.hit(&ray, interval).expect("both spheres are on the ray");
            assert!((rec.t - 1.5).abs() < 1e-12);
            assert_eq!(rec.material, near.as_ref());
        }
    }

    #[test]
    fn test_shared_material_between_spheres() {
        let shared = material(0.5);
        let mut scene = Scene::new();
        scene.add_sphere(Point3::new(-1.0, 0.0, -1.0), 0.5, shared.clone());
        scene.add_sphere(Point3::new(1.0, 0.0, -1.0), 0.5, shared.clone());

        assert_eq!(scene.len(), 2);
        assert_eq!(Arc::strong_count(&shared), 3);

        drop(scene);
        assert_eq!(Arc::strong_count(&shared), 1);
    }

    #[test]
    fn test_interval_upper_bound_limits_scene() {
        let mut scene = Scene::new();
        scene.add_sphere(Point3::new(0.0, 0.0, -5.0), 0.5, material(0.5));
        let ray = Ray::new(Point3::ZERO, -Vec3::Z);

        assert!(scene.hit(&ray, Interval::new(0.001, 4.0)).is_none());
        assert!(scene.hit(&ray, Interval::new(0.001, 5.0)).is_some());
    }
}
