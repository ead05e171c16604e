//! Vector helpers shared by the materials.

use crate::Vec3;

/// Threshold below which every component counts as zero.
const NEAR_ZERO: f64 = 1e-8;

/// True if the vector is close to zero in all dimensions.
#[inline]
pub fn near_zero(v: Vec3) -> bool {
    v.abs().max_element() < NEAR_ZERO
}

/// Reflect a vector about a normal.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Refract a unit vector through a surface with unit normal `n`.
///
/// `etai_over_etat` is the ratio of refraction indices on the incident side
/// over the transmitted side.
#[inline]
pub fn refract(uv: Vec3, n: Vec3, etai_over_etat: f64) -> Vec3 {
    let cos_theta = (-uv).dot(n).min(1.0);
    let r_out_perp = etai_over_etat * (uv + cos_theta * n);
    let r_out_parallel = -(1.0 - r_out_perp.length_squared()).abs().sqrt() * n;
    r_out_perp + r_out_parallel
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_near_zero() {
        assert!(near_zero(Vec3::ZERO));
        assert!(near_zero(Vec3::new(1e-9, -1e-9, 0.0)));
        assert!(!near_zero(Vec3::new(1e-9, 1e-3, 0.0)));
    }

    #[test]
    fn test_reflect_flips_normal_component() {
        let v = Vec3::new(1.0, -1.0, 0.0);
        let reflected = reflect(v, Vec3::Y);
        assert_eq!(reflected, Vec3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_refract_straight_through() {
        // Head-on incidence passes through unbent regardless of the ratio
        let out = refract(-Vec3::Y, Vec3::Y, 1.0 / 1.5);
        assert!((out - -Vec3::Y).length() < 1e-12);
    }

    #[test]
    fn test_refract_bends_towards_normal() {
        let incoming = Vec3::new(1.0, -1.0, 0.0).normalize();
        let out = refract(incoming, Vec3::Y, 1.0 / 1.5);

        // Snell: sin(out) = sin(in) / 1.5
        let sin_in = incoming.x.abs();
        let sin_out = out.x.abs() / out.length();
        assert!((sin_out - sin_in / 1.5).abs() < 1e-9);
        assert!(out.y < 0.0);
    }
}
