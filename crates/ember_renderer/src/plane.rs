//! Infinite plane primitive.

use crate::hittable::{Hittable, Intersection};
use ember_core::Material;
use ember_math::{Interval, Ray, Vec3};

/// Rays closer to parallel than this never hit a plane.
const PARALLEL_EPSILON: f32 = 1e-6;

/// An infinite plane through `point` with unit `normal`.
#[derive(Debug, Clone, PartialEq)]
pub struct Plane {
    point: Vec3,
    normal: Vec3,
    material: Material,
}

impl Plane {
    /// Create a new plane. `normal` is normalized and must be non-zero.
    pub fn new(point: Vec3, normal: Vec3, material: Material) -> Self {
        debug_assert!(normal.length_squared() > 0.0, "plane normal must be non-zero");
        Self {
            point,
            normal: normal.normalize(),
            material,
        }
    }

    pub fn point(&self) -> Vec3 {
        self.point
    }

    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    pub fn material(&self) -> &Material {
        &self.material
    }
}

impl Hittable for Plane {
    fn intersect(&self, ray: &Ray, ray_t: Interval) -> Option<Intersection<'_>> {
        let denom = self.normal.dot(ray.direction);
        if denom.abs() < PARALLEL_EPSILON {
            return None;
        }

        let t = (self.point - ray.origin).dot(self.normal) / denom;
        if !ray_t.surrounds(t) {
            return None;
        }

        Some(Intersection::new(ray, t, self.normal, &self.material))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hittable::EPSILON;
    use ember_core::Color;

    fn floor() -> Plane {
        Plane::new(Vec3::ZERO, Vec3::Y, Material::diffuse(Color::ONE))
    }

    fn forward() -> Interval {
        Interval::new(EPSILON, f32::INFINITY)
    }

    #[test]
    fn test_plane_hit() {
        let ray = Ray::new(Vec3::new(0.0, 2.0, 0.0), Vec3::new(0.0, -1.0, -1.0).normalize());

        let plane = floor();
        let hit = plane.intersect(&ray, forward()).unwrap();
        assert!((hit.t - 2.0 * 2.0_f32.sqrt()).abs() < 1e-4);
        assert!(hit.position.y.abs() < 1e-5);
        assert_eq!(hit.normal, Vec3::Y);
        assert!(hit.front_face);
    }

    #[test]
    fn test_plane_hit_from_below() {
        let ray = Ray::new(Vec3::new(0.0, -1.0, 0.0), Vec3::Y);

        let plane = floor();
        let hit = plane.intersect(&ray, forward()).unwrap();
        assert!((hit.t - 1.0).abs() < 1e-5);
        assert!(!hit.front_face);
        assert_eq!(hit.normal, Vec3::NEG_Y);
    }

    #[test]
    fn test_plane_miss_parallel() {
        let ray = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::X);
        assert!(floor().intersect(&ray, forward()).is_none());
    }

    #[test]
    fn test_plane_miss_behind() {
        let ray = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::Y);
        assert!(floor().intersect(&ray, forward()).is_none());
    }

    #[test]
    fn test_plane_normalizes_normal() {
        let plane = Plane::new(Vec3::ZERO, Vec3::new(0.0, 3.0, 0.0), Material::default());
        assert_eq!(plane.normal(), Vec3::Y);
    }
}
