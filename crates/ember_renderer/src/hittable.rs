//! Hittable trait and Intersection for ray-object intersection.

use ember_core::Material;
use ember_math::{Interval, Ray, Vec3};

/// Minimum accepted hit distance, and the offset applied to spawned rays so
/// they don't re-hit the surface they just left.
pub const EPSILON: f32 = 1e-4;

/// Record of a ray-object intersection.
///
/// A miss is `None`; there is no "invalid" intersection value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection<'a> {
    /// Point of intersection
    pub position: Vec3,
    /// Unit surface normal at intersection (always points against the ray)
    pub normal: Vec3,
    /// Parameter t where the intersection occurs
    pub t: f32,
    /// Whether the ray hit the front face (outside) of the surface
    pub front_face: bool,
    /// Material of the hit primitive
    pub material: &'a Material,
}

impl<'a> Intersection<'a> {
    /// Build an intersection at `t` along `ray`.
    ///
    /// The normal is always stored pointing against the ray, so we also
    /// track whether we hit the front or back face.
    pub fn new(ray: &Ray, t: f32, outward_normal: Vec3, material: &'a Material) -> Self {
        let front_face = ray.direction.dot(outward_normal) < 0.0;
        let normal = if front_face {
            outward_normal
        } else {
            -outward_normal
        };

        Self {
            position: ray.at(t),
            normal,
            t,
            front_face,
            material,
        }
    }
}

/// Trait for objects that can be hit by rays.
pub trait Hittable: Send + Sync {
    /// Find the nearest hit whose `t` lies strictly inside `ray_t`.
    fn intersect(&self, ray: &Ray, ray_t: Interval) -> Option<Intersection<'_>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use ember_core::Color;

    #[test]
    fn test_front_face_normal() {
        let material = Material::diffuse(Color::ONE);
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);

        let hit = Intersection::new(&ray, 2.0, Vec3::Z, &material);
        assert!(hit.front_face);
        assert_eq!(hit.normal, Vec3::Z);
        assert_eq!(hit.position, Vec3::new(0.0, 0.0, -2.0));
    }

    #[test]
    fn test_back_face_normal_flips() {
        let material = Material::diffuse(Color::ONE);
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);

        // Outward normal points along the ray: we are inside
        let hit = Intersection::new(&ray, 1.0, Vec3::NEG_Z, &material);
        assert!(!hit.front_face);
        assert_eq!(hit.normal, Vec3::Z);
    }
}
