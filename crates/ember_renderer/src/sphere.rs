//! Sphere primitive for ray tracing.

use crate::hittable::{Hittable, Intersection};
use ember_core::Material;
use ember_math::{Interval, Ray, Vec3};

/// A sphere primitive.
#[derive(Debug, Clone, PartialEq)]
pub struct Sphere {
    center: Vec3,
    radius: f32,
    material: Material,
}

impl Sphere {
    /// Create a new sphere.
    pub fn new(center: Vec3, radius: f32, material: Material) -> Self {
        Self {
            center,
            radius: radius.max(0.0),
            material,
        }
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn material(&self) -> &Material {
        &self.material
    }
}

impl Hittable for Sphere {
    fn intersect(&self, ray: &Ray, ray_t: Interval) -> Option<Intersection<'_>> {
        // Geometric form: project the center onto the (unit) ray direction
        let sp = self.center - ray.origin;
        let b = sp.dot(ray.direction);
        let discriminant = b * b - sp.length_squared() + self.radius * self.radius;
        if discriminant < 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();

        // Find the nearest root in the acceptable range
        let mut root = b - sqrtd;
        if !ray_t.surrounds(root) {
            root = b + sqrtd;
            if !ray_t.surrounds(root) {
                return None;
            }
        }

        let outward_normal = (ray.at(root) - self.center) / self.radius;
        Some(Intersection::new(ray, root, outward_normal, &self.material))
    }
}
