//! The set of primitives a frame is rendered against.

use crate::hittable::{Hittable, Intersection, EPSILON};
use crate::{Plane, Sphere};
use ember_core::{Color, Material};
use ember_math::{Interval, Ray, Vec3};

/// Spheres and planes, tested by brute force.
///
/// Spheres are always scanned before planes, each in insertion order, so
/// the result of a query is stable for a given scene.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    spheres: Vec<Sphere>,
    planes: Vec<Plane>,
}

impl Scene {
    /// Create a new empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_sphere(&mut self, sphere: Sphere) {
        self.spheres.push(sphere);
    }

    pub fn add_plane(&mut self, plane: Plane) {
        self.planes.push(plane);
    }

    /// Builder form of [`add_sphere`](Self::add_sphere).
    pub fn with_sphere(mut self, sphere: Sphere) -> Self {
        self.add_sphere(sphere);
        self
    }

    /// Builder form of [`add_plane`](Self::add_plane).
    pub fn with_plane(mut self, plane: Plane) -> Self {
        self.add_plane(plane);
        self
    }

    pub fn spheres(&self) -> &[Sphere] {
        &self.spheres
    }

    pub fn planes(&self) -> &[Plane] {
        &self.planes
    }

    /// Get the number of primitives.
    pub fn len(&self) -> usize {
        self.spheres.len() + self.planes.len()
    }

    /// Check if the scene is empty.
    pub fn is_empty(&self) -> bool {
        self.spheres.is_empty() && self.planes.is_empty()
    }

    /// Nearest hit along `ray` closer than `max_distance`.
    pub fn intersect_within(&self, ray: &Ray, max_distance: f32) -> Option<Intersection<'_>> {
        self.intersect(ray, Interval::new(EPSILON, max_distance))
    }

    /// The stock scene: a five-walled box with a ceiling light, a mirror
    /// ball, a glass ball and a white diffuse ball, framed by the default
    /// camera at (0, 1, -1) looking down -Z.
    pub fn reference() -> Self {
        let white = Material::diffuse(Color::splat(0.75));
        let red = Material::diffuse(Color::new(0.75, 0.15, 0.15));
        let green = Material::diffuse(Color::new(0.15, 0.75, 0.15));

        Scene::new()
            // Light, sunk into the ceiling
            .with_sphere(Sphere::new(
                Vec3::new(0.0, 6.4, -5.0),
                1.6,
                Material::light(Color::splat(12.0)),
            ))
            .with_sphere(Sphere::new(
                Vec3::new(-1.5, 1.0, -5.5),
                1.0,
                Material::mirror(Color::splat(0.95), 0.9),
            ))
            .with_sphere(Sphere::new(
                Vec3::new(1.4, 1.0, -4.0),
                1.0,
                Material::dielectric(1.5),
            ))
            .with_sphere(Sphere::new(Vec3::new(0.3, 0.6, -7.0), 0.6, white))
            // Floor, ceiling, back wall
            .with_plane(Plane::new(Vec3::ZERO, Vec3::Y, white))
            .with_plane(Plane::new(Vec3::new(0.0, 5.0, 0.0), Vec3::NEG_Y, white))
            .with_plane(Plane::new(Vec3::new(0.0, 0.0, -9.0), Vec3::Z, white))
            // Side walls
            .with_plane(Plane::new(Vec3::new(-3.5, 0.0, 0.0), Vec3::X, red))
            .with_plane(Plane::new(Vec3::new(3.5, 0.0, 0.0), Vec3::NEG_X, green))
    }
}

impl Hittable for Scene {
    fn intersect(&self, ray: &Ray, ray_t: Interval) -> Option<Intersection<'_>> {
        let mut closest: Option<Intersection<'_>> = None;
        let mut closest_so_far = ray_t.max;

        let primitives = self
            .spheres
            .iter()
            .map(|s| s as &dyn Hittable)
            .chain(self.planes.iter().map(|p| p as &dyn Hittable));

        for primitive in primitives {
            if let Some(hit) = primitive.intersect(ray, ray_t.with_max(closest_so_far)) {
                closest_so_far = hit.t;
                closest = Some(hit);
            }
        }

        closest
    }
}
