//! Recursive path tracing integrator.
//!
//! Implements unidirectional Monte Carlo path tracing with:
//! - Fixed-depth termination (no Russian roulette)
//! - Cosine-weighted diffuse bounces
//! - Mirror reflection blended stochastically with a diffuse base
//! - Dielectric refraction with Schlick-weighted reflection and total
//!   internal reflection
//!
//! Every bounce follows exactly one lobe. Lobe probabilities sum to one and
//! each lobe is tinted by the material color, so a surface never returns
//! more energy than it receives plus its own emission.

use crate::hittable::{Intersection, EPSILON};
use crate::sampling::{gen_f32, random_hemisphere};
use crate::Scene;
use ember_core::{Color, RenderConfig, Surface};
use ember_math::{reflect, refract, Ray};
use rand::RngCore;

/// Refractive index of the medium the camera sits in.
pub const AIR_IOR: f32 = 1.0;

/// Radiance estimator over a scene.
#[derive(Debug, Clone, Copy)]
pub struct PathTracer<'a> {
    scene: &'a Scene,
    max_depth: u32,
    max_distance: f32,
    ambient: Color,
}

impl<'a> PathTracer<'a> {
    pub fn new(scene: &'a Scene, config: &RenderConfig) -> Self {
        Self {
            scene,
            max_depth: config.max_depth,
            max_distance: config.max_distance,
            ambient: config.ambient_color(),
        }
    }

    /// Compute the radiance arriving along `ray`.
    ///
    /// `depth` counts bounces taken so far and `ior` is the refractive index
    /// of the medium the ray travels through. Returns the ambient color on a
    /// miss or once `depth` reaches the configured maximum.
    pub fn trace(&self, ray: &Ray, depth: u32, ior: f32, rng: &mut dyn RngCore) -> Color {
        if depth >= self.max_depth {
            return self.ambient;
        }

        let Some(hit) = self.scene.intersect_within(ray, self.max_distance) else {
            return self.ambient;
        };

        let material = hit.material;
        let scattered = match material.surface {
            Surface::Diffuse => self.diffuse(&hit, depth, ior, rng),
            Surface::Mirror { reflectivity } => {
                if gen_f32(rng) < reflectivity {
                    self.specular(ray, &hit, depth, ior, rng)
                } else {
                    self.diffuse(&hit, depth, ior, rng)
                }
            }
            Surface::Dielectric { ior: surface_ior } => {
                self.dielectric(ray, &hit, depth, ior, surface_ior, rng)
            }
        };

        material.emission + scattered
    }

    fn diffuse(&self, hit: &Intersection, depth: u32, ior: f32, rng: &mut dyn RngCore) -> Color {
        let color = hit.material.color;
        // Black surfaces (lights) absorb everything
        if color == Color::ZERO {
            return Color::ZERO;
        }

        let direction = random_hemisphere(hit.normal, rng);
        let bounce = Ray::new(hit.position + hit.normal * EPSILON, direction);
        color * self.trace(&bounce, depth + 1, ior, rng)
    }

    fn specular(
        &self,
        ray: &Ray,
        hit: &Intersection,
        depth: u32,
        ior: f32,
        rng: &mut dyn RngCore,
    ) -> Color {
        let direction = reflect(ray.direction, hit.normal).normalize();
        let bounce = Ray::new(hit.position + hit.normal * EPSILON, direction);
        hit.material.color * self.trace(&bounce, depth + 1, ior, rng)
    }

    fn dielectric(
        &self,
        ray: &Ray,
        hit: &Intersection,
        depth: u32,
        ior: f32,
        surface_ior: f32,
        rng: &mut dyn RngCore,
    ) -> Color {
        // Entering the object moves into its medium, leaving returns to air
        let next_ior = if hit.front_face { surface_ior } else { AIR_IOR };
        let eta = ior / next_ior;
        let cos_i = (-ray.direction.dot(hit.normal)).min(1.0);

        match refract(ray.direction, hit.normal, eta) {
            Some(direction) if gen_f32(rng) >= schlick(cos_i, eta) => {
                let transmitted = Ray::new(hit.position - hit.normal * EPSILON, direction.normalize());
                hit.material.color * self.trace(&transmitted, depth + 1, next_ior, rng)
            }
            // Total internal reflection, or the Fresnel coin chose reflection
            _ => self.specular(ray, hit, depth, ior, rng),
        }
    }
}

/// Schlick's approximation for reflectance.
fn schlick(cosine: f32, eta: f32) -> f32 {
    let r0 = ((1.0 - eta) / (1.0 + eta)).powi(2);
    r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
}
