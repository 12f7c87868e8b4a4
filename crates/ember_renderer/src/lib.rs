//! Ember Renderer - progressive CPU path tracing.
//!
//! A Monte Carlo path tracer over spheres and planes. Each call to
//! [`Engine::render_frame`] adds one sample per pixel to an accumulation
//! buffer; the displayed image is the running mean, which is reset whenever
//! the camera moves.

mod accumulation;
mod camera;
mod engine;
mod error;
mod framebuffer;
mod hittable;
mod integrator;
mod plane;
mod sampling;
mod scene;
mod sphere;

pub use accumulation::AccumulationBuffer;
pub use camera::Camera;
pub use engine::Engine;
pub use error::{RenderError, RenderResult};
pub use framebuffer::{color_to_rgba, linear_to_gamma, Display, Framebuffer};
pub use hittable::{Hittable, Intersection, EPSILON};
pub use integrator::{PathTracer, AIR_IOR};
pub use plane::Plane;
pub use sampling::{gen_f32, random_hemisphere, scanline_rng, tent};
pub use scene::Scene;
pub use sphere::Sphere;

/// Re-export config, materials and math types used in the public API
pub use ember_core::{Color, Material, RenderConfig, Surface};
pub use ember_math::{Interval, Quat, Ray, Vec3};
