use crate::Vec3;

/// A ray in 3D space with an origin and a direction.
///
/// Fields are public so a single ray can be reused across a scanline, with
/// only `direction` rewritten per pixel.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    /// Expected to be normalized by whoever builds the ray.
    pub direction: Vec3,
}

impl Ray {
    /// Create a new ray.
    #[inline]
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// A ray at `origin` pointing down -Z, waiting for its direction.
    #[inline]
    pub fn from_origin(origin: Vec3) -> Self {
        Self::new(origin, Vec3::NEG_Z)
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + t * direction
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

impl Default for Ray {
    fn default() -> Self {
        Self::from_origin(Vec3::ZERO)
    }
}
