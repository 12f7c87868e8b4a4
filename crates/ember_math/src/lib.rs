// Re-export glam for convenience
pub use glam::*;

// Ember math types
mod interval;
mod ray;
mod rotation;
mod vector;

pub use interval::Interval;
pub use ray::Ray;
pub use rotation::QuatExt;
pub use vector::{reflect, refract};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec3_operations() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, 5.0, 6.0);
        assert_eq!(a + b, Vec3::new(5.0, 7.0, 9.0));
        assert_eq!(a * b, Vec3::new(4.0, 10.0, 18.0));
        assert_eq!(a.dot(b), 32.0);
        assert_eq!(Vec3::X.cross(Vec3::Y), Vec3::Z);
    }
}
