// Quaternion utilities for camera orientation
//
// Extends glam::Quat with the sandwich rotation used for primary rays and
// the camera's local axes.

use glam::{Quat, Vec3};

/// Extension trait for Quat to provide camera-space helpers.
pub trait QuatExt {
    /// Rotate `v` by the sandwich product `q * (0, v) * conj(q)`, keeping
    /// the vector part. Only meaningful for unit quaternions.
    fn sandwich(&self, v: Vec3) -> Vec3;

    /// Local forward axis (-Z rotated into world space).
    fn forward(&self) -> Vec3;

    /// Local right axis (+X rotated into world space).
    fn right(&self) -> Vec3;

    /// Local up axis (+Y rotated into world space).
    fn up(&self) -> Vec3;
}

impl QuatExt for Quat {
    fn sandwich(&self, v: Vec3) -> Vec3 {
        let q = self.to_array();
        let conj = [-q[0], -q[1], -q[2], q[3]];
        let r = hamilton(hamilton(q, [v.x, v.y, v.z, 0.0]), conj);
        Vec3::new(r[0], r[1], r[2])
    }

    fn forward(&self) -> Vec3 {
        self.sandwich(Vec3::NEG_Z)
    }

    fn right(&self) -> Vec3 {
        self.sandwich(Vec3::X)
    }

    fn up(&self) -> Vec3 {
        self.sandwich(Vec3::Y)
    }
}

/// Hamilton product of two quaternions stored as `[x, y, z, w]`.
///
/// Written out rather than going through `Quat * Quat` because the pure
/// quaternion `(0, v)` is not unit length.
#[inline]
fn hamilton(a: [f32; 4], b: [f32; 4]) -> [f32; 4] {
    let [ax, ay, az, aw] = a;
    let [bx, by, bz, bw] = b;
    [
        aw * bx + ax * bw + ay * bz - az * by,
        aw * by - ax * bz + ay * bw + az * bx,
        aw * bz + ax * by - ay * bx + az * bw,
        aw * bw - ax * bx - ay * by - az * bz,
    ]
}
