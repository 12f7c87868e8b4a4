//! Reflection and refraction of direction vectors.

use crate::Vec3;

/// Reflect a direction about a normal.
///
/// `n` must be unit length; `v` may point either way relative to it.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Refract a unit direction through a surface using Snell's law.
///
/// `n` is the unit normal on the incident side (`v.dot(n) <= 0`) and `eta`
/// is the ratio of refractive indices, incident over transmitted. Returns
/// `None` on total internal reflection, i.e. when `1 - eta²(1 - cos²θ)` is
/// not positive.
#[inline]
pub fn refract(v: Vec3, n: Vec3, eta: f32) -> Option<Vec3> {
    let cos_i = (-v.dot(n)).min(1.0);
    let k = 1.0 - eta * eta * (1.0 - cos_i * cos_i);
    if k <= 0.0 {
        return None;
    }
    Some(eta * v + (eta * cos_i - k.sqrt()) * n)
}
