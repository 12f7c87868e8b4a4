//! Random sampling helpers.
//!
//! Everything stochastic draws from an explicit `&mut dyn RngCore`. The
//! engine hands each scanline its own [`scanline_rng`], so no generator is
//! ever shared between render tasks.

use ember_math::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use std::f32::consts::PI;

/// Uniform sample in [0, 1).
#[inline]
pub fn gen_f32(rng: &mut dyn RngCore) -> f32 {
    rng.gen::<f32>()
}

/// Sample the tent (triangle) filter over [-1, 1].
pub fn tent(rng: &mut dyn RngCore) -> f32 {
    let r = 2.0 * gen_f32(rng);
    if r < 1.0 {
        r.sqrt() - 1.0
    } else {
        1.0 - (2.0 - r).sqrt()
    }
}

/// Cosine-weighted direction on the hemisphere around the unit normal `n`.
///
/// The result is unit length and never points below the surface.
pub fn random_hemisphere(n: Vec3, rng: &mut dyn RngCore) -> Vec3 {
    let phi = 2.0 * PI * gen_f32(rng);
    let rq = gen_f32(rng);
    let r = rq.sqrt();
    let (sin_phi, cos_phi) = phi.sin_cos();

    let (tangent, bitangent) = n.any_orthonormal_pair();
    let local_z = (1.0 - rq).sqrt();
    (tangent * (r * cos_phi) + bitangent * (r * sin_phi) + n * local_z).normalize()
}

/// Deterministic generator for one scanline of one frame.
///
/// The same `(seed, frame, row)` always yields the same stream, and
/// neighbouring rows and frames get unrelated streams.
pub fn scanline_rng(seed: u64, frame: u32, row: u32) -> StdRng {
    let stream = ((frame as u64) << 32) | row as u64;
    StdRng::seed_from_u64(splitmix64(seed ^ splitmix64(stream)))
}

#[inline]
fn splitmix64(mut z: u64) -> u64 {
    z = z.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
