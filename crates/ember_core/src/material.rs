//! Surface descriptions consumed by the integrator.
//!
//! The set of surface kinds is closed: the integrator matches on `Surface`
//! exhaustively, so adding a kind means teaching the integrator to scatter it.

use ember_math::Vec3;

/// Color type alias (linear RGB, typically 0-1)
pub type Color = Vec3;

/// How a surface scatters light that reaches it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Surface {
    /// Lambertian reflector, cosine-weighted scattering about the normal.
    Diffuse,
    /// Perfect mirror blended with a diffuse base.
    ///
    /// `reflectivity` is the probability (0-1) of following the mirror
    /// direction; the remainder scatters diffusely.
    Mirror { reflectivity: f32 },
    /// Transparent dielectric with an index of refraction
    /// (1.0 = air, 1.5 = glass, 2.4 = diamond).
    Dielectric { ior: f32 },
}

/// Surface shading parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    /// Diffuse albedo, or the tint applied to specular/transmitted light
    pub color: Color,
    /// Emitted radiance (zero for anything that isn't a light)
    pub emission: Color,
    /// Scattering kind
    pub surface: Surface,
}

impl Default for Material {
    fn default() -> Self {
        Self::diffuse(Color::splat(0.5)) // Grey default
    }
}

impl Material {
    /// A Lambertian material with the given albedo.
    pub fn diffuse(color: Color) -> Self {
        Self {
            color,
            emission: Color::ZERO,
            surface: Surface::Diffuse,
        }
    }

    /// A mirror tinted by `color`; `reflectivity` is clamped to 0-1.
    pub fn mirror(color: Color, reflectivity: f32) -> Self {
        Self {
            color,
            emission: Color::ZERO,
            surface: Surface::Mirror {
                reflectivity: reflectivity.clamp(0.0, 1.0),
            },
        }
    }

    /// A clear dielectric with the given index of refraction.
    pub fn dielectric(ior: f32) -> Self {
        Self {
            color: Color::ONE,
            emission: Color::ZERO,
            surface: Surface::Dielectric { ior },
        }
    }

    /// A diffuse emitter. Its surface is black so it only contributes emission.
    pub fn light(emission: Color) -> Self {
        Self {
            color: Color::ZERO,
            emission,
            surface: Surface::Diffuse,
        }
    }

    /// Replace the emission term.
    pub fn with_emission(mut self, emission: Color) -> Self {
        self.emission = emission;
        self
    }

    /// Check if this material emits light.
    pub fn is_emissive(&self) -> bool {
        self.emission.max_element() > 0.0
    }
}
