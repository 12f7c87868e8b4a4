//! Output surface for finished frames.
//!
//! The engine writes linear colors through [`Display`]; gamma correction
//! only happens when the surface is converted for presentation.

use ember_core::Color;

/// Surface the engine presents each frame to.
pub trait Display {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    /// Store the linear color of pixel (x, y).
    fn set_pixel(&mut self, x: u32, y: u32, color: Color);
}

/// Simple in-memory display holding linear colors.
#[derive(Debug, Clone)]
pub struct Framebuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl Framebuffer {
    /// Create a new framebuffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; pixel_count(width, height)],
        }
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[pixel_index(x, y, self.width)]
    }

    /// Convert to gamma-corrected RGBA bytes (for display or saving).
    pub fn to_rgba(&self, gamma: f32) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 4);
        for color in &self.pixels {
            bytes.extend_from_slice(&color_to_rgba(*color, gamma));
        }
        bytes
    }
}

impl Display for Framebuffer {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn set_pixel(&mut self, x: u32, y: u32, color: Color) {
        let index = pixel_index(x, y, self.width);
        self.pixels[index] = color;
    }
}

/// Number of pixels in a `width` x `height` image, computed without `u32`
/// overflow.
#[inline]
pub(crate) fn pixel_count(width: u32, height: u32) -> usize {
    width as usize * height as usize
}

/// Row-major index of pixel (x, y) in an image `width` pixels wide.
#[inline]
pub(crate) fn pixel_index(x: u32, y: u32, width: u32) -> usize {
    y as usize * width as usize + x as usize
}

/// Apply display gamma to a linear channel value.
#[inline]
pub fn linear_to_gamma(linear: f32, gamma: f32) -> f32 {
    if linear > 0.0 {
        linear.powf(1.0 / gamma)
    } else {
        0.0
    }
}

/// Convert a linear color to 8-bit RGBA.
pub fn color_to_rgba(color: Color, gamma: f32) -> [u8; 4] {
    let channel = |c: f32| (255.0 * linear_to_gamma(c, gamma).clamp(0.0, 1.0)) as u8;
    [channel(color.x), channel(color.y), channel(color.z), 255]
}
