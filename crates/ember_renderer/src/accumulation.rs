//! Progressive sample accumulation.

use crate::framebuffer::{pixel_count, pixel_index};
use ember_core::Color;

/// Per-pixel running radiance sums with one sample counter shared by every
/// pixel.
///
/// Sums and the counter are only ever cleared together and the counter only
/// advances once per full pass, so every pixel always holds the same number
/// of samples and `sum / count` is the per-pixel mean.
#[derive(Debug, Clone)]
pub struct AccumulationBuffer {
    width: u32,
    height: u32,
    sums: Vec<Color>,
    sample_count: u32,
}

impl AccumulationBuffer {
    /// Create a zeroed buffer for a `width` x `height` image.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            sums: vec![Color::ZERO; pixel_count(width, height)],
            sample_count: 0,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Samples accumulated per pixel since the last clear.
    pub fn sample_count(&self) -> u32 {
        self.sample_count
    }

    /// Start a new pass over the whole image.
    pub fn begin_pass(&mut self) {
        self.sample_count += 1;
    }

    /// Add radiance to the running sum of pixel (x, y).
    pub fn add_sample(&mut self, x: u32, y: u32, radiance: Color) {
        let index = self.index(x, y);
        self.sums[index] += radiance;
    }

    /// Zero every sum and reset the sample counter.
    pub fn clear(&mut self) {
        self.sums.fill(Color::ZERO);
        self.sample_count = 0;
    }

    /// Raw running sum of pixel (x, y).
    pub fn sum(&self, x: u32, y: u32) -> Color {
        self.sums[self.index(x, y)]
    }

    /// Mean radiance of pixel (x, y), black before the first pass.
    pub fn display_color(&self, x: u32, y: u32) -> Color {
        if self.sample_count == 0 {
            return Color::ZERO;
        }
        self.sum(x, y) / self.sample_count as f32
    }

    /// Add a complete row-major frame of samples as one pass.
    ///
    /// # Panics
    ///
    /// Panics if `samples` does not hold exactly one value per pixel.
    pub fn add_pass(&mut self, samples: &[Color]) {
        assert_eq!(
            samples.len(),
            self.sums.len(),
            "pass has {} samples for a {}x{} buffer",
            samples.len(),
            self.width,
            self.height
        );
        self.begin_pass();
        for (sum, sample) in self.sums.iter_mut().zip(samples) {
            *sum += *sample;
        }
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        assert!(
            x < self.width && y < self.height,
            "pixel ({x}, {y}) outside {}x{} buffer",
            self.width,
            self.height
        );
        pixel_index(x, y, self.width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_buffer_is_black() {
        let buffer = AccumulationBuffer::new(4, 3);
        assert_eq!(buffer.sample_count(), 0);
        for y in 0..3 {
            for x in 0..4 {
                assert_eq!(buffer.sum(x, y), Color::ZERO);
                assert_eq!(buffer.display_color(x, y), Color::ZERO);
            }
        }
    }

    #[test]
    fn test_display_color_is_mean() {
        let mut buffer = AccumulationBuffer::new(2, 2);

        buffer.begin_pass();
        buffer.add_sample(1, 0, Color::new(1.0, 0.0, 0.5));
        buffer.begin_pass();
        buffer.add_sample(1, 0, Color::new(0.0, 1.0, 0.5));

        assert_eq!(buffer.sample_count(), 2);
        assert_eq!(buffer.display_color(1, 0), Color::new(0.5, 0.5, 0.5));
        assert_eq!(buffer.display_color(0, 0), Color::ZERO);
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut buffer = AccumulationBuffer::new(3, 2);
        for _ in 0..5 {
            buffer.begin_pass();
            for y in 0..2 {
                for x in 0..3 {
                    buffer.add_sample(x, y, Color::splat(0.7));
                }
            }
        }

        buffer.clear();
        assert_eq!(buffer.sample_count(), 0);
        for y in 0..2 {
            for x in 0..3 {
                assert_eq!(buffer.sum(x, y), Color::ZERO);
            }
        }

        // One sample after a clear displays exactly that sample
        let sample = Color::new(0.25, 1.5, 3.0);
        buffer.begin_pass();
        buffer.add_sample(2, 1, sample);
        assert_eq!(buffer.display_color(2, 1), sample);
    }

    #[test]
    fn test_accumulation_order_independent() {
        let a = Color::new(0.1, 0.7, 0.33);
        let b = Color::new(2.5, 0.01, 0.9);

        let mut ab = AccumulationBuffer::new(1, 1);
        ab.begin_pass();
        ab.add_sample(0, 0, a);
        ab.begin_pass();
        ab.add_sample(0, 0, b);

        let mut ba = AccumulationBuffer::new(1, 1);
        ba.begin_pass();
        ba.add_sample(0, 0, b);
        ba.begin_pass();
        ba.add_sample(0, 0, a);

        assert!((ab.display_color(0, 0) - ba.display_color(0, 0)).length() < 1e-6);
    }

    #[test]
    fn test_add_pass_matches_per_pixel_samples() {
        let frame = [
            Color::new(0.1, 0.2, 0.3),
            Color::ONE,
            Color::ZERO,
            Color::splat(4.0),
            Color::new(2.0, 0.0, 1.0),
            Color::splat(0.5),
        ];

        let mut whole = AccumulationBuffer::new(3, 2);
        whole.add_pass(&frame);
        whole.add_pass(&frame);

        let mut by_pixel = AccumulationBuffer::new(3, 2);
        for _ in 0..2 {
            by_pixel.begin_pass();
            for (i, sample) in frame.iter().enumerate() {
                by_pixel.add_sample(i as u32 % 3, i as u32 / 3, *sample);
            }
        }

        assert_eq!(whole.sample_count(), 2);
        for y in 0..2 {
            for x in 0..3 {
                assert_eq!(whole.sum(x, y), by_pixel.sum(x, y));
                assert_eq!(whole.display_color(x, y), frame[(y * 3 + x) as usize]);
            }
        }
    }

    #[test]
    #[should_panic]
    fn test_add_pass_rejects_wrong_size() {
        let mut buffer = AccumulationBuffer::new(2, 2);
        buffer.add_pass(&[Color::ONE; 3]);
    }

    #[test]
    #[should_panic]
    fn test_out_of_bounds_panics() {
        let mut buffer = AccumulationBuffer::new(2, 2);
        buffer.add_sample(2, 0, Color::ONE);
    }
}
