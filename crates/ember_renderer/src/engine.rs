//! Progressive rendering engine.
//!
//! Each frame traces one sample per pixel (or one averaged group of
//! supersampled rays) into a scratch frame, adds the finished frame to the
//! accumulation buffer and presents the running mean. Scanlines are rendered
//! in parallel with rayon; every scanline owns its random stream, so the
//! image for a given seed does not depend on the thread count.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::integrator::{PathTracer, AIR_IOR};
use crate::sampling::{gen_f32, scanline_rng, tent};
use crate::framebuffer::pixel_count;
use crate::{AccumulationBuffer, Camera, Display, RenderResult, Scene};
use ember_core::{Color, RenderConfig};
use ember_math::{Quat, Ray, Vec2, Vec3};
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

/// Owns the scene, the accumulation buffer and the render threads.
pub struct Engine {
    config: RenderConfig,
    scene: Scene,
    accumulation: AccumulationBuffer,
    /// Samples of the frame in flight, committed only once every row is done
    frame_samples: Vec<Color>,
    /// `None` renders on rayon's global pool
    pool: Option<ThreadPool>,
    /// Camera pose the current samples were taken from
    last_pose: Option<(Vec3, Quat)>,
    /// Frames rendered so far; keeps random streams fresh across clears
    frame: u32,
    cancel: Arc<AtomicBool>,
}

impl Engine {
    /// Create an engine for `scene` with a zeroed accumulation buffer.
    pub fn new(scene: Scene, config: RenderConfig) -> RenderResult<Self> {
        config.validate()?;

        let pool = match config.threads {
            0 => None,
            threads => Some(
                ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .thread_name(|i| format!("ember-render-{i}"))
                    .build()?,
            ),
        };

        log::info!(
            "Engine initialized: {}x{}, depth {}, {} primitives, {} threads",
            config.width,
            config.height,
            config.max_depth,
            scene.len(),
            pool.as_ref()
                .map_or(rayon::current_num_threads(), |p| p.current_num_threads())
        );

        Ok(Self {
            accumulation: AccumulationBuffer::new(config.width, config.height),
            frame_samples: vec![Color::ZERO; pixel_count(config.width, config.height)],
            config,
            scene,
            pool,
            last_pose: None,
            frame: 0,
            cancel: Arc::new(AtomicBool::new(false)),
        })
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn accumulation(&self) -> &AccumulationBuffer {
        &self.accumulation
    }

    /// Samples per pixel accumulated since the last clear.
    pub fn sample_count(&self) -> u32 {
        self.accumulation.sample_count()
    }

    /// Mean radiance of pixel (x, y).
    pub fn display_color(&self, x: u32, y: u32) -> Color {
        self.accumulation.display_color(x, y)
    }

    /// Per-frame hook for time-based effects. Currently does nothing.
    pub fn update(&mut self, _dt: f32) {}

    /// Discard all accumulated samples.
    ///
    /// Must be called whenever the camera moves: samples from the old pose
    /// are not valid for the new view.
    pub fn clear_samples(&mut self) {
        log::debug!("Clearing {} samples per pixel", self.accumulation.sample_count());
        self.accumulation.clear();
    }

    /// Flag that aborts the frame in flight when set.
    ///
    /// It is checked between scanlines. A cancelled frame adds nothing to the
    /// accumulation buffer, keeps the passes already accumulated and resets
    /// the flag.
    pub fn cancel_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancel)
    }

    /// Render one progressive frame and present it to `display`.
    ///
    /// Returns `false` if the frame was cancelled or `display` does not
    /// match the configured resolution, in which case nothing is presented.
    pub fn render_frame(&mut self, camera: &Camera, display: &mut dyn Display) -> bool {
        let size = (self.config.width, self.config.height);
        if (display.width(), display.height()) != size {
            log::error!(
                "Display is {}x{} but the engine renders {}x{}, skipping frame",
                display.width(),
                display.height(),
                size.0,
                size.1
            );
            return false;
        }

        let pose = camera.pose();
        if self.last_pose.is_some_and(|last| last != pose) && self.sample_count() > 0 {
            log::debug!(
                "Camera moved without a clear, discarding {} samples",
                self.sample_count()
            );
            self.accumulation.clear();
        }
        self.last_pose = Some(pose);

        if !self.render_pass(camera) {
            log::warn!(
                "Frame {} cancelled, keeping {} accumulated samples",
                self.frame.wrapping_sub(1),
                self.sample_count()
            );
            self.cancel.store(false, Ordering::Relaxed);
            return false;
        }

        self.accumulation.add_pass(&self.frame_samples);
        self.present(display);
        true
    }

    /// Trace every scanline into `frame_samples`.
    fn render_pass(&mut self, camera: &Camera) -> bool {
        let frame = self.frame;
        self.frame = self.frame.wrapping_add(1);

        let tracer = PathTracer::new(&self.scene, &self.config);
        let config = &self.config;
        let cancel: &AtomicBool = &self.cancel;
        let width = self.config.width as usize;
        let samples = &mut self.frame_samples;

        let mut pass = move || {
            samples
                .par_chunks_mut(width)
                .enumerate()
                .map(|(y, row)| render_row(&tracer, camera, config, frame, y as u32, row, cancel))
                .reduce(|| true, |a, b| a && b)
        };

        match &self.pool {
            Some(pool) => pool.install(pass),
            None => pass(),
        }
    }

    fn present(&self, display: &mut dyn Display) {
        let (width, height) = (self.accumulation.width(), self.accumulation.height());
        for y in 0..height {
            for x in 0..width {
                display.set_pixel(x, y, self.accumulation.display_color(x, y));
            }
        }
    }
}

/// Trace one sample for every pixel of scanline `y` into `row`.
///
/// Returns `false` without touching the row if the frame was cancelled.
fn render_row(
    tracer: &PathTracer,
    camera: &Camera,
    config: &RenderConfig,
    frame: u32,
    y: u32,
    row: &mut [Color],
    cancel: &AtomicBool,
) -> bool {
    if cancel.load(Ordering::Relaxed) {
        return false;
    }

    let mut rng = scanline_rng(config.seed, frame, y);
    let mut ray = Ray::from_origin(camera.position);
    let rays = config.rays_per_pixel();
    let weight = 1.0 / rays as f32;

    for (x, sample) in row.iter_mut().enumerate() {
        let dx = tent(&mut rng);
        let dy = tent(&mut rng);
        let screen = camera.screen_point(x as u32, y, dx, dy, config.width, config.height);

        *sample = if rays > 1 {
            let mut radiance = Color::ZERO;
            for _ in 0..rays {
                let jx = 2.0 * gen_f32(&mut rng) - 1.0;
                let jy = 2.0 * gen_f32(&mut rng) - 1.0;
                let jitter = Vec2::new(jx, jy) * config.supersampling_jitter;
                ray.direction = camera.direction_through(screen + jitter);
                radiance += tracer.trace(&ray, 0, AIR_IOR, &mut rng) * weight;
            }
            radiance
        } else {
            ray.direction = camera.direction_through(screen);
            tracer.trace(&ray, 0, AIR_IOR, &mut rng)
        };
    }

    true
}
