use anyhow::{Context, Result};
use ember_core::{Config, OutputConfig};
use ember_renderer::{Camera, Engine, Framebuffer, Scene};
use image::imageops::{self, FilterType};
use image::RgbaImage;
use std::time::Instant;

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => {
            Config::load(&path).with_context(|| format!("Failed to load config {path}"))?
        }
        None => Config::default(),
    };

    log::info!(
        "Starting Ember viewer: {} frames at {}x{}",
        config.output.frames,
        config.render.width,
        config.render.height
    );

    let image = render(&config)?;
    let path = &config.output.path;
    image
        .save(path)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    log::info!(
        "Wrote {}x{} image to {}",
        image.width(),
        image.height(),
        path.display()
    );

    Ok(())
}

/// Accumulate the configured number of frames of the reference scene.
fn render(config: &Config) -> Result<RgbaImage> {
    let mut engine = Engine::new(Scene::reference(), config.render.clone())
        .context("Failed to create render engine")?;
    let camera = Camera::from_config(&config.camera);
    let mut framebuffer = Framebuffer::new(config.render.width, config.render.height);

    let started = Instant::now();
    let mut last_frame = started;
    for frame in 0..config.output.frames {
        let now = Instant::now();
        let dt = (now - last_frame).as_secs_f32();
        last_frame = now;

        engine.update(dt);
        if !engine.render_frame(&camera, &mut framebuffer) {
            log::warn!("Frame {frame} did not complete");
            continue;
        }
        log::debug!(
            "Frame {} ({} spp) in {:.1} ms",
            frame,
            engine.sample_count(),
            last_frame.elapsed().as_secs_f64() * 1000.0
        );
    }

    log::info!(
        "Rendered {} spp in {:.2} s",
        engine.sample_count(),
        started.elapsed().as_secs_f64()
    );

    present(&framebuffer, &config.output)
}

/// Gamma-correct and upscale the framebuffer with nearest-neighbour filtering.
fn present(framebuffer: &Framebuffer, output: &OutputConfig) -> Result<RgbaImage> {
    let image = RgbaImage::from_raw(
        framebuffer.width,
        framebuffer.height,
        framebuffer.to_rgba(output.gamma),
    )
    .context("Framebuffer size does not match its pixel data")?;

    if output.scale == 1 {
        return Ok(image);
    }

    Ok(imageops::resize(
        &image,
        framebuffer.width * output.scale,
        framebuffer.height * output.scale,
        FilterType::Nearest,
    ))
}
