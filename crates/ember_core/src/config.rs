//! Renderer configuration.
//!
//! Every value is a read-only input to the renderer, supplied at
//! construction. Configs are plain structs with defaults matching the stock
//! renderer and can be loaded from JSON where every field is optional:
//!
//! ```json
//! {
//!   "render": { "width": 256, "height": 256, "max_depth": 8 },
//!   "output": { "frames": 128, "path": "out.png" }
//! }
//! ```

use std::path::{Path, PathBuf};

use ember_math::Vec3;
use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur while loading a config.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Result type for config operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub render: RenderConfig,
    pub camera: CameraConfig,
    pub output: OutputConfig,
}

/// Settings consumed by the path tracer and the accumulation engine.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    /// Output width in pixels
    pub width: u32,
    /// Output height in pixels
    pub height: u32,
    /// Worker threads: 0 = rayon's global pool, 1 = sequential
    pub threads: usize,
    /// Maximum ray bounce depth
    pub max_depth: u32,
    /// Rays that travel further than this without a hit see the ambient color
    pub max_distance: f32,
    /// Sub-rays per pixel per frame; 0 or 1 disables supersampling
    pub supersampling_level: u32,
    /// Screen-space jitter applied to each supersampling sub-ray
    pub supersampling_jitter: f32,
    /// Radiance returned on a miss or when the depth cap is reached
    pub ambient: [f32; 3],
    /// Base seed for the per-scanline random streams
    pub seed: u64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 128,
            height: 128,
            threads: 0,
            max_depth: 5,
            max_distance: 128.0,
            supersampling_level: 0,
            supersampling_jitter: 0.001,
            ambient: [0.1, 0.1, 0.1],
            seed: 0,
        }
    }
}

impl RenderConfig {
    /// Ambient radiance as a vector.
    pub fn ambient_color(&self) -> Vec3 {
        Vec3::from_array(self.ambient)
    }

    /// Number of sub-rays traced per pixel per frame.
    pub fn rays_per_pixel(&self) -> u32 {
        self.supersampling_level.max(1)
    }

    /// Check the values the renderer relies on.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(invalid(
                "render.width/height",
                format!("resolution must be non-zero, got {}x{}", self.width, self.height),
            ));
        }
        if self.max_depth == 0 {
            return Err(invalid("render.max_depth", "must be at least 1"));
        }
        if !(self.max_distance > 0.0) {
            return Err(invalid(
                "render.max_distance",
                format!("must be positive, got {}", self.max_distance),
            ));
        }
        if !(self.supersampling_jitter >= 0.0) || !self.supersampling_jitter.is_finite() {
            return Err(invalid(
                "render.supersampling_jitter",
                format!("must be finite and non-negative, got {}", self.supersampling_jitter),
            ));
        }
        if self.ambient.iter().any(|c| !(*c >= 0.0) || !c.is_finite()) {
            return Err(invalid(
                "render.ambient",
                format!("channels must be finite and non-negative, got {:?}", self.ambient),
            ));
        }
        Ok(())
    }
}

/// Initial camera placement and control speeds.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CameraConfig {
    pub position: [f32; 3],
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    /// World units per second
    pub move_speed: f32,
    /// Radians per second
    pub rotation_speed: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: [0.0, 1.0, -1.0],
            // Image plane at z = -1 spanning one unit vertically
            fov_degrees: (2.0 * 0.5_f32.atan()).to_degrees(),
            move_speed: 8.0,
            rotation_speed: 1.0,
        }
    }
}

impl CameraConfig {
    pub fn validate(&self) -> ConfigResult<()> {
        if !(self.fov_degrees > 0.0 && self.fov_degrees < 180.0) {
            return Err(invalid(
                "camera.fov_degrees",
                format!("must be in (0, 180), got {}", self.fov_degrees),
            ));
        }
        if self.position.iter().any(|c| !c.is_finite()) {
            return Err(invalid("camera.position", "must be finite"));
        }
        Ok(())
    }
}

/// How finished frames are presented.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Integer upscale factor applied when writing the image
    pub scale: u32,
    /// Display gamma exponent
    pub gamma: f32,
    /// Progressive frames to accumulate before writing
    pub frames: u32,
    /// Output PNG path
    pub path: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            scale: 4,
            gamma: 2.25,
            frames: 64,
            path: PathBuf::from("ember.png"),
        }
    }
}

impl OutputConfig {
    pub fn validate(&self) -> ConfigResult<()> {
        if self.scale == 0 {
            return Err(invalid("output.scale", "must be at least 1"));
        }
        if !(self.gamma > 0.0) || !self.gamma.is_finite() {
            return Err(invalid(
                "output.gamma",
                format!("must be finite and positive, got {}", self.gamma),
            ));
        }
        Ok(())
    }
}

impl Config {
    /// Read, parse and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&text)?;
        log::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Parse and validate a JSON config.
    pub fn from_json_str(text: &str) -> ConfigResult<Self> {
        let config: Config = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate every section.
    pub fn validate(&self) -> ConfigResult<()> {
        self.render.validate()?;
        self.camera.validate()?;
        self.output.validate()
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.into(),
    }
}
