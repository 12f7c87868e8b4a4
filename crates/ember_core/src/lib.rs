//! Ember Core - configuration and surface descriptions for the Ember path tracer.
//!
//! This crate provides:
//!
//! - **Configuration**: `Config` with its `render`, `camera` and `output`
//!   sections, loaded from JSON and validated
//! - **Materials**: `Material` and the closed set of `Surface` kinds the
//!   integrator knows how to scatter
//!
//! # Example
//!
//! ```ignore
//! use ember_core::Config;
//!
//! let config = Config::load("ember.json")?;
//! println!("Rendering {}x{} at depth {}",
//!     config.render.width,
//!     config.render.height,
//!     config.render.max_depth);
//! ```

pub mod config;
pub mod material;

// Re-export commonly used types
pub use config::{CameraConfig, Config, ConfigError, ConfigResult, OutputConfig, RenderConfig};
pub use material::{Color, Material, Surface};
