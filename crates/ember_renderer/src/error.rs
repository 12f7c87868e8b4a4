//! Errors raised while setting up a renderer.
//!
//! Rendering itself is infallible; only construction can fail.

use ember_core::ConfigError;
use thiserror::Error;

/// Errors that can occur while building an [`Engine`](crate::Engine).
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to build render thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Result type for renderer setup.
pub type RenderResult<T> = Result<T, RenderError>;
