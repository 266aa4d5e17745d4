// ============================================================================
// ERRORS
// ============================================================================

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while configuring or hosting the cockpit display
#[derive(Error, Debug)]
pub enum CockpitError {
    #[error("Failed to read config file '{}': {source}", path.display())]
    ConfigIo {
        source: std::io::Error,
        path: PathBuf,
    },

    #[error("Failed to parse config file '{}': {source}", path.display())]
    ConfigParse {
        source: toml::de::Error,
        path: PathBuf,
    },

    #[error("Invalid colour '{0}': expected #rrggbb")]
    InvalidColor(String),

    #[error("Failed to read font '{}': {source}", path.display())]
    FontIo {
        source: std::io::Error,
        path: PathBuf,
    },

    #[error("Font '{}' is not a valid TrueType/OpenType file", path.display())]
    InvalidFont { path: PathBuf },

    #[error("Event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("Window creation failed: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("Framebuffer error: {0}")]
    Pixels(#[from] pixels::Error),
}

pub type Result<T> = std::result::Result<T, CockpitError>;
