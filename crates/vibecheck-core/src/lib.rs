//! Shared data model and configuration for the vibecheck workspace.

mod app_config;
mod config;
pub mod types;

use thiserror::Error;

pub use app_config::{AppConfig, GeolocationMode};
pub use config::load_app_config;
pub use types::{Coordinates, Place, VibeBand, VibeResult};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
