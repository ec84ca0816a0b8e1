//! Error types for the fallible edges of the crate
//!
//! Generators and dispatch are total; only configuration loading, color
//! parsing and export can fail.

use std::path::PathBuf;

/// Errors from configuration, parsing and export
#[derive(Debug, thiserror::Error)]
pub enum OrbError {
    #[error("Failed to read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    #[error("Invalid hex color: {0:?}")]
    InvalidColor(String),

    #[error(transparent)]
    UnknownShape(#[from] crate::shapes::ParseShapeError),

    #[error("Failed to write point cloud: {0}")]
    Export(#[from] std::io::Error),
}
