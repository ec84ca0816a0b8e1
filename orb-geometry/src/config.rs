//! Generator configuration (orb.toml)
//!
//! Every field has a default, so a partial file (or no file at all) yields a
//! usable configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::buffer::PARTICLE_COUNT;
use crate::error::OrbError;
use crate::math::Color;

/// Generation settings injected into [`crate::OrbGenerator`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Particles per full-size shape (default: 20000)
    #[serde(default = "default_particle_count")]
    pub particle_count: usize,
    /// PRNG seed; unseeded runs draw from the thread RNG
    #[serde(default)]
    pub seed: Option<u64>,
    /// Hex colors used by the fallback sphere
    #[serde(default = "default_fallback_palette")]
    pub fallback_palette: Vec<String>,
    /// Display size at which a preview gets the full particle budget (default: 200)
    #[serde(default = "default_preview_base_size")]
    pub preview_base_size: f32,
}

fn default_particle_count() -> usize {
    PARTICLE_COUNT
}
fn default_fallback_palette() -> Vec<String> {
    ["#22d3ee", "#3b82f6", "#8b5cf6", "#e0f2fe"]
        .into_iter()
        .map(String::from)
        .collect()
}
fn default_preview_base_size() -> f32 {
    200.0
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            particle_count: default_particle_count(),
            seed: None,
            fallback_palette: default_fallback_palette(),
            preview_base_size: default_preview_base_size(),
        }
    }
}

impl GeneratorConfig {
    /// Read and parse a TOML config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, OrbError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| OrbError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, OrbError> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml_string(&self) -> Result<String, OrbError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Parse the fallback palette
    ///
    /// # Errors
    ///
    /// Returns [`OrbError::InvalidColor`] for the first entry that is not a
    /// valid hex color.
    pub fn palette(&self) -> Result<Vec<Color>, OrbError> {
        self.fallback_palette
            .iter()
            .map(|hex| Color::parse_hex(hex))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = GeneratorConfig::from_toml_str("").unwrap();
        assert_eq!(config, GeneratorConfig::default());
        assert_eq!(config.particle_count, 20_000);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_partial_file() {
        let config = GeneratorConfig::from_toml_str("seed = 42\nparticle_count = 500\n").unwrap();
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.particle_count, 500);
        assert_eq!(config.preview_base_size, 200.0);
        assert_eq!(config.fallback_palette.len(), 4);
    }

    #[test]
    fn test_round_trip() {
        let config = GeneratorConfig {
            particle_count: 1234,
            seed: Some(7),
            fallback_palette: vec!["#ff0000".into()],
            preview_base_size: 150.0,
        };
        let text = config.to_toml_string().unwrap();
        assert_eq!(GeneratorConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_bad_palette_entry() {
        let config = GeneratorConfig {
            fallback_palette: vec!["#00ff00".into(), "chartreuse".into()],
            ..Default::default()
        };
        assert!(matches!(
            config.palette(),
            Err(OrbError::InvalidColor(s)) if s == "chartreuse"
        ));
    }

    #[test]
    fn test_type_error_reported() {
        let err = GeneratorConfig::from_toml_str("particle_count = \"many\"").unwrap_err();
        assert!(matches!(err, OrbError::ConfigParse(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let err = GeneratorConfig::load("/nonexistent/orb.toml").unwrap_err();
        assert!(matches!(err, OrbError::ConfigRead { .. }));
    }
}
