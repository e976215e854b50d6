use crate::{
    error::{GameStateError, Result},
    geometry::{VerticalBand, Vertex},
    process::{PipelineOptions, ProcessOptions},
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub boundary: BoundaryConfig,
    #[serde(default)]
    pub processing: ProcessingConfig,
}

/// Area of interest
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct BoundaryConfig {
    /// polygon vertices as [x, y] pairs, consecutive vertices are connected
    #[serde(default)]
    pub vertices: Vec<Vertex>,
    /// optional z range, e.g. `{ min = 285.0, max = 421.0 }`
    #[serde(default)]
    pub z_band: Option<VerticalBand>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProcessingConfig {
    #[serde(default = "default_true")]
    pub bounds: bool,
    #[serde(default = "default_true")]
    pub weapons: bool,
    #[serde(default)]
    pub rifle_or_smg: bool,
}

fn default_true() -> bool {
    true
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            bounds: true,
            weapons: true,
            rifle_or_smg: false,
        }
    }
}

impl ProcessingConfig {
    pub fn pipeline(&self) -> PipelineOptions {
        PipelineOptions {
            process: ProcessOptions {
                bounds: self.bounds,
                weapons: self.weapons,
            },
            rifle_or_smg: self.rifle_or_smg,
        }
    }
}

impl Config {
    /// Load from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            GameStateError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_toml_str(&content)
    }

    /// Parse and validate TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Too few vertices is left to the processor, which reports it as an
    /// insufficient boundary right before processing
    pub fn validate(&self) -> Result<()> {
        if let Some((i, v)) = self
            .boundary
            .vertices
            .iter()
            .enumerate()
            .find(|(_, v)| !v.x.is_finite() || !v.y.is_finite())
        {
            return Err(GameStateError::Config(format!(
                "vertex {} is not finite: [{}, {}]",
                i, v.x, v.y
            )));
        }

        if let Some(band) = &self.boundary.z_band {
            band.validate()?;
        }

        if self.processing.rifle_or_smg && !self.processing.weapons {
            return Err(GameStateError::Config(
                "rifle_or_smg requires weapons = true".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SAMPLE: &str = r#"
[boundary]
vertices = [[-1735, 250], [-2024, 398], [-2806, 742], [-2472, 1233], [-1565, 580]]
z_band = { min = 285.0, max = 421.0 }

[processing]
rifle_or_smg = true
"#;

    #[test]
    fn test_parse_sample() {
        let config: Config = toml::from_str(SAMPLE).unwrap();
        config.validate().unwrap();

        assert_eq!(config.boundary.vertices.len(), 5);
        assert_eq!(config.boundary.vertices[0], Vertex::new(-1735.0, 250.0));
        let band = config.boundary.z_band.unwrap();
        assert_eq!((band.z_min(), band.z_max()), (285.0, 421.0));

        let pipeline = config.processing.pipeline();
        assert!(pipeline.process.bounds);
        assert!(pipeline.process.weapons);
        assert!(pipeline.rifle_or_smg);
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.boundary.vertices.is_empty());
        assert!(config.boundary.z_band.is_none());
        assert_eq!(config.processing.pipeline(), PipelineOptions::default());
    }

    #[test]
    fn test_inverted_band_rejected() {
        let config: Config = toml::from_str(
            "[boundary]\nvertices = [[0, 0], [0, 1], [1, 1]]\nz_band = { min = 5.0, max = 1.0 }\n",
        )
        .unwrap();
        assert!(matches!(
            config.validate(),
            Err(GameStateError::InvalidVerticalBand { .. })
        ));
    }

    #[test]
    fn test_rifle_or_smg_without_weapons_rejected() {
        let config: Config =
            toml::from_str("[processing]\nweapons = false\nrifle_or_smg = true\n").unwrap();
        assert!(matches!(config.validate(), Err(GameStateError::Config(_))));
    }

    #[test]
    fn test_malformed_vertex_rejected() {
        assert!(toml::from_str::<Config>("[boundary]\nvertices = [[0, 0, 0]]\n").is_err());
        assert!(toml::from_str::<Config>("[boundary]\nvertices = [[0, 0], [1]]\n").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();
        let config = Config::load_from_file(file.path()).unwrap();
        assert_eq!(config.boundary.vertices.len(), 5);
    }

    #[test]
    fn test_parse_error_maps_to_config_error() {
        let err = Config::from_toml_str("[boundary\nvertices = 3").unwrap_err();
        assert!(matches!(err, GameStateError::Config(ref m) if m.starts_with("TOML parse error")));

        let err = Config::from_toml_str("[boundary]\nvertices = [[0, 0, 0]]\n").unwrap_err();
        assert!(err.to_string().contains("exactly 2 coordinates"));
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load_from_file("no/such/config.toml").unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
