use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::{ChunkSysConfig, PhysicsConfig, WorldGenConfig};
use crate::utils::error::ConfigError;

/// Aggregate engine configuration, persisted as a TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    pub worldgen: WorldGenConfig,
    pub chunksys: ChunkSysConfig,
    pub physics: PhysicsConfig,
}

impl EngineConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_owned(),
            source,
        })?;
        let config: Self = toml::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let text = toml::to_string_pretty(self)?;
        fs::write(path, text).map_err(|source| ConfigError::Write {
            path: path.to_owned(),
            source,
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.worldgen.scale <= 0.0 {
            return Err(ConfigError::InvalidScale(self.worldgen.scale));
        }
        if self.chunksys.chunk_width == 0 || self.chunksys.chunk_height == 0 {
            return Err(ConfigError::InvalidChunkSize {
                width: self.chunksys.chunk_width,
                height: self.chunksys.chunk_height,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toml_round_trip() {
        let mut config = EngineConfig::default();
        config.worldgen.seed = 42;
        config.chunksys.draw_distance = 5;

        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: EngineConfig = toml::from_str(&text).unwrap();

        assert_eq!(parsed.worldgen.seed, 42);
        assert_eq!(parsed.chunksys.draw_distance, 5);
        assert_eq!(parsed.physics.gravity, config.physics.gravity);
    }

    #[test]
    fn test_validate_rejects_bad_scale() {
        let mut config = EngineConfig::default();
        config.worldgen.scale = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidScale(_))
        ));
    }

    #[test]
    fn test_validate_rejects_zero_chunk_size() {
        let mut config = EngineConfig::default();
        config.chunksys.chunk_height = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidChunkSize { .. })
        ));
    }
}
