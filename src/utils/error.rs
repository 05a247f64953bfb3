use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write config file {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("config file is not valid TOML")]
    Parse(#[from] toml::de::Error),

    #[error("config could not be serialized")]
    Serialize(#[from] toml::ser::Error),

    #[error("noise scale must be positive, got {0}")]
    InvalidScale(f64),

    #[error("chunk dimensions must be non-zero, got {width}x{height}")]
    InvalidChunkSize { width: u32, height: u32 },
}
