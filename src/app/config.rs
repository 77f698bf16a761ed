//! Configuration for the pager input pipeline

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Pipeline configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Escape decoder limits
    pub decoder: DecoderConfig,
    /// Input source settings
    pub source: SourceConfig,
    /// Default log filter, used when `RUST_LOG` is not set
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            decoder: DecoderConfig::default(),
            source: SourceConfig::default(),
            log_filter: "warn".to_string(),
        }
    }
}

/// Escape decoder limits
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecoderConfig {
    /// Largest value a single CSI parameter can take; bigger values are clamped
    pub max_param_value: u16,
    /// Parameters kept per CSI sequence; extra ones are dropped
    pub max_params: usize,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            max_param_value: 9999,
            max_params: 32,
        }
    }
}

/// Input source settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Bytes requested per read
    pub read_chunk_size: usize,
    /// How long to wait for input readiness, in milliseconds (-1 waits forever)
    pub poll_timeout_ms: i32,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            read_chunk_size: 4096,
            poll_timeout_ms: 100,
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load configuration from a file, or the default config if there is none
    pub fn load_if_exists(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }
}

/// Path of the per-user configuration file
pub fn default_config_path() -> Option<PathBuf> {
    std::env::var("HOME").ok().map(|home| {
        PathBuf::from(home)
            .join(".config")
            .join("pager-source")
            .join("config.json")
    })
}

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
