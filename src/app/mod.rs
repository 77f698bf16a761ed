//! Application glue module
//!
//! Configuration shared by the sources and the command-line tool.

mod config;

pub use config::{default_config_path, Config, ConfigError, DecoderConfig, SourceConfig};
