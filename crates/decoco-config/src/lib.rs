//! Configuration management for decoco
//!
//! Settings are layered: built-in defaults, then an optional file (YAML, TOML
//! or JSON, chosen by extension), then environment variables. The resulting
//! [`CodecConfig`] builds ready-to-use adapters.
//!
//! # Examples
//!
//! ```rust
//! use decoco_config::ConfigBuilder;
//!
//! let config = ConfigBuilder::new()
//!     .add_defaults()
//!     .add_source_file("decoco.yaml")
//!     .add_env_prefix("DECOCO")
//!     .build()
//!     .expect("Failed to load configuration");
//!
//! let mut compressor = config.codec.compressor().expect("default codec is registered");
//! let packed = compressor.compress(b"payload").unwrap();
//! # let _ = packed;
//! ```

#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

use decoco_compression::{find_compressor, find_decompressor, Compressor, Decompressor};
use decoco_types::{ChunkSize, CodecKind, Error, Level, Result};
use serde::{Deserialize, Serialize};

pub mod builder;
pub mod error;
pub mod loader;

pub use builder::ConfigBuilder;
pub use error::{ConfigError, ConfigResult};
pub use loader::ConfigLoader;

/// Log levels accepted by [`LoggingConfig::level`]
pub const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Codec selection and window sizes
    pub codec: CodecConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Codec configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    /// Registry name of the codec to use
    pub default_codec: String,
    /// Compression level preset
    pub level: Level,
    /// Window size for compression
    pub chunk_size: ChunkSize,
    /// Window size for decompression
    pub output_chunk_size: ChunkSize,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            default_codec: CodecKind::Zstd.name().to_string(),
            level: Level::default(),
            chunk_size: ChunkSize::default(),
            output_chunk_size: ChunkSize::default(),
        }
    }
}

impl CodecConfig {
    /// Resolve `default_codec` against the registry names
    pub fn codec(&self) -> Result<CodecKind> {
        CodecKind::from_name(&self.default_codec)
            .ok_or_else(|| Error::unknown_codec(&self.default_codec))
    }

    /// Build a compressor with the configured codec, level and chunk size
    pub fn compressor(&self) -> Result<Compressor> {
        find_compressor(&self.default_codec, self.level, self.chunk_size)?
            .ok_or_else(|| Error::unknown_codec(&self.default_codec))
    }

    /// Build a decompressor with the configured codec and output chunk size
    pub fn decompressor(&self) -> Result<Decompressor> {
        find_decompressor(&self.default_codec, self.output_chunk_size)?
            .ok_or_else(|| Error::unknown_codec(&self.default_codec))
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (`trace`, `debug`, `info`, `warn`, `error`)
    pub level: String,
    /// Enable colored output
    pub colored_output: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            colored_output: true,
        }
    }
}
