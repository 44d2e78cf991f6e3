//! # Configuration Error Types
//!
//! The simulation itself never fails; only loading its configuration can.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading or validating a [`SimulationConfig`].
///
/// [`SimulationConfig`]: crate::config::SimulationConfig
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("cannot read config file {}: {source}", path.display())]
    Io {
        /// The file that was requested.
        path: PathBuf,
        /// The underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid TOML for this schema.
    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value parsed but is out of range.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
