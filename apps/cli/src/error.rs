//! # CLI Error Types
//!
//! Typed failures for config and snapshot loading. `main` wraps these in
//! `anyhow` for the final report on stderr.

use std::path::PathBuf;

use divvy_core::ValidationError;
use thiserror::Error;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    /// Failed to read a file from disk.
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for [`crate::config::CliConfig`].
    #[error("Invalid config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Config value outside its allowed set.
    #[error("Invalid config value: {0}")]
    InvalidConfig(String),

    /// Snapshot is not valid JSON for [`crate::snapshot::Snapshot`].
    #[error("Invalid snapshot {path}: {source}")]
    SnapshotParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Snapshot entry failed field validation.
    #[error("{location}: {source}")]
    InvalidEntry {
        location: String,
        #[source]
        source: ValidationError,
    },
}
