//! # CLI Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     DIVVY_UNKNOWN_PARTICIPANTS=tolerate                                │
//! │     DIVVY_SUMMARY=off                                                  │
//! │     DIVVY_LOG_LEVEL=debug                                              │
//! │     DIVVY_CURRENCY_SYMBOL=NT$                                          │
//! │                                                                         │
//! │  2. TOML Config File (--config, or the platform default)               │
//! │     ~/.config/divvy/config.toml (Linux)                                │
//! │     ~/Library/Application Support/app.divvy.divvy/config.toml (macOS)  │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! unknown_participants = "reject"  # reject | tolerate
//! summary = "template"             # template | off
//! log_level = "warn"
//!
//! [report]
//! currency_symbol = "$"
//! ```

use std::path::{Path, PathBuf};

use divvy_core::UnknownParticipantPolicy;
use divvy_report::ReportConfig;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{CliError, CliResult};

// =============================================================================
// Summary Mode
// =============================================================================

/// Which summary backend to run after settling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SummaryMode {
    /// Built-in deterministic template.
    #[default]
    Template,

    /// No summary.
    Off,
}

impl std::str::FromStr for SummaryMode {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "template" => Ok(SummaryMode::Template),
            "off" | "none" | "disabled" => Ok(SummaryMode::Off),
            other => Err(CliError::InvalidConfig(format!(
                "Unknown summary mode: '{}'. Valid options: template, off",
                other
            ))),
        }
    }
}

// =============================================================================
// CLI Config
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CliConfig {
    #[serde(default)]
    pub unknown_participants: UnknownParticipantPolicy,

    #[serde(default)]
    pub summary: SummaryMode,

    /// Default tracing filter when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub report: ReportConfig,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for CliConfig {
    fn default() -> Self {
        CliConfig {
            unknown_participants: UnknownParticipantPolicy::default(),
            summary: SummaryMode::default(),
            log_level: default_log_level(),
            report: ReportConfig::default(),
        }
    }
}

impl CliConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (a missing file is not an error)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> CliResult<Self> {
        let mut config = match config_path.or_else(Self::default_config_path) {
            Some(path) if path.exists() => Self::from_file(&path)?,
            Some(path) => {
                debug!(?path, "Config file not found, using defaults");
                Self::default()
            }
            None => Self::default(),
        };

        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    fn from_file(path: &Path) -> CliResult<Self> {
        info!(?path, "Loading config from file");
        let contents = std::fs::read_to_string(path).map_err(|source| CliError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| CliError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Applies `DIVVY_*` overrides read through `lookup`.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> CliResult<()> {
        if let Some(policy) = lookup("DIVVY_UNKNOWN_PARTICIPANTS") {
            debug!(policy = %policy, "Overriding unknown-participant policy from environment");
            self.unknown_participants = policy
                .parse()
                .map_err(|e| CliError::InvalidConfig(format!("{}", e)))?;
        }

        if let Some(mode) = lookup("DIVVY_SUMMARY") {
            self.summary = mode.parse()?;
        }

        if let Some(level) = lookup("DIVVY_LOG_LEVEL") {
            self.log_level = level;
        }

        if let Some(symbol) = lookup("DIVVY_CURRENCY_SYMBOL") {
            if symbol.chars().count() > 8 {
                warn!(symbol = %symbol, "Ignoring overly long currency symbol from environment");
            } else {
                self.report.currency_symbol = symbol;
            }
        }

        Ok(())
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("app", "divvy", "divvy")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }
}
