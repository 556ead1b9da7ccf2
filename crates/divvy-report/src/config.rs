//! # Report Configuration
//!
//! Currency symbol and the fallback texts shown when a summary cannot be
//! generated. Nests inside the CLI config file as a `[report]` table.
//!
//! ## Configuration File Format
//! ```toml
//! [report]
//! currency_symbol = "NT$"
//! missing_credentials_message = "Configure an API key to enable summaries."
//! unavailable_message = "The summary service failed, please try again later."
//! empty_message = "The summary service could not produce a report."
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ReportError;

/// Report settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Prefix used when formatting amounts (`$`, `NT$`, `€`).
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,

    #[serde(default = "default_missing_credentials_message")]
    pub missing_credentials_message: String,

    #[serde(default = "default_unavailable_message")]
    pub unavailable_message: String,

    #[serde(default = "default_empty_message")]
    pub empty_message: String,
}

fn default_currency_symbol() -> String {
    "$".to_string()
}

fn default_missing_credentials_message() -> String {
    "Configure an API key to enable summaries.".to_string()
}

fn default_unavailable_message() -> String {
    "The summary service failed, please try again later.".to_string()
}

fn default_empty_message() -> String {
    "The summary service could not produce a report.".to_string()
}

impl Default for ReportConfig {
    fn default() -> Self {
        ReportConfig {
            currency_symbol: default_currency_symbol(),
            missing_credentials_message: default_missing_credentials_message(),
            unavailable_message: default_unavailable_message(),
            empty_message: default_empty_message(),
        }
    }
}

impl ReportConfig {
    /// Returns the user-facing message for a generation failure.
    pub fn fallback_for(&self, error: &ReportError) -> &str {
        match error {
            ReportError::MissingCredentials => &self.missing_credentials_message,
            ReportError::Unavailable(_) => &self.unavailable_message,
            ReportError::EmptySummary => &self.empty_message,
        }
    }
}
