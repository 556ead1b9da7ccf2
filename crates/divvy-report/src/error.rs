//! # Report Error Types
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Report Error Categories                            │
//! │                                                                         │
//! │  MissingCredentials  → "configure an API key" hint                     │
//! │  Unavailable         → "try again later"                               │
//! │  EmptySummary        → "could not produce a report"                    │
//! │                                                                         │
//! │  None of these ever reach the settlement path: summarize() maps each   │
//! │  one to a fallback message.                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Result type alias for summary generation.
pub type ReportResult<T> = Result<T, ReportError>;

/// Summary generation failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReportError {
    /// The backend needs credentials that are not configured.
    #[error("Summary backend credentials are not configured")]
    MissingCredentials,

    /// The backend failed (network error, service error, timeout).
    #[error("Summary backend unavailable: {0}")]
    Unavailable(String),

    /// The backend answered with nothing usable.
    #[error("Summary backend returned an empty summary")]
    EmptySummary,
}
