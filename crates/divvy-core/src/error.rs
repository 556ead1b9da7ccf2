//! # Error Types
//!
//! Domain-specific error types for divvy-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  divvy-core errors (this file)                                         │
//! │  ├── CoreError        - Settlement input contract violations           │
//! │  └── ValidationError  - Entry-surface field validation failures        │
//! │                                                                         │
//! │  divvy-report errors (separate crate)                                  │
//! │  └── ReportError      - Summary generation failures (never fatal)      │
//! │                                                                         │
//! │  CLI errors (in app)                                                   │
//! │  └── anyhow::Error    - What the terminal sees                         │
//! │                                                                         │
//! │  Flow: CoreError / ValidationError → anyhow → stderr                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Retry Semantics
//! The engine is pure and deterministic: retrying the same input yields the
//! same error. Every variant here is a caller input-contract violation and
//! should be surfaced immediately.

use thiserror::Error;

use crate::money::Money;

// =============================================================================
// Core Error
// =============================================================================

/// Settlement engine errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// Expense violates the input contract.
    ///
    /// ## When This Occurs
    /// - `amount` is zero or negative
    ///
    /// An empty `involved_ids` list is NOT an error: such an expense is
    /// skipped by the balance calculator.
    #[error("Invalid expense {expense_id}: {reason}")]
    InvalidExpense { expense_id: String, reason: String },

    /// Expense references a participant id absent from the participant set.
    ///
    /// ## When This Occurs
    /// ```text
    /// participants: [alice, bob]
    /// expense "Taxi": payer=carol, involved=[alice, bob]
    ///      │
    ///      ▼
    /// UnknownParticipant { expense_id: "taxi", participant_id: "carol" }
    /// ```
    /// Only raised under `UnknownParticipantPolicy::Reject` (the default).
    #[error("Expense {expense_id} references unknown participant {participant_id}")]
    UnknownParticipant {
        expense_id: String,
        participant_id: String,
    },

    /// Two participants share the same id.
    #[error("Duplicate participant id: {0}")]
    DuplicateParticipant(String),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised by the [`crate::validation`] helpers an entry surface runs before
/// handing a snapshot to the engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value exceeds the accepted maximum.
    #[error("{field} must be at most {max}")]
    TooLarge { field: String, max: Money },

    /// Invalid format (e.g., unparseable amount).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },

    /// Duplicate value (e.g., duplicate participant id).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },

    /// Collection has fewer entries than required.
    #[error("at least {min} {field} required, got {actual}")]
    TooFew {
        field: String,
        min: usize,
        actual: usize,
    },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
