//! # divvy-core: Pure Settlement Engine for Divvy
//!
//! This crate is the **heart** of Divvy. It turns a snapshot of participants
//! and shared expenses into net balances and a short list of transfers that
//! settles every debt. It has zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Divvy Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Entry Surface (front end / `divvy` CLI)            │   │
//! │  │    Participants ──► Expenses ──► Settlement ──► Summary         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ immutable snapshot                     │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ divvy-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   expenses ──► [ balance ] ──► balances ──► [ transfer ] ──►    │   │
//! │  │                                                   actions      │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STORAGE • NO NETWORK • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ SettlementResult (read-only)           │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                divvy-report (Summary Layer)                     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money type with integer cent arithmetic (no floating point!)
//! - [`types`] - Participant, Expense, Balance, SettlementAction, SettlementResult
//! - [`error`] - Domain error types
//! - [`validation`] - Entry-surface field validation
//! - [`balance`] - Balance Calculator
//! - [`transfer`] - Transfer Planner (greedy largest-first matching)
//! - [`settlement`] - Orchestration of both stages
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same snapshot in, same result out
//! 2. **No I/O**: file system and network access are FORBIDDEN here
//! 3. **Integer Money**: all amounts are cents (i64), so balances sum to exactly zero
//! 4. **Explicit Errors**: contract violations are typed, never panics
//!
//! ## Example Usage
//!
//! ```rust
//! use divvy_core::{settle, Expense, Money, Participant};
//!
//! let group = vec![
//!     Participant::with_id("a", "Alice"),
//!     Participant::with_id("b", "Bob"),
//!     Participant::with_id("c", "Carol"),
//! ];
//! let dinner = Expense::new(
//!     "Dinner",
//!     Money::from_cents(9000),
//!     "a",
//!     vec!["a".into(), "b".into(), "c".into()],
//! );
//!
//! let result = settle(&group, &[dinner]).unwrap();
//! assert_eq!(result.balance_of("a"), Some(Money::from_cents(6000)));
//! assert_eq!(result.actions.len(), 2);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod balance;
pub mod error;
pub mod money;
pub mod settlement;
pub mod transfer;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use divvy_core::Money` instead of
// `use divvy_core::money::Money`

pub use balance::{compute_balances, BalanceCalculator};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use settlement::{settle, SettlementEngine, SettlementOptions, UnknownParticipantPolicy};
pub use transfer::plan_transfers;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Rounding tolerance for settlement decisions (one cent).
///
/// A balance is settled iff its magnitude is strictly below this value; a
/// transfer is emitted iff its amount is at least this value. With integer
/// cents this collapses to "non-zero".
pub const SETTLEMENT_TOLERANCE: Money = Money::from_cents(1);

/// Display name for ids that are not in the participant set.
pub const UNKNOWN_PARTICIPANT_NAME: &str = "Unknown";

/// Maximum participant name length (characters, after trimming).
pub const MAX_PARTICIPANT_NAME_LEN: usize = 50;

/// Maximum expense title length (characters, after trimming).
pub const MAX_EXPENSE_TITLE_LEN: usize = 100;

/// Minimum group size before settling makes sense.
///
/// ## Business Reason
/// A lone participant can never owe anyone. The entry surface refuses to
/// move past the participant step with fewer than two names; the engine
/// itself accepts any size.
pub const MIN_GROUP_SIZE: usize = 2;
