//! # Settlement Engine
//!
//! Runs the two stages in order and packages the result.
//!
//! ```text
//! participants ─┐
//!               ├──► BalanceCalculator ──► balances ──► plan_transfers ──► actions
//! expenses ─────┘                              │                              │
//!                                              └──────── SettlementResult ────┘
//! ```
//!
//! The engine holds only immutable options, so one instance can be shared
//! across threads and invoked concurrently on independent snapshots.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::balance::BalanceCalculator;
use crate::error::{CoreResult, ValidationError};
use crate::transfer::plan_transfers;
use crate::types::{Expense, Participant, SettlementResult};

// =============================================================================
// Unknown Participant Policy
// =============================================================================

/// What to do when an expense names an id outside the participant set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownParticipantPolicy {
    /// Fault with `CoreError::UnknownParticipant`.
    #[default]
    Reject,

    /// Create a balance entry for the unknown id and carry on.
    Tolerate,
}

impl std::fmt::Display for UnknownParticipantPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UnknownParticipantPolicy::Reject => write!(f, "reject"),
            UnknownParticipantPolicy::Tolerate => write!(f, "tolerate"),
        }
    }
}

impl std::str::FromStr for UnknownParticipantPolicy {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "reject" | "strict" => Ok(UnknownParticipantPolicy::Reject),
            "tolerate" | "permissive" => Ok(UnknownParticipantPolicy::Tolerate),
            _ => Err(ValidationError::NotAllowed {
                field: "unknown_participants".to_string(),
                allowed: vec!["reject".to_string(), "tolerate".to_string()],
            }),
        }
    }
}

// =============================================================================
// Options
// =============================================================================

/// Knobs for one settlement run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SettlementOptions {
    #[serde(default)]
    pub unknown_participants: UnknownParticipantPolicy,
}

// =============================================================================
// Engine
// =============================================================================

/// Stateless settlement engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct SettlementEngine {
    options: SettlementOptions,
}

impl SettlementEngine {
    pub fn new(options: SettlementOptions) -> Self {
        SettlementEngine { options }
    }

    /// Computes balances and a transfer plan for one snapshot.
    ///
    /// `balances` in the result are ordered by amount, largest creditor
    /// first, ties in participant order. `actions` come in planning order.
    pub fn settle(
        &self,
        participants: &[Participant],
        expenses: &[Expense],
    ) -> CoreResult<SettlementResult> {
        let calculator = BalanceCalculator::new(self.options.unknown_participants);
        let mut balances = calculator.compute(participants, expenses)?;

        let actions = plan_transfers(&balances);

        balances.sort_by(|a, b| b.amount.cmp(&a.amount));

        debug!(
            balances = balances.len(),
            transfers = actions.len(),
            "Settlement complete"
        );

        Ok(SettlementResult { balances, actions })
    }
}

/// Settles a snapshot with default options.
pub fn settle(participants: &[Participant], expenses: &[Expense]) -> CoreResult<SettlementResult> {
    SettlementEngine::default().settle(participants, expenses)
}

// =============================================================================
// Unit Tests
// =============================================================================
