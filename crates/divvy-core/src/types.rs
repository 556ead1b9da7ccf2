//! # Domain Types
//!
//! Core domain types used throughout Divvy.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  INPUTS (snapshots from the entry surface)                              │
//! │  ┌─────────────────┐   ┌─────────────────────┐                          │
//! │  │  Participant    │   │      Expense        │                          │
//! │  │  ─────────────  │   │  ─────────────────  │                          │
//! │  │  id             │◄──│  payer_id           │                          │
//! │  │  name           │◄──│  involved_ids[]     │                          │
//! │  └─────────────────┘   │  amount (Money)     │                          │
//! │                        │  title, date        │                          │
//! │                        └─────────────────────┘                          │
//! │                                                                         │
//! │  OUTPUTS (derived, recomputed on every run, never stored)               │
//! │  ┌─────────────────┐   ┌─────────────────────┐                          │
//! │  │    Balance      │   │  SettlementAction   │                          │
//! │  │  participant_id │   │  from_id ──► to_id  │                          │
//! │  │  amount (±)     │   │  amount (> 0)       │                          │
//! │  └─────────────────┘   └─────────────────────┘                          │
//! │           └──────── SettlementResult ─┘                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Shape
//! Fields serialize in camelCase (`payerId`, `involvedIds`, `fromId`) so the
//! expense-entry front end and the generated TypeScript bindings agree.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::money::Money;
use crate::{SETTLEMENT_TOLERANCE, UNKNOWN_PARTICIPANT_NAME};

/// Opaque participant identifier. Uniqueness is caller-enforced.
pub type ParticipantId = String;

/// Opaque expense identifier.
pub type ExpenseId = String;

// =============================================================================
// Participant
// =============================================================================

/// A member of the group splitting expenses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    pub id: ParticipantId,
    pub name: String,
}

impl Participant {
    /// Creates a participant with a generated UUID v4 id.
    pub fn new(name: impl Into<String>) -> Self {
        Participant {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
        }
    }

    /// Creates a participant with a caller-chosen id.
    pub fn with_id(id: impl Into<ParticipantId>, name: impl Into<String>) -> Self {
        Participant {
            id: id.into(),
            name: name.into(),
        }
    }
}

// =============================================================================
// Expense
// =============================================================================

/// A single shared cost.
///
/// ## Invariants (caller contract, checked by the engine)
/// - `amount > 0`
/// - `involved_ids` non-empty for the expense to have any effect
///
/// `payer_id` need not appear in `involved_ids`: the payer may have bought
/// something they do not share in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: ExpenseId,
    pub title: String,
    pub amount: Money,
    pub payer_id: ParticipantId,
    pub involved_ids: Vec<ParticipantId>,
    #[ts(as = "String")]
    pub date: DateTime<Utc>,
}

impl Expense {
    /// Creates an expense with a generated id, timestamped now.
    pub fn new(
        title: impl Into<String>,
        amount: Money,
        payer_id: impl Into<ParticipantId>,
        involved_ids: Vec<ParticipantId>,
    ) -> Self {
        Expense {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            amount,
            payer_id: payer_id.into(),
            involved_ids,
            date: Utc::now(),
        }
    }

    /// Overrides the generated id.
    pub fn with_id(mut self, id: impl Into<ExpenseId>) -> Self {
        self.id = id.into();
        self
    }

    /// True when no one shares the cost, so the expense is skipped.
    #[inline]
    pub fn is_unshared(&self) -> bool {
        self.involved_ids.is_empty()
    }
}

// =============================================================================
// Balance
// =============================================================================

/// A participant's signed net position.
///
/// ```text
///   amount > 0  → creditor (is owed money)
///   amount < 0  → debtor   (owes money)
///   |amount| < tolerance → settled
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Balance {
    pub participant_id: ParticipantId,
    pub amount: Money,
}

impl Balance {
    pub fn new(participant_id: impl Into<ParticipantId>, amount: Money) -> Self {
        Balance {
            participant_id: participant_id.into(),
            amount,
        }
    }

    /// Within the settlement tolerance of zero, both ends inclusive.
    #[inline]
    pub fn is_settled(&self) -> bool {
        self.amount.abs() <= SETTLEMENT_TOLERANCE
    }

    #[inline]
    pub fn is_debtor(&self) -> bool {
        self.amount < -SETTLEMENT_TOLERANCE
    }

    #[inline]
    pub fn is_creditor(&self) -> bool {
        self.amount > SETTLEMENT_TOLERANCE
    }
}

// =============================================================================
// Settlement Action
// =============================================================================

/// A directed payment recommendation: `from_id` pays `to_id` `amount`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SettlementAction {
    pub from_id: ParticipantId,
    pub to_id: ParticipantId,
    pub amount: Money,
}

// =============================================================================
// Settlement Result
// =============================================================================

/// The complete output of one settlement run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SettlementResult {
    pub balances: Vec<Balance>,
    pub actions: Vec<SettlementAction>,
}

impl SettlementResult {
    /// True when no transfers are needed.
    pub fn is_balanced(&self) -> bool {
        self.actions.is_empty()
    }

    /// Looks up the net balance of one participant.
    pub fn balance_of(&self, participant_id: &str) -> Option<Money> {
        self.balances
            .iter()
            .find(|b| b.participant_id == participant_id)
            .map(|b| b.amount)
    }
}

// =============================================================================
// Name Resolution
// =============================================================================

/// Resolves a participant id to its display name.
///
/// Ids outside the participant set (possible under the tolerant unknown-id
/// policy) resolve to [`UNKNOWN_PARTICIPANT_NAME`].
///
/// ## Example
/// ```rust
/// use divvy_core::types::{display_name, Participant};
///
/// let group = vec![Participant::with_id("a", "Alice")];
/// assert_eq!(display_name(&group, "a"), "Alice");
/// assert_eq!(display_name(&group, "zzz"), "Unknown");
/// ```
pub fn display_name<'a>(participants: &'a [Participant], id: &str) -> &'a str {
    participants
        .iter()
        .find(|p| p.id == id)
        .map(|p| p.name.as_str())
        .unwrap_or(UNKNOWN_PARTICIPANT_NAME)
}

// =============================================================================
// Unit Tests
// =============================================================================
