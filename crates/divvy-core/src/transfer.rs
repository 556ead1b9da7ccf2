//! # Transfer Planner
//!
//! Greedy largest-first matching of debtors against creditors.
//!
//! ## Algorithm
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  balances: A +60  B -30  C -30  D 0                                     │
//! │                                                                         │
//! │  1. Partition (|amount| <= 0.01 dropped)                                │
//! │       debtors   = [B -30, C -30]   ascending  (largest debt first)      │
//! │       creditors = [A +60]          descending (largest credit first)    │
//! │                                                                         │
//! │  2. Walk both lists with two cursors                                    │
//! │       i=0 j=0  min(30, 60) = 30  → B pays A 30   B:0  A:+30   i++       │
//! │       i=1 j=0  min(30, 30) = 30  → C pays A 30   C:0  A:0     i++ j++   │
//! │                                                                         │
//! │  3. Stop when either cursor runs off its list                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each step settles at least one side, so the plan never has more than
//! `debtors + creditors - 1` transfers. This is a heuristic: it does not
//! guarantee the globally minimal transfer count.

use tracing::debug;

use crate::money::Money;
use crate::types::{Balance, SettlementAction};
use crate::SETTLEMENT_TOLERANCE;

/// Plans an ordered list of transfers that settles `balances`.
///
/// Ties between equal amounts keep their input order (stable sort).
/// Balances within the settlement tolerance of zero (one cent either way)
/// take part in no transfer, and a match of one cent or less is dropped. If the input does not sum to zero, planning stops once either
/// side runs out and the residue stays unsettled.
///
/// ## Example
/// ```rust
/// use divvy_core::{plan_transfers, Balance, Money};
///
/// let plan = plan_transfers(&[
///     Balance::new("a", Money::from_cents(5000)),
///     Balance::new("b", Money::from_cents(-5000)),
/// ]);
/// assert_eq!(plan.len(), 1);
/// assert_eq!(plan[0].from_id, "b");
/// assert_eq!(plan[0].to_id, "a");
/// assert_eq!(plan[0].amount.cents(), 5000);
/// ```
pub fn plan_transfers(balances: &[Balance]) -> Vec<SettlementAction> {
    let mut debtors: Vec<Balance> = balances.iter().filter(|b| b.is_debtor()).cloned().collect();
    let mut creditors: Vec<Balance> = balances
        .iter()
        .filter(|b| b.is_creditor())
        .cloned()
        .collect();

    debtors.sort_by(|a, b| a.amount.cmp(&b.amount));
    creditors.sort_by(|a, b| b.amount.cmp(&a.amount));

    let mut actions = Vec::with_capacity(debtors.len() + creditors.len());
    let (mut i, mut j) = (0, 0);

    while i < debtors.len() && j < creditors.len() {
        let debtor = &mut debtors[i];
        let creditor = &mut creditors[j];

        let amount = debtor.amount.abs().min(creditor.amount);
        if amount > SETTLEMENT_TOLERANCE {
            actions.push(SettlementAction {
                from_id: debtor.participant_id.clone(),
                to_id: creditor.participant_id.clone(),
                amount,
            });
        }

        debtor.amount += amount;
        creditor.amount -= amount;

        if is_cleared(debtor.amount) {
            i += 1;
        }
        if is_cleared(creditor.amount) {
            j += 1;
        }
    }

    debug!(
        debtors = debtors.len(),
        creditors = creditors.len(),
        transfers = actions.len(),
        "Planned transfers"
    );

    actions
}

#[inline]
fn is_cleared(remaining: Money) -> bool {
    remaining.abs() <= SETTLEMENT_TOLERANCE
}

// =============================================================================
// Unit Tests
// =============================================================================
