//! # Balance Calculator
//!
//! Turns an expense list into one signed net balance per participant.
//!
//! ## Accounting Rule
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Expense "Dinner" 90.00, payer A, involved [A, B, C]                    │
//! │                                                                         │
//! │  1. Credit the payer the full amount      A: +90.00                     │
//! │  2. Split into exact cent shares          [30.00, 30.00, 30.00]         │
//! │  3. Debit each involved participant       A: -30.00  B: -30.00  C: -30.00│
//! │                                                                         │
//! │  Net:                                     A: +60.00  B: -30.00  C: -30.00│
//! │                                                                         │
//! │  Credits and debits of each expense cancel exactly, so the balances     │
//! │  of any snapshot sum to exactly 0 cents.                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The payer is debited only if they are also in `involved_ids`.
//! An expense with no involved participants is skipped (no credit, no debit).

use std::collections::{HashMap, HashSet};

use tracing::{debug, warn};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::settlement::UnknownParticipantPolicy;
use crate::types::{Balance, Expense, Participant, ParticipantId};

// =============================================================================
// Balance Calculator
// =============================================================================

/// Computes net balances from a participant/expense snapshot.
#[derive(Debug, Clone, Copy, Default)]
pub struct BalanceCalculator {
    policy: UnknownParticipantPolicy,
}

impl BalanceCalculator {
    pub fn new(policy: UnknownParticipantPolicy) -> Self {
        BalanceCalculator { policy }
    }

    /// Computes one balance per participant, in participant input order.
    ///
    /// Participants without any expense still appear, at zero. Under
    /// [`UnknownParticipantPolicy::Tolerate`], entries for unknown ids are
    /// appended after the declared participants in first-seen order.
    ///
    /// ## Errors
    /// - [`CoreError::DuplicateParticipant`] if two participants share an id
    /// - [`CoreError::InvalidExpense`] if an expense amount is not positive
    /// - [`CoreError::UnknownParticipant`] for an unknown payer or involved
    ///   id under [`UnknownParticipantPolicy::Reject`]
    pub fn compute(
        &self,
        participants: &[Participant],
        expenses: &[Expense],
    ) -> CoreResult<Vec<Balance>> {
        let mut ledger = Ledger::new(participants)?;

        for expense in expenses {
            self.apply(&mut ledger, expense)?;
        }

        debug!(
            participants = participants.len(),
            expenses = expenses.len(),
            balances = ledger.balances.len(),
            "Computed balances"
        );

        Ok(ledger.balances)
    }

    fn apply(&self, ledger: &mut Ledger, expense: &Expense) -> CoreResult<()> {
        if !expense.amount.is_positive() {
            return Err(CoreError::InvalidExpense {
                expense_id: expense.id.clone(),
                reason: format!("amount must be positive, got {}", expense.amount),
            });
        }

        if expense.is_unshared() {
            debug!(expense_id = %expense.id, "Skipping expense with no involved participants");
            return Ok(());
        }

        // Resolve every id before touching any balance so a rejected
        // expense leaves no partial effect behind.
        let payer = ledger.slot(&expense.id, &expense.payer_id, self.policy)?;
        let involved = unique_ids(&expense.involved_ids)
            .into_iter()
            .map(|id| ledger.slot(&expense.id, id, self.policy))
            .collect::<CoreResult<Vec<usize>>>()?;

        // The payer's own share nets against the credit, so each slot is
        // written once and an overflow leaves the ledger untouched.
        let overflow = || CoreError::InvalidExpense {
            expense_id: expense.id.clone(),
            reason: "amount overflows balance".to_string(),
        };
        let shares = expense.amount.split_evenly(involved.len());
        let mut payer_delta = expense.amount;
        let mut updates = Vec::with_capacity(involved.len() + 1);
        for (slot, share) in involved.into_iter().zip(shares) {
            if slot == payer {
                payer_delta -= share;
                continue;
            }
            let debited = ledger.balances[slot]
                .amount
                .checked_sub(share)
                .ok_or_else(overflow)?;
            updates.push((slot, debited));
        }
        let credited = ledger.balances[payer]
            .amount
            .checked_add(payer_delta)
            .ok_or_else(overflow)?;
        updates.push((payer, credited));

        for (slot, amount) in updates {
            ledger.balances[slot].amount = amount;
        }

        Ok(())
    }
}

/// Computes balances with the default (rejecting) unknown-id policy.
///
/// ## Example
/// ```rust
/// use divvy_core::{compute_balances, Expense, Money, Participant};
///
/// let group = vec![Participant::with_id("a", "A"), Participant::with_id("b", "B")];
/// let lunch = Expense::new("Lunch", Money::from_cents(10000), "a", vec!["a".into(), "b".into()]);
///
/// let balances = compute_balances(&group, &[lunch]).unwrap();
/// assert_eq!(balances[0].amount.cents(), 5000);
/// assert_eq!(balances[1].amount.cents(), -5000);
/// ```
pub fn compute_balances(
    participants: &[Participant],
    expenses: &[Expense],
) -> CoreResult<Vec<Balance>> {
    BalanceCalculator::default().compute(participants, expenses)
}

// =============================================================================
// Ledger
// =============================================================================

/// Running balances plus an id → position index.
struct Ledger {
    balances: Vec<Balance>,
    index: HashMap<ParticipantId, usize>,
}

impl Ledger {
    fn new(participants: &[Participant]) -> CoreResult<Self> {
        let mut ledger = Ledger {
            balances: Vec::with_capacity(participants.len()),
            index: HashMap::with_capacity(participants.len()),
        };

        for participant in participants {
            if ledger.index.contains_key(&participant.id) {
                return Err(CoreError::DuplicateParticipant(participant.id.clone()));
            }
            ledger.push(&participant.id);
        }

        Ok(ledger)
    }

    fn push(&mut self, id: &str) -> usize {
        let slot = self.balances.len();
        self.balances.push(Balance::new(id, Money::zero()));
        self.index.insert(id.to_string(), slot);
        slot
    }

    /// Returns the position of `id`, creating it if the policy tolerates
    /// unknown ids.
    fn slot(
        &mut self,
        expense_id: &str,
        id: &str,
        policy: UnknownParticipantPolicy,
    ) -> CoreResult<usize> {
        if let Some(&slot) = self.index.get(id) {
            return Ok(slot);
        }

        match policy {
            UnknownParticipantPolicy::Reject => Err(CoreError::UnknownParticipant {
                expense_id: expense_id.to_string(),
                participant_id: id.to_string(),
            }),
            UnknownParticipantPolicy::Tolerate => {
                warn!(
                    expense_id = %expense_id,
                    participant_id = %id,
                    "Expense references unknown participant, adding balance entry"
                );
                Ok(self.push(id))
            }
        }
    }
}

/// Collapses repeated ids, keeping the first occurrence.
fn unique_ids(ids: &[ParticipantId]) -> Vec<&str> {
    let mut seen = HashSet::with_capacity(ids.len());
    ids.iter()
        .map(String::as_str)
        .filter(|id| seen.insert(*id))
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn group(ids: &[&str]) -> Vec<Participant> {
        ids.iter().map(|id| Participant::with_id(*id, id.to_uppercase())).collect()
    }

    fn expense(id: &str, cents: i64, payer: &str, involved: &[&str]) -> Expense {
        Expense::new(
            id,
            Money::from_cents(cents),
            payer,
            involved.iter().map(|s| s.to_string()).collect(),
        )
        .with_id(id)
    }

    fn cents(balances: &[Balance]) -> Vec<(String, i64)> {
        balances
            .iter()
            .map(|b| (b.participant_id.clone(), b.amount.cents()))
            .collect()
    }

    #[test]
    fn test_participants_without_expenses_appear_at_zero() {
        let balances = compute_balances(&group(&["a", "b", "c"]), &[]).unwrap();
        assert_eq!(
            cents(&balances),
            vec![("a".into(), 0), ("b".into(), 0), ("c".into(), 0)]
        );
    }

    #[test]
    fn test_payer_outside_involved_is_not_debited() {
        let balances = compute_balances(
            &group(&["a", "b", "c"]),
            &[expense("e1", 3000, "a", &["b", "c"])],
        )
        .unwrap();
        assert_eq!(
            cents(&balances),
            vec![("a".into(), 3000), ("b".into(), -1500), ("c".into(), -1500)]
        );
    }

    #[test]
    fn test_remainder_cents_keep_zero_sum() {
        let balances = compute_balances(
            &group(&["a", "b", "c"]),
            &[expense("e1", 1000, "a", &["a", "b", "c"])],
        )
        .unwrap();
        // Shares 3.33, 3.33, 3.34 in involved order
        assert_eq!(
            cents(&balances),
            vec![("a".into(), 667), ("b".into(), -333), ("c".into(), -334)]
        );
        assert_eq!(balances.iter().map(|b| b.amount).sum::<Money>(), Money::zero());
    }

    #[test]
    fn test_unshared_expense_is_skipped() {
        let balances =
            compute_balances(&group(&["a", "b"]), &[expense("e1", 5000, "a", &[])]).unwrap();
        assert!(balances.iter().all(|b| b.amount.is_zero()));
    }

    #[test]
    fn test_duplicate_involved_ids_collapse() {
        let balances = compute_balances(
            &group(&["a", "b"]),
            &[expense("e1", 1000, "a", &["b", "b", "a"])],
        )
        .unwrap();
        assert_eq!(cents(&balances), vec![("a".into(), 500), ("b".into(), -500)]);
    }

    #[test]
    fn test_non_positive_amount_is_rejected() {
        let err = compute_balances(&group(&["a", "b"]), &[expense("e1", 0, "a", &["b"])])
            .unwrap_err();
        assert!(matches!(err, CoreError::InvalidExpense { ref expense_id, .. } if expense_id == "e1"));

        let err = compute_balances(&group(&["a", "b"]), &[expense("e2", -5, "a", &["b"])])
            .unwrap_err();
        assert!(matches!(err, CoreError::InvalidExpense { .. }));
    }

    #[test]
    fn test_overflowing_credit_is_rejected() {
        let expenses = [
            expense("e1", i64::MAX, "a", &["b"]),
            expense("e2", 1, "a", &["b"]),
        ];
        let err = compute_balances(&group(&["a", "b"]), &expenses).unwrap_err();
        assert_eq!(
            err,
            CoreError::InvalidExpense {
                expense_id: "e2".into(),
                reason: "amount overflows balance".into(),
            }
        );
    }

    #[test]
    fn test_overflowing_debit_is_rejected() {
        let expenses = [
            expense("e1", i64::MAX, "a", &["b"]),
            expense("e2", 2, "c", &["b"]),
        ];
        let err = compute_balances(&group(&["a", "b", "c"]), &expenses).unwrap_err();
        assert!(matches!(err, CoreError::InvalidExpense { ref expense_id, .. } if expense_id == "e2"));
    }

    #[test]
    fn test_payer_share_nets_against_credit() {
        // i64::MAX credit minus the payer's own half never overflows
        let balances = compute_balances(
            &group(&["a", "b"]),
            &[expense("e1", i64::MAX, "a", &["a", "b"])],
        )
        .unwrap();
        assert_eq!(balances.iter().map(|b| b.amount).sum::<Money>(), Money::zero());
    }

    #[test]
    fn test_duplicate_participant_is_rejected() {
        let err = compute_balances(&group(&["a", "a"]), &[]).unwrap_err();
        assert_eq!(err, CoreError::DuplicateParticipant("a".into()));
    }

    #[test]
    fn test_unknown_payer_rejected_by_default() {
        let err = compute_balances(&group(&["a", "b"]), &[expense("e1", 1000, "z", &["a", "b"])])
            .unwrap_err();
        assert_eq!(
            err,
            CoreError::UnknownParticipant {
                expense_id: "e1".into(),
                participant_id: "z".into(),
            }
        );
    }

    #[test]
    fn test_unknown_involved_rejected_by_default() {
        let err = compute_balances(&group(&["a", "b"]), &[expense("e1", 1000, "a", &["b", "y"])])
            .unwrap_err();
        assert!(matches!(
            err,
            CoreError::UnknownParticipant { ref participant_id, .. } if participant_id == "y"
        ));
    }

    #[test]
    fn test_tolerate_appends_unknown_ids_in_first_seen_order() {
        let calculator = BalanceCalculator::new(UnknownParticipantPolicy::Tolerate);
        let balances = calculator
            .compute(
                &group(&["a"]),
                &[
                    expense("e1", 1000, "z", &["a", "y"]),
                    expense("e2", 200, "y", &["z"]),
                ],
            )
            .unwrap();

        assert_eq!(
            cents(&balances),
            vec![("a".into(), -500), ("z".into(), 800), ("y".into(), -300)]
        );
        assert_eq!(balances.iter().map(|b| b.amount).sum::<Money>(), Money::zero());
    }
}
