//! # Summary Context
//!
//! Read-only view of one settlement, with ids resolved to display names.
//!
//! ## Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  SummaryContext                                                         │
//! │  ├── expenses[]   title, amount, payer name, involved count             │
//! │  ├── balances[]   name, net                                             │
//! │  ├── actions[]    from name, to name, amount                            │
//! │  ├── total_spend  sum of every expense amount                           │
//! │  ├── per_capita   total_spend / participants (nearest cent)             │
//! │  ├── big_spender  participant who paid the most                         │
//! │  └── freeloader   joined the most expenses, paid the least              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The context is built from borrowed inputs and owns copies of what it
//! needs, so a generator can never reach back into the engine's data.

use std::collections::HashMap;

use divvy_core::types::display_name;
use divvy_core::{Expense, Money, Participant, SettlementResult};
use serde::Serialize;

/// One expense as the summary sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseLine {
    pub title: String,
    pub amount: Money,
    pub payer: String,
    pub involved_count: usize,
}

/// One net balance as the summary sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BalanceLine {
    pub name: String,
    pub net: Money,
}

/// One transfer as the summary sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransferLine {
    pub from: String,
    pub to: String,
    pub amount: Money,
}

/// Everything a summary generator may look at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryContext {
    pub participants: Vec<String>,
    pub expenses: Vec<ExpenseLine>,
    pub balances: Vec<BalanceLine>,
    pub actions: Vec<TransferLine>,
    pub total_spend: Money,
    pub per_capita: Money,
    pub big_spender: Option<String>,
    pub freeloader: Option<String>,
}

impl SummaryContext {
    /// Builds the context for one settlement run.
    pub fn build(
        participants: &[Participant],
        expenses: &[Expense],
        result: &SettlementResult,
    ) -> Self {
        let name = |id: &str| display_name(participants, id).to_string();

        let total_spend = expenses
            .iter()
            .fold(Money::zero(), |total, e| total.saturating_add(e.amount));
        let stats = ParticipantStats::collect(participants, expenses);

        SummaryContext {
            participants: participants.iter().map(|p| p.name.clone()).collect(),
            expenses: expenses
                .iter()
                .map(|e| ExpenseLine {
                    title: e.title.clone(),
                    amount: e.amount,
                    payer: name(&e.payer_id),
                    involved_count: e.involved_ids.len(),
                })
                .collect(),
            balances: result
                .balances
                .iter()
                .map(|b| BalanceLine {
                    name: name(&b.participant_id),
                    net: b.amount,
                })
                .collect(),
            actions: result
                .actions
                .iter()
                .map(|a| TransferLine {
                    from: name(&a.from_id),
                    to: name(&a.to_id),
                    amount: a.amount,
                })
                .collect(),
            total_spend,
            per_capita: per_capita(total_spend, participants.len()),
            big_spender: stats.big_spender().map(|id| name(id)),
            freeloader: stats.freeloader().map(|id| name(id)),
        }
    }

    /// Pretty JSON of the context, as handed to a hosted text model.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Instruction prompt for a hosted text-generation backend.
    ///
    /// Asks for three short sections: spending remarks, an overview of
    /// total and per-person spend, and a reminder to pay.
    pub fn prompt(&self) -> serde_json::Result<String> {
        Ok(format!(
            "You are a witty but precise finance assistant. Write a short plain-text \
             summary of this group expense settlement.\n\n\
             Data (JSON):\n{}\n\n\
             Include three parts:\n\
             1. Spending remarks: who was the big spender (paid the most) and who joined \
             the most expenses while paying the least. Keep it light-hearted.\n\
             2. Overview: one sentence with the total spend and the spend per person.\n\
             3. Reminder: remind everyone who owes money to make their transfers, and end \
             on a fun note.\n\n\
             Output plain text only, no Markdown code blocks.",
            self.to_json()?
        ))
    }
}

/// Total divided by head count, rounded half away from zero to the cent.
fn per_capita(total: Money, heads: usize) -> Money {
    if heads == 0 {
        return Money::zero();
    }
    let heads = heads as i64;
    let cents = total.cents();
    let (quotient, remainder) = (cents / heads, cents % heads);
    // Round on the remainder so a saturated total cannot overflow
    let rounded = if remainder.unsigned_abs() * 2 >= heads.unsigned_abs() {
        quotient + cents.signum()
    } else {
        quotient
    };
    Money::from_cents(rounded)
}

// =============================================================================
// Participant Statistics
// =============================================================================

/// Per-participant spend and participation, in participant order.
struct ParticipantStats<'a> {
    order: Vec<&'a str>,
    paid: HashMap<&'a str, Money>,
    joined: HashMap<&'a str, usize>,
}

impl<'a> ParticipantStats<'a> {
    fn collect(participants: &'a [Participant], expenses: &'a [Expense]) -> Self {
        let order: Vec<&str> = participants.iter().map(|p| p.id.as_str()).collect();
        let mut paid: HashMap<&str, Money> = HashMap::new();
        let mut joined: HashMap<&str, usize> = HashMap::new();

        for expense in expenses {
            let spent = paid.entry(expense.payer_id.as_str()).or_default();
            *spent = spent.saturating_add(expense.amount);
            for &id in &order {
                if expense.involved_ids.iter().any(|i| i == id) {
                    *joined.entry(id).or_default() += 1;
                }
            }
        }

        ParticipantStats { order, paid, joined }
    }

    fn paid(&self, id: &str) -> Money {
        self.paid.get(id).copied().unwrap_or_default()
    }

    fn joined(&self, id: &str) -> usize {
        self.joined.get(id).copied().unwrap_or_default()
    }

    /// Highest payer; earliest participant wins ties. None if nobody paid.
    fn big_spender(&self) -> Option<&'a str> {
        let mut best: Option<&'a str> = None;
        for &id in &self.order {
            if !self.paid(id).is_positive() {
                continue;
            }
            if best.map_or(true, |b| self.paid(id) > self.paid(b)) {
                best = Some(id);
            }
        }
        best
    }

    /// Most expenses joined, then least paid; earliest participant wins ties.
    fn freeloader(&self) -> Option<&'a str> {
        let mut best: Option<&'a str> = None;
        for &id in &self.order {
            if self.joined(id) == 0 {
                continue;
            }
            let better = match best {
                None => true,
                Some(b) => {
                    self.joined(id) > self.joined(b)
                        || (self.joined(id) == self.joined(b) && self.paid(id) < self.paid(b))
                }
            };
            if better {
                best = Some(id);
            }
        }
        best
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use divvy_core::settle;

    fn fixture() -> (Vec<Participant>, Vec<Expense>) {
        let participants = vec![
            Participant::with_id("a", "Alice"),
            Participant::with_id("b", "Bob"),
            Participant::with_id("c", "Carol"),
        ];
        let expenses = vec![
            Expense::new(
                "Dinner",
                Money::from_cents(9000),
                "a",
                vec!["a".into(), "b".into(), "c".into()],
            ),
            Expense::new(
                "Taxi",
                Money::from_cents(1000),
                "c",
                vec!["b".into(), "c".into()],
            ),
        ];
        (participants, expenses)
    }

    #[test]
    fn test_build_resolves_names_and_totals() {
        let (participants, expenses) = fixture();
        let result = settle(&participants, &expenses).unwrap();
        let context = SummaryContext::build(&participants, &expenses, &result);

        assert_eq!(context.participants, vec!["Alice", "Bob", "Carol"]);
        assert_eq!(context.expenses[1].payer, "Carol");
        assert_eq!(context.expenses[1].involved_count, 2);
        assert_eq!(context.total_spend.cents(), 10000);
        assert_eq!(context.per_capita.cents(), 3333);
        assert_eq!(context.big_spender.as_deref(), Some("Alice"));
        // Bob and Carol both joined twice; Bob paid nothing
        assert_eq!(context.freeloader.as_deref(), Some("Bob"));
        assert_eq!(context.balances[0].name, "Alice");
        assert!(context.actions.iter().all(|a| a.to == "Alice"));
    }

    #[test]
    fn test_unknown_ids_resolve_to_unknown() {
        let participants = vec![Participant::with_id("a", "Alice")];
        let expenses = vec![Expense::new(
            "Mystery",
            Money::from_cents(500),
            "ghost",
            vec!["a".into()],
        )];
        let result = SettlementResult::default();
        let context = SummaryContext::build(&participants, &expenses, &result);
        assert_eq!(context.expenses[0].payer, "Unknown");
        assert_eq!(context.big_spender, None);
    }

    #[test]
    fn test_empty_context() {
        let context = SummaryContext::build(&[], &[], &SettlementResult::default());
        assert_eq!(context.total_spend, Money::zero());
        assert_eq!(context.per_capita, Money::zero());
        assert_eq!(context.big_spender, None);
        assert_eq!(context.freeloader, None);
    }

    #[test]
    fn test_huge_totals_saturate() {
        let participants = vec![Participant::with_id("a", "Alice"), Participant::with_id("b", "Bob")];
        let expenses = vec![
            Expense::new("Yacht", Money::from_cents(i64::MAX), "a", vec!["b".into()]),
            Expense::new("Tip", Money::from_cents(100), "a", vec!["b".into()]),
        ];
        let context = SummaryContext::build(&participants, &expenses, &SettlementResult::default());
        assert_eq!(context.total_spend.cents(), i64::MAX);
        assert_eq!(context.per_capita.cents(), i64::MAX / 2 + 1);
        assert_eq!(context.big_spender.as_deref(), Some("Alice"));
    }

    #[test]
    fn test_per_capita_rounds_half_away_from_zero() {
        assert_eq!(per_capita(Money::from_cents(1000), 3).cents(), 333);
        assert_eq!(per_capita(Money::from_cents(1001), 2).cents(), 501);
        assert_eq!(per_capita(Money::from_cents(-1001), 2).cents(), -501);
        assert_eq!(per_capita(Money::from_cents(1000), 7).cents(), 143);
        assert_eq!(per_capita(Money::from_cents(i64::MAX), 1).cents(), i64::MAX);
    }

    #[test]
    fn test_prompt_embeds_context_json() {
        let (participants, expenses) = fixture();
        let result = settle(&participants, &expenses).unwrap();
        let context = SummaryContext::build(&participants, &expenses, &result);

        let json: serde_json::Value = serde_json::from_str(&context.to_json().unwrap()).unwrap();
        assert_eq!(json["totalSpend"], 10000);
        assert_eq!(json["expenses"][0]["involvedCount"], 3);

        let prompt = context.prompt().unwrap();
        assert!(prompt.contains("\"bigSpender\": \"Alice\""));
        assert!(prompt.contains("Reminder"));
    }
}
