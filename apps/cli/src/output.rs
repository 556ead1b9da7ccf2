//! # Output Rendering
//!
//! Text for people, JSON for scripts. Both go to stdout; logs go to stderr.

use std::fmt::Write as _;

use divvy_core::types::display_name;
use divvy_core::{Money, Participant, SettlementResult};
use serde::Serialize;

/// Output format selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Format {
    #[default]
    Text,
    Json,
}

/// JSON document printed by `divvy settle --format json`.
#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    #[serde(flatten)]
    pub result: &'a SettlementResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<&'a str>,
}

fn signed(amount: Money, symbol: &str) -> String {
    if amount.is_positive() {
        format!("+{}", amount.format_with(symbol))
    } else {
        amount.format_with(symbol)
    }
}

/// Renders balances, transfers and the optional summary as plain text.
pub fn render_text(
    participants: &[Participant],
    result: &SettlementResult,
    summary: Option<&str>,
    symbol: &str,
) -> String {
    let name = |id: &str| display_name(participants, id);
    let width = result
        .balances
        .iter()
        .map(|b| name(&b.participant_id).chars().count())
        .max()
        .unwrap_or(0);

    let mut out = String::new();

    out.push_str("Balances\n");
    for balance in &result.balances {
        let _ = writeln!(
            out,
            "  {:<width$}  {}",
            name(&balance.participant_id),
            signed(balance.amount, symbol),
            width = width
        );
    }

    let _ = writeln!(out, "\nTransfers ({})", result.actions.len());
    if result.actions.is_empty() {
        out.push_str("  Everyone is settled up, no transfers needed.\n");
    }
    for action in &result.actions {
        let _ = writeln!(
            out,
            "  {} -> {}: {}",
            name(&action.from_id),
            name(&action.to_id),
            action.amount.format_with(symbol)
        );
    }

    if let Some(summary) = summary {
        out.push_str("\nSummary\n");
        for line in summary.lines() {
            let _ = writeln!(out, "  {}", line);
        }
    }

    out
}
