//! # Summary Generators
//!
//! The [`SummaryGenerator`] trait is the seam for a hosted text-generation
//! backend. [`TemplateGenerator`] is the built-in, deterministic backend: it
//! needs no credentials and never fails.

use divvy_core::Money;

use crate::config::ReportConfig;
use crate::context::SummaryContext;
use crate::error::ReportResult;

/// Produces a natural-language summary from a [`SummaryContext`].
///
/// Implementations must treat the context as read-only input. Errors are
/// reported as [`crate::ReportError`] and turned into fallback text by
/// [`crate::summarize`].
///
/// `MissingCredentials` and `Unavailable` are the outcomes of a hosted
/// text-model backend; [`TemplateGenerator`] runs locally and never
/// returns them.
pub trait SummaryGenerator {
    /// Short backend name for logs.
    fn name(&self) -> &str;

    fn generate(&self, context: &SummaryContext) -> ReportResult<String>;
}

// =============================================================================
// Template Generator
// =============================================================================

/// Fills a fixed three-part template: remarks, overview, reminder.
#[derive(Debug, Clone)]
pub struct TemplateGenerator {
    currency_symbol: String,
}

impl TemplateGenerator {
    pub fn new(currency_symbol: impl Into<String>) -> Self {
        TemplateGenerator {
            currency_symbol: currency_symbol.into(),
        }
    }

    pub fn from_config(config: &ReportConfig) -> Self {
        Self::new(config.currency_symbol.clone())
    }

    fn money(&self, amount: Money) -> String {
        amount.format_with(&self.currency_symbol)
    }

    fn remarks(&self, context: &SummaryContext) -> String {
        let spender = context.big_spender.as_deref();
        let freeloader = context.freeloader.as_deref();

        match (spender, freeloader) {
            (None, _) => "Spending remarks: nobody has paid for anything yet.".to_string(),
            (Some(s), Some(f)) if s != f => format!(
                "Spending remarks: {} was the big spender this time, and {} joined the most \
                 while paying the least.",
                s, f
            ),
            (Some(s), _) => format!(
                "Spending remarks: {} was the big spender this time and kept everyone fed.",
                s
            ),
        }
    }

    fn overview(&self, context: &SummaryContext) -> String {
        let count = context.expenses.len();
        format!(
            "Overview: {} expense{} totalling {}, about {} per person.",
            count,
            if count == 1 { "" } else { "s" },
            self.money(context.total_spend),
            self.money(context.per_capita)
        )
    }

    fn reminder(&self, context: &SummaryContext) -> String {
        if context.actions.is_empty() {
            return "Reminder: everyone is square, no transfers needed.".to_string();
        }

        let transfers: Vec<String> = context
            .actions
            .iter()
            .map(|a| format!("{} pays {} {}", a.from, a.to, self.money(a.amount)))
            .collect();

        format!(
            "Reminder: {}. Settle up before the next outing!",
            transfers.join(", ")
        )
    }
}

impl Default for TemplateGenerator {
    fn default() -> Self {
        Self::from_config(&ReportConfig::default())
    }
}

impl SummaryGenerator for TemplateGenerator {
    fn name(&self) -> &str {
        "template"
    }

    fn generate(&self, context: &SummaryContext) -> ReportResult<String> {
        Ok([
            self.remarks(context),
            self.overview(context),
            self.reminder(context),
        ]
        .join("\n"))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
