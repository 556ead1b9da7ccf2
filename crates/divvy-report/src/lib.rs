//! # divvy-report: Settlement Summaries for Divvy
//!
//! Builds a human-readable summary of a finished settlement.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  participants, expenses, SettlementResult   (read-only borrows)        │
//! │                    │                                                    │
//! │                    ▼                                                    │
//! │         SummaryContext::build()   names resolved, totals computed       │
//! │                    │                                                    │
//! │                    ▼                                                    │
//! │         summarize(generator, ...)                                       │
//! │                    │                                                    │
//! │          ┌─────────┴──────────┐                                         │
//! │          ▼                    ▼                                         │
//! │       Ok(text)          Err(ReportError)                                │
//! │          │                    │  warn! + ReportConfig fallback          │
//! │          ▼                    ▼                                         │
//! │       summary text      fallback text                                   │
//! │                                                                         │
//! │  summarize() never fails: a broken backend costs the user the summary,  │
//! │  never the settlement.                                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//! ```rust
//! use divvy_core::{settle, Expense, Money, Participant};
//! use divvy_report::{summarize, ReportConfig, SummaryContext, TemplateGenerator};
//!
//! let group = vec![Participant::with_id("a", "Alice"), Participant::with_id("b", "Bob")];
//! let hotel = Expense::new("Hotel", Money::from_cents(10000), "a", vec!["a".into(), "b".into()]);
//! let result = settle(&group, &[hotel.clone()]).unwrap();
//!
//! let config = ReportConfig::default();
//! let context = SummaryContext::build(&group, &[hotel], &result);
//! let text = summarize(&TemplateGenerator::from_config(&config), &context, &config);
//! assert!(text.contains("Bob pays Alice $50.00"));
//! ```

pub mod config;
pub mod context;
pub mod error;
pub mod generator;

pub use config::ReportConfig;
pub use context::SummaryContext;
pub use error::{ReportError, ReportResult};
pub use generator::{SummaryGenerator, TemplateGenerator};

use tracing::{debug, warn};

/// Generates a summary, degrading any failure to a fallback message.
pub fn summarize(
    generator: &dyn SummaryGenerator,
    context: &SummaryContext,
    config: &ReportConfig,
) -> String {
    let outcome = generator.generate(context).and_then(|text| {
        if text.trim().is_empty() {
            Err(ReportError::EmptySummary)
        } else {
            Ok(text)
        }
    });

    match outcome {
        Ok(text) => {
            debug!(generator = generator.name(), chars = text.len(), "Summary generated");
            text
        }
        Err(err) => {
            warn!(
                generator = generator.name(),
                error = %err,
                "Summary generation failed, using fallback"
            );
            config.fallback_for(&err).to_string()
        }
    }
}
