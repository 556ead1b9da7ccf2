//! # Divvy CLI
//!
//! Settles a group's shared expenses from a JSON snapshot.
//!
//! ## Commands
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  divvy settle trip.json            balances, transfers, summary         │
//! │  divvy settle trip.json -f json    same, machine-readable               │
//! │  divvy check trip.json             entry-form validation report         │
//! │  divvy prompt trip.json            prompt for a hosted text model       │
//! │  divvy config                      effective configuration as TOML      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod error;
mod output;
mod snapshot;

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use divvy_core::{SettlementEngine, SettlementOptions, SettlementResult};
use divvy_report::{summarize, SummaryContext, TemplateGenerator};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::{CliConfig, SummaryMode};
use crate::output::{render_text, Format, JsonReport};
use crate::snapshot::{Snapshot, SnapshotFile};

#[derive(Parser)]
#[command(
    name = "divvy",
    version,
    about = "Split shared expenses and settle up with as few transfers as possible"
)]
struct Cli {
    /// Config file (defaults to the platform config directory)
    #[arg(long, global = true, env = "DIVVY_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute balances and the transfer plan
    Settle {
        /// Snapshot file (JSON)
        file: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,

        /// Skip the summary
        #[arg(long)]
        no_summary: bool,
    },

    /// List every entry-form problem in a snapshot
    Check {
        /// Snapshot file (JSON)
        file: PathBuf,
    },

    /// Print the prompt a hosted text model would receive
    Prompt {
        /// Snapshot file (JSON)
        file: PathBuf,
    },

    /// Show the effective configuration
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = CliConfig::load(cli.config.clone()).context("Failed to load configuration")?;
    init_tracing(&config.log_level);

    match cli.command {
        Commands::Settle {
            file,
            format,
            no_summary,
        } => run_settle(&config, &file, format, no_summary),
        Commands::Check { file } => run_check(&file),
        Commands::Prompt { file } => run_prompt(&config, &file),
        Commands::Config => {
            print!("{}", toml::to_string_pretty(&config)?);
            Ok(())
        }
    }
}

/// Installs the stderr subscriber. `RUST_LOG` wins over the config level.
fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn settle_snapshot(config: &CliConfig, snapshot: &Snapshot) -> Result<SettlementResult> {
    let engine = SettlementEngine::new(SettlementOptions {
        unknown_participants: config.unknown_participants,
    });
    engine
        .settle(&snapshot.participants, &snapshot.expenses)
        .context("Settlement failed")
}

fn run_settle(config: &CliConfig, file: &Path, format: Format, no_summary: bool) -> Result<()> {
    let snapshot = Snapshot::load(file)?;
    let result = settle_snapshot(config, &snapshot)?;
    info!(transfers = result.actions.len(), "Settled snapshot");

    let summary = match (config.summary, no_summary) {
        (SummaryMode::Template, false) => {
            let context = SummaryContext::build(&snapshot.participants, &snapshot.expenses, &result);
            let generator = TemplateGenerator::from_config(&config.report);
            Some(summarize(&generator, &context, &config.report))
        }
        _ => None,
    };

    match format {
        Format::Text => print!(
            "{}",
            render_text(
                &snapshot.participants,
                &result,
                summary.as_deref(),
                &config.report.currency_symbol
            )
        ),
        Format::Json => {
            let report = JsonReport {
                result: &result,
                summary: summary.as_deref(),
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}

fn run_check(file: &Path) -> Result<()> {
    let raw = SnapshotFile::read(file)?;
    let problems = raw.problems();

    if problems.is_empty() {
        println!(
            "OK: {} participants, {} expenses",
            raw.participants.len(),
            raw.expenses.len()
        );
        return Ok(());
    }

    for problem in &problems {
        println!("{}", problem);
    }
    bail!("{} problem(s) found in {}", problems.len(), file.display())
}

fn run_prompt(config: &CliConfig, file: &Path) -> Result<()> {
    let snapshot = Snapshot::load(file)?;
    let result = settle_snapshot(config, &snapshot)?;
    let context = SummaryContext::build(&snapshot.participants, &snapshot.expenses, &result);
    println!("{}", context.prompt()?);
    Ok(())
}
