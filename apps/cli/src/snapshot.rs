//! # Snapshot Loading
//!
//! Reads a JSON snapshot of participants and expenses and turns it into
//! engine inputs.
//!
//! ## File Format
//! ```json
//! {
//!   "participants": [
//!     { "id": "a", "name": "Alice" },
//!     { "name": "Bob" }
//!   ],
//!   "expenses": [
//!     { "title": "Dinner", "amount": "90.00", "payerId": "a", "involvedIds": ["a", "Bob"] }
//!   ]
//! }
//! ```
//!
//! - A participant without `id` uses its trimmed name as id.
//! - An expense without `id` gets `e1`, `e2`, ... by position.
//! - `amount` is a decimal string (`"12.50"`) or a whole number of major
//!   units (`90`); never a float.
//! - `date` is RFC 3339 and defaults to the load time.

use std::collections::HashSet;
use std::path::Path;

use chrono::{DateTime, Utc};
use divvy_core::validation::{
    validate_amount_input, validate_expense, validate_expense_title, validate_group,
    validate_participant_name, ValidationResult,
};
use divvy_core::{Expense, Participant, ParticipantId};
use serde::Deserialize;
use tracing::debug;

use crate::error::{CliError, CliResult};

/// Amount as written in the snapshot.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum AmountInput {
    Whole(i64),
    Decimal(String),
}

impl AmountInput {
    fn as_input(&self) -> String {
        match self {
            AmountInput::Whole(major) => major.to_string(),
            AmountInput::Decimal(text) => text.clone(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ParticipantInput {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseInput {
    #[serde(default)]
    pub id: Option<String>,
    pub title: String,
    pub amount: AmountInput,
    pub payer_id: ParticipantId,
    #[serde(default)]
    pub involved_ids: Vec<ParticipantId>,
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
}

/// Raw snapshot file contents.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SnapshotFile {
    #[serde(default)]
    pub participants: Vec<ParticipantInput>,
    #[serde(default)]
    pub expenses: Vec<ExpenseInput>,
}

/// Validated engine inputs.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub participants: Vec<Participant>,
    pub expenses: Vec<Expense>,
}

impl Snapshot {
    /// Reads and converts a snapshot file.
    pub fn load(path: &Path) -> CliResult<Self> {
        let raw = SnapshotFile::read(path)?;
        let snapshot = raw.into_snapshot()?;
        debug!(
            ?path,
            participants = snapshot.participants.len(),
            expenses = snapshot.expenses.len(),
            "Snapshot loaded"
        );
        Ok(snapshot)
    }
}

impl ParticipantInput {
    fn to_participant(&self) -> ValidationResult<Participant> {
        let name = validate_participant_name(&self.name)?;
        let id = self
            .id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map_or_else(|| name.clone(), str::to_string);
        Ok(Participant::with_id(id, name))
    }
}

impl ExpenseInput {
    fn to_expense(&self, idx: usize, loaded_at: DateTime<Utc>) -> ValidationResult<Expense> {
        let title = validate_expense_title(&self.title)?;
        let amount = validate_amount_input(&self.amount.as_input())?;

        Ok(Expense {
            id: self.id.clone().unwrap_or_else(|| format!("e{}", idx + 1)),
            title,
            amount,
            payer_id: self.payer_id.clone(),
            involved_ids: self.involved_ids.clone(),
            date: self.date.unwrap_or(loaded_at),
        })
    }
}

impl SnapshotFile {
    pub fn read(path: &Path) -> CliResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| CliError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&contents).map_err(|source| CliError::SnapshotParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Validates names, titles and amounts, filling in default ids.
    /// Stops at the first invalid entry.
    pub fn into_snapshot(self) -> CliResult<Snapshot> {
        let participants = self
            .participants
            .iter()
            .enumerate()
            .map(|(idx, input)| {
                input.to_participant().map_err(|source| CliError::InvalidEntry {
                    location: format!("participants[{}]", idx),
                    source,
                })
            })
            .collect::<CliResult<Vec<_>>>()?;

        let loaded_at = Utc::now();
        let expenses = self
            .expenses
            .iter()
            .enumerate()
            .map(|(idx, input)| {
                input.to_expense(idx, loaded_at).map_err(|source| CliError::InvalidEntry {
                    location: format!("expenses[{}]", idx),
                    source,
                })
            })
            .collect::<CliResult<Vec<_>>>()?;

        Ok(Snapshot {
            participants,
            expenses,
        })
    }

    /// Runs every entry-form check over the file and returns all problems,
    /// each prefixed with its location. Empty means the snapshot is clean.
    pub fn problems(&self) -> Vec<String> {
        let mut problems = Vec::new();

        let mut participants = Vec::with_capacity(self.participants.len());
        for (idx, input) in self.participants.iter().enumerate() {
            match input.to_participant() {
                Ok(participant) => participants.push(participant),
                Err(err) => problems.push(format!("participants[{}]: {}", idx, err)),
            }
        }
        if let Err(err) = validate_group(&participants) {
            problems.push(format!("participants: {}", err));
        }

        let known: HashSet<&str> = participants.iter().map(|p| p.id.as_str()).collect();
        let loaded_at = Utc::now();
        for (idx, input) in self.expenses.iter().enumerate() {
            let location = format!("expenses[{}]", idx);

            let title = validate_expense_title(&input.title).err();
            let amount = validate_amount_input(&input.amount.as_input()).err();
            if title.is_some() || amount.is_some() {
                for err in title.into_iter().chain(amount) {
                    problems.push(format!("{}: {}", location, err));
                }
            } else if let Err(err) = input
                .to_expense(idx, loaded_at)
                .and_then(|expense| validate_expense(&expense))
            {
                problems.push(format!("{}: {}", location, err));
            }

            let referenced = std::iter::once(&input.payer_id).chain(&input.involved_ids);
            for id in referenced.filter(|id| !id.is_empty() && !known.contains(id.as_str())) {
                problems.push(format!("{}: unknown participant {}", location, id));
            }
        }

        debug!(problems = problems.len(), "Snapshot checked");
        problems
    }
}
