//! # Validation Module
//!
//! Field validation for the expense-entry surface.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Entry surface (front end / CLI snapshot loader)              │
//! │  ├── THIS MODULE: names, titles, amount strings, group size            │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Settlement engine                                            │
//! │  ├── amount > 0            → CoreError::InvalidExpense                 │
//! │  ├── known participant ids → CoreError::UnknownParticipant             │
//! │  └── unique participant ids → CoreError::DuplicateParticipant          │
//! │                                                                         │
//! │  Titles and names are cosmetic: the engine never rejects them.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use divvy_core::validation::{validate_amount_input, validate_participant_name};
//!
//! assert_eq!(validate_participant_name("  Alice ").unwrap(), "Alice");
//! assert_eq!(validate_amount_input("12.50").unwrap().cents(), 1250);
//! assert!(validate_amount_input("0").is_err());
//! ```

use std::collections::HashSet;

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{Expense, Participant};
use crate::{MAX_EXPENSE_TITLE_LEN, MAX_PARTICIPANT_NAME_LEN, MIN_GROUP_SIZE};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a participant name and returns it trimmed.
///
/// ## Rules
/// - Must not be empty after trimming
/// - At most 50 characters
pub fn validate_participant_name(name: &str) -> ValidationResult<String> {
    validate_text("name", name, MAX_PARTICIPANT_NAME_LEN)
}

/// Validates an expense title and returns it trimmed.
///
/// ## Rules
/// - Must not be empty after trimming
/// - At most 100 characters
pub fn validate_expense_title(title: &str) -> ValidationResult<String> {
    validate_text("title", title, MAX_EXPENSE_TITLE_LEN)
}

fn validate_text(field: &str, value: &str, max: usize) -> ValidationResult<String> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(value.to_string())
}

/// Validates an opaque id.
pub fn validate_id(field: &str, id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Amount Validators
// =============================================================================

/// Validates an expense amount.
///
/// ## Rules
/// - Must be positive (> 0)
/// - At most [`Money::MAX_AMOUNT`]
pub fn validate_amount(amount: Money) -> ValidationResult<()> {
    if !amount.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "amount".to_string(),
        });
    }
    if amount > Money::MAX_AMOUNT {
        return Err(ValidationError::TooLarge {
            field: "amount".to_string(),
            max: Money::MAX_AMOUNT,
        });
    }

    Ok(())
}

/// Parses and validates an amount typed by a user.
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Expense form: Amount                                                   │
/// │                                                                         │
/// │  User types: "12.5"                                                    │
/// │       │                                                                 │
/// │       ▼                                                                 │
/// │  validate_amount_input("12.5") ← THIS FUNCTION                         │
/// │       │                                                                 │
/// │       ├── not a number / 3+ decimals? → InvalidFormat                  │
/// │       ├── <= 0?                       → MustBePositive                 │
/// │       └── OK → Money(1250)                                             │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn validate_amount_input(input: &str) -> ValidationResult<Money> {
    let amount: Money = input.parse().map_err(|e| ValidationError::InvalidFormat {
        field: "amount".to_string(),
        reason: format!("{}", e),
    })?;

    validate_amount(amount)?;
    Ok(amount)
}

// =============================================================================
// Collection Validators
// =============================================================================

/// Validates the participant list before settling.
///
/// ## Rules
/// - At least two participants
/// - Every id non-empty and unique
/// - Every name valid
pub fn validate_group(participants: &[Participant]) -> ValidationResult<()> {
    if participants.len() < MIN_GROUP_SIZE {
        return Err(ValidationError::TooFew {
            field: "participants".to_string(),
            min: MIN_GROUP_SIZE,
            actual: participants.len(),
        });
    }

    let mut seen = HashSet::with_capacity(participants.len());
    for participant in participants {
        validate_id("participant id", &participant.id)?;
        validate_participant_name(&participant.name)?;

        if !seen.insert(participant.id.as_str()) {
            return Err(ValidationError::Duplicate {
                field: "participant id".to_string(),
                value: participant.id.clone(),
            });
        }
    }

    Ok(())
}

/// Validates one expense as the entry form does before adding it.
///
/// ## Rules
/// - Title valid, amount positive, payer set
/// - At least one involved participant (the form refuses an empty split
///   even though the engine tolerates one)
pub fn validate_expense(expense: &Expense) -> ValidationResult<()> {
    validate_id("expense id", &expense.id)?;
    validate_expense_title(&expense.title)?;
    validate_amount(expense.amount)?;
    validate_id("payer", &expense.payer_id)?;

    if expense.involved_ids.is_empty() {
        return Err(ValidationError::Required {
            field: "involved participants".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_participant_name() {
        assert_eq!(validate_participant_name(" Bob ").unwrap(), "Bob");
        assert!(validate_participant_name("").is_err());
        assert!(validate_participant_name("   ").is_err());
        assert!(validate_participant_name(&"A".repeat(50)).is_ok());
        assert!(validate_participant_name(&"A".repeat(51)).is_err());
    }

    #[test]
    fn test_name_length_counts_characters() {
        // 50 multi-byte characters are still 50 characters
        assert!(validate_participant_name(&"明".repeat(50)).is_ok());
    }

    #[test]
    fn test_validate_expense_title() {
        assert!(validate_expense_title("Dinner").is_ok());
        assert!(validate_expense_title("").is_err());
        assert!(validate_expense_title(&"x".repeat(101)).is_err());
    }

    #[test]
    fn test_validate_amount_input() {
        assert_eq!(validate_amount_input("90").unwrap().cents(), 9000);
        assert!(matches!(
            validate_amount_input("-1"),
            Err(ValidationError::MustBePositive { .. })
        ));
        assert!(matches!(
            validate_amount_input("0.00"),
            Err(ValidationError::MustBePositive { .. })
        ));
        assert!(matches!(
            validate_amount_input("ten"),
            Err(ValidationError::InvalidFormat { .. })
        ));
        assert!(matches!(
            validate_amount_input("92233720368547758.07"),
            Err(ValidationError::InvalidFormat { .. })
        ));
        assert!(matches!(
            validate_amount(Money::from_cents(i64::MAX)),
            Err(ValidationError::TooLarge { .. })
        ));
        assert!(validate_amount(Money::MAX_AMOUNT).is_ok());
    }

    #[test]
    fn test_validate_group() {
        let a = Participant::with_id("a", "Alice");
        let b = Participant::with_id("b", "Bob");

        assert!(validate_group(&[a.clone(), b.clone()]).is_ok());
        assert!(matches!(
            validate_group(&[a.clone()]),
            Err(ValidationError::TooFew { actual: 1, .. })
        ));
        assert!(matches!(
            validate_group(&[a.clone(), a.clone()]),
            Err(ValidationError::Duplicate { .. })
        ));
        assert!(validate_group(&[a, Participant::with_id("", "Nobody")]).is_err());
    }

    #[test]
    fn test_validate_expense() {
        let ok = Expense::new("Taxi", Money::from_cents(3000), "a", vec!["b".into()]);
        assert!(validate_expense(&ok).is_ok());

        let unshared = Expense::new("Taxi", Money::from_cents(3000), "a", vec![]);
        assert!(validate_expense(&unshared).is_err());

        let free = Expense::new("Taxi", Money::zero(), "a", vec!["b".into()]);
        assert!(validate_expense(&free).is_err());
    }
}
