//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  Splitting with floats:                                                 │
//! │    10.00 / 3 = 3.3333333333333335 per person                           │
//! │    Hundreds of such debits drift past the one-cent tolerance            │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    1000 cents / 3 = 333 cents, remainder 1                             │
//! │    Shares: 333, 333, 334  → sum is exactly 1000                         │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use divvy_core::money::Money;
//!
//! let dinner = Money::from_cents(1000); // 10.00
//! let shares = dinner.split_evenly(3);
//! assert_eq!(shares, vec![
//!     Money::from_cents(333),
//!     Money::from_cents(333),
//!     Money::from_cents(334),
//! ]);
//!
//! let parsed: Money = "12.5".parse().unwrap();
//! assert_eq!(parsed.cents(), 1250);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};
use std::str::FromStr;
use thiserror::Error;
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the currency's minor unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: balances are negative for debtors
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Serializes as the raw cent count**, so JSON carries `1050`, never `10.5`
///
/// ## Where Money Flows
/// ```text
/// Expense.amount ──► split_evenly() ──► debits ─┐
///                │                              ├──► Balance.amount ──► transfers
///                └──────────────────► credit ───┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Largest magnitude accepted from decimal input: 10^15 cents.
    /// Anything larger parses as [`MoneyParseError::Overflow`].
    pub const MAX_AMOUNT: Money = Money(1_000_000_000_000_000);

    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use divvy_core::money::Money;
    ///
    /// let lunch = Money::from_cents(1099);
    /// assert_eq!(lunch.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from major and minor units.
    ///
    /// For negative amounts only the major unit carries the sign:
    /// `from_major_minor(-5, 50)` is -5.50.
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion (truncated toward zero).
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn minor(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the absolute value, saturating at `i64::MAX` cents.
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.saturating_abs())
    }

    /// `None` if the sum does not fit in `i64` cents.
    #[inline]
    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Money)
    }

    /// `None` if the difference does not fit in `i64` cents.
    #[inline]
    pub fn checked_sub(self, other: Self) -> Option<Self> {
        self.0.checked_sub(other.0).map(Money)
    }

    #[inline]
    pub fn saturating_add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }

    /// Splits the amount into `parts` shares that sum exactly to `self`.
    ///
    /// ## Remainder Distribution
    /// ```text
    /// ┌─────────────────────────────────────────────────────────────────────┐
    /// │  amount = 1000 cents, parts = 3                                     │
    /// │                                                                     │
    /// │  base      = 1000 / 3 = 333                                         │
    /// │  remainder = 1000 % 3 = 1                                           │
    /// │                                                                     │
    /// │  shares = [333, 333, 333 + 1]                                       │
    /// │            └─ the LAST `remainder` shares take one extra cent       │
    /// └─────────────────────────────────────────────────────────────────────┘
    /// ```
    ///
    /// Negative amounts split symmetrically (`-10.00` → `[-3.33, -3.33, -3.34]`).
    /// Returns an empty vector when `parts` is zero.
    ///
    /// ## Example
    /// ```rust
    /// use divvy_core::money::Money;
    ///
    /// let shares = Money::from_cents(100).split_evenly(4);
    /// assert!(shares.iter().all(|s| s.cents() == 25));
    /// ```
    pub fn split_evenly(&self, parts: usize) -> Vec<Money> {
        if parts == 0 {
            return Vec::new();
        }

        let n = parts as i64;
        let base = self.0 / n;
        // Same sign as self.0, magnitude < n
        let remainder = self.0 % n;
        let step = remainder.signum();
        let extra_from = parts - remainder.unsigned_abs() as usize;

        (0..parts)
            .map(|idx| {
                if idx >= extra_from {
                    Money(base + step)
                } else {
                    Money(base)
                }
            })
            .collect()
    }

    /// Formats with a currency symbol: `-$5.50`, `NT$120.00`.
    pub fn format_with(&self, symbol: &str) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        format!("{}{}{}.{:02}", sign, symbol, self.major().abs(), self.minor())
    }
}

// =============================================================================
// Parsing
// =============================================================================

/// Errors from parsing a decimal money string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoneyParseError {
    #[error("empty amount")]
    Empty,

    #[error("invalid amount format: '{0}'")]
    InvalidFormat(String),

    #[error("amount '{0}' has more than two decimal places")]
    TooPrecise(String),

    #[error("amount '{0}' is out of range")]
    Overflow(String),
}

impl FromStr for Money {
    type Err = MoneyParseError;

    /// Parses `"12"`, `"12.5"`, `"12.50"`, `"-3.10"` and `"$4.00"` exactly.
    ///
    /// Unlike a float conversion, more than two decimals is rejected instead
    /// of silently rounded.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(MoneyParseError::Empty);
        }

        let (negative, rest) = match trimmed.strip_prefix('-') {
            Some(stripped) => (true, stripped),
            None => (false, trimmed),
        };
        let rest = rest.strip_prefix('$').unwrap_or(rest);

        let (major_str, minor_str) = match rest.split_once('.') {
            Some((major, minor)) => (major, minor),
            None => (rest, ""),
        };

        let is_digits = |part: &str| part.chars().all(|c| c.is_ascii_digit());
        if major_str.is_empty() || !is_digits(major_str) || !is_digits(minor_str) {
            return Err(MoneyParseError::InvalidFormat(trimmed.to_string()));
        }
        if minor_str.len() > 2 {
            return Err(MoneyParseError::TooPrecise(trimmed.to_string()));
        }

        let overflow = || MoneyParseError::Overflow(trimmed.to_string());
        let major: i64 = major_str.parse().map_err(|_| overflow())?;
        let minor: i64 = match minor_str.len() {
            0 => 0,
            1 => minor_str.parse::<i64>().map_err(|_| overflow())? * 10,
            _ => minor_str.parse().map_err(|_| overflow())?,
        };

        let cents = major
            .checked_mul(100)
            .and_then(|c| c.checked_add(minor))
            .filter(|c| *c <= Money::MAX_AMOUNT.0)
            .ok_or_else(overflow)?;

        Ok(Money(if negative { -cents } else { cents }))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Plain decimal rendering (`-5.50`). Use [`Money::format_with`] for a symbol.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_with(""))
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Neg for Money {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Money(-self.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.major(), 10);
        assert_eq!(money.minor(), 99);
    }

    #[test]
    fn test_from_major_minor() {
        assert_eq!(Money::from_major_minor(10, 99).cents(), 1099);
        assert_eq!(Money::from_major_minor(-5, 50).cents(), -550);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(1099).to_string(), "10.99");
        assert_eq!(Money::from_cents(500).to_string(), "5.00");
        assert_eq!(Money::from_cents(-550).to_string(), "-5.50");
        assert_eq!(Money::from_cents(-5).to_string(), "-0.05");
        assert_eq!(Money::zero().to_string(), "0.00");
    }

    #[test]
    fn test_format_with_symbol() {
        assert_eq!(Money::from_cents(12000).format_with("NT$"), "NT$120.00");
        assert_eq!(Money::from_cents(-550).format_with("$"), "-$5.50");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!((-a).cents(), -1000);

        let total: Money = [a, b, -b].iter().sum();
        assert_eq!(total, a);
    }

    #[test]
    fn test_split_evenly_with_remainder() {
        let shares = Money::from_cents(1000).split_evenly(3);
        let cents: Vec<i64> = shares.iter().map(Money::cents).collect();
        assert_eq!(cents, vec![333, 333, 334]);
        assert_eq!(shares.iter().sum::<Money>().cents(), 1000);
    }

    #[test]
    fn test_split_evenly_spreads_remainder_over_last_shares() {
        let cents: Vec<i64> = Money::from_cents(1002)
            .split_evenly(4)
            .iter()
            .map(Money::cents)
            .collect();
        assert_eq!(cents, vec![250, 250, 251, 251]);
    }

    #[test]
    fn test_split_evenly_negative() {
        let cents: Vec<i64> = Money::from_cents(-1000)
            .split_evenly(3)
            .iter()
            .map(Money::cents)
            .collect();
        assert_eq!(cents, vec![-333, -333, -334]);
    }

    #[test]
    fn test_split_evenly_edge_cases() {
        assert!(Money::from_cents(100).split_evenly(0).is_empty());
        assert_eq!(Money::from_cents(7).split_evenly(1), vec![Money::from_cents(7)]);

        // More parts than cents
        let shares = Money::from_cents(2).split_evenly(5);
        let cents: Vec<i64> = shares.iter().map(Money::cents).collect();
        assert_eq!(cents, vec![0, 0, 0, 1, 1]);
    }

    #[test]
    fn test_parse_valid() {
        assert_eq!("12".parse::<Money>().unwrap().cents(), 1200);
        assert_eq!("12.5".parse::<Money>().unwrap().cents(), 1250);
        assert_eq!("12.50".parse::<Money>().unwrap().cents(), 1250);
        assert_eq!("0.07".parse::<Money>().unwrap().cents(), 7);
        assert_eq!("-3.10".parse::<Money>().unwrap().cents(), -310);
        assert_eq!(" $4.00 ".parse::<Money>().unwrap().cents(), 400);
        assert_eq!("5.".parse::<Money>().unwrap().cents(), 500);
    }

    #[test]
    fn test_parse_invalid() {
        assert_eq!("".parse::<Money>(), Err(MoneyParseError::Empty));
        assert!(matches!(
            "3.333".parse::<Money>(),
            Err(MoneyParseError::TooPrecise(_))
        ));
        assert!(matches!(
            "abc".parse::<Money>(),
            Err(MoneyParseError::InvalidFormat(_))
        ));
        assert!(matches!(
            ".50".parse::<Money>(),
            Err(MoneyParseError::InvalidFormat(_))
        ));
        assert!(matches!(
            "1.2.3".parse::<Money>(),
            Err(MoneyParseError::InvalidFormat(_))
        ));
        assert!(matches!(
            "99999999999999999999".parse::<Money>(),
            Err(MoneyParseError::Overflow(_))
        ));
    }

    #[test]
    fn test_parse_rejects_amounts_above_max() {
        assert_eq!(
            "10000000000000.00".parse::<Money>().unwrap(),
            Money::MAX_AMOUNT
        );
        assert!(matches!(
            "10000000000000.01".parse::<Money>(),
            Err(MoneyParseError::Overflow(_))
        ));
        assert!(matches!(
            "92233720368547758.07".parse::<Money>(),
            Err(MoneyParseError::Overflow(_))
        ));
        assert!(matches!(
            "-92233720368547758.07".parse::<Money>(),
            Err(MoneyParseError::Overflow(_))
        ));
    }

    #[test]
    fn test_checked_arithmetic() {
        let max = Money::from_cents(i64::MAX);
        assert_eq!(max.checked_add(Money::from_cents(1)), None);
        assert_eq!(
            Money::from_cents(5).checked_sub(Money::from_cents(7)),
            Some(Money::from_cents(-2))
        );
        assert_eq!(Money::from_cents(i64::MIN).checked_sub(Money::from_cents(1)), None);
        assert_eq!(max.saturating_add(max), max);
        assert_eq!(Money::from_cents(i64::MIN).abs(), max);
    }

    #[test]
    fn test_serializes_as_cents() {
        let json = serde_json::to_string(&Money::from_cents(1050)).unwrap();
        assert_eq!(json, "1050");
        let back: Money = serde_json::from_str("-25").unwrap();
        assert_eq!(back.cents(), -25);
    }
}
